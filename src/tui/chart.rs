//! Bar chart of totals per category

use std::collections::BTreeMap;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::display::format_money;

use super::terminal::{init_terminal, restore_terminal, Tui};

/// Bar heights are in hundredths so small totals stay visible
fn bar_height(value: Decimal) -> u64 {
    if value <= Decimal::ZERO {
        return 0;
    }
    value
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.round().to_u64())
        .unwrap_or(u64::MAX)
}

/// One bar per category, labelled with the category and its total
pub fn build_bars(totals: &BTreeMap<String, Decimal>, symbol: &str) -> Vec<Bar<'static>> {
    totals
        .iter()
        .map(|(name, value)| {
            Bar::default()
                .label(Line::from(name.clone()))
                .value(bar_height(*value))
                .text_value(format_money(*value, symbol))
        })
        .collect()
}

/// Draw the chart into `area`
pub fn render_category_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    totals: &BTreeMap<String, Decimal>,
    symbol: &str,
) {
    let [chart_area, hint_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Expenses by Category ");

    if totals.is_empty() {
        let empty = Paragraph::new("No expenses recorded.").block(block);
        frame.render_widget(empty, chart_area);
    } else {
        let bars = build_bars(totals, symbol);
        let inner_width = chart_area.width.saturating_sub(2) as usize;
        let count = bars.len().max(1);
        let bar_width = (inner_width / count).saturating_sub(1).clamp(3, 12) as u16;

        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(1)
            .bar_style(Style::default().cyan())
            .value_style(Style::default().black().on_cyan().add_modifier(Modifier::BOLD))
            .label_style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(chart, chart_area);
    }

    let hint = Paragraph::new(Line::from("Category (x) / Amount (y)   q/Esc: close").dim());
    frame.render_widget(hint, hint_area);
}

/// Show the chart until q, Esc or Enter is pressed
pub fn run_chart(totals: &BTreeMap<String, Decimal>, symbol: &str) -> Result<()> {
    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, totals, symbol);
    restore_terminal()?;
    result
}

fn event_loop(terminal: &mut Tui, totals: &BTreeMap<String, Decimal>, symbol: &str) -> Result<()> {
    loop {
        terminal.draw(|frame| render_category_chart(frame, frame.area(), totals, symbol))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press
                && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter)
            {
                return Ok(());
            }
        }
    }
}
