//! Ledger store backed by `expenses.txt`
//!
//! Every operation works from the file on disk: adds append a line, deletes
//! rewrite the file without the removed record, and reads scan the whole
//! file. Mutating operations hold the store's lock for their whole duration.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::settings::MalformedLinePolicy;
use crate::error::{LedgerError, LedgerResult};
use crate::models::ExpenseRecord;

use super::file_io::{append_line, ensure_file, read_lines, write_lines_atomic};

/// Result of a full ledger scan
#[derive(Debug, Clone, Default)]
pub struct LedgerScan {
    /// Records in on-disk order
    pub records: Vec<ExpenseRecord>,
    /// Number of malformed lines that were skipped
    pub skipped: usize,
}

/// File-backed expense ledger
pub struct LedgerStore {
    path: PathBuf,
    policy: MalformedLinePolicy,
    lock: Mutex<()>,
}

impl LedgerStore {
    /// Open a ledger at `path`, creating an empty file if it doesn't exist
    pub fn open(path: impl Into<PathBuf>, policy: MalformedLinePolicy) -> LedgerResult<Self> {
        let path = path.into();
        ensure_file(&path)?;
        debug!(path = %path.display(), ?policy, "opened ledger");

        Ok(Self {
            path,
            policy,
            lock: Mutex::new(()),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How malformed lines are handled during scans
    pub fn policy(&self) -> MalformedLinePolicy {
        self.policy
    }

    fn guard(&self) -> LedgerResult<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire ledger lock: {}", e)))
    }

    /// Validate and append a new expense
    pub fn add_expense(
        &self,
        date: &str,
        category: &str,
        amount: &str,
    ) -> LedgerResult<ExpenseRecord> {
        let record = ExpenseRecord::parse(date, category, amount)?;

        let _guard = self.guard()?;
        append_line(&self.path, &record.to_line())?;
        info!(record = %record, "expense added");

        Ok(record)
    }

    /// Delete the first record structurally equal to the given triple
    ///
    /// The triple goes through the same validation as an add so it is compared
    /// against its stored form. Returns `false` when nothing matched, in which
    /// case the file is left untouched.
    pub fn delete_expense(&self, date: &str, category: &str, amount: &str) -> LedgerResult<bool> {
        let target = ExpenseRecord::parse(date, category, amount)?;
        self.delete_record(&target)
    }

    /// Delete the first record structurally equal to `target`
    ///
    /// Every other line, including blank and skipped malformed ones, is
    /// written back exactly as it was read.
    pub fn delete_record(&self, target: &ExpenseRecord) -> LedgerResult<bool> {
        let _guard = self.guard()?;

        let mut lines = read_lines(&self.path)?;
        let mut found = None;
        for (index, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match ExpenseRecord::from_line(line) {
                Ok(record) if record.same_entry(target) => {
                    found = Some(index);
                    break;
                }
                Ok(_) => {}
                Err(reason) => {
                    if self.policy == MalformedLinePolicy::Fail {
                        return Err(LedgerError::Malformed {
                            line: index + 1,
                            reason,
                        });
                    }
                }
            }
        }

        let Some(index) = found else {
            debug!(record = %target, "no matching expense to delete");
            return Ok(false);
        };

        lines.remove(index);
        write_lines_atomic(&self.path, &lines)?;
        info!(record = %target, "expense deleted");

        Ok(true)
    }

    /// Scan the ledger, reporting how many malformed lines were skipped
    pub fn scan(&self) -> LedgerResult<LedgerScan> {
        let _guard = self.guard()?;
        self.scan_unlocked()
    }

    fn scan_unlocked(&self) -> LedgerResult<LedgerScan> {
        let mut scan = LedgerScan::default();

        for (index, line) in read_lines(&self.path)?.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match ExpenseRecord::from_line(line) {
                Ok(record) => scan.records.push(record),
                Err(reason) => match self.policy {
                    MalformedLinePolicy::Fail => {
                        return Err(LedgerError::Malformed {
                            line: index + 1,
                            reason,
                        });
                    }
                    MalformedLinePolicy::Skip => {
                        warn!(line = index + 1, %reason, "skipping malformed ledger line");
                        scan.skipped += 1;
                    }
                },
            }
        }

        debug!(
            records = scan.records.len(),
            skipped = scan.skipped,
            "scanned ledger"
        );
        Ok(scan)
    }

    /// All records in on-disk order
    pub fn list_expenses(&self) -> LedgerResult<Vec<ExpenseRecord>> {
        Ok(self.scan()?.records)
    }

    /// Sum of all amounts (zero for an empty ledger)
    pub fn total_amount(&self) -> LedgerResult<Decimal> {
        sum_amounts(&self.list_expenses()?)
    }

    /// Sum of amounts grouped by category
    pub fn aggregate_by_category(&self) -> LedgerResult<BTreeMap<String, Decimal>> {
        totals_by_category(&self.list_expenses()?)
    }

    /// Write the ledger to `destination` as CSV with a header row
    ///
    /// Returns the number of data rows written. Not atomic: a failure may
    /// leave a partial file behind.
    pub fn export_csv(&self, destination: impl AsRef<Path>) -> LedgerResult<usize> {
        let destination = destination.as_ref();
        let records = self.list_expenses()?;

        let file = File::create(destination).map_err(|e| {
            LedgerError::Storage(format!(
                "Failed to create file {}: {}",
                destination.display(),
                e
            ))
        })?;
        crate::export::csv::write_expenses_csv(BufWriter::new(file), &records)?;
        info!(
            path = %destination.display(),
            rows = records.len(),
            "exported ledger to CSV"
        );

        Ok(records.len())
    }
}

/// Sum the amounts of a record list
pub fn sum_amounts(records: &[ExpenseRecord]) -> LedgerResult<Decimal> {
    records.iter().try_fold(Decimal::ZERO, |total, r| {
        total
            .checked_add(r.amount)
            .ok_or_else(|| LedgerError::Overflow("sum of all amounts".into()))
    })
}

/// Group a record list by category and sum each group
pub fn totals_by_category(records: &[ExpenseRecord]) -> LedgerResult<BTreeMap<String, Decimal>> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for record in records {
        let total = totals.entry(record.category.clone()).or_default();
        *total = total.checked_add(record.amount).ok_or_else(|| {
            LedgerError::Overflow(format!("sum of category '{}'", record.category))
        })?;
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, LedgerStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::open(
            temp_dir.path().join("expenses.txt"),
            MalformedLinePolicy::Fail,
        )
        .unwrap();
        (temp_dir, store)
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_open_creates_empty_file() {
        let (_temp_dir, store) = create_test_store();
        assert!(store.path().exists());
        assert!(store.list_expenses().unwrap().is_empty());
        assert_eq!(store.total_amount().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_missing_file_lists_empty() {
        let (_temp_dir, store) = create_test_store();
        fs::remove_file(store.path()).unwrap();
        assert!(store.list_expenses().unwrap().is_empty());
    }

    #[test]
    fn test_add_appends_at_end() {
        let (_temp_dir, store) = create_test_store();
        store.add_expense("2024-01-01", "Food", "10.00").unwrap();
        let before = store.list_expenses().unwrap();

        let added = store.add_expense("2024-01-02", "Travel", "20.00").unwrap();
        let after = store.list_expenses().unwrap();

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after.last().unwrap(), &added);
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "2024-01-01,Food,10.00\n2024-01-02,Travel,20.00\n"
        );
    }

    #[test]
    fn test_add_validation_errors_leave_file_untouched() {
        let (_temp_dir, store) = create_test_store();

        assert!(matches!(
            store.add_expense("2024-13-40", "Food", "10"),
            Err(LedgerError::InvalidDate(_))
        ));
        assert!(matches!(
            store.add_expense("2024-01-01", "Food", "abc"),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            store.add_expense("2024-01-01", "", "10"),
            Err(LedgerError::MissingField(_))
        ));

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
    }

    #[test]
    fn test_delete_removes_first_match_only() {
        let (_temp_dir, store) = create_test_store();
        store.add_expense("2024-01-01", "Food", "10.00").unwrap();
        store.add_expense("2024-01-02", "Travel", "20.00").unwrap();
        store.add_expense("2024-01-01", "Food", "10.00").unwrap();
        store.add_expense("2024-01-03", "Rent", "500").unwrap();

        assert!(store.delete_expense("2024-01-01", "Food", "10.00").unwrap());

        let lines: Vec<String> = store
            .list_expenses()
            .unwrap()
            .iter()
            .map(ExpenseRecord::to_line)
            .collect();
        assert_eq!(
            lines,
            vec![
                "2024-01-02,Travel,20.00",
                "2024-01-01,Food,10.00",
                "2024-01-03,Rent,500",
            ]
        );
    }

    #[test]
    fn test_delete_non_matching_is_noop() {
        let (_temp_dir, store) = create_test_store();
        store.add_expense("2024-01-01", "Food", "10.00").unwrap();

        // Same value, different text form
        assert!(!store.delete_expense("2024-01-01", "Food", "10").unwrap());
        assert!(!store.delete_expense("2024-01-01", "Travel", "10.00").unwrap());
        assert_eq!(store.list_expenses().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_last_record_leaves_empty_file() {
        let (_temp_dir, store) = create_test_store();
        store.add_expense("2024-01-01", "Food", "10.00").unwrap();

        assert!(store.delete_expense("2024-01-01", "Food", "10.00").unwrap());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
        assert!(!store.path().with_file_name("expenses.txt.tmp").exists());
    }

    #[test]
    fn test_aggregate_and_total() {
        let (_temp_dir, store) = create_test_store();
        store.add_expense("2024-01-01", "Food", "10.00").unwrap();
        store.add_expense("2024-01-02", "Food", "5.50").unwrap();
        store.add_expense("2024-01-03", "Travel", "20.00").unwrap();

        let totals = store.aggregate_by_category().unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["Food"], dec("15.50"));
        assert_eq!(totals["Travel"], dec("20.00"));

        assert_eq!(store.total_amount().unwrap(), dec("35.50"));
    }

    #[test]
    fn test_malformed_line_fails_scan() {
        let (_temp_dir, store) = create_test_store();
        fs::write(
            store.path(),
            "2024-01-01,Food,10\n2024-01-02,Food,drinks,5\n",
        )
        .unwrap();

        let err = store.list_expenses().unwrap_err();
        assert!(matches!(err, LedgerError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_malformed_line_skipped_with_count() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.txt");
        fs::write(
            &path,
            "2024-01-01,Food,10\nnot a record\n\n2024-01-03,Rent,abc\n2024-01-04,Travel,7\n",
        )
        .unwrap();

        let store = LedgerStore::open(&path, MalformedLinePolicy::Skip).unwrap();
        let scan = store.scan().unwrap();

        assert_eq!(scan.records.len(), 2);
        assert_eq!(scan.skipped, 2);
        assert_eq!(store.total_amount().unwrap(), dec("17"));
    }

    #[test]
    fn test_delete_keeps_other_lines_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.txt");
        fs::write(
            &path,
            "2024-1-5,Food,10.0\nlegacy,line\n\n2024-01-02,Rent,5\n2024-01-03,Travel,7\n",
        )
        .unwrap();

        let store = LedgerStore::open(&path, MalformedLinePolicy::Skip).unwrap();
        assert!(store.delete_expense("2024-01-02", "Rent", "5").unwrap());

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "2024-1-5,Food,10.0\nlegacy,line\n\n2024-01-03,Travel,7\n"
        );
    }

    #[test]
    fn test_delete_matches_non_canonical_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.txt");
        fs::write(&path, "2024-1-5,Food,10.0\n2024-01-06,Rent,5\n").unwrap();

        let store = LedgerStore::open(&path, MalformedLinePolicy::Fail).unwrap();
        assert!(store.delete_expense("2024-01-05", "Food", "10.0").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "2024-01-06,Rent,5\n");
    }

    #[test]
    fn test_delete_fails_on_malformed_line_by_default() {
        let (_temp_dir, store) = create_test_store();
        fs::write(store.path(), "not a record\n2024-01-02,Rent,5\n").unwrap();

        let err = store.delete_expense("2024-01-02", "Rent", "5").unwrap_err();
        assert!(matches!(err, LedgerError::Malformed { line: 1, .. }));
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "not a record\n2024-01-02,Rent,5\n"
        );
    }

    #[test]
    fn test_totals_overflow_is_an_error() {
        let (_temp_dir, store) = create_test_store();
        store
            .add_expense("2024-01-01", "Food", "70000000000000000000000000000")
            .unwrap();
        store
            .add_expense("2024-01-02", "Food", "70000000000000000000000000000")
            .unwrap();

        assert!(matches!(
            store.total_amount(),
            Err(LedgerError::Overflow(_))
        ));
        assert!(matches!(
            store.aggregate_by_category(),
            Err(LedgerError::Overflow(_))
        ));
        assert_eq!(store.list_expenses().unwrap().len(), 2);
    }

    #[test]
    fn test_export_csv_round_trip() {
        let (temp_dir, store) = create_test_store();
        store.add_expense("2024-01-01", "Food", "10.00").unwrap();
        store.add_expense("2024-01-02", "Travel", "-3.25").unwrap();

        let out = temp_dir.path().join("expenses.csv");
        assert_eq!(store.export_csv(&out).unwrap(), 2);

        let mut reader = csv::Reader::from_path(&out).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(vec!["Date", "Category", "Amount"])
        );

        let parsed: Vec<ExpenseRecord> = reader
            .records()
            .map(|row| {
                let row = row.unwrap();
                ExpenseRecord::parse(&row[0], &row[1], &row[2]).unwrap()
            })
            .collect();
        assert_eq!(parsed, store.list_expenses().unwrap());
    }

    #[test]
    fn test_export_to_missing_directory_is_storage_error() {
        let (temp_dir, store) = create_test_store();
        let out = temp_dir.path().join("no-such-dir").join("expenses.csv");

        let err = store.export_csv(&out).unwrap_err();
        assert!(err.is_storage());
    }
}
