use std::fmt::{self, Display};

/// Counters of one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Transactions a dry run would have tried to import
    pub dry_run: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Imported,
    Failed,
    Skipped,
}

impl ImportStats {
    pub fn new_dry_run(num_transactions: usize) -> Self {
        Self {
            dry_run: num_transactions,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: SubmissionOutcome) {
        match outcome {
            SubmissionOutcome::Imported => self.success += 1,
            SubmissionOutcome::Failed => self.failed += 1,
            SubmissionOutcome::Skipped => self.skipped += 1,
        }
    }
}

impl Display for ImportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "success: {}, failed: {}, skipped: {}",
            self.success, self.failed, self.skipped
        )?;
        if self.dry_run > 0 {
            write!(f, ", dry_run: {}", self.dry_run)?;
        }
        Ok(())
    }
}
