use logtally_types::{LevelCounts, Record};

/// How level labels are keyed when counting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CasePolicy {
    /// Count each spelling separately, exactly as written in the source
    #[default]
    Preserve,
    /// Merge spellings under their upper-cased label
    Fold,
}

/// Tallies records per level label
#[derive(Clone, Copy, Debug, Default)]
pub struct LevelAggregator {
    case_policy: CasePolicy,
}

impl LevelAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_case_policy(mut self, case_policy: CasePolicy) -> Self {
        self.case_policy = case_policy;
        self
    }

    /// Get record count per level, in first-seen order
    pub fn aggregate(&self, records: &[Record]) -> LevelCounts {
        let mut counts = LevelCounts::new();

        for record in records {
            match self.case_policy {
                CasePolicy::Preserve => counts.increment(record.level()),
                CasePolicy::Fold => counts.increment(&record.level().to_uppercase()),
            }
        }

        counts
    }
}
