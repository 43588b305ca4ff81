/// Soft indexing budget shown next to the consumption figure, in thousands of documents.
pub const INDEXING_BUDGET_K: u64 = 100;

/// Consumption above this many thousand documents raises the warning indicator.
pub const INDEXING_WARNING_K: f64 = 10.0;

/// Total indexed documents across all tenants, scaled to thousands for display.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndexConsumption {
    total_docs: f64,
}

impl IndexConsumption {
    /// The endpoint reports a plain number; fractional totals are kept as-is.
    pub fn from_total_docs(total_docs: f64) -> Self {
        Self { total_docs }
    }

    pub fn total_docs(&self) -> f64 {
        self.total_docs
    }

    pub fn scaled_k(&self) -> f64 {
        self.total_docs / 1000.0
    }

    /// Rounded to the nearest thousand.
    pub fn display_k(&self) -> u64 {
        self.scaled_k().round() as u64
    }

    pub fn is_over_warning(&self) -> bool {
        self.scaled_k() > INDEXING_WARNING_K
    }
}
