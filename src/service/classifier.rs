use crate::config::LedgerMarkers;

/// Decides which ledger entries are income and which are payroll.
pub trait LedgerClassifier: Send + Sync {
    fn is_income(&self, category_id: &str) -> bool;
    fn is_salary(&self, item_id: &str) -> bool;
    /// Last day of month (inclusive) on which salary counts toward the previous month.
    fn salary_cutoff_day(&self) -> u32;
}

/// Classifier built from the configured sentinel ids.
#[derive(Debug, Clone)]
pub struct MarkerClassifier {
    markers: LedgerMarkers,
}

impl MarkerClassifier {
    pub fn new(markers: LedgerMarkers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &LedgerMarkers {
        &self.markers
    }
}

impl LedgerClassifier for MarkerClassifier {
    fn is_income(&self, category_id: &str) -> bool {
        self.markers.income_category_id == category_id
    }

    fn is_salary(&self, item_id: &str) -> bool {
        self.markers.salary_item_id == item_id
    }

    fn salary_cutoff_day(&self) -> u32 {
        self.markers.salary_cutoff_day
    }
}
