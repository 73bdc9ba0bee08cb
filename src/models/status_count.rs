//! Per-category counters with percentages.

use serde::Serialize;

use super::Status;

/// Count of one category and its share of the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub count: u64,
    /// Share of the total, fixed to 2 decimals (e.g. `"33.33"`)
    pub percentage: String,
}

impl Default for CategoryCount {
    fn default() -> Self {
        CategoryCount {
            count: 0,
            percentage: "0.00".to_string(),
        }
    }
}

/// Breakdown of scenarios or features per status category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub ambiguous: CategoryCount,
    pub failed: CategoryCount,
    pub passed: CategoryCount,
    pub not_defined: CategoryCount,
    pub pending: CategoryCount,
    pub skipped: CategoryCount,
    pub total: u64,
}

impl StatusCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, status: Status) -> &CategoryCount {
        match status {
            Status::Failed => &self.failed,
            Status::Ambiguous => &self.ambiguous,
            Status::NotDefined => &self.not_defined,
            Status::Pending => &self.pending,
            Status::Skipped => &self.skipped,
            Status::Passed => &self.passed,
        }
    }

    fn get_mut(&mut self, status: Status) -> &mut CategoryCount {
        match status {
            Status::Failed => &mut self.failed,
            Status::Ambiguous => &mut self.ambiguous,
            Status::NotDefined => &mut self.not_defined,
            Status::Pending => &mut self.pending,
            Status::Skipped => &mut self.skipped,
            Status::Passed => &mut self.passed,
        }
    }

    /// Count one item in `status`, bumping the total with it.
    pub fn record(&mut self, status: Status) {
        self.get_mut(status).count += 1;
        self.total += 1;
    }

    pub fn count(&self, status: Status) -> u64 {
        self.get(status).count
    }

    /// Sum of all category counts.
    pub fn categorized(&self) -> u64 {
        Status::PRIORITY.iter().map(|s| self.count(*s)).sum()
    }

    /// Fill in every category percentage from its count and the total.
    ///
    /// A zero total yields `"0.00"` for every category.
    pub fn calculate_percentages(&mut self) {
        let total = self.total;
        for status in Status::PRIORITY {
            let category = self.get_mut(status);
            category.percentage = percentage(category.count, total);
        }
    }

    /// Consuming form of [`StatusCount::calculate_percentages`].
    pub fn with_percentages(mut self) -> Self {
        self.calculate_percentages();
        self
    }
}

fn percentage(count: u64, total: u64) -> String {
    if total == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", count as f64 / total as f64 * 100.0)
}
