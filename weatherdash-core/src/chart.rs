use chrono::NaiveDate;

use crate::{model::DaySummary, theme::Palette};

/// Daily mean temperature series drawn as the trend chart.
///
/// Built once, then mutated in place on every refresh; `revision` counts
/// the updates so a renderer can tell a refresh from a rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub palette: Palette,
    revision: u64,
}

impl TrendChart {
    pub fn new(days: &[DaySummary], palette: Palette) -> Self {
        let mut chart = Self { labels: Vec::new(), data: Vec::new(), palette, revision: 0 };
        chart.fill(days);
        chart
    }

    pub fn update(&mut self, days: &[DaySummary]) {
        self.fill(days);
        self.revision += 1;
    }

    /// Re-color without touching labels or data.
    pub fn apply_palette(&mut self, palette: Palette) {
        self.palette = palette;
        self.revision += 1;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn fill(&mut self, days: &[DaySummary]) {
        self.labels.clear();
        self.data.clear();
        for day in days {
            self.labels.push(short_label(day.date));
            self.data.push(day.mean_temp());
        }
    }
}

/// "Oct 16"
pub fn short_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}
