use chrono::NaiveDate;
use serde::Serialize;

use crate::chart::RainfallChart;
use crate::crops::{group_crops, SeasonColumn};
use crate::report::GardenReport;
use crate::season::GrowingSeason;

/// Display form of a date, e.g. "April 15"
pub fn format_day(date: NaiveDate) -> String {
    date.format("%B %-d").to_string()
}

/// Everything the widget renders once data has loaded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GardenView {
    pub report: GardenReport,
    pub last_frost: String,
    pub first_frost: String,
    pub crop_columns: Vec<SeasonColumn>,
    pub rainfall_chart: RainfallChart,
    pub growing_season: GrowingSeason,
}

impl GardenView {
    pub fn from_report(report: GardenReport) -> Self {
        let frost = &report.frost_dates;
        Self {
            last_frost: format_day(frost.last_frost_range.typical()),
            first_frost: format_day(frost.first_frost_range.typical()),
            crop_columns: group_crops(&report.crops.crops),
            rainfall_chart: RainfallChart::from_rainfall(&report.rainfall),
            growing_season: GrowingSeason::from_frost_dates(frost),
            report,
        }
    }
}
