//! Growing-season timeline derived from frost dates.

use chrono::{Datelike, NaiveDate};
use garden_data::FrostDates;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Winter,
    FrostWindow,
    Growing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonSegment {
    pub kind: SegmentKind,
    pub days: i64,
}

/// The year split into five stacked segments:
/// winter, last-frost window, growing season, first-frost window, winter.
///
/// Segments are never negative and always sum to the length of `year`;
/// windows reaching outside the year are cut at its edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowingSeason {
    pub year: i32,
    pub segments: [SeasonSegment; 5],
}

fn days_in_year(year: i32) -> i64 {
    match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year + 1, 1, 1),
    ) {
        (Some(start), Some(end)) => (end - start).num_days(),
        _ => 365,
    }
}

impl GrowingSeason {
    pub fn from_frost_dates(frost: &FrostDates) -> Self {
        let year = frost.last_frost_range.typical().year();
        let day = |date: NaiveDate| i64::from(date.ordinal0()) + year_offset(year, date);

        let year_len = days_in_year(year);

        let mut bounds = [
            day(frost.last_frost_range.earliest()),
            day(frost.last_frost_range.latest()),
            day(frost.first_frost_range.earliest()),
            day(frost.first_frost_range.latest()),
        ];
        let mut floor = 0;
        for bound in bounds.iter_mut() {
            *bound = (*bound).clamp(floor, year_len);
            floor = *bound;
        }
        let [last_earliest, last_latest, first_earliest, first_latest] = bounds;

        let segment = |kind, days| SeasonSegment { kind, days };
        Self {
            year,
            segments: [
                segment(SegmentKind::Winter, last_earliest),
                segment(SegmentKind::FrostWindow, last_latest - last_earliest),
                segment(SegmentKind::Growing, first_earliest - last_latest),
                segment(SegmentKind::FrostWindow, first_latest - first_earliest),
                segment(SegmentKind::Winter, year_len - first_latest),
            ],
        }
    }

    /// Days between the last spring frost window and the first autumn one
    pub fn growing_days(&self) -> i64 {
        self.segments[2].days
    }

    pub fn total_days(&self) -> i64 {
        self.segments.iter().map(|s| s.days).sum()
    }
}

/// Days from Jan 1 of `year` to Jan 1 of `date`'s year, for dates that spill
/// into a neighbouring year.
fn year_offset(year: i32, date: NaiveDate) -> i64 {
    let (lo, hi, sign) = if date.year() >= year {
        (year, date.year(), 1)
    } else {
        (date.year(), year, -1)
    };
    sign * (lo..hi).map(days_in_year).sum::<i64>()
}
