//! Plain-text rendering of the widget states.

use std::fmt;

use crate::chart::RainfallChart;
use crate::season::{GrowingSeason, SegmentKind};
use crate::view::{format_day, GardenView};
use crate::widget::WidgetState;

pub const LOADING_MESSAGE: &str = "Loading gardening data...";

const BAR_WIDTH: f64 = 30.0;
const STRIP_WIDTH: f64 = 52.0;

pub fn render_state(state: &WidgetState) -> String {
    match state {
        WidgetState::Loading => format!("{}\n", LOADING_MESSAGE),
        WidgetState::Ready(view) => view.to_string(),
        WidgetState::Error(message) => format!("{}\n", message),
    }
}

impl fmt::Display for GardenView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = &self.report;
        let last = &report.frost_dates.last_frost_range;
        let first = &report.frost_dates.first_frost_range;

        writeln!(f, "Garden Zone Report for {}", report.coordinate)?;
        writeln!(
            f,
            "Hardiness Zone: {} ({})",
            report.hardiness.zone, report.hardiness.source
        )?;

        writeln!(f, "\nFrost Dates ({})", report.frost_dates.source)?;
        writeln!(
            f,
            "  Last spring frost: {} ({} to {})",
            self.last_frost,
            format_day(last.earliest()),
            format_day(last.latest())
        )?;
        writeln!(
            f,
            "  First fall frost:  {} ({} to {})",
            self.first_frost,
            format_day(first.earliest()),
            format_day(first.latest())
        )?;
        writeln!(
            f,
            "  Growing season:    {} days",
            self.growing_season.growing_days()
        )?;
        writeln!(f, "  [{}]", season_strip(&self.growing_season))?;

        writeln!(f, "\nSoil: {}", report.soil.classification)?;
        writeln!(f, "  {}", report.soil.description)?;

        writeln!(f, "\n{} ({})", self.rainfall_chart.label, report.rainfall.source)?;
        write!(f, "{}", self.rainfall_chart)?;

        writeln!(f, "\nMonthly Averages")?;
        for (month, avg) in report.monthly_averages.in_calendar_order() {
            writeln!(
                f,
                "  {:<4}{:>6.1} C {:>7.1} mm {:>6.0} min sun",
                month, avg.average_temp_c, avg.average_precipitation_mm, avg.average_sunshine_mins
            )?;
        }

        writeln!(f, "\nPlanting Calendar ({})", report.crops.source)?;
        for column in &self.crop_columns {
            let mut groups = column.non_empty_groups().peekable();
            if groups.peek().is_none() {
                continue;
            }
            writeln!(f, "  {}", column.title)?;
            for group in groups {
                writeln!(f, "    {}: {}", group.name, group.crops.join(", "))?;
            }
        }

        Ok(())
    }
}

/// One line per month: label, bar scaled to the wettest month, amount.
impl fmt::Display for RainfallChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max = self.max_value();
        for (label, value) in self.labels.iter().zip(&self.values) {
            let len = if max > 0.0 {
                (value / max * BAR_WIDTH).round() as usize
            } else {
                0
            };
            writeln!(f, "  {:<4}{:<30} {:.1}", label, "#".repeat(len), value)?;
        }
        Ok(())
    }
}

/// The year as a strip: '.' winter, '~' frost window, '#' growing season.
pub fn season_strip(season: &GrowingSeason) -> String {
    let total = season.total_days().max(1) as f64;
    season
        .segments
        .iter()
        .map(|segment| {
            let fill = match segment.kind {
                SegmentKind::Winter => ".",
                SegmentKind::FrostWindow => "~",
                SegmentKind::Growing => "#",
            };
            let len = (segment.days as f64 / total * STRIP_WIDTH).round() as usize;
            fill.repeat(len)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_data::mock::frost_dates_for_zone;

    #[test]
    fn test_loading_and_error_text() {
        assert_eq!(render_state(&WidgetState::Loading), "Loading gardening data...\n");
        assert_eq!(
            render_state(&WidgetState::Error("Sorry".into())),
            "Sorry\n"
        );
    }

    #[test]
    fn test_rainfall_bars_scale_to_max() {
        let chart = RainfallChart {
            label: "Rainfall (inches)",
            labels: vec!["Jan".into(), "Feb".into()],
            values: vec![4.0, 2.0],
        };
        let text = chart.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].matches('#').count(), 30);
        assert_eq!(lines[1].matches('#').count(), 15);
        assert!(lines[1].ends_with("2.0"));
    }

    #[test]
    fn test_zero_rainfall_draws_no_bars() {
        let chart = RainfallChart {
            label: "Rainfall (inches)",
            labels: vec!["Jan".into()],
            values: vec![0.0],
        };
        assert_eq!(chart.to_string().matches('#').count(), 0);
    }

    #[test]
    fn test_season_strip_order() {
        let season = GrowingSeason::from_frost_dates(&frost_dates_for_zone("7a", 2025).unwrap());
        let strip = season_strip(&season);
        assert!(strip.starts_with('.'));
        assert!(strip.ends_with('.'));
        let growing = strip.find('#').unwrap();
        assert!(strip[..growing].contains('~'));
        assert!(strip[growing..].contains('~'));
    }
}
