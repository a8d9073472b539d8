//! Chart models and the handles that own them.
//!
//! A chart is created from a [`ChartSpec`] and must be destroyed before a
//! replacement is created in the same slot.

use std::sync::atomic::{AtomicU64, Ordering};

use garden_data::RainfallData;
use serde::Serialize;

use crate::season::GrowingSeason;

pub const RAINFALL_LABEL: &str = "Rainfall (inches)";

static NEXT_CHART_ID: AtomicU64 = AtomicU64::new(1);

/// Bar chart of monthly rainfall
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainfallChart {
    pub label: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl RainfallChart {
    pub fn from_rainfall(rainfall: &RainfallData) -> Self {
        Self {
            label: RAINFALL_LABEL,
            labels: rainfall.data.iter().map(|m| m.month.clone()).collect(),
            values: rainfall.data.iter().map(|m| m.amount).collect(),
        }
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Rainfall(RainfallChart),
    GrowingSeason(GrowingSeason),
}

/// A live chart instance
#[derive(Debug, Serialize)]
pub struct ChartHandle {
    id: u64,
    spec: ChartSpec,
}

impl ChartHandle {
    fn create(spec: ChartSpec) -> Self {
        let id = NEXT_CHART_ID.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Created chart {}", id);
        Self { id, spec }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    /// Dispose of the chart.
    pub fn destroy(self) {
        tracing::debug!("Destroyed chart {}", self.id);
    }
}

/// Holds at most one chart; replacing destroys the previous one first.
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<ChartHandle>,
    disposed: usize,
}

impl ChartSlot {
    pub fn replace(&mut self, spec: ChartSpec) -> &ChartHandle {
        self.release();
        self.current.insert(ChartHandle::create(spec))
    }

    pub fn release(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.destroy();
            self.disposed += 1;
        }
    }

    pub fn current(&self) -> Option<&ChartHandle> {
        self.current.as_ref()
    }

    /// Number of charts this slot has destroyed
    pub fn disposed(&self) -> usize {
        self.disposed
    }
}

impl Drop for ChartSlot {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_data::MonthlyRainfall;

    fn rainfall(amounts: &[f64]) -> RainfallData {
        RainfallData {
            data: amounts
                .iter()
                .zip(["Jan", "Feb", "Mar"])
                .map(|(amount, month)| MonthlyRainfall {
                    month: month.to_string(),
                    amount: *amount,
                })
                .collect(),
            source: "test".to_string(),
        }
    }

    #[test]
    fn test_rainfall_chart_labels() {
        let chart = RainfallChart::from_rainfall(&rainfall(&[1.5, 3.0, 2.25]));
        assert_eq!(chart.label, "Rainfall (inches)");
        assert_eq!(chart.labels, vec!["Jan", "Feb", "Mar"]);
        assert_eq!(chart.values, vec![1.5, 3.0, 2.25]);
        assert_eq!(chart.max_value(), 3.0);
    }

    #[test]
    fn test_replace_disposes_previous_chart() {
        let mut slot = ChartSlot::default();
        let first = slot
            .replace(ChartSpec::Rainfall(RainfallChart::from_rainfall(&rainfall(&[1.0]))))
            .id();
        assert_eq!(slot.disposed(), 0);

        let second = slot
            .replace(ChartSpec::Rainfall(RainfallChart::from_rainfall(&rainfall(&[2.0]))))
            .id();
        assert_ne!(first, second);
        assert_eq!(slot.disposed(), 1);
        assert_eq!(slot.current().map(ChartHandle::id), Some(second));
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut slot = ChartSlot::default();
        slot.replace(ChartSpec::Rainfall(RainfallChart::from_rainfall(&rainfall(&[]))));
        slot.release();
        slot.release();
        assert_eq!(slot.disposed(), 1);
        assert!(slot.current().is_none());
    }
}
