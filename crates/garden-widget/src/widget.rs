//! Headless garden zone widget.
//!
//! Observes `latitude` and `longitude` attributes, loads every data field
//! concurrently whenever one of them changes, and keeps its two charts in
//! sync with the loaded view.

use std::sync::Arc;

use garden_core::AppError;
use garden_data::{Coordinate, GardenDataSource};
use serde::Serialize;

use crate::chart::{ChartSlot, ChartSpec};
use crate::error::WidgetError;
use crate::render::render_state;
use crate::report::fetch_report;
use crate::view::GardenView;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum WidgetState {
    Loading,
    Ready(Box<GardenView>),
    Error(String),
}

pub struct GardenZoneWidget {
    source: Arc<dyn GardenDataSource>,
    latitude: Option<String>,
    longitude: Option<String>,
    state: WidgetState,
    rainfall_chart: ChartSlot,
    season_chart: ChartSlot,
    connected: bool,
}

impl GardenZoneWidget {
    pub fn new(source: Arc<dyn GardenDataSource>) -> Self {
        Self {
            source,
            latitude: None,
            longitude: None,
            state: WidgetState::Loading,
            rainfall_chart: ChartSlot::default(),
            season_chart: ChartSlot::default(),
            connected: false,
        }
    }

    /// Attach the widget and load data for the current attributes.
    pub async fn connect(&mut self) {
        tracing::info!("Garden zone widget connected (source: {})", self.source.name());
        self.connected = true;
        self.state = WidgetState::Loading;
        self.load().await;
    }

    /// Set an attribute. Returns true if the change triggered a reload.
    ///
    /// Unobserved names are ignored. Values are stored while disconnected
    /// and picked up by the next `connect`.
    pub async fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        let slot = match name {
            "latitude" => &mut self.latitude,
            "longitude" => &mut self.longitude,
            _ => {
                tracing::debug!("Ignoring unobserved attribute {}", name);
                return false;
            }
        };

        if slot.as_deref() == Some(value) {
            return false;
        }
        *slot = Some(value.to_string());

        if !self.connected {
            return false;
        }
        self.load().await;
        true
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "latitude" => self.latitude.as_deref(),
            "longitude" => self.longitude.as_deref(),
            _ => None,
        }
    }

    /// Fetch all fields and move to the ready or error state.
    pub async fn load(&mut self) {
        self.state = WidgetState::Loading;

        let result = self.fetch_view().await;
        match result {
            Ok(view) => {
                self.rainfall_chart
                    .replace(ChartSpec::Rainfall(view.rainfall_chart.clone()));
                self.season_chart
                    .replace(ChartSpec::GrowingSeason(view.growing_season.clone()));
                tracing::info!(
                    "Loaded garden data for {} (zone {})",
                    view.report.coordinate,
                    view.report.hardiness.zone
                );
                self.state = WidgetState::Ready(Box::new(view));
            }
            Err(e) => {
                let err = AppError::from(e);
                tracing::error!("Failed to load garden data: {}", err);
                self.release_charts();
                self.state = WidgetState::Error(err.user_message().to_string());
            }
        }
    }

    async fn fetch_view(&self) -> Result<GardenView, WidgetError> {
        let at = self.coordinate()?;
        let report = fetch_report(&*self.source, at).await?;
        Ok(GardenView::from_report(report))
    }

    fn coordinate(&self) -> Result<Coordinate, WidgetError> {
        let latitude = parse_attribute("latitude", self.latitude.as_deref())?;
        let longitude = parse_attribute("longitude", self.longitude.as_deref())?;
        Ok(Coordinate::new(latitude, longitude)?)
    }

    /// Detach the widget and release its charts.
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.release_charts();
        tracing::info!("Garden zone widget disconnected");
    }

    fn release_charts(&mut self) {
        self.rainfall_chart.release();
        self.season_chart.release();
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn rainfall_chart(&self) -> &ChartSlot {
        &self.rainfall_chart
    }

    pub fn season_chart(&self) -> &ChartSlot {
        &self.season_chart
    }

    pub fn render(&self) -> String {
        render_state(&self.state)
    }
}

/// Missing or blank attributes read as 0.0.
fn parse_attribute(name: &'static str, value: Option<&str>) -> Result<f64, WidgetError> {
    match value.map(str::trim) {
        None | Some("") => Ok(0.0),
        Some(raw) => raw
            .parse()
            .map_err(|_| WidgetError::InvalidAttribute {
                name,
                value: raw.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use garden_core::LOAD_FAILED_MESSAGE;
    use garden_data::{
        CropData, FrostDates, HardinessZone, MockGardenData, MonthlyAverages, ProviderError,
        RainfallData, SoilData,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Mock source that counts loads and can be told to fail soil lookups.
    struct CountingSource {
        inner: MockGardenData,
        loads: AtomicUsize,
        fail_soil: bool,
    }

    impl CountingSource {
        fn new(fail_soil: bool) -> Arc<Self> {
            Arc::new(Self {
                inner: MockGardenData::with_rng(StdRng::seed_from_u64(5)).with_year(2024),
                loads: AtomicUsize::new(0),
                fail_soil,
            })
        }

        fn loads(&self) -> usize {
            self.loads.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GardenDataSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        async fn frost_dates(&self, at: Coordinate) -> Result<FrostDates, ProviderError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.inner.frost_dates(at).await
        }

        async fn hardiness_zone(&self, at: Coordinate) -> Result<HardinessZone, ProviderError> {
            self.inner.hardiness_zone(at).await
        }

        async fn rainfall(&self, at: Coordinate) -> Result<RainfallData, ProviderError> {
            self.inner.rainfall(at).await
        }

        async fn monthly_averages(&self, at: Coordinate) -> Result<MonthlyAverages, ProviderError> {
            self.inner.monthly_averages(at).await
        }

        async fn soil(&self, at: Coordinate) -> Result<SoilData, ProviderError> {
            if self.fail_soil {
                return Err(ProviderError::Unavailable("soil survey offline".into()));
            }
            self.inner.soil(at).await
        }

        async fn recommended_crops(&self, at: Coordinate) -> Result<CropData, ProviderError> {
            self.inner.recommended_crops(at).await
        }
    }

    async fn connected_widget(source: Arc<CountingSource>) -> GardenZoneWidget {
        let mut widget = GardenZoneWidget::new(source);
        widget.set_attribute("latitude", "40").await;
        widget.set_attribute("longitude", "-74").await;
        widget.connect().await;
        widget
    }

    #[test]
    fn test_initial_state_is_loading() {
        let widget = GardenZoneWidget::new(CountingSource::new(false));
        assert_eq!(widget.state(), &WidgetState::Loading);
        assert_eq!(widget.render(), "Loading gardening data...\n");
    }

    #[tokio::test]
    async fn test_connect_loads_new_york() {
        let source = CountingSource::new(false);
        let widget = connected_widget(source.clone()).await;

        assert_eq!(source.loads(), 1);
        match widget.state() {
            WidgetState::Ready(view) => {
                assert_eq!(view.report.hardiness.zone, "7a");
                assert_eq!(view.last_frost, "April 15");
            }
            other => panic!("expected ready state, got {:?}", other),
        }
        let text = widget.render();
        assert!(text.contains("Hardiness Zone: 7a"));
        assert!(text.contains("Last spring frost: April 15"));
        assert!(text.contains("Start Indoors (Early Spring): Tomatoes, Peppers"));
    }

    #[tokio::test]
    async fn test_attributes_stored_until_connect() {
        let source = CountingSource::new(false);
        let mut widget = GardenZoneWidget::new(source.clone());

        assert!(!widget.set_attribute("latitude", "25").await);
        assert_eq!(source.loads(), 0);
        assert_eq!(widget.attribute("latitude"), Some("25"));
    }

    #[tokio::test]
    async fn test_reload_only_on_change() {
        let source = CountingSource::new(false);
        let mut widget = connected_widget(source.clone()).await;

        assert!(!widget.set_attribute("latitude", "40").await);
        assert!(!widget.set_attribute("zoom", "3").await);
        assert_eq!(source.loads(), 1);

        assert!(widget.set_attribute("latitude", "47").await);
        assert!(widget.set_attribute("longitude", "-122").await);
        assert_eq!(source.loads(), 3);
        match widget.state() {
            WidgetState::Ready(view) => assert_eq!(view.report.hardiness.zone, "8b"),
            other => panic!("expected ready state, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_charts_replaced_then_released() {
        let source = CountingSource::new(false);
        let mut widget = connected_widget(source).await;
        let first = widget.rainfall_chart().current().map(|c| c.id());

        widget.set_attribute("latitude", "25").await;
        assert_eq!(widget.rainfall_chart().disposed(), 1);
        assert_eq!(widget.season_chart().disposed(), 1);
        assert_ne!(widget.rainfall_chart().current().map(|c| c.id()), first);

        widget.disconnect();
        assert!(!widget.is_connected());
        assert!(widget.rainfall_chart().current().is_none());
        assert!(widget.season_chart().current().is_none());
        assert_eq!(widget.rainfall_chart().disposed(), 2);
    }

    #[tokio::test]
    async fn test_failing_field_shows_generic_error() {
        let source = CountingSource::new(true);
        let widget = connected_widget(source).await;

        assert_eq!(widget.state(), &WidgetState::Error(LOAD_FAILED_MESSAGE.to_string()));
        assert_eq!(widget.render(), format!("{}\n", LOAD_FAILED_MESSAGE));
        assert!(widget.rainfall_chart().current().is_none());
    }

    #[tokio::test]
    async fn test_unparseable_attribute_shows_error() {
        let source = CountingSource::new(false);
        let mut widget = connected_widget(source.clone()).await;

        widget.set_attribute("longitude", "west").await;
        assert_eq!(widget.state(), &WidgetState::Error(LOAD_FAILED_MESSAGE.to_string()));
        assert_eq!(source.loads(), 1);
    }

    #[tokio::test]
    async fn test_blank_attributes_read_as_origin() {
        let source = CountingSource::new(false);
        let mut widget = GardenZoneWidget::new(source);
        widget.set_attribute("latitude", "").await;
        widget.set_attribute("longitude", "  ").await;
        widget.connect().await;

        match widget.state() {
            WidgetState::Ready(view) => {
                assert_eq!(view.report.coordinate, Coordinate::new(0.0, 0.0).unwrap());
                assert_eq!(view.report.hardiness.zone, "10b");
            }
            other => panic!("expected ready state, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_attributes_read_as_origin() {
        let source = CountingSource::new(false);
        let mut widget = GardenZoneWidget::new(source);
        widget.connect().await;

        // (0, 0) is nearest to Miami
        match widget.state() {
            WidgetState::Ready(view) => {
                assert_eq!(view.report.coordinate, Coordinate::new(0.0, 0.0).unwrap());
                assert_eq!(view.report.hardiness.zone, "10b");
            }
            other => panic!("expected ready state, got {:?}", other),
        }
    }
}
