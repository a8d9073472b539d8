//! Mock garden data synthesized from the reference tables.
//!
//! Rainfall and monthly averages are jittered with a caller-supplied random
//! source, so tests can pass a seeded or stepped generator.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::provider::GardenDataSource;
use crate::reference::{self, ReferencePoint};
use crate::types::{
    CropData, Coordinate, DataField, FrostDates, FrostRange, HardinessZone, MonthlyAverage,
    MonthlyAverages, MonthlyRainfall, ProviderError, RainfallData, SoilData, MONTHS,
};

pub const FROST_SOURCE: &str = "https://www.noaa.gov/frost-dates";
pub const HARDINESS_SOURCE: &str = "https://planthardiness.ars.usda.gov/";
pub const RAINFALL_SOURCE: &str = "https://www.weather.gov/";
pub const SOIL_SOURCE: &str = "https://websoilsurvey.nrcs.usda.gov/";
pub const CROPS_SOURCE: &str = "https://extension.org/";

/// Rainfall and precipitation jitter: base × [0.85, 1.15)
pub const RAINFALL_JITTER: f64 = 0.15;
/// Sunshine jitter: base × [0.80, 1.20)
pub const SUNSHINE_JITTER: f64 = 0.20;
/// Temperature jitter in °C, additive
pub const TEMPERATURE_JITTER_C: f64 = 1.5;

const MM_PER_INCH: f64 = 25.4;

/// Simulated response time per field
fn latency_for(field: DataField) -> Duration {
    let millis = match field {
        DataField::FrostDates => 0,
        DataField::HardinessZone => 600,
        DataField::Rainfall | DataField::MonthlyAverages => 1000,
        DataField::Soil => 700,
        DataField::Crops => 900,
    };
    Duration::from_millis(millis)
}

/// Multiply `base` by a factor drawn uniformly from `[1 - spread, 1 + spread)`.
fn jitter<R: Rng + ?Sized>(base: f64, spread: f64, rng: &mut R) -> f64 {
    base * (1.0 - spread + rng.gen::<f64>() * spread * 2.0)
}

fn anchor_date(year: i32, (month, day): (u32, u32)) -> Result<NaiveDate, ProviderError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ProviderError::Parse(format!("invalid frost anchor {}-{}-{}", year, month, day))
    })
}

fn spread_range(anchor: NaiveDate, (before, after): (i64, i64)) -> Result<FrostRange, ProviderError> {
    FrostRange::new(
        anchor - chrono::Duration::days(before),
        anchor,
        anchor + chrono::Duration::days(after),
    )
}

/// Frost dates for `zone` in `year`; the typical date is the zone's anchor.
pub fn frost_dates_for_zone(zone: &str, year: i32) -> Result<FrostDates, ProviderError> {
    let profile = reference::profile_for_zone(zone);
    let last = spread_range(anchor_date(year, profile.last_frost)?, profile.last_frost_spread)?;
    let first = spread_range(anchor_date(year, profile.first_frost)?, profile.first_frost_spread)?;
    Ok(FrostDates::from_ranges(last, first, FROST_SOURCE))
}

pub fn rainfall_for_zone<R: Rng + ?Sized>(zone: &str, rng: &mut R) -> RainfallData {
    let profile = reference::profile_for_zone(zone);
    let data = MONTHS
        .iter()
        .zip(profile.rainfall_in.iter())
        .map(|((month, _), base)| MonthlyRainfall {
            month: (*month).to_string(),
            amount: jitter(*base, RAINFALL_JITTER, rng),
        })
        .collect();

    RainfallData {
        data,
        source: RAINFALL_SOURCE.to_string(),
    }
}

pub fn monthly_averages_for_zone<R: Rng + ?Sized>(zone: &str, rng: &mut R) -> MonthlyAverages {
    let profile = reference::profile_for_zone(zone);
    let monthly_averages = MONTHS
        .iter()
        .enumerate()
        .map(|(i, (_, key))| {
            let temperature_offset = (rng.gen::<f64>() * 2.0 - 1.0) * TEMPERATURE_JITTER_C;
            let average = MonthlyAverage {
                average_temp_c: profile.temperature_c[i] + temperature_offset,
                average_precipitation_mm: jitter(
                    profile.rainfall_in[i] * MM_PER_INCH,
                    RAINFALL_JITTER,
                    rng,
                ),
                average_sunshine_mins: jitter(profile.sunshine_mins[i], SUNSHINE_JITTER, rng),
            };
            ((*key).to_string(), average)
        })
        .collect();

    MonthlyAverages { monthly_averages }
}

/// Crops suited to `zone`. Warm-climate crops need zone 8 or above, cool-season
/// staples zone 7 or below; an unparseable zone gets neither group.
pub fn crops_for_zone(zone: &str) -> CropData {
    let zone_number = crate::types::zone_number(zone);
    let warm = zone_number.map_or(false, |n| n >= 8);
    let cool = zone_number.map_or(false, |n| n <= 7);

    let mut crops: Vec<&str> = vec!["Tomatoes", "Peppers", "Lettuce", "Beans"];
    if warm {
        crops.extend(["Citrus", "Avocado"]);
    }
    if cool {
        crops.extend(["Potatoes", "Cabbage"]);
    }
    crops.extend(["Herbs", "Cucumbers", "Squash"]);

    CropData {
        crops: crops.into_iter().map(String::from).collect(),
        source: CROPS_SOURCE.to_string(),
    }
}

pub fn soil_for(reference: &ReferencePoint) -> SoilData {
    let soil = reference.soil_or_default();
    SoilData {
        classification: soil.classification.to_string(),
        description: soil.description.to_string(),
        source: SOIL_SOURCE.to_string(),
    }
}

pub fn hardiness_for(reference: &ReferencePoint) -> HardinessZone {
    HardinessZone {
        zone: reference.zone.to_string(),
        source: HARDINESS_SOURCE.to_string(),
    }
}

/// Garden data source backed entirely by the reference tables.
pub struct MockGardenData {
    rng: Mutex<Box<dyn RngCore + Send>>,
    year: Option<i32>,
    simulate_latency: bool,
}

impl std::fmt::Debug for MockGardenData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockGardenData")
            .field("year", &self.year)
            .field("simulate_latency", &self.simulate_latency)
            .finish_non_exhaustive()
    }
}

impl Default for MockGardenData {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGardenData {
    /// Mock source with an entropy-seeded generator and the current year.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng<R: RngCore + Send + 'static>(rng: R) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
            year: None,
            simulate_latency: false,
        }
    }

    /// Pin frost dates to `year` instead of the current one.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_latency(mut self, simulate_latency: bool) -> Self {
        self.simulate_latency = simulate_latency;
        self
    }

    fn year(&self) -> i32 {
        self.year.unwrap_or_else(|| Local::now().year())
    }

    async fn pause(&self, field: DataField) {
        if self.simulate_latency {
            tokio::time::sleep(latency_for(field)).await;
        }
    }

    pub fn frost_dates_at(&self, at: &Coordinate) -> Result<FrostDates, ProviderError> {
        frost_dates_for_zone(reference::resolve(at).zone, self.year())
    }

    pub fn hardiness_zone_at(&self, at: &Coordinate) -> HardinessZone {
        hardiness_for(reference::resolve(at))
    }

    pub fn rainfall_at(&self, at: &Coordinate) -> RainfallData {
        let zone = reference::resolve(at).zone;
        let mut rng = self.rng.lock();
        rainfall_for_zone(zone, &mut *rng)
    }

    pub fn monthly_averages_at(&self, at: &Coordinate) -> MonthlyAverages {
        let zone = reference::resolve(at).zone;
        let mut rng = self.rng.lock();
        monthly_averages_for_zone(zone, &mut *rng)
    }

    pub fn soil_at(&self, at: &Coordinate) -> SoilData {
        soil_for(reference::resolve(at))
    }

    pub fn crops_at(&self, at: &Coordinate) -> CropData {
        crops_for_zone(reference::resolve(at).zone)
    }
}

#[async_trait]
impl GardenDataSource for MockGardenData {
    fn name(&self) -> &str {
        "mock"
    }

    async fn frost_dates(&self, at: Coordinate) -> Result<FrostDates, ProviderError> {
        self.pause(DataField::FrostDates).await;
        self.frost_dates_at(&at)
    }

    async fn hardiness_zone(&self, at: Coordinate) -> Result<HardinessZone, ProviderError> {
        self.pause(DataField::HardinessZone).await;
        Ok(self.hardiness_zone_at(&at))
    }

    async fn rainfall(&self, at: Coordinate) -> Result<RainfallData, ProviderError> {
        self.pause(DataField::Rainfall).await;
        Ok(self.rainfall_at(&at))
    }

    async fn monthly_averages(&self, at: Coordinate) -> Result<MonthlyAverages, ProviderError> {
        self.pause(DataField::MonthlyAverages).await;
        Ok(self.monthly_averages_at(&at))
    }

    async fn soil(&self, at: Coordinate) -> Result<SoilData, ProviderError> {
        self.pause(DataField::Soil).await;
        Ok(self.soil_at(&at))
    }

    async fn recommended_crops(&self, at: Coordinate) -> Result<CropData, ProviderError> {
        self.pause(DataField::Crops).await;
        Ok(self.crops_at(&at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{profile_for_zone, REFERENCE_POINTS};
    use rand::rngs::mock::StepRng;

    const EPS: f64 = 1e-9;

    fn new_york() -> Coordinate {
        Coordinate::new(40.0, -74.0).unwrap()
    }

    #[test]
    fn test_new_york_frost_dates() {
        let mock = MockGardenData::with_rng(StepRng::new(0, 0)).with_year(2024);
        let frost = mock.frost_dates_at(&new_york()).unwrap();

        assert_eq!(frost.last_frost_range.typical(), NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());
        assert_eq!(frost.first_frost_range.typical(), NaiveDate::from_ymd_opt(2024, 10, 15).unwrap());
        assert_eq!(frost.last_frost_range.earliest(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
        assert_eq!(frost.first_frost_range.latest(), NaiveDate::from_ymd_opt(2024, 11, 14).unwrap());
        assert_eq!(frost.last_frost, frost.last_frost_range.typical());
        assert_eq!(frost.source, FROST_SOURCE);
    }

    #[test]
    fn test_typical_between_earliest_and_latest_for_every_zone() {
        for reference in &REFERENCE_POINTS {
            for year in [2023, 2024, 2025] {
                let frost = frost_dates_for_zone(reference.zone, year).unwrap();
                for range in [frost.last_frost_range, frost.first_frost_range] {
                    assert!(range.earliest() <= range.typical());
                    assert!(range.typical() <= range.latest());
                }
            }
        }
    }

    #[test]
    fn test_rainfall_stays_within_jitter_bounds() {
        let generators: Vec<Box<dyn RngCore + Send>> = vec![
            Box::new(StepRng::new(0, 0)),
            Box::new(StepRng::new(u64::MAX, 0)),
            Box::new(StdRng::seed_from_u64(7)),
            Box::new(StdRng::seed_from_u64(42)),
        ];

        for mut rng in generators {
            for reference in &REFERENCE_POINTS {
                let base = profile_for_zone(reference.zone).rainfall_in;
                let rainfall = rainfall_for_zone(reference.zone, &mut rng);
                assert_eq!(rainfall.data.len(), 12);
                for (entry, base) in rainfall.data.iter().zip(base.iter()) {
                    assert!(entry.amount >= base * 0.85 - EPS, "{} below bound", entry.month);
                    assert!(entry.amount <= base * 1.15 + EPS, "{} above bound", entry.month);
                }
            }
        }
    }

    #[test]
    fn test_rainfall_months_in_calendar_order() {
        let rainfall = rainfall_for_zone("8b", &mut StdRng::seed_from_u64(1));
        let months: Vec<&str> = rainfall.data.iter().map(|d| d.month.as_str()).collect();
        assert_eq!(
            months,
            vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        );
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let a = MockGardenData::with_rng(StdRng::seed_from_u64(99));
        let b = MockGardenData::with_rng(StdRng::seed_from_u64(99));
        assert_eq!(a.rainfall_at(&new_york()), b.rainfall_at(&new_york()));
        assert_eq!(a.monthly_averages_at(&new_york()), b.monthly_averages_at(&new_york()));
    }

    #[test]
    fn test_monthly_averages_cover_every_month_within_bounds() {
        let profile = profile_for_zone("6a");
        let averages = monthly_averages_for_zone("6a", &mut StdRng::seed_from_u64(3));
        assert_eq!(averages.monthly_averages.len(), 12);

        for (i, (_, key)) in MONTHS.iter().enumerate() {
            let avg = averages.month(key).unwrap();
            let precip_base = profile.rainfall_in[i] * MM_PER_INCH;
            assert!(avg.average_precipitation_mm >= precip_base * 0.85 - EPS);
            assert!(avg.average_precipitation_mm <= precip_base * 1.15 + EPS);
            assert!(avg.average_sunshine_mins >= profile.sunshine_mins[i] * 0.8 - EPS);
            assert!(avg.average_sunshine_mins <= profile.sunshine_mins[i] * 1.2 + EPS);
            assert!((avg.average_temp_c - profile.temperature_c[i]).abs() <= TEMPERATURE_JITTER_C + EPS);
        }
    }

    #[test]
    fn test_warm_crops_iff_zone_at_least_8() {
        for zone in ["10b", "10a", "8b", "7a", "6a", "5b", "9a", "13a"] {
            let crops = crops_for_zone(zone);
            let number = crate::types::zone_number(zone).unwrap();
            assert_eq!(crops.contains("Citrus"), number >= 8, "zone {}", zone);
            assert_eq!(crops.contains("Avocado"), number >= 8, "zone {}", zone);
            assert_eq!(crops.contains("Potatoes"), number <= 7, "zone {}", zone);
            assert_eq!(crops.contains("Cabbage"), number <= 7, "zone {}", zone);
        }
    }

    #[test]
    fn test_crop_order_for_new_york() {
        let crops = crops_for_zone("7a");
        assert_eq!(
            crops.crops,
            vec![
                "Tomatoes", "Peppers", "Lettuce", "Beans", "Potatoes", "Cabbage", "Herbs",
                "Cucumbers", "Squash"
            ]
        );
        assert_eq!(crops.source, CROPS_SOURCE);
    }

    #[test]
    fn test_unparseable_zone_gets_neither_group() {
        let crops = crops_for_zone("unknown");
        assert!(!crops.contains("Citrus"));
        assert!(!crops.contains("Potatoes"));
        assert_eq!(crops.crops.len(), 7);
    }

    #[test]
    fn test_soil_uses_reference_or_default() {
        let mock = MockGardenData::new();
        assert_eq!(mock.soil_at(&new_york()).classification, "Clay Loam");
        let seattle = Coordinate::new(47.0, -122.0).unwrap();
        let soil = mock.soil_at(&seattle);
        assert_eq!(soil.classification, "Loam");
        assert_eq!(soil.source, SOIL_SOURCE);
    }

    #[tokio::test]
    async fn test_source_trait_answers_for_new_york() {
        let mock = MockGardenData::with_rng(StdRng::seed_from_u64(5)).with_year(2025);
        let zone = mock.hardiness_zone(new_york()).await.unwrap();
        assert_eq!(zone.zone, "7a");
        assert_eq!(zone.number(), Some(7));
        assert_eq!(mock.name(), "mock");
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_latency_delays_response() {
        let mock = MockGardenData::new().with_latency(true);
        let started = tokio::time::Instant::now();
        mock.soil(new_york()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(700));
    }
}
