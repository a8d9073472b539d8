//! Per-field fallback between two garden data sources.

use std::future::Future;

use async_trait::async_trait;

use crate::provider::GardenDataSource;
use crate::types::{
    Coordinate, CropData, DataField, FrostDates, HardinessZone, MonthlyAverages, ProviderError,
    RainfallData, SoilData,
};

/// Await `primary`; if it fails, log the failure and return `fallback()` instead.
///
/// The fallback is only constructed when it is needed.
pub async fn with_fallback<T, P, F, Fut>(
    field: DataField,
    primary: P,
    fallback: F,
) -> Result<T, ProviderError>
where
    P: Future<Output = Result<T, ProviderError>>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    match primary.await {
        Ok(value) => Ok(value),
        Err(ProviderError::Unavailable(reason)) => {
            tracing::debug!("No primary {} ({}), using fallback", field, reason);
            fallback().await
        }
        Err(e) => {
            tracing::warn!("Fetching {} failed, using fallback data: {}", field, e);
            fallback().await
        }
    }
}

/// Source that asks `primary` first and `fallback` for any field that fails.
///
/// Fields are independent: a failed rainfall request does not affect the
/// hardiness zone.
#[derive(Debug, Clone)]
pub struct FallbackSource<P, F> {
    primary: P,
    fallback: F,
    name: String,
}

impl<P: GardenDataSource, F: GardenDataSource> FallbackSource<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        let name = format!("{}+{}", primary.name(), fallback.name());
        Self {
            primary,
            fallback,
            name,
        }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }
}

#[async_trait]
impl<P: GardenDataSource, F: GardenDataSource> GardenDataSource for FallbackSource<P, F> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn frost_dates(&self, at: Coordinate) -> Result<FrostDates, ProviderError> {
        with_fallback(DataField::FrostDates, self.primary.frost_dates(at), || {
            self.fallback.frost_dates(at)
        })
        .await
    }

    async fn hardiness_zone(&self, at: Coordinate) -> Result<HardinessZone, ProviderError> {
        with_fallback(DataField::HardinessZone, self.primary.hardiness_zone(at), || {
            self.fallback.hardiness_zone(at)
        })
        .await
    }

    async fn rainfall(&self, at: Coordinate) -> Result<RainfallData, ProviderError> {
        with_fallback(DataField::Rainfall, self.primary.rainfall(at), || {
            self.fallback.rainfall(at)
        })
        .await
    }

    async fn monthly_averages(&self, at: Coordinate) -> Result<MonthlyAverages, ProviderError> {
        with_fallback(DataField::MonthlyAverages, self.primary.monthly_averages(at), || {
            self.fallback.monthly_averages(at)
        })
        .await
    }

    async fn soil(&self, at: Coordinate) -> Result<SoilData, ProviderError> {
        with_fallback(DataField::Soil, self.primary.soil(at), || self.fallback.soil(at)).await
    }

    async fn recommended_crops(&self, at: Coordinate) -> Result<CropData, ProviderError> {
        with_fallback(DataField::Crops, self.primary.recommended_crops(at), || {
            self.fallback.recommended_crops(at)
        })
        .await
    }
}
