use std::sync::Arc;

use async_trait::async_trait;

use crate::types::{
    Coordinate, CropData, FrostDates, HardinessZone, MonthlyAverages, ProviderError, RainfallData,
    SoilData,
};

/// Anything that can answer garden data queries for a coordinate.
///
/// Every field is requested independently so callers can fan out.
#[async_trait]
pub trait GardenDataSource: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    async fn frost_dates(&self, at: Coordinate) -> Result<FrostDates, ProviderError>;

    async fn hardiness_zone(&self, at: Coordinate) -> Result<HardinessZone, ProviderError>;

    async fn rainfall(&self, at: Coordinate) -> Result<RainfallData, ProviderError>;

    async fn monthly_averages(&self, at: Coordinate) -> Result<MonthlyAverages, ProviderError>;

    async fn soil(&self, at: Coordinate) -> Result<SoilData, ProviderError>;

    async fn recommended_crops(&self, at: Coordinate) -> Result<CropData, ProviderError>;
}

#[async_trait]
impl<S: GardenDataSource + ?Sized> GardenDataSource for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn frost_dates(&self, at: Coordinate) -> Result<FrostDates, ProviderError> {
        (**self).frost_dates(at).await
    }

    async fn hardiness_zone(&self, at: Coordinate) -> Result<HardinessZone, ProviderError> {
        (**self).hardiness_zone(at).await
    }

    async fn rainfall(&self, at: Coordinate) -> Result<RainfallData, ProviderError> {
        (**self).rainfall(at).await
    }

    async fn monthly_averages(&self, at: Coordinate) -> Result<MonthlyAverages, ProviderError> {
        (**self).monthly_averages(at).await
    }

    async fn soil(&self, at: Coordinate) -> Result<SoilData, ProviderError> {
        (**self).soil(at).await
    }

    async fn recommended_crops(&self, at: Coordinate) -> Result<CropData, ProviderError> {
        (**self).recommended_crops(at).await
    }
}
