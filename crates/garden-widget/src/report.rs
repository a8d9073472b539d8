use garden_data::{
    Coordinate, CropData, FrostDates, GardenDataSource, HardinessZone, MonthlyAverages,
    ProviderError, RainfallData, SoilData,
};
use serde::Serialize;

/// Everything the widget displays for one coordinate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GardenReport {
    pub coordinate: Coordinate,
    pub frost_dates: FrostDates,
    pub hardiness: HardinessZone,
    pub rainfall: RainfallData,
    pub monthly_averages: MonthlyAverages,
    pub soil: SoilData,
    pub crops: CropData,
}

/// Request every field concurrently and join the results.
///
/// Any single failure fails the whole report.
pub async fn fetch_report(
    source: &dyn GardenDataSource,
    at: Coordinate,
) -> Result<GardenReport, ProviderError> {
    tracing::debug!("Fetching garden report for {} from {}", at, source.name());

    let (frost_dates, hardiness, rainfall, monthly_averages, soil, crops) = tokio::try_join!(
        source.frost_dates(at),
        source.hardiness_zone(at),
        source.rainfall(at),
        source.monthly_averages(at),
        source.soil(at),
        source.recommended_crops(at)
    )?;

    Ok(GardenReport {
        coordinate: at,
        frost_dates,
        hardiness,
        rainfall,
        monthly_averages,
        soil,
        crops,
    })
}
