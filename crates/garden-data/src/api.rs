//! Client for the remote garden data API.
//!
//! Responses are normalized into the same value types the mock produces.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::instrument;

use crate::provider::GardenDataSource;
use crate::types::{
    Coordinate, CropData, FrostDates, FrostRange, HardinessZone, MonthlyAverages, MonthlyRainfall,
    ProviderError, RainfallData, SoilData, MONTHS,
};

pub const DEFAULT_BASE_URL: &str = "http://garden-api.climata.ca/api/v1";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("garden-zone/", env!("CARGO_PKG_VERSION"));

const FROST_ENDPOINT: &str = "weather/frost-dates";
const HARDINESS_ENDPOINT: &str = "weather/hardiness-zone";
const MONTHLY_AVERAGES_ENDPOINT: &str = "weather/monthly-averages";
const SOIL_ENDPOINT: &str = "soil/type";

/// Response header naming the upstream data source
const SOURCE_HEADER: &str = "source";

#[derive(Debug, Deserialize)]
struct FrostDatesResponse {
    average_last_frost: String,
    earliest_last_frost: String,
    latest_last_frost: String,
    average_first_frost: String,
    earliest_first_frost: String,
    latest_first_frost: String,
}

#[derive(Debug, Deserialize)]
struct HardinessZoneResponse {
    hardiness_zone: String,
}

#[derive(Debug, Deserialize)]
struct SoilTypeResponse {
    #[allow(dead_code)]
    map_unit_symbol: Option<String>,
    map_unit_name: String,
    #[allow(dead_code)]
    map_unit_key: Option<String>,
}

/// Parse an API date given either as `YYYY-MM-DD` or as a timestamp.
pub fn parse_api_date(value: &str) -> Result<NaiveDate, ProviderError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.date())
        .map_err(|_| ProviderError::Parse(format!("unrecognized date '{}'", value)))
}

fn header_source(response: &Response) -> Option<String> {
    response
        .headers()
        .get(SOURCE_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Rainfall series derived from monthly averages; months the API omits read as 0.
pub fn rainfall_from_monthly_averages(averages: &MonthlyAverages) -> RainfallData {
    let data = MONTHS
        .iter()
        .map(|(abbr, key)| MonthlyRainfall {
            month: (*abbr).to_string(),
            amount: averages
                .month(key)
                .map(|m| m.average_precipitation_mm)
                .unwrap_or(0.0),
        })
        .collect();

    RainfallData {
        data,
        source: "Weather Service".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct GardenApiClient {
    client: Client,
    base_url: String,
}

impl GardenApiClient {
    pub fn new(base_url: &str) -> Result<Self, ProviderError> {
        Self::with_timeout(base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS), USER_AGENT)
    }

    pub fn with_timeout(
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `endpoint` for `at`, failing on any non-2xx status.
    async fn get(&self, endpoint: &str, at: &Coordinate) -> Result<Response, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("GET {} lat={} lon={}", url, at.latitude, at.longitude);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&[
                ("lat", at.latitude.to_string()),
                ("lon", at.longitude.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    #[instrument(skip(self), level = "info")]
    pub async fn fetch_frost_dates(&self, at: &Coordinate) -> Result<FrostDates, ProviderError> {
        let response = self.get(FROST_ENDPOINT, at).await?;
        let source = header_source(&response).unwrap_or_else(|| "NOAA".to_string());
        let body: FrostDatesResponse = response.json().await?;

        let last = FrostRange::new(
            parse_api_date(&body.earliest_last_frost)?,
            parse_api_date(&body.average_last_frost)?,
            parse_api_date(&body.latest_last_frost)?,
        )?;
        let first = FrostRange::new(
            parse_api_date(&body.earliest_first_frost)?,
            parse_api_date(&body.average_first_frost)?,
            parse_api_date(&body.latest_first_frost)?,
        )?;

        Ok(FrostDates::from_ranges(last, first, source))
    }

    #[instrument(skip(self), level = "info")]
    pub async fn fetch_hardiness_zone(
        &self,
        at: &Coordinate,
    ) -> Result<HardinessZone, ProviderError> {
        let response = self.get(HARDINESS_ENDPOINT, at).await?;
        let source = header_source(&response).unwrap_or_else(|| "USDA".to_string());
        let body: HardinessZoneResponse = response.json().await?;

        Ok(HardinessZone {
            zone: body.hardiness_zone,
            source,
        })
    }

    #[instrument(skip(self), level = "info")]
    pub async fn fetch_monthly_averages(
        &self,
        at: &Coordinate,
    ) -> Result<MonthlyAverages, ProviderError> {
        let response = self.get(MONTHLY_AVERAGES_ENDPOINT, at).await?;
        Ok(response.json().await?)
    }

    pub async fn fetch_rainfall(&self, at: &Coordinate) -> Result<RainfallData, ProviderError> {
        let averages = self.fetch_monthly_averages(at).await?;
        Ok(rainfall_from_monthly_averages(&averages))
    }

    #[instrument(skip(self), level = "info")]
    pub async fn fetch_soil(&self, at: &Coordinate) -> Result<SoilData, ProviderError> {
        let response = self.get(SOIL_ENDPOINT, at).await?;
        let source = header_source(&response).unwrap_or_else(|| "USDA Web Soil Survey".to_string());
        let body: SoilTypeResponse = response.json().await?;

        Ok(SoilData {
            classification: "soil".to_string(),
            description: body.map_unit_name,
            source,
        })
    }
}

#[async_trait]
impl GardenDataSource for GardenApiClient {
    fn name(&self) -> &str {
        "api"
    }

    async fn frost_dates(&self, at: Coordinate) -> Result<FrostDates, ProviderError> {
        self.fetch_frost_dates(&at).await
    }

    async fn hardiness_zone(&self, at: Coordinate) -> Result<HardinessZone, ProviderError> {
        self.fetch_hardiness_zone(&at).await
    }

    async fn rainfall(&self, at: Coordinate) -> Result<RainfallData, ProviderError> {
        self.fetch_rainfall(&at).await
    }

    async fn monthly_averages(&self, at: Coordinate) -> Result<MonthlyAverages, ProviderError> {
        self.fetch_monthly_averages(&at).await
    }

    async fn soil(&self, at: Coordinate) -> Result<SoilData, ProviderError> {
        self.fetch_soil(&at).await
    }

    // The API has no crops endpoint yet
    async fn recommended_crops(&self, _at: Coordinate) -> Result<CropData, ProviderError> {
        Err(ProviderError::Unavailable(
            "crop recommendations are not served by the API".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MonthlyAverage;

    #[test]
    fn test_parse_api_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        assert_eq!(parse_api_date("2024-04-15").unwrap(), expected);
        assert_eq!(parse_api_date("2024-04-15T00:00:00Z").unwrap(), expected);
        assert_eq!(parse_api_date("2024-04-15T08:30:00+02:00").unwrap(), expected);
        assert_eq!(parse_api_date("2024-04-15T12:00:00").unwrap(), expected);
        assert!(parse_api_date("April 15").is_err());
    }

    #[test]
    fn test_rainfall_maps_month_keys() {
        let mut averages = MonthlyAverages::default();
        averages.monthly_averages.insert(
            "april".to_string(),
            MonthlyAverage {
                average_temp_c: 11.0,
                average_precipitation_mm: 104.1,
                average_sunshine_mins: 420.0,
            },
        );

        let rainfall = rainfall_from_monthly_averages(&averages);
        assert_eq!(rainfall.data.len(), 12);
        assert_eq!(rainfall.data[3].month, "Apr");
        assert_eq!(rainfall.data[3].amount, 104.1);
        assert_eq!(rainfall.data[0].amount, 0.0);
        assert_eq!(rainfall.source, "Weather Service");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GardenApiClient::new("http://localhost:9000/api/v1/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000/api/v1");
    }

    #[tokio::test]
    async fn test_crops_unavailable_from_api() {
        let client = GardenApiClient::new(DEFAULT_BASE_URL).unwrap();
        let at = Coordinate::new(40.0, -74.0).unwrap();
        assert!(matches!(
            client.recommended_crops(at).await,
            Err(ProviderError::Unavailable(_))
        ));
    }
}
