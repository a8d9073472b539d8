use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Month abbreviations used for display, paired with the API's lowercase keys.
pub const MONTHS: [(&str, &str); 12] = [
    ("Jan", "january"),
    ("Feb", "february"),
    ("Mar", "march"),
    ("Apr", "april"),
    ("May", "may"),
    ("Jun", "june"),
    ("Jul", "july"),
    ("Aug", "august"),
    ("Sep", "september"),
    ("Oct", "october"),
    ("Nov", "november"),
    ("Dec", "december"),
];

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ProviderError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(ProviderError::InvalidCoordinate(format!(
                "{}, {}",
                latitude, longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Straight-line distance in degree space. Not geodesic.
    pub fn euclidean_distance(&self, other: &Coordinate) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlon = self.longitude - other.longitude;
        (dlat * dlat + dlon * dlon).sqrt()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Window in which a frost historically occurs.
///
/// Always satisfies `earliest <= typical <= latest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FrostRangeFields")]
pub struct FrostRange {
    earliest: NaiveDate,
    typical: NaiveDate,
    latest: NaiveDate,
}

impl FrostRange {
    pub fn new(
        earliest: NaiveDate,
        typical: NaiveDate,
        latest: NaiveDate,
    ) -> Result<Self, ProviderError> {
        if earliest > typical || typical > latest {
            return Err(ProviderError::Parse(format!(
                "frost range out of order: {} / {} / {}",
                earliest, typical, latest
            )));
        }
        Ok(Self {
            earliest,
            typical,
            latest,
        })
    }

    pub fn earliest(&self) -> NaiveDate {
        self.earliest
    }

    pub fn typical(&self) -> NaiveDate {
        self.typical
    }

    pub fn latest(&self) -> NaiveDate {
        self.latest
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.earliest <= date && date <= self.latest
    }
}

#[derive(Deserialize)]
struct FrostRangeFields {
    earliest: NaiveDate,
    typical: NaiveDate,
    latest: NaiveDate,
}

impl TryFrom<FrostRangeFields> for FrostRange {
    type Error = ProviderError;

    fn try_from(fields: FrostRangeFields) -> Result<Self, Self::Error> {
        Self::new(fields.earliest, fields.typical, fields.latest)
    }
}

/// Spring and autumn frost dates for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrostDates {
    pub last_frost: NaiveDate,
    pub first_frost: NaiveDate,
    pub last_frost_range: FrostRange,
    pub first_frost_range: FrostRange,
    pub source: String,
}

impl FrostDates {
    pub fn from_ranges(last: FrostRange, first: FrostRange, source: impl Into<String>) -> Self {
        Self {
            last_frost: last.typical(),
            first_frost: first.typical(),
            last_frost_range: last,
            first_frost_range: first,
            source: source.into(),
        }
    }
}

/// USDA plant hardiness zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardinessZone {
    pub zone: String,
    pub source: String,
}

impl HardinessZone {
    /// Leading zone number, e.g. 7 for "7a" and 10 for "10b"
    pub fn number(&self) -> Option<u8> {
        zone_number(&self.zone)
    }
}

/// Parse the leading digits of a zone code.
pub fn zone_number(zone: &str) -> Option<u8> {
    let digits: String = zone
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRainfall {
    pub month: String,
    pub amount: f64,
}

/// Twelve-month precipitation series, January first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainfallData {
    pub data: Vec<MonthlyRainfall>,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAverage {
    pub average_temp_c: f64,
    pub average_precipitation_mm: f64,
    pub average_sunshine_mins: f64,
}

/// Monthly climate averages keyed by lowercase month name ("january").
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthlyAverages {
    pub monthly_averages: BTreeMap<String, MonthlyAverage>,
}

impl MonthlyAverages {
    pub fn month(&self, key: &str) -> Option<&MonthlyAverage> {
        self.monthly_averages.get(key)
    }

    /// Entries in calendar order as (abbreviation, average); missing months are skipped.
    pub fn in_calendar_order(&self) -> impl Iterator<Item = (&'static str, &MonthlyAverage)> + '_ {
        MONTHS
            .iter()
            .filter_map(move |(abbr, key)| self.month(key).map(|avg| (*abbr, avg)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilData {
    pub classification: String,
    pub description: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropData {
    pub crops: Vec<String>,
    pub source: String,
}

impl CropData {
    pub fn contains(&self, crop: &str) -> bool {
        self.crops.iter().any(|c| c == crop)
    }
}

/// The individual data fields a source can provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataField {
    FrostDates,
    HardinessZone,
    Rainfall,
    MonthlyAverages,
    Soil,
    Crops,
}

impl std::fmt::Display for DataField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataField::FrostDates => "frost dates",
            DataField::HardinessZone => "hardiness zone",
            DataField::Rainfall => "rainfall",
            DataField::MonthlyAverages => "monthly averages",
            DataField::Soil => "soil",
            DataField::Crops => "crops",
        };
        f.write_str(name)
    }
}

/// Garden data provider errors
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("Unavailable: {0}")]
    Unavailable(String),
}
