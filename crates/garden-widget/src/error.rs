use garden_core::{AppError, GardenDataError};
use garden_data::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("attribute {name} is not a number: {value:?}")]
    InvalidAttribute { name: &'static str, value: String },

    #[error(transparent)]
    Data(#[from] ProviderError),
}

impl From<WidgetError> for AppError {
    fn from(e: WidgetError) -> Self {
        match e {
            WidgetError::InvalidAttribute { name, value } => AppError::Widget(format!(
                "attribute {} is not a number: {:?}",
                name, value
            )),
            WidgetError::Data(ProviderError::InvalidCoordinate(s)) => AppError::Widget(s),
            WidgetError::Data(ProviderError::Parse(s)) => {
                AppError::GardenData(GardenDataError::ParseError(s))
            }
            WidgetError::Data(ProviderError::Unavailable(_)) => {
                AppError::GardenData(GardenDataError::SourceUnavailable)
            }
            WidgetError::Data(other) => {
                AppError::GardenData(GardenDataError::ApiError(other.to_string()))
            }
        }
    }
}
