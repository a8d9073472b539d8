//! Garden climate data for a coordinate.
//!
//! Provides frost dates, hardiness zone, rainfall, monthly averages, soil and
//! crop recommendations from a mock synthesizer or the remote garden API,
//! with per-field fallback between the two.

pub mod api;
pub mod fallback;
pub mod mock;
pub mod provider;
pub mod reference;
pub mod types;

pub use api::GardenApiClient;
pub use fallback::{with_fallback, FallbackSource};
pub use mock::MockGardenData;
pub use provider::GardenDataSource;
pub use reference::{ReferencePoint, REFERENCE_POINTS};
pub use types::*;

/// API source that falls back to the mock for any failing field.
pub type ApiWithMockFallback = FallbackSource<GardenApiClient, MockGardenData>;
