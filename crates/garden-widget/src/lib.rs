//! Headless garden zone widget: loads garden data for a coordinate and
//! renders it as a report with seasonal planting groups and charts.

pub mod chart;
pub mod crops;
pub mod error;
pub mod render;
pub mod report;
pub mod season;
pub mod view;
pub mod widget;

pub use chart::{ChartHandle, ChartSlot, ChartSpec, RainfallChart};
pub use crops::{group_crops, PlantingGroup, SeasonColumn};
pub use error::WidgetError;
pub use render::{render_state, LOADING_MESSAGE};
pub use report::{fetch_report, GardenReport};
pub use season::{GrowingSeason, SeasonSegment, SegmentKind};
pub use view::GardenView;
pub use widget::{GardenZoneWidget, WidgetState};
