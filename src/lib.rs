// Launch Records Dashboard - Core Library
// Exposes all modules for use in the server binary and tests

pub mod dataset;
pub mod aggregation;
pub mod chart;
pub mod layout;
pub mod config;
pub mod error;

// Only compile the web layer when the server feature is enabled
#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use dataset::{Dataset, LaunchRecord, OutcomeClass};
pub use aggregation::{
    PayloadRange, PayloadScatterFilter, RangeBounds, ScatterPoint, ScatterSelection,
    SiteBreakdown, SiteSelector, SiteSuccessAggregator, SliceCount, ALL_SITES,
};
pub use chart::{error_chart, pie_chart, scatter_chart, Figure};
pub use layout::{build_layout, DashboardLayout};
pub use config::{load_config, DashboardConfig, SliderConfig};
pub use error::AggregationError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
