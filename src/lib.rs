//! vitalchart: viewport-based chart engine for wearable vitals dashboards.
//!
//! The crate turns time-ordered sample sets into backend-agnostic draw
//! primitives: straight and smoothed line paths, area and gradient fills,
//! point markers and labels, and category-colored range bands, plus
//! pointer hit-testing and selection. Rasterization stays behind the
//! [`render::Renderer`] trait; the crate ships a validating
//! [`render::NullRenderer`] for headless use and tests.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{BandChart, BandChartConfig, LineChart, LineChartConfig};
pub use error::{ChartError, ChartResult};
