//! Optional chart decorations layered on top of the core geometry.
//!
//! Everything here projects into the same primitive types as the core
//! renderers and stays decoupled from the engine facades.

pub mod event_markers;
pub mod extremes;
pub mod grid;

pub use event_markers::{EventMarkerSet, EventMarkerVisuals, project_event_markers};
pub use extremes::{ExtremesMarkers, ExtremesVisuals, project_extremes};
pub use grid::{GridSpec, project_grid};
