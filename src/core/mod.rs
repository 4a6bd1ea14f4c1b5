pub mod band;
pub mod band_geometry;
pub mod computator;
pub mod line;
pub mod line_geometry;
pub mod sample;

pub use band::{
    BandRecord, BandSeries, BandStyle, CategoryKind, CategoryProfile, ColorPolicy, RangePair,
    SeverityColors, TierColors, TierThresholds,
};
pub use band_geometry::{
    BandColumn, COLUMN_WIDTH_DOUBLING, DEGENERATE_BAND_DROP, MIN_SUBCOLUMN_WIDTH_PX,
    hit_test_columns, project_band_columns, subcolumn_width_px,
};
pub use computator::{ChartComputator, MIN_VIEWPORT_SPAN, PixelRect, Viewport};
pub use line::{
    FillStyle, Interpolation, LabelStyle, LabelVisibility, LineSeries, LineStyle, PointShape,
    SpriteRule, StateSpriteEntry, StateSpriteTable, ValueSpriteTable,
};
pub use line_geometry::{
    CHECK_PRECISION_PX, LINE_SMOOTHNESS, LinePathGeometry, PointVisuals, place_label_box,
    project_highlight, project_line_path, project_point_visuals, resolve_marker_kind,
};
pub use sample::PointSample;
