//! deck_geometry
//!
//! Geometry engine for presentation charts and diagrams. Every layout turns abstract
//! data (values, hierarchies, flows) into positioned, renderer-independent
//! [`LayoutPrimitive`]s. Pairs with the `deckgeo` CLI.
//!
//! ### Features
//! - Cartesian charts: bar, stacked bar, area, sparkline, scatter, heatmap, bullet
//! - Arc charts: pie, donut, gauge, progress ring, harvey balls
//! - Proportional shapes: funnel, pyramid, treemap strip, waterfall, bridge
//! - Radial and quadrant diagrams: cycle, loop, flywheel, hub-spoke, mind map,
//!   concentric circles, radar, venn, 2×2 matrices
//! - Org chart (tree) and sankey (flow) layouts
//! - Presentation stagger order, JSON chart descriptions, SVG/PNG preview
//!
//! ### Example
//! ```no_run
//! use deck_geometry::{Chart, Theme};
//!
//! let chart: Chart = serde_json::from_str(
//!     r#"{"kind":"pie","segments":[{"label":"A","value":40},{"label":"B","value":60}]}"#,
//! )?;
//! let prims = chart.layout(&Theme::default())?;
//! deck_geometry::io::save_layout_json(&prims, "pie.json")?;
//! deck_geometry::render::render_to_file(&prims, "pie.svg", 1280, 720)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod chart;
pub mod error;
pub mod geometry;
pub mod io;
pub mod layout;
pub mod models;
pub mod primitive;
pub mod render;
pub mod scale;
pub mod stagger;
pub mod style;

pub use chart::Chart;
pub use error::LayoutError;
pub use geometry::{Padding, Point, Rect};
pub use models::{DataPoint, FlowEdge, HierarchyNode, Segment};
pub use primitive::{LayoutPrimitive, Paint, PathCmd, Role, Shape, TextAlign};
pub use stagger::{stagger_order, StaggerMode};
pub use style::{Palette, Rgba, Theme};
