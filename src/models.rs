//! Input data accepted by the layout families.

use serde::{Deserialize, Serialize};

/// One labelled quantity (a bar, a slice, a funnel stage, a waterfall delta).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    /// Some exports encode numbers as strings; accept both.
    #[serde(deserialize_with = "de_f64_from_string_or_number")]
    pub value: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Slices of a proportional or circular chart share the data point shape.
pub type Segment = DataPoint;

/// Serde helper: parse `f64` from either a JSON number or a string.
/// Thousands separators (`,` and `_`) are ignored in strings.
fn de_f64_from_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct F64Visitor;

    impl Visitor<'_> for F64Visitor {
        type Value = f64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number or a string containing a number")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
            cleaned.parse::<f64>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(F64Visitor)
}

/// A horizontal stacked bar: one label, several segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBar {
    pub label: String,
    pub segments: Vec<Segment>,
}

impl StackedBar {
    /// Sum of the non-negative segment values.
    pub fn total(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| crate::scale::clamp_non_negative(s.value))
            .sum()
    }
}

/// A point of a scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// A value matrix with row and column headers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeatmapGrid {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// `values[row][column]`; missing cells count as zero.
    pub values: Vec<Vec<f64>>,
}

impl HeatmapGrid {
    pub fn value(&self, row: usize, column: usize) -> f64 {
        self.values
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(0.0)
    }
}

/// A bullet chart: a value against a target and three qualitative bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletData {
    pub label: String,
    pub value: f64,
    pub target: f64,
    /// Upper bounds of the poor / satisfactory / good bands.
    pub ranges: [f64; 3],
}

/// One polygon of a radar chart, one value per axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSeries {
    pub label: String,
    pub values: Vec<f64>,
}

/// An item placed by percentage inside a quadrant square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadrantItem {
    pub label: String,
    /// 0 = left edge, 100 = right edge.
    pub x: f64,
    /// 0 = bottom edge, 100 = top edge.
    pub y: f64,
    #[serde(default)]
    pub highlight: bool,
}

/// A primary branch of a mind map with its leaf topics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindMapBranch {
    pub label: String,
    #[serde(default)]
    pub children: Vec<String>,
}

/// A node of an org chart. `parent_id` referencing no node makes it a root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub id: String,
    pub label: String,
    #[serde(default, alias = "parentId")]
    pub parent_id: Option<String>,
    /// Secondary line, e.g. a role or department.
    #[serde(default)]
    pub title: Option<String>,
}

impl HierarchyNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, parent_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            parent_id: parent_id.map(str::to_string),
            title: None,
        }
    }
}

/// A declared sankey node, fixing its display label and column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyNode {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// A weighted edge from a source node to a destination node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub from: String,
    pub to: String,
    pub value: f64,
}

impl FlowEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, value: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            value,
        }
    }
}
