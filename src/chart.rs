//! Declarative chart descriptions.
//!
//! A [`Chart`] bundles one family's input data with its config and is what the
//! CLI reads from JSON:
//!
//! ```json
//! { "kind": "pie", "segments": [{ "label": "A", "value": 40 }, { "label": "B", "value": 60 }] }
//! ```
//!
//! Config fields are optional and default per family.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::arc::{self, GaugeConfig, HarveyConfig, PieConfig};
use crate::layout::cartesian::{
    self, AreaChartConfig, BarChartConfig, BulletConfig, HeatmapConfig, ScatterConfig, SparklineConfig,
    StackedBarConfig,
};
use crate::layout::flow::{self, SankeyConfig};
use crate::layout::proportional::{self, FunnelConfig, TreemapConfig, WaterfallConfig};
use crate::layout::radial::{
    self, ConcentricConfig, CycleConfig, FlywheelConfig, HubSpokeConfig, MindMapConfig, QuadrantConfig,
    RadarConfig, VennConfig,
};
use crate::layout::tree::{self, OrgChartConfig};
use crate::models::{
    BulletData, DataPoint, FlowEdge, HeatmapGrid, HierarchyNode, MindMapBranch, QuadrantItem, RadarSeries,
    SankeyNode, ScatterPoint, Segment, StackedBar,
};
use crate::primitive::LayoutPrimitive;
use crate::style::Theme;

fn hundred() -> f64 {
    100.0
}

fn total_label() -> String {
    "Total".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Bar {
        bars: Vec<DataPoint>,
        #[serde(default)]
        config: BarChartConfig,
    },
    StackedBar {
        rows: Vec<StackedBar>,
        #[serde(default)]
        config: StackedBarConfig,
    },
    Area {
        series: Vec<DataPoint>,
        #[serde(default)]
        config: AreaChartConfig,
    },
    Sparkline {
        values: Vec<f64>,
        #[serde(default)]
        config: SparklineConfig,
    },
    Scatter {
        points: Vec<ScatterPoint>,
        #[serde(default)]
        config: ScatterConfig,
    },
    Heatmap {
        grid: HeatmapGrid,
        #[serde(default)]
        config: HeatmapConfig,
    },
    Bullet {
        rows: Vec<BulletData>,
        #[serde(default)]
        config: BulletConfig,
    },
    Pie {
        segments: Vec<Segment>,
        #[serde(default)]
        config: PieConfig,
    },
    Donut {
        segments: Vec<Segment>,
        #[serde(default = "PieConfig::donut")]
        config: PieConfig,
    },
    Gauge {
        value: f64,
        #[serde(default)]
        min: f64,
        #[serde(default = "hundred")]
        max: f64,
        #[serde(default)]
        config: GaugeConfig,
    },
    ProgressRing {
        value: f64,
        #[serde(default)]
        min: f64,
        #[serde(default = "hundred")]
        max: f64,
        #[serde(default = "GaugeConfig::progress_ring")]
        config: GaugeConfig,
    },
    HarveyBalls {
        items: Vec<DataPoint>,
        #[serde(default)]
        config: HarveyConfig,
    },
    Funnel {
        stages: Vec<Segment>,
        #[serde(default)]
        config: FunnelConfig,
    },
    Pyramid {
        levels: Vec<Segment>,
        #[serde(default = "FunnelConfig::pyramid")]
        config: FunnelConfig,
    },
    Treemap {
        items: Vec<Segment>,
        #[serde(default)]
        config: TreemapConfig,
    },
    Waterfall {
        deltas: Vec<DataPoint>,
        #[serde(default)]
        config: WaterfallConfig,
    },
    Bridge {
        start: DataPoint,
        deltas: Vec<DataPoint>,
        #[serde(default = "total_label")]
        end_label: String,
        #[serde(default)]
        config: WaterfallConfig,
    },
    Cycle {
        items: Vec<String>,
        #[serde(default)]
        config: CycleConfig,
    },
    Loop {
        items: Vec<String>,
        #[serde(default)]
        config: CycleConfig,
    },
    Flywheel {
        #[serde(default)]
        hub: String,
        items: Vec<String>,
        #[serde(default)]
        config: FlywheelConfig,
    },
    HubSpoke {
        hub: String,
        spokes: Vec<String>,
        #[serde(default)]
        config: HubSpokeConfig,
    },
    MindMap {
        root: String,
        branches: Vec<MindMapBranch>,
        #[serde(default)]
        config: MindMapConfig,
    },
    ConcentricCircles {
        rings: Vec<String>,
        #[serde(default)]
        config: ConcentricConfig,
    },
    Radar {
        axes: Vec<String>,
        series: Vec<RadarSeries>,
        #[serde(default)]
        config: RadarConfig,
    },
    Venn {
        sets: Vec<String>,
        #[serde(default)]
        config: VennConfig,
    },
    MatrixQuadrant {
        items: Vec<QuadrantItem>,
        #[serde(default)]
        config: QuadrantConfig,
    },
    PriorityMatrix {
        items: Vec<QuadrantItem>,
        #[serde(default)]
        config: QuadrantConfig,
    },
    CompetitorMap {
        items: Vec<QuadrantItem>,
        #[serde(default)]
        config: QuadrantConfig,
    },
    OrgChart {
        nodes: Vec<HierarchyNode>,
        #[serde(default)]
        config: OrgChartConfig,
    },
    Sankey {
        #[serde(default)]
        nodes: Vec<SankeyNode>,
        flows: Vec<FlowEdge>,
        #[serde(default)]
        config: SankeyConfig,
    },
}

impl Chart {
    /// The `kind` tag, as written in JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            Chart::Bar { .. } => "bar",
            Chart::StackedBar { .. } => "stacked_bar",
            Chart::Area { .. } => "area",
            Chart::Sparkline { .. } => "sparkline",
            Chart::Scatter { .. } => "scatter",
            Chart::Heatmap { .. } => "heatmap",
            Chart::Bullet { .. } => "bullet",
            Chart::Pie { .. } => "pie",
            Chart::Donut { .. } => "donut",
            Chart::Gauge { .. } => "gauge",
            Chart::ProgressRing { .. } => "progress_ring",
            Chart::HarveyBalls { .. } => "harvey_balls",
            Chart::Funnel { .. } => "funnel",
            Chart::Pyramid { .. } => "pyramid",
            Chart::Treemap { .. } => "treemap",
            Chart::Waterfall { .. } => "waterfall",
            Chart::Bridge { .. } => "bridge",
            Chart::Cycle { .. } => "cycle",
            Chart::Loop { .. } => "loop",
            Chart::Flywheel { .. } => "flywheel",
            Chart::HubSpoke { .. } => "hub_spoke",
            Chart::MindMap { .. } => "mind_map",
            Chart::ConcentricCircles { .. } => "concentric_circles",
            Chart::Radar { .. } => "radar",
            Chart::Venn { .. } => "venn",
            Chart::MatrixQuadrant { .. } => "matrix_quadrant",
            Chart::PriorityMatrix { .. } => "priority_matrix",
            Chart::CompetitorMap { .. } => "competitor_map",
            Chart::OrgChart { .. } => "org_chart",
            Chart::Sankey { .. } => "sankey",
        }
    }

    /// Run the matching layout family.
    pub fn layout(&self, theme: &Theme) -> Result<Vec<LayoutPrimitive>> {
        let prims = match self {
            Chart::Bar { bars, config } => cartesian::bar_chart(bars, config, theme),
            Chart::StackedBar { rows, config } => cartesian::stacked_bar_chart(rows, config, theme),
            Chart::Area { series, config } => cartesian::area_chart(series, config, theme),
            Chart::Sparkline { values, config } => cartesian::sparkline(values, config, theme),
            Chart::Scatter { points, config } => cartesian::scatter_plot(points, config, theme),
            Chart::Heatmap { grid, config } => cartesian::heatmap(grid, config, theme),
            Chart::Bullet { rows, config } => cartesian::bullet_chart(rows, config, theme),
            Chart::Pie { segments, config } => arc::pie_chart(segments, config, theme),
            Chart::Donut { segments, config } => arc::donut_chart(segments, config, theme),
            Chart::Gauge { value, min, max, config } => arc::gauge(*value, *min, *max, config, theme),
            Chart::ProgressRing { value, min, max, config } => arc::progress_ring(*value, *min, *max, config, theme),
            Chart::HarveyBalls { items, config } => arc::harvey_balls(items, config, theme),
            Chart::Funnel { stages, config } => proportional::funnel(stages, config, theme),
            Chart::Pyramid { levels, config } => proportional::pyramid(levels, config, theme),
            Chart::Treemap { items, config } => proportional::treemap_strip(items, config, theme),
            Chart::Waterfall { deltas, config } => proportional::waterfall_chart(deltas, config, theme),
            Chart::Bridge {
                start,
                deltas,
                end_label,
                config,
            } => proportional::bridge_chart(start, deltas, end_label, config, theme),
            Chart::Cycle { items, config } => radial::cycle_diagram(items, config, theme),
            Chart::Loop { items, config } => radial::loop_diagram(items, config, theme),
            Chart::Flywheel { hub, items, config } => radial::flywheel(hub, items, config, theme),
            Chart::HubSpoke { hub, spokes, config } => radial::hub_spoke(hub, spokes, config, theme),
            Chart::MindMap { root, branches, config } => radial::mind_map(root, branches, config, theme),
            Chart::ConcentricCircles { rings, config } => radial::concentric_circles(rings, config, theme),
            Chart::Radar { axes, series, config } => radial::radar_chart(axes, series, config, theme),
            Chart::Venn { sets, config } => radial::venn(sets, config, theme),
            Chart::MatrixQuadrant { items, config } => radial::matrix_quadrant(items, config, theme),
            Chart::PriorityMatrix { items, config } => radial::priority_matrix(items, config, theme),
            Chart::CompetitorMap { items, config } => radial::competitor_map(items, config, theme),
            Chart::OrgChart { nodes, config } => tree::org_chart(nodes, config, theme)?,
            Chart::Sankey { nodes, flows, config } => flow::sankey(nodes, flows, config, theme),
        };
        log::debug!("{} layout produced {} primitives", self.kind(), prims.len());
        Ok(prims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn donut_defaults_to_a_hole() {
        let chart: Chart =
            serde_json::from_str(r#"{"kind":"donut","segments":[{"label":"a","value":1}]}"#).unwrap();
        match chart {
            Chart::Donut { config, .. } => assert!(config.inner_ratio > 0.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn kind_matches_tag() {
        let chart: Chart = serde_json::from_str(r#"{"kind":"hub_spoke","hub":"H","spokes":["a"]}"#).unwrap();
        assert_eq!(chart.kind(), "hub_spoke");
    }
}
