use deck_geometry::{Chart, Theme, io, render};
use std::fs;
use tempfile::tempdir;

const ORG: &str = r#"{
  "kind": "org_chart",
  "nodes": [
    { "id": "1", "label": "CEO" },
    { "id": "2", "label": "CTO", "parentId": "1", "title": "Technology" },
    { "id": "3", "label": "VP Sales", "parent_id": "1" }
  ],
  "config": { "connector": "straight" }
}"#;

const SAMPLES: &[&str] = &[
    r#"{"kind":"bar","bars":[{"label":"A","value":"1,200"},{"label":"B","value":800}]}"#,
    r#"{"kind":"pie","segments":[{"label":"A","value":40},{"label":"B","value":60}]}"#,
    r#"{"kind":"donut","segments":[{"label":"A","value":1}],"config":{"center_label":"100%"}}"#,
    r#"{"kind":"gauge","value":72}"#,
    r#"{"kind":"pyramid","levels":[{"label":"Base","value":3},{"label":"Top","value":1}]}"#,
    r#"{"kind":"bridge","start":{"label":"2023","value":100},"deltas":[{"label":"Up","value":25}]}"#,
    r#"{"kind":"flywheel","hub":"Growth","items":["Attract","Engage","Delight"]}"#,
    r#"{"kind":"mind_map","root":"Plan","branches":[{"label":"A","children":["x","y"]}]}"#,
    r#"{"kind":"matrix_quadrant","items":[{"label":"X","x":20,"y":80}],"config":{"quadrant_labels":["Q1","Q2","Q3","Q4"]}}"#,
    r#"{"kind":"sankey","flows":[{"from":"a","to":"b","value":3}]}"#,
];

#[test]
fn sample_charts_lay_out() {
    let theme = Theme::default();
    for src in SAMPLES {
        let chart: Chart = serde_json::from_str(src).unwrap_or_else(|e| panic!("{src}: {e}"));
        let prims = chart.layout(&theme).unwrap();
        assert!(!prims.is_empty(), "{} produced nothing", chart.kind());
    }
}

#[test]
fn layout_is_idempotent() {
    let theme = Theme::default();
    for src in SAMPLES.iter().chain([&ORG]) {
        let chart: Chart = serde_json::from_str(src).unwrap();
        assert_eq!(chart.layout(&theme).unwrap(), chart.layout(&theme).unwrap());
    }
}

#[test]
fn chart_file_to_json_and_svg() {
    let dir = tempdir().unwrap();
    let chart_path = dir.path().join("org.json");
    fs::write(&chart_path, ORG).unwrap();

    let chart = io::load_chart(&chart_path).unwrap();
    assert_eq!(chart.kind(), "org_chart");
    let prims = chart.layout(&Theme::default()).unwrap();

    let out = dir.path().join("layout.json");
    io::save_layout_json(&prims, &out).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v.as_array().unwrap().len(), prims.len());
    assert_eq!(v[0]["shape"]["type"], "line");

    let svg = dir.path().join("org.svg");
    render::render_to_file(&prims, &svg, 800, 400).unwrap();
    let body = fs::read_to_string(&svg).unwrap();
    assert!(body.contains("<svg"));
}

#[test]
fn theme_file_overrides_palette() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("theme.json");
    fs::write(&p, r##"{ "palette": { "colors": ["#112233", "#445566cc"] }, "font_px": 18 }"##).unwrap();
    let theme = io::load_theme(&p).unwrap();
    assert_eq!(theme.palette.len(), 2);
    assert_eq!(theme.palette.color(2), theme.palette.color(0));
    assert_eq!(theme.palette.color(1).a, 0xcc);
    assert_eq!(theme.font_px, 18.0);
    assert_eq!(theme.positive, Theme::default().positive);
}

#[test]
fn unknown_kind_is_an_error() {
    assert!(serde_json::from_str::<Chart>(r#"{"kind":"pie3d","segments":[]}"#).is_err());
    let dir = tempdir().unwrap();
    let p = dir.path().join("bad.json");
    fs::write(&p, "{").unwrap();
    let msg = format!("{:#}", io::load_chart(&p).unwrap_err());
    assert!(msg.contains("parsing chart"), "{msg}");
}
