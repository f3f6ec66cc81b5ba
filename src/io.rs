use crate::chart::Chart;
use crate::models::DataPoint;
use crate::primitive::LayoutPrimitive;
use crate::style::Theme;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

/// Read a chart description from a JSON file.
pub fn load_chart<P: AsRef<Path>>(path: P) -> Result<Chart> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening chart {}", path.display()))?;
    let chart = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing chart {}", path.display()))?;
    Ok(chart)
}

/// Read a theme from a JSON file; missing fields keep their defaults.
pub fn load_theme<P: AsRef<Path>>(path: P) -> Result<Theme> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).with_context(|| format!("reading theme {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parsing theme {}", path.display()))
}

/// Read `label,value` rows. Values may carry thousands separators (`"1,234"`).
pub fn load_points_csv<P: AsRef<Path>>(path: P) -> Result<Vec<DataPoint>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (i, row) in rdr.deserialize::<DataPoint>().enumerate() {
        // header is line 1
        out.push(row.with_context(|| format!("{} line {}", path.display(), i + 2))?);
    }
    Ok(out)
}

/// Save primitives as a pretty JSON array.
pub fn save_layout_json<P: AsRef<Path>>(primitives: &[LayoutPrimitive], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let s = serde_json::to_string_pretty(primitives)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn csv_values_accept_separators() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("d.csv");
        fs::write(&p, "label,value\nNorth,\"1,250\"\nSouth , 75.5\n").unwrap();
        let pts = load_points_csv(&p).unwrap();
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0].value, 1250.0);
        assert_eq!(pts[1].label, "South");
    }

    #[test]
    fn bad_row_names_the_line() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("d.csv");
        fs::write(&p, "label,value\nA,1\nB,abc\n").unwrap();
        let err = format!("{:#}", load_points_csv(&p).unwrap_err());
        assert!(err.contains("line 3"), "{err}");
    }
}
