use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use deck_geometry::layout::{arc, cartesian, proportional};
use deck_geometry::{io, render, stagger_order, Chart, LayoutPrimitive, StaggerMode, Theme};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "deckgeo",
    version,
    about = "Lay out slide charts and diagrams as positioned drawing primitives"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a JSON chart description (and optionally save, render, and order it).
    Layout(LayoutArgs),
    /// Lay out a `label,value` CSV file as a simple chart.
    Csv(CsvArgs),
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Theme JSON; omitted fields keep the built-in Office palette.
    #[arg(long)]
    theme: Option<PathBuf>,
    /// Save primitives as JSON. Printed to stdout when omitted and no --render is given.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Render a preview at the given path (.svg or .png).
    #[arg(long)]
    render: Option<PathBuf>,
    /// Width of the preview (default 1280).
    #[arg(long, default_value_t = 1280)]
    width: u32,
    /// Height of the preview (default 720).
    #[arg(long, default_value_t = 720)]
    height: u32,
    /// Print the presentation order of the primitives to stdout.
    #[arg(long, value_enum)]
    stagger: Option<StaggerMode>,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Chart description (JSON with a "kind" tag).
    chart: PathBuf,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CsvKind {
    Bar,
    Pie,
    Donut,
    Funnel,
    Treemap,
    Waterfall,
}

#[derive(Args, Debug)]
struct CsvArgs {
    /// CSV file with a `label,value` header.
    data: PathBuf,
    /// Chart kind to lay the rows out as.
    #[arg(long, value_enum, default_value_t = CsvKind::Bar)]
    kind: CsvKind,
    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Csv(args) => cmd_csv(args),
    }
}

fn load_theme(path: Option<&Path>) -> Result<Theme> {
    match path {
        Some(p) => io::load_theme(p),
        None => Ok(Theme::default()),
    }
}

fn cmd_layout(args: LayoutArgs) -> Result<()> {
    let chart = io::load_chart(&args.chart)?;
    let theme = load_theme(args.output.theme.as_deref())?;
    info!("laying out {} chart from {}", chart.kind(), args.chart.display());
    let prims = chart.layout(&theme)?;
    emit(&prims, &args.output)
}

fn cmd_csv(args: CsvArgs) -> Result<()> {
    let rows = io::load_points_csv(&args.data)?;
    let theme = load_theme(args.output.theme.as_deref())?;
    info!("read {} rows from {}", rows.len(), args.data.display());
    let chart = match args.kind {
        CsvKind::Bar => Chart::Bar {
            bars: rows,
            config: cartesian::BarChartConfig::default(),
        },
        CsvKind::Pie => Chart::Pie {
            segments: rows,
            config: arc::PieConfig::default(),
        },
        CsvKind::Donut => Chart::Donut {
            segments: rows,
            config: arc::PieConfig::donut(),
        },
        CsvKind::Funnel => Chart::Funnel {
            stages: rows,
            config: proportional::FunnelConfig::default(),
        },
        CsvKind::Treemap => Chart::Treemap {
            items: rows,
            config: proportional::TreemapConfig::default(),
        },
        CsvKind::Waterfall => Chart::Waterfall {
            deltas: rows,
            config: proportional::WaterfallConfig::default(),
        },
    };
    let prims = chart.layout(&theme)?;
    emit(&prims, &args.output)
}

fn emit(prims: &[LayoutPrimitive], out: &OutputArgs) -> Result<()> {
    if let Some(path) = out.out.as_ref() {
        io::save_layout_json(prims, path)?;
        eprintln!("Saved {} primitives to {}", prims.len(), path.display());
    }
    if let Some(path) = out.render.as_ref() {
        render::render_to_file(prims, path, out.width, out.height)?;
        eprintln!("Wrote preview to {}", path.display());
    }
    if out.out.is_none() && out.render.is_none() {
        println!("{}", serde_json::to_string_pretty(prims)?);
    }
    if let Some(mode) = out.stagger {
        let order = stagger_order(prims, mode);
        let line: Vec<String> = order.iter().map(|i| i.to_string()).collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}
