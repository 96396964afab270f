use std::path::PathBuf;

use districtlens::{FillMode, MetricField};

/// Accountability dashboard CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "districtlens", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render the district scatter to an SVG file
    Render(RenderArgs),

    /// Render one district's campus drill-down to an SVG file
    Drilldown(DrilldownArgs),
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// District-level records (JSON array)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub districts: PathBuf,

    /// Campus-level records (JSON array)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub campuses: PathBuf,

    /// X-axis metric column, e.g. EconomicallyDisadvantagedPct
    #[arg(short, long)]
    pub x_field: Option<MetricField>,

    /// Y-axis metric column, e.g. OverallScoreMean
    #[arg(short, long)]
    pub y_field: Option<MetricField>,

    /// Mark fill channel: "category" or "ramp"
    #[arg(long)]
    pub fill: Option<FillMode>,

    /// Output SVG file, defaults to "./scatter.svg"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct DrilldownArgs {
    /// District-level records (JSON array)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub districts: PathBuf,

    /// Campus-level records (JSON array)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub campuses: PathBuf,

    /// District id to drill into
    #[arg(short, long)]
    pub district: String,

    /// Output SVG file, defaults to "./drilldown.svg"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
