use std::path::PathBuf;

use clap::Parser;

/// Generate base16 color schemes from wallpaper images.
#[derive(Parser, Debug)]
#[command(name = "wallscheme", version, about)]
pub struct Args {
    /// Path to the input image
    pub image: PathBuf,

    /// Scheme name (defaults to image filename stem)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Scheme author
    #[arg(short, long, default_value = "wallscheme")]
    pub author: String,

    /// Write the scheme to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seed for cluster initialization and residual shuffling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Clustering algorithm
    #[arg(long, value_enum, default_value_t = ClusterMethod::Weighted)]
    pub method: ClusterMethod,

    /// Keep matched colors in base01..base06 instead of a base00→base07 ramp
    #[arg(long)]
    pub no_gradient: bool,

    /// K-means convergence threshold (max center movement in RGB units for
    /// `weighted`, CIELAB units for `hamerly`)
    #[arg(long, default_value_t = 1.0)]
    pub threshold: f64,

    /// Longest image side considered before clustering
    #[arg(long, default_value_t = 256)]
    pub max_dim: u32,

    /// What to print
    #[arg(long, value_enum, default_value_t = OutputFormat::Scheme)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ClusterMethod {
    /// Frequency-weighted k-means over distinct RGB colors
    Weighted,
    /// Hamerly k-means over every pixel in CIELAB
    Hamerly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// base16 scheme YAML
    Scheme,
    /// Flattened template variables as YAML
    Variables,
}
