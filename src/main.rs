use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wallscheme::cli::{Args, OutputFormat};
use wallscheme::pipeline::extract::load_image;
use wallscheme::pipeline::{generate_scheme, SchemeOptions};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wallscheme=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let args = Args::parse();

    let name = args.name.clone().unwrap_or_else(|| {
        args.image
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "wallpaper".to_string())
    });
    let options = SchemeOptions {
        name,
        author: args.author.clone(),
        max_dim: args.max_dim,
        threshold: args.threshold,
        method: args.method,
        gradient: !args.no_gradient,
        seed: args.seed,
    };

    let img = load_image(&args.image)?;
    let scheme = generate_scheme(&img, &options, &mut options.rng())
        .with_context(|| format!("failed to derive a scheme from {}", args.image.display()))?;
    tracing::info!(scheme = %scheme.name, "generated scheme");

    let content = match args.format {
        OutputFormat::Scheme => scheme.to_yaml()?,
        OutputFormat::Variables => serde_yaml::to_string(&scheme.template_variables())
            .context("failed to serialize template variables")?,
    };

    match &args.output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("failed to write scheme to {}", path.display()))?,
        None => print!("{content}"),
    }

    Ok(())
}
