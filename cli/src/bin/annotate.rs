use annotation::{MaskShape, PaintState};
use clap::{Parser, Subcommand};
use cli::{draw_outline, AnnotateConfig};
use color_eyre::eyre::{eyre, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a .toml or .json configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Vectorize a mask image into polygon shapes (JSON)
    Vectorize {
        /// Path to the mask image; non-zero pixels are foreground
        #[arg(short, long)]
        input: PathBuf,
        /// Path to save the JSON output
        #[arg(short, long)]
        output: PathBuf,
        /// Douglas-Peucker tolerance, overrides the config
        #[arg(long)]
        epsilon: Option<f64>,
        /// Mask scale relative to the image, overrides the config
        #[arg(long)]
        scale: Option<f64>,
        /// Emit exterior and hole rings separately instead of spliced polygons
        #[arg(long)]
        complex: bool,
    },
    /// Render the translucent mask overlay as a PNG
    Overlay {
        /// Path to the mask image
        #[arg(short, long)]
        input: PathBuf,
        /// Path to save the overlay PNG
        #[arg(short, long)]
        output: PathBuf,
        /// Mask scale relative to the image, overrides the config
        #[arg(long)]
        scale: Option<f64>,
        /// Also draw the vectorized polygon outlines
        #[arg(long)]
        outline: bool,
    },
    /// Print the JSON schema of the configuration file
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AnnotateConfig::from_file(path)?,
        None => AnnotateConfig::default(),
    };

    match &cli.command {
        Commands::Vectorize {
            input,
            output,
            epsilon,
            scale,
            complex,
        } => {
            let epsilon = epsilon.unwrap_or(config.vectorize.epsilon);
            let scale = scale.unwrap_or(config.vectorize.scale);
            vectorize(&config, input, output, epsilon, scale, *complex)?;
        }
        Commands::Overlay {
            input,
            output,
            scale,
            outline,
        } => {
            let scale = scale.unwrap_or(config.vectorize.scale);
            overlay(&config, input, output, scale, *outline)?;
        }
        Commands::Schema => {
            println!("{}", AnnotateConfig::schema_json()?);
        }
    }

    Ok(())
}

fn load_mask(config: &AnnotateConfig, input: &Path, scale: f64) -> Result<MaskShape> {
    let mut mask = MaskShape::new().with_attributes(config.attributes.clone());
    mask.load_mask(input, scale)?;
    info!("Loaded mask {:?} at scale {}", input, scale);
    Ok(mask)
}

fn vectorize(
    config: &AnnotateConfig,
    input: &Path,
    output: &Path,
    epsilon: f64,
    scale: f64,
    complex: bool,
) -> Result<()> {
    let mask = load_mask(config, input, scale)?;

    let (json, count) = if complex {
        let shapes = mask.to_complex_shapes(epsilon);
        (serde_json::to_string_pretty(&shapes)?, shapes.len())
    } else {
        let polygons = mask.to_polygons(epsilon);
        (serde_json::to_string_pretty(&polygons)?, polygons.len())
    };
    if count == 0 {
        warn!("No shapes found in {:?}", input);
    }

    std::fs::write(output, json)?;
    info!("Wrote {} shapes to {:?}", count, output);
    Ok(())
}

fn overlay(
    config: &AnnotateConfig,
    input: &Path,
    output: &Path,
    scale: f64,
    outline: bool,
) -> Result<()> {
    let mut mask = load_mask(config, input, scale)?;

    let polygons = if outline {
        mask.to_polygons(config.vectorize.epsilon)
    } else {
        Vec::new()
    };

    let mut image = mask
        .render_overlay(&config.overlay)
        .ok_or_else(|| eyre!("Mask {:?} produced no overlay", input))?
        .clone();

    for polygon in &polygons {
        let geometry = polygon.build_render_geometry(&config.style, &PaintState::default());
        draw_outline(&mut image, &geometry);
    }

    image.save(output)?;
    info!(
        "Wrote {}x{} overlay to {:?}",
        image.width(),
        image.height(),
        output
    );
    Ok(())
}
