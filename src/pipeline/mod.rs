pub mod assign;
pub mod extract;
pub mod gradient;
pub mod normalize;
pub mod residual;

use image::DynamicImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cli::ClusterMethod;
use crate::color::Color;
use crate::error::SchemeError;
use crate::scheme::Scheme;

use assign::Role;

/// Settings for a single scheme-generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeOptions {
    pub name: String,
    pub author: String,
    pub max_dim: u32,
    pub threshold: f64,
    pub method: ClusterMethod,
    /// Replace base01..base06 with a ramp between base00 and base07.
    pub gradient: bool,
    /// Fixed seed for every random draw; system entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for SchemeOptions {
    fn default() -> Self {
        Self {
            name: "wallpaper".to_string(),
            author: "wallscheme".to_string(),
            max_dim: extract::MAX_DIM,
            threshold: extract::CONVERGE,
            method: ClusterMethod::Weighted,
            gradient: true,
            seed: None,
        }
    }
}

impl SchemeOptions {
    pub fn rng(&self) -> StdRng {
        self.seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }
}

/// Map a normalized palette onto all sixteen roles.
///
/// Ideal roles are matched first, then the optional gradient, then the
/// leftovers are shuffled into the remaining roles.
pub fn build_roles<R: Rng + ?Sized>(
    normalized: Vec<Color>,
    gradient: bool,
    rng: &mut R,
) -> Result<[Color; Role::COUNT], SchemeError> {
    let mut assignment = assign::assign_ideal(normalized)?;
    if gradient {
        gradient::fill_gradient(&mut assignment)?;
    }
    residual::assign_residual(assignment, rng)
}

/// Run the full derivation on a decoded image.
pub fn generate_scheme<R: Rng + ?Sized>(
    img: &DynamicImage,
    options: &SchemeOptions,
    rng: &mut R,
) -> Result<Scheme, SchemeError> {
    let samples = extract::pixel_samples(img, options.max_dim);
    tracing::debug!(
        width = img.width(),
        height = img.height(),
        distinct = samples.len(),
        "sampled image"
    );

    let palette = extract::extract_palette(&samples, options.method, options.threshold, rng)?;
    let normalized = normalize::normalize_palette(&palette);
    let colors = build_roles(normalized, options.gradient, rng)?;

    Ok(Scheme::new(
        options.name.clone(),
        options.author.clone(),
        colors,
    ))
}
