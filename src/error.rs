use std::path::PathBuf;

use thiserror::Error;

/// Every way a scheme-generation call can fail. All variants are fatal to the
/// call; no partially populated scheme is ever returned.
#[derive(Debug, Error)]
pub enum SchemeError {
    /// The image could not be opened or decoded.
    #[error("cannot decode image {}: {source}", path.display())]
    DecodeUnavailable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The decoded image has no pixels to cluster.
    #[error("image contains no pixels")]
    EmptyImage,

    /// Fewer palette colors remain than ideal roles still to be matched.
    #[error("insufficient palette: {available} colors for {required} ideal roles")]
    InsufficientPalette { available: usize, required: usize },

    /// Internal consistency violation: a role left unbound or a color left over.
    #[error("assignment exhausted: {0}")]
    AssignmentExhaustion(String),
}
