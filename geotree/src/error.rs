//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum GeoTreeError {
    /// Coordinate tree does not have the nesting depth required by the geometry type, or
    /// contains a non-numeric leaf.
    #[error("malformed coordinates: {0}")]
    MalformedCoordinates(String),

    /// The `type` member names something that is not a known geometry (or GeoJSON object) type.
    #[error("unknown geometry type: {0}")]
    UnknownGeometryType(String),

    /// Bounding box text contains a token that is not a finite number.
    #[error("invalid bounding box text: {0}")]
    InvalidBoundingBoxText(String),

    /// Bounding box has a minimum greater than its maximum on the Y or Z axis.
    #[error("invalid bounding box order: {0}")]
    InvalidBoundingBoxOrder(String),

    /// Bounding box has a number of values other than 0, 4 or 6.
    #[error("bounding box must contain 0, 4 or 6 values, but has {0}")]
    InvalidBoundingBoxLength(usize),

    /// A required member of a GeoJSON object is absent.
    #[error("missing member `{0}`")]
    MissingMember(&'static str),

    /// A member of a GeoJSON object has an unexpected shape.
    #[error("invalid member `{member}`: {reason}")]
    InvalidMember {
        /// Name of the member.
        member: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Error encoding or decoding JSON text.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reading/writing data to the FS.
    #[error("failed to access file: {0}")]
    Io(#[from] std::io::Error),
}
