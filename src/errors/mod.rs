//! Errors for pdfpaint

use std::error::Error as IError;
use std::fmt;
use std::io::Error as IoError;

/// No error_chain or thiserror here: just enums, `From` + pattern matching.
///
/// What this macro does is (simplified): `impl From<$a> for $b { $b::$variant(error) }`
macro_rules! impl_from {
    ($from:ty, $to:ident::$variant:ident) => {
        impl From<$from> for $to {
            fn from(err: $from) -> Self {
                $to::$variant(err.into())
            }
        }
    };
}

#[derive(Debug)]
pub enum Error {
    /// External: std::io::Error (image compression, stream writing)
    Io(IoError),
    /// External: lopdf::Error (content stream encoding)
    Lopdf(lopdf::Error),
    /// External: serde_json::Error (loading `PaintOptions`)
    Json(serde_json::Error),
    /// Gradient paint that cannot be turned into a shading
    Gradient(GradientError),
    /// Texture paint that cannot be turned into a tiling pattern
    Texture(TextureError),
}

impl_from!(IoError, Error::Io);
impl_from!(lopdf::Error, Error::Lopdf);
impl_from!(serde_json::Error, Error::Json);
impl_from!(GradientError, Error::Gradient);
impl_from!(TextureError, Error::Texture);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Lopdf(e) => write!(f, "pdf encoding error: {}", e),
            Error::Json(e) => write!(f, "invalid paint options: {}", e),
            Error::Gradient(e) => write!(f, "{}", e),
            Error::Texture(e) => write!(f, "{}", e),
        }
    }
}

impl IError for Error {
    fn source(&self) -> Option<&(dyn IError + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Lopdf(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::Gradient(e) => Some(e),
            Error::Texture(e) => Some(e),
        }
    }
}

/// Malformed gradient input. These are contract violations of the caller,
/// so they abort the `apply_paint` call before anything is emitted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GradientError {
    /// A gradient needs at least two color stops
    TooFewStops { found: usize },
    /// The number of fractions does not match the number of colors
    StopCountMismatch { colors: usize, fractions: usize },
    /// A gradient point or the radius is NaN or infinite
    NonFiniteGeometry,
}

impl fmt::Display for GradientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::GradientError::*;
        match *self {
            TooFewStops { found } => {
                write!(f, "gradient needs at least 2 color stops, found {}", found)
            }
            StopCountMismatch { colors, fractions } => write!(
                f,
                "gradient has {} colors but {} fractions",
                colors, fractions
            ),
            NonFiniteGeometry => write!(f, "gradient geometry is not finite"),
        }
    }
}

impl IError for GradientError {}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextureError {
    /// The anchor rectangle has no area (or is not finite)
    EmptyAnchorRect,
    /// The texture image has a width or height of 0
    EmptyImage,
    /// The pixel buffer is shorter than `width * height * channels`
    PixelBufferTooShort { expected: usize, found: usize },
    /// `width * height * channels` does not fit into `usize`
    ImageTooLarge { width: usize, height: usize },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::TextureError::*;
        match *self {
            EmptyAnchorRect => write!(f, "texture anchor rectangle is empty"),
            EmptyImage => write!(f, "texture image has no pixels"),
            PixelBufferTooShort { expected, found } => write!(
                f,
                "texture pixel buffer too short: expected {} bytes, found {}",
                expected, found
            ),
            ImageTooLarge { width, height } => {
                write!(f, "texture image of {}x{} pixels is too large", width, height)
            }
        }
    }
}

impl IError for TextureError {}

/// Non-fatal diagnostic produced while mapping a paint.
///
/// Also forwarded to the `log` crate, but collected here so that callers
/// can surface them without installing a logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintWarning {
    pub severity: &'static str,
    pub msg: String,
}

impl PaintWarning {
    pub const ERROR: &'static str = "error";
    pub const WARNING: &'static str = "warning";

    pub fn warning(msg: String) -> Self {
        PaintWarning {
            severity: Self::WARNING,
            msg,
        }
    }
}
