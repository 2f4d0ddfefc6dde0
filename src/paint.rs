//! Paint descriptions: what a region is filled or stroked with.
//!
//! Paints coming from other libraries do not share a common type. They are
//! normalized into [`Paint`] once, via the capability probes of
//! [`PaintSource`], before any shading is built.

use serde_derive::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::errors::GradientError;
use crate::graphics::{Point, Rect};
use crate::image::RawImage;
use crate::matrix::CurTransMat;

/// One color stop of a gradient
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: Rgba,
    /// Position of the stop on the gradient axis, `0.0 ..= 1.0`
    pub fraction: f32,
}

impl GradientStop {
    pub fn new(color: Rgba, fraction: f32) -> Self {
        Self { color, fraction }
    }
}

/// Multi-stop gradient along the axis `start -> end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub stops: Vec<GradientStop>,
    pub start: Point,
    pub end: Point,
    /// Paint-local transform, applied before the caller's transform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<CurTransMat>,
}

/// Multi-stop gradient growing from `focus` to the circle around `center`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialGradient {
    pub stops: Vec<GradientStop>,
    pub center: Point,
    pub focus: Point,
    pub radius: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<CurTransMat>,
}

/// Gradient between exactly two colors at two points, no local transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoStopGradient {
    pub color1: Rgba,
    pub color2: Rgba,
    pub point1: Point,
    pub point2: Point,
}

/// Raster image repeated in a grid of `anchor_rect` sized cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    pub image: RawImage,
    pub anchor_rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type", content = "data")]
pub enum Paint {
    Solid(Rgba),
    LinearGradient(LinearGradient),
    RadialGradient(RadialGradient),
    TwoStopGradient(TwoStopGradient),
    Texture(Texture),
    /// A paint that could not be recognized, `kind` names its type
    Unsupported { kind: String },
}

impl From<Rgba> for Paint {
    fn from(c: Rgba) -> Self {
        Paint::Solid(c)
    }
}

impl From<LinearGradient> for Paint {
    fn from(g: LinearGradient) -> Self {
        Paint::LinearGradient(g)
    }
}

impl From<RadialGradient> for Paint {
    fn from(g: RadialGradient) -> Self {
        Paint::RadialGradient(g)
    }
}

impl From<TwoStopGradient> for Paint {
    fn from(g: TwoStopGradient) -> Self {
        Paint::TwoStopGradient(g)
    }
}

impl From<Texture> for Paint {
    fn from(t: Texture) -> Self {
        Paint::Texture(t)
    }
}

/// Capability probes for a paint of unknown origin.
///
/// Every probe defaults to "not available", an implementation only overrides
/// the ones its paint type actually has.
pub trait PaintSource {
    /// Name of the paint type, used in diagnostics
    fn type_name(&self) -> &str;

    fn solid_color(&self) -> Option<Rgba> {
        None
    }
    fn colors(&self) -> Option<Vec<Rgba>> {
        None
    }
    fn fractions(&self) -> Option<Vec<f32>> {
        None
    }
    fn start_point(&self) -> Option<Point> {
        None
    }
    fn end_point(&self) -> Option<Point> {
        None
    }
    fn center_point(&self) -> Option<Point> {
        None
    }
    fn focus_point(&self) -> Option<Point> {
        None
    }
    fn radius(&self) -> Option<f32> {
        None
    }
    fn transform(&self) -> Option<CurTransMat> {
        None
    }
    fn texture_image(&self) -> Option<RawImage> {
        None
    }
    fn anchor_rect(&self) -> Option<Rect> {
        None
    }
}

impl Paint {
    /// Normalizes a paint of unknown origin by the shape of what it exposes.
    ///
    /// Order: solid color, radial (center + focus + radius), linear with
    /// fractions, two-stop (two colors, two points, no fractions), texture.
    /// Linear gradients without fractions and more than two colors get
    /// evenly spaced stops. Fractions whose count differs from the color
    /// count are rejected.
    pub fn recognize(source: &dyn PaintSource) -> Result<Paint, GradientError> {
        if let Some(color) = source.solid_color() {
            return Ok(Paint::Solid(color));
        }

        if let Some(colors) = source.colors() {
            let fractions = source.fractions();

            if let (Some(center), Some(focus), Some(radius)) =
                (source.center_point(), source.focus_point(), source.radius())
            {
                return Ok(Paint::RadialGradient(RadialGradient {
                    stops: zip_stops(colors, fractions)?,
                    center,
                    focus,
                    radius,
                    transform: source.transform(),
                }));
            }

            if let (Some(start), Some(end)) = (source.start_point(), source.end_point()) {
                if fractions.is_none() && source.transform().is_none() && colors.len() == 2 {
                    return Ok(Paint::TwoStopGradient(TwoStopGradient {
                        color1: colors[0],
                        color2: colors[1],
                        point1: start,
                        point2: end,
                    }));
                }
                return Ok(Paint::LinearGradient(LinearGradient {
                    stops: zip_stops(colors, fractions)?,
                    start,
                    end,
                    transform: source.transform(),
                }));
            }
        }

        if let (Some(image), Some(anchor_rect)) = (source.texture_image(), source.anchor_rect()) {
            return Ok(Paint::Texture(Texture { image, anchor_rect }));
        }

        Ok(Paint::Unsupported {
            kind: source.type_name().to_string(),
        })
    }

    /// Short name of the variant, for diagnostics
    pub fn kind(&self) -> &str {
        match self {
            Paint::Solid(_) => "solid",
            Paint::LinearGradient(_) => "linear-gradient",
            Paint::RadialGradient(_) => "radial-gradient",
            Paint::TwoStopGradient(_) => "two-stop-gradient",
            Paint::Texture(_) => "texture",
            Paint::Unsupported { kind } => kind.as_str(),
        }
    }
}

impl PaintSource for Paint {
    fn type_name(&self) -> &str {
        self.kind()
    }

    fn solid_color(&self) -> Option<Rgba> {
        match self {
            Paint::Solid(c) => Some(*c),
            _ => None,
        }
    }

    fn colors(&self) -> Option<Vec<Rgba>> {
        match self {
            Paint::LinearGradient(g) => Some(g.stops.iter().map(|s| s.color).collect()),
            Paint::RadialGradient(g) => Some(g.stops.iter().map(|s| s.color).collect()),
            Paint::TwoStopGradient(g) => Some(vec![g.color1, g.color2]),
            _ => None,
        }
    }

    fn fractions(&self) -> Option<Vec<f32>> {
        match self {
            Paint::LinearGradient(g) => Some(g.stops.iter().map(|s| s.fraction).collect()),
            Paint::RadialGradient(g) => Some(g.stops.iter().map(|s| s.fraction).collect()),
            _ => None,
        }
    }

    fn start_point(&self) -> Option<Point> {
        match self {
            Paint::LinearGradient(g) => Some(g.start),
            Paint::TwoStopGradient(g) => Some(g.point1),
            _ => None,
        }
    }

    fn end_point(&self) -> Option<Point> {
        match self {
            Paint::LinearGradient(g) => Some(g.end),
            Paint::TwoStopGradient(g) => Some(g.point2),
            _ => None,
        }
    }

    fn center_point(&self) -> Option<Point> {
        match self {
            Paint::RadialGradient(g) => Some(g.center),
            _ => None,
        }
    }

    fn focus_point(&self) -> Option<Point> {
        match self {
            Paint::RadialGradient(g) => Some(g.focus),
            _ => None,
        }
    }

    fn radius(&self) -> Option<f32> {
        match self {
            Paint::RadialGradient(g) => Some(g.radius),
            _ => None,
        }
    }

    fn transform(&self) -> Option<CurTransMat> {
        match self {
            Paint::LinearGradient(g) => g.transform,
            Paint::RadialGradient(g) => g.transform,
            _ => None,
        }
    }

    fn texture_image(&self) -> Option<RawImage> {
        match self {
            Paint::Texture(t) => Some(t.image.clone()),
            _ => None,
        }
    }

    fn anchor_rect(&self) -> Option<Rect> {
        match self {
            Paint::Texture(t) => Some(t.anchor_rect),
            _ => None,
        }
    }
}

/// Pairs colors with their fractions, missing fractions are spread evenly
fn zip_stops(
    colors: Vec<Rgba>,
    fractions: Option<Vec<f32>>,
) -> Result<Vec<GradientStop>, GradientError> {
    let n = colors.len();
    match fractions {
        Some(f) if f.len() != n => Err(GradientError::StopCountMismatch {
            colors: n,
            fractions: f.len(),
        }),
        Some(f) => Ok(colors
            .into_iter()
            .zip(f)
            .map(|(color, fraction)| GradientStop { color, fraction })
            .collect()),
        None => Ok(colors
            .into_iter()
            .enumerate()
            .map(|(i, color)| GradientStop {
                color,
                fraction: if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 },
            })
            .collect()),
    }
}
