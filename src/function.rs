//! PDF functions for gradient shadings: a Type 3 (stitching) function over
//! one Type 2 (exponential, here linear) function per pair of adjacent stops.

use lopdf::Object::{Array, Dictionary, Integer, Real};
use serde_derive::{Deserialize, Serialize};

use crate::color::{ColorMapper, Components, Rgba};
use crate::errors::GradientError;

/// How the boundaries between the sub-functions of a stitching function are placed
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopBounds {
    /// `1/n, 2/n, ...` for `n` colors, regardless of the stop fractions.
    /// This reproduces what existing output looks like.
    #[default]
    Uniform,
    /// The interior stop fractions of the gradient
    FromFractions,
}

/* /FunctionType 2 */
/// Linear interpolation between two colors: `C0 + t * (C1 - C0)` with `N = 1`
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialFunction {
    pub domain: [f32; 2],
    pub c0: Components,
    pub c1: Components,
    pub n: i64,
}

impl From<&ExponentialFunction> for lopdf::Dictionary {
    fn from(f: &ExponentialFunction) -> Self {
        lopdf::Dictionary::from_iter(vec![
            ("FunctionType", Integer(2)),
            ("C0", Array(f.c0.iter().copied().map(Real).collect())),
            ("C1", Array(f.c1.iter().copied().map(Real).collect())),
            ("N", Integer(f.n)),
            ("Domain", Array(f.domain.iter().copied().map(Real).collect())),
        ])
    }
}

/* /FunctionType 3 */
/// Stitching function: `functions[i]` covers `[bounds[i-1], bounds[i]]` of the domain
#[derive(Debug, Clone, PartialEq)]
pub struct StitchingFunction {
    pub domain: [f32; 2],
    pub functions: Vec<ExponentialFunction>,
    /// `functions.len() - 1` entries
    pub bounds: Vec<f32>,
    /// `2 * functions.len()` entries, always `0 1` pairs
    pub encode: Vec<f32>,
}

impl From<&StitchingFunction> for lopdf::Dictionary {
    fn from(f: &StitchingFunction) -> Self {
        lopdf::Dictionary::from_iter(vec![
            ("FunctionType", Integer(3)),
            ("Domain", Array(f.domain.iter().copied().map(Real).collect())),
            (
                "Functions",
                Array(f.functions.iter().map(|sub| Dictionary(sub.into())).collect()),
            ),
            ("Bounds", Array(f.bounds.iter().copied().map(Real).collect())),
            ("Encode", Array(f.encode.iter().copied().map(Real).collect())),
        ])
    }
}

/// Builds the stitching function for the colors of a gradient.
///
/// `fractions` are only read for `StopBounds::FromFractions`, but must match
/// the number of colors if given. The alpha of the colors is dropped: color
/// functions only carry the mapped components.
pub fn build_stitching_function(
    colors: &[Rgba],
    fractions: &[f32],
    stop_bounds: StopBounds,
    mapper: &dyn ColorMapper,
) -> Result<StitchingFunction, GradientError> {
    let n = colors.len();
    if n < 2 {
        return Err(GradientError::TooFewStops { found: n });
    }
    if !fractions.is_empty() && fractions.len() != n {
        return Err(GradientError::StopCountMismatch {
            colors: n,
            fractions: fractions.len(),
        });
    }

    let domain = [0.0, 1.0];

    let bounds = match stop_bounds {
        StopBounds::FromFractions if !fractions.is_empty() => fractions[1..n - 1].to_vec(),
        _ => (2..n)
            .map(|i| (1.0 / n as f32) * (i - 1) as f32)
            .collect::<Vec<_>>(),
    };

    let mut functions = Vec::with_capacity(n - 1);
    let mut encode = Vec::with_capacity(2 * (n - 1));
    for pair in colors.windows(2) {
        functions.push(ExponentialFunction {
            domain,
            c0: mapper.map_color(&pair[0]).components(),
            c1: mapper.map_color(&pair[1]).components(),
            n: 1,
        });
        encode.push(0.0);
        encode.push(1.0);
    }

    Ok(StitchingFunction {
        domain,
        functions,
        bounds,
        encode,
    })
}
