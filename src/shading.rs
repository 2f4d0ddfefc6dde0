//! Axial and radial shadings built from gradient paints

use lopdf::Object::{Array, Boolean, Dictionary, Integer, Real};

use crate::color::{ColorMapper, ColorSpace, Rgba};
use crate::errors::GradientError;
use crate::function::{build_stitching_function, StitchingFunction, StopBounds};
use crate::graphics::Point;
use crate::matrix::CurTransMat;
use crate::paint::{LinearGradient, RadialGradient, TwoStopGradient};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShadingType {
    /// Type 2, color varies along the axis between two points
    Axial,
    /// Type 3, color varies between two circles
    Radial,
}

impl From<ShadingType> for i64 {
    fn from(t: ShadingType) -> i64 {
        match t {
            ShadingType::Axial => 2,
            ShadingType::Radial => 3,
        }
    }
}

/* /Shading << /ShadingType 2 /ColorSpace .. /Coords [..] /Function << .. >> /Extend [..] >> */
#[derive(Debug, Clone, PartialEq)]
pub struct Shading {
    pub shading_type: ShadingType,
    pub color_space: ColorSpace,
    /// `[x0 y0 x1 y1]` for axial, `[x0 y0 r0 x1 y1 r1]` for radial shadings
    pub coords: Vec<f32>,
    pub function: StitchingFunction,
    /// Extend the shading beyond the start / end of the axis
    pub extend: (bool, bool),
}

impl From<&Shading> for lopdf::Dictionary {
    fn from(s: &Shading) -> Self {
        lopdf::Dictionary::from_iter(vec![
            ("ShadingType", Integer(s.shading_type.into())),
            ("ColorSpace", s.color_space.into_pdf_name()),
            ("Coords", Array(s.coords.iter().copied().map(Real).collect())),
            ("Function", Dictionary((&s.function).into())),
            ("Extend", Array(vec![Boolean(s.extend.0), Boolean(s.extend.1)])),
        ])
    }
}

/// Combined transform of a gradient: the paint-local transform runs first
fn gradient_transform(ctm: &CurTransMat, local: Option<&CurTransMat>) -> CurTransMat {
    match local {
        Some(local) => ctm.concat(local),
        None => *ctm,
    }
}

fn axial(
    colors: &[Rgba],
    fractions: &[f32],
    start: Point,
    end: Point,
    transform: &CurTransMat,
    mapper: &dyn ColorMapper,
    stop_bounds: StopBounds,
) -> Result<Shading, GradientError> {
    let function = build_stitching_function(colors, fractions, stop_bounds, mapper)?;

    let start = transform.transform_point(start);
    let end = transform.transform_point(end);
    if !start.is_finite() || !end.is_finite() {
        return Err(GradientError::NonFiniteGeometry);
    }

    Ok(Shading {
        shading_type: ShadingType::Axial,
        color_space: mapper.map_color(&colors[0]).color_space(),
        coords: vec![start.x, start.y, end.x, end.y],
        function,
        extend: (true, true),
    })
}

pub fn build_linear_shading(
    gradient: &LinearGradient,
    ctm: &CurTransMat,
    mapper: &dyn ColorMapper,
    stop_bounds: StopBounds,
) -> Result<Shading, GradientError> {
    let colors = gradient.stops.iter().map(|s| s.color).collect::<Vec<_>>();
    let fractions = gradient.stops.iter().map(|s| s.fraction).collect::<Vec<_>>();
    let transform = gradient_transform(ctm, gradient.transform.as_ref());
    axial(
        &colors,
        &fractions,
        gradient.start,
        gradient.end,
        &transform,
        mapper,
        stop_bounds,
    )
}

pub fn build_two_stop_shading(
    gradient: &TwoStopGradient,
    ctm: &CurTransMat,
    mapper: &dyn ColorMapper,
    stop_bounds: StopBounds,
) -> Result<Shading, GradientError> {
    axial(
        &[gradient.color1, gradient.color2],
        &[0.0, 1.0],
        gradient.point1,
        gradient.point2,
        ctm,
        mapper,
        stop_bounds,
    )
}

/// The radius only follows the X scale of the combined transform, so
/// rotated or sheared gradients keep circular shapes.
pub fn build_radial_shading(
    gradient: &RadialGradient,
    ctm: &CurTransMat,
    mapper: &dyn ColorMapper,
    stop_bounds: StopBounds,
) -> Result<Shading, GradientError> {
    let colors = gradient.stops.iter().map(|s| s.color).collect::<Vec<_>>();
    let fractions = gradient.stops.iter().map(|s| s.fraction).collect::<Vec<_>>();
    let function = build_stitching_function(&colors, &fractions, stop_bounds, mapper)?;

    let transform = gradient_transform(ctm, gradient.transform.as_ref());
    let center = transform.transform_point(gradient.center);
    let focus = transform.transform_point(gradient.focus);
    let radius = (gradient.radius * transform.scale_x()).abs();
    if !center.is_finite() || !focus.is_finite() || !radius.is_finite() {
        return Err(GradientError::NonFiniteGeometry);
    }

    Ok(Shading {
        shading_type: ShadingType::Radial,
        color_space: mapper.map_color(&colors[0]).color_space(),
        coords: vec![center.x, center.y, 0.0, focus.x, focus.y, radius],
        function,
        extend: (true, true),
    })
}
