use lopdf::Object::{Name, Real};
use pdfpaint::{
    AlphaComposite, BlendMode, Composite, CompositeRule, CurTransMat, Error, GradientError,
    GradientStop, LinearGradient, Paint, PaintApplier, PaintOptions, PaintSource, PaintWarning,
    PdfLayer, Point, RadialGradient, Rgba, ShadingType, StopBounds, TwoStopGradient,
};

const RED: Rgba = Rgba::opaque(255, 0, 0);
const GREEN: Rgba = Rgba::opaque(0, 255, 0);
const BLUE: Rgba = Rgba::opaque(0, 0, 255);

fn linear(colors: &[Rgba], fractions: &[f32]) -> Paint {
    Paint::LinearGradient(LinearGradient {
        stops: colors
            .iter()
            .zip(fractions)
            .map(|(c, f)| GradientStop::new(*c, *f))
            .collect(),
        start: Point::new(0.0, 0.0),
        end: Point::new(10.0, 0.0),
        transform: None,
    })
}

fn operators(layer: &PdfLayer) -> Vec<String> {
    layer.operations().iter().map(|op| op.operator.clone()).collect()
}

#[test]
fn solid_color_sets_stroke_and_fill() {
    let mut applier = PaintApplier::default();
    let mut layer = PdfLayer::new("test");
    let mut warnings = Vec::new();

    let shading = applier
        .apply_paint(
            &Paint::Solid(RED),
            &mut layer,
            &CurTransMat::Identity,
            None,
            &mut warnings,
        )
        .unwrap();

    assert!(shading.is_none());
    assert!(warnings.is_empty());
    pretty_assertions::assert_eq!(operators(&layer), vec!["RG", "rg"]);
    for op in layer.operations() {
        pretty_assertions::assert_eq!(op.operands, vec![Real(1.0), Real(0.0), Real(0.0)]);
    }
}

#[test]
fn opaque_src_over_composite_is_compatible_without_alpha() {
    let mut applier = PaintApplier::default();
    let mut layer = PdfLayer::new("test");
    let composite = Composite::from(AlphaComposite::new(1.0, CompositeRule::SrcOver));

    applier
        .apply_paint(
            &Paint::Solid(BLUE),
            &mut layer,
            &CurTransMat::Identity,
            Some(&composite),
            &mut Vec::new(),
        )
        .unwrap();

    pretty_assertions::assert_eq!(operators(&layer), vec!["RG", "rg", "gs"]);
    let gs = &layer.resources().graphics_states()[0];
    assert_eq!(gs.blend_mode(), Some(BlendMode::compatible()));
    assert_eq!(gs.current_fill_alpha(), None);
    assert_eq!(gs.current_stroke_alpha(), None);

    let dict: lopdf::Dictionary = gs.as_ref().into();
    assert_eq!(dict.get(b"BM").ok(), Some(&Name(b"Compatible".to_vec())));
    assert!(dict.get(b"ca").is_err());
}

#[test]
fn color_alpha_multiplies_with_composite_alpha() {
    let mut applier = PaintApplier::default();
    let mut layer = PdfLayer::new("test");
    let composite = Composite::from(AlphaComposite::new(0.5, CompositeRule::SrcOver));

    applier
        .apply_paint(
            &Paint::Solid(Rgba::new(255, 0, 0, 128)),
            &mut layer,
            &CurTransMat::Identity,
            Some(&composite),
            &mut Vec::new(),
        )
        .unwrap();

    let expected = 0.5 * (128.0 / 255.0);
    let gs = &layer.resources().graphics_states()[0];
    let fill = gs.current_fill_alpha().unwrap();
    let stroke = gs.current_stroke_alpha().unwrap();
    assert!((fill - expected).abs() < 1e-6);
    assert!((stroke - expected).abs() < 1e-6);
}

#[test]
fn xor_composite_maps_to_exclusion() {
    let mut applier = PaintApplier::default();
    let mut layer = PdfLayer::new("test");
    let composite = Composite::from(AlphaComposite::new(0.3, CompositeRule::Xor));

    applier
        .apply_paint(
            &Paint::Solid(RED),
            &mut layer,
            &CurTransMat::Identity,
            Some(&composite),
            &mut Vec::new(),
        )
        .unwrap();

    let gs = &layer.resources().graphics_states()[0];
    assert_eq!(gs.blend_mode(), Some(BlendMode::exclusion()));
    assert_eq!(gs.current_fill_alpha(), Some(0.3));
}

#[test]
fn linear_gradient_shading() {
    let mut applier = PaintApplier::default();
    let mut layer = PdfLayer::new("test");

    let shading = applier
        .apply_paint(
            &linear(&[RED, BLUE], &[0.0, 1.0]),
            &mut layer,
            &CurTransMat::Identity,
            None,
            &mut Vec::new(),
        )
        .unwrap()
        .unwrap();

    assert_eq!(shading.shading_type, ShadingType::Axial);
    pretty_assertions::assert_eq!(shading.coords, vec![0.0, 0.0, 10.0, 0.0]);
    assert_eq!(shading.function.functions.len(), 1);
    assert!(shading.function.bounds.is_empty());
    assert_eq!(shading.extend, (true, true));

    // the first stop is also the plain color
    pretty_assertions::assert_eq!(operators(&layer), vec!["RG", "rg"]);
    assert_eq!(layer.operations()[1].operands, vec![Real(1.0), Real(0.0), Real(0.0)]);
}

#[test]
fn stitching_function_structure() {
    let mut applier = PaintApplier::default();
    let palette = [RED, GREEN, BLUE, RED, GREEN];
    let fractions = [0.0, 0.1, 0.2, 0.3, 1.0];

    for n in 2..=palette.len() {
        let shading = applier
            .apply_paint(
                &linear(&palette[..n], &fractions[..n]),
                &mut PdfLayer::new("test"),
                &CurTransMat::Identity,
                None,
                &mut Vec::new(),
            )
            .unwrap()
            .unwrap();
        let f = &shading.function;
        assert_eq!(f.functions.len(), n - 1);
        assert_eq!(f.bounds.len(), n - 2);
        assert_eq!(f.encode.len(), 2 * (n - 1));
    }
}

#[test]
fn bounds_are_uniform_unless_configured() {
    let paint = linear(&[RED, GREEN, BLUE, RED], &[0.0, 0.1, 0.2, 1.0]);

    let mut uniform = PaintApplier::default();
    let shading = uniform
        .apply_paint(
            &paint,
            &mut PdfLayer::new("test"),
            &CurTransMat::Identity,
            None,
            &mut Vec::new(),
        )
        .unwrap()
        .unwrap();
    pretty_assertions::assert_eq!(shading.function.bounds, vec![0.25, 0.5]);

    let mut from_fractions = PaintApplier::new(PaintOptions {
        stop_bounds: StopBounds::FromFractions,
        ..PaintOptions::default()
    });
    let shading = from_fractions
        .apply_paint(
            &paint,
            &mut PdfLayer::new("test"),
            &CurTransMat::Identity,
            None,
            &mut Vec::new(),
        )
        .unwrap()
        .unwrap();
    pretty_assertions::assert_eq!(shading.function.bounds, vec![0.1, 0.2]);
}

#[test]
fn radial_gradient_radius_follows_x_scale() {
    let mut applier = PaintApplier::default();
    let paint = Paint::RadialGradient(RadialGradient {
        stops: vec![GradientStop::new(RED, 0.0), GradientStop::new(BLUE, 1.0)],
        center: Point::new(5.0, 5.0),
        focus: Point::new(5.0, 5.0),
        radius: 3.0,
        transform: None,
    });

    let shading = applier
        .apply_paint(
            &paint,
            &mut PdfLayer::new("test"),
            &CurTransMat::Raw([2.0, 0.0, 0.0, 1.0, -5.0, 0.0]),
            None,
            &mut Vec::new(),
        )
        .unwrap()
        .unwrap();

    assert_eq!(shading.shading_type, ShadingType::Radial);
    pretty_assertions::assert_eq!(shading.coords, vec![5.0, 5.0, 0.0, 5.0, 5.0, 6.0]);

    let shading = applier
        .apply_paint(
            &paint,
            &mut PdfLayer::new("test"),
            &CurTransMat::Scale(2.0, 1.0),
            None,
            &mut Vec::new(),
        )
        .unwrap()
        .unwrap();
    pretty_assertions::assert_eq!(shading.coords, vec![10.0, 5.0, 0.0, 10.0, 5.0, 6.0]);
}

#[test]
fn two_stop_gradient() {
    let mut applier = PaintApplier::default();
    let mut layer = PdfLayer::new("test");
    let paint = Paint::TwoStopGradient(TwoStopGradient {
        color1: Rgba::new(0, 0, 0, 51),
        color2: Rgba::opaque(255, 255, 255),
        point1: Point::new(0.0, 0.0),
        point2: Point::new(0.0, 20.0),
    });

    let shading = applier
        .apply_paint(&paint, &mut layer, &CurTransMat::Translate(5.0, 5.0), None, &mut Vec::new())
        .unwrap()
        .unwrap();

    pretty_assertions::assert_eq!(shading.coords, vec![5.0, 5.0, 5.0, 25.0]);
    pretty_assertions::assert_eq!(operators(&layer), vec!["RG", "rg", "gs"]);
    assert_eq!(layer.resources().graphics_states()[0].current_fill_alpha(), Some(0.2));
}

#[test]
fn unknown_paint_is_skipped_with_a_warning() {
    let mut applier = PaintApplier::default();
    let mut layer = PdfLayer::new("test");
    let mut warnings = Vec::new();

    let shading = applier
        .apply_paint(
            &Paint::Unsupported {
                kind: "HatchPaint".to_string(),
            },
            &mut layer,
            &CurTransMat::Identity,
            None,
            &mut warnings,
        )
        .unwrap();

    assert!(shading.is_none());
    assert!(layer.operations().is_empty());
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, PaintWarning::WARNING);
    assert!(warnings[0].msg.contains("HatchPaint"));
}

#[test]
fn unknown_composite_behaves_like_src_over() {
    let mut applier = PaintApplier::default();
    let mut layer = PdfLayer::new("test");
    let mut warnings = Vec::new();
    let composite = Composite::Unsupported {
        kind: "GlowComposite".to_string(),
    };

    applier
        .apply_paint(
            &Paint::Solid(RED),
            &mut layer,
            &CurTransMat::Identity,
            Some(&composite),
            &mut warnings,
        )
        .unwrap();

    assert_eq!(warnings.len(), 1);
    let gs = &layer.resources().graphics_states()[0];
    assert_eq!(gs.blend_mode(), Some(BlendMode::compatible()));
    assert_eq!(gs.current_fill_alpha(), None);
}

#[test]
fn malformed_gradient_emits_nothing() {
    let mut applier = PaintApplier::default();
    let mut layer = PdfLayer::new("test");
    let composite = Composite::from(AlphaComposite::new(0.5, CompositeRule::Src));

    let result = applier.apply_paint(
        &linear(&[RED], &[0.0]),
        &mut layer,
        &CurTransMat::Identity,
        Some(&composite),
        &mut Vec::new(),
    );

    match result {
        Err(Error::Gradient(GradientError::TooFewStops { found: 1 })) => {}
        other => panic!("expected TooFewStops, got {:?}", other),
    }
    assert!(layer.operations().is_empty());
    assert!(layer.resources().graphics_states().is_empty());
    assert_eq!(applier.graphics_state_count(), 0);
}

#[test]
fn non_finite_gradient_is_rejected() {
    let mut applier = PaintApplier::default();
    let mut layer = PdfLayer::new("test");
    let paint = Paint::LinearGradient(LinearGradient {
        stops: vec![GradientStop::new(RED, 0.0), GradientStop::new(BLUE, 1.0)],
        start: Point::new(f32::NAN, 0.0),
        end: Point::new(10.0, 0.0),
        transform: None,
    });

    match applier.apply_paint(&paint, &mut layer, &CurTransMat::Identity, None, &mut Vec::new()) {
        Err(Error::Gradient(GradientError::NonFiniteGeometry)) => {}
        other => panic!("expected NonFiniteGeometry, got {:?}", other),
    }
    assert!(layer.operations().is_empty());
}

/// A gradient type from a foreign drawing library
struct MultipleGradientPaint {
    colors: Vec<Rgba>,
    fractions: Vec<f32>,
}

impl PaintSource for MultipleGradientPaint {
    fn type_name(&self) -> &str {
        "MultipleGradientPaint"
    }
    fn colors(&self) -> Option<Vec<Rgba>> {
        Some(self.colors.clone())
    }
    fn fractions(&self) -> Option<Vec<f32>> {
        Some(self.fractions.clone())
    }
    fn start_point(&self) -> Option<Point> {
        Some(Point::new(0.0, 0.0))
    }
    fn end_point(&self) -> Option<Point> {
        Some(Point::new(0.0, 50.0))
    }
}

#[test]
fn foreign_paints_are_recognized() {
    let mut applier = PaintApplier::default();
    let source = MultipleGradientPaint {
        colors: vec![RED, GREEN, BLUE],
        fractions: vec![0.0, 0.5, 1.0],
    };

    let shading = applier
        .apply_paint_source(
            &source,
            &mut PdfLayer::new("test"),
            &CurTransMat::Identity,
            None,
            &mut Vec::new(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(shading.shading_type, ShadingType::Axial);
    pretty_assertions::assert_eq!(shading.coords, vec![0.0, 0.0, 0.0, 50.0]);
    assert_eq!(shading.function.functions.len(), 2);

    let broken = MultipleGradientPaint {
        colors: vec![RED, GREEN, BLUE],
        fractions: vec![0.0, 1.0],
    };
    let result = applier.apply_paint_source(
        &broken,
        &mut PdfLayer::new("test"),
        &CurTransMat::Identity,
        None,
        &mut Vec::new(),
    );
    assert!(matches!(
        result,
        Err(Error::Gradient(GradientError::StopCountMismatch {
            colors: 3,
            fractions: 2
        }))
    ));
}
