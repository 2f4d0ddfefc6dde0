use lopdf::Object::{Array, Name, Real};
use pdfpaint::{
    CurTransMat, Paint, PaintApplier, PaintOptions, PdfLayer, RawImage, RawImageFormat, Rect,
    Texture,
};

fn texture(data_format: RawImageFormat, anchor: Rect) -> Paint {
    let (width, height) = (20, 10);
    Paint::Texture(Texture {
        image: RawImage {
            pixels: vec![128; width * height * data_format.channels()],
            width,
            height,
            data_format,
        },
        anchor_rect: anchor,
    })
}

#[test]
fn texture_becomes_a_tiling_pattern() {
    let mut applier = PaintApplier::default();
    let mut layer = PdfLayer::new("test");

    let shading = applier
        .apply_paint(
            &texture(RawImageFormat::RGB8, Rect::from_wh(20.0, 10.0)),
            &mut layer,
            &CurTransMat::Identity,
            None,
            &mut Vec::new(),
        )
        .unwrap();
    assert!(shading.is_none());

    let operators = layer
        .operations()
        .iter()
        .map(|op| op.operator.as_str())
        .collect::<Vec<_>>();
    pretty_assertions::assert_eq!(operators, vec!["CS", "SCN", "cs", "scn"]);
    pretty_assertions::assert_eq!(layer.operations()[1].operands, vec![Name(b"PT0".to_vec())]);

    let pattern = &layer.resources().patterns()[0];
    assert_eq!(pattern.x_step, 20.0);
    assert_eq!(pattern.y_step, 10.0);
    assert_eq!(pattern.bbox.to_array(), vec![Real(0.0), Real(0.0), Real(20.0), Real(10.0)]);

    // image drawn at (0, 10) with size (20, -10)
    let cm = &pattern.cell.operations()[1];
    pretty_assertions::assert_eq!(
        cm.operands,
        vec![Real(20.0), Real(0.0), Real(0.0), Real(-10.0), Real(0.0), Real(10.0)]
    );

    pretty_assertions::assert_eq!(
        layer.resources().color_spaces().to_vec(),
        vec![Array(vec![Name(b"Pattern".to_vec()), Name(b"DeviceRGB".to_vec())])]
    );
}

#[test]
fn texture_written_into_a_document() {
    let mut applier = PaintApplier::new(PaintOptions {
        compress_images: false,
        ..PaintOptions::default()
    });
    let mut layer = PdfLayer::new("test");
    applier
        .apply_paint(
            &texture(RawImageFormat::RGBA8, Rect::from_wh(20.0, 10.0)),
            &mut layer,
            &CurTransMat::Identity,
            None,
            &mut Vec::new(),
        )
        .unwrap();

    let mut doc = lopdf::Document::with_version("1.7");
    let (_, resources) = layer.into_with_document(&mut doc).unwrap();

    let pattern_id = resources
        .get(b"Pattern")
        .and_then(|p| p.as_dict())
        .and_then(|p| p.get(b"PT0"))
        .and_then(|p| p.as_reference())
        .unwrap();
    let pattern = doc.get_object(pattern_id).unwrap().as_stream().unwrap();
    assert_eq!(pattern.dict.get(b"PatternType").ok(), Some(&lopdf::Object::Integer(1)));
    pretty_assertions::assert_eq!(
        pattern.dict.get(b"Matrix").ok(),
        Some(&Array(vec![
            Real(1.0),
            Real(0.0),
            Real(0.0),
            Real(-1.0),
            Real(0.0),
            Real(10.0)
        ]))
    );

    let image_id = pattern
        .dict
        .get(b"Resources")
        .and_then(|r| r.as_dict())
        .and_then(|r| r.get(b"XObject"))
        .and_then(|x| x.as_dict())
        .and_then(|x| x.get(b"Im0"))
        .and_then(|i| i.as_reference())
        .unwrap();
    let image = doc.get_object(image_id).unwrap().as_stream().unwrap();
    // uncompressed RGB samples, alpha moved into the soft mask
    assert_eq!(image.content.len(), 20 * 10 * 3);
    assert!(image.dict.get(b"Filter").is_err());
    assert!(image.dict.get(b"SMask").is_ok());
}

#[test]
fn greyscale_texture_uses_a_grey_pattern_space() {
    let mut applier = PaintApplier::default();
    let mut layer = PdfLayer::new("test");
    applier
        .apply_paint(
            &texture(RawImageFormat::R8, Rect::new(10.0, 10.0, 5.0, 5.0)),
            &mut layer,
            &CurTransMat::Identity,
            None,
            &mut Vec::new(),
        )
        .unwrap();

    pretty_assertions::assert_eq!(
        layer.resources().color_spaces().to_vec(),
        vec![Array(vec![Name(b"Pattern".to_vec()), Name(b"DeviceGray".to_vec())])]
    );
}

#[test]
fn empty_anchor_emits_nothing() {
    let mut applier = PaintApplier::default();
    let mut layer = PdfLayer::new("test");
    let result = applier.apply_paint(
        &texture(RawImageFormat::RGB8, Rect::from_wh(20.0, 0.0)),
        &mut layer,
        &CurTransMat::Identity,
        None,
        &mut Vec::new(),
    );

    assert!(result.is_err());
    assert!(layer.operations().is_empty());
    assert!(layer.resources().patterns().is_empty());
}

#[test]
fn oversized_texture_is_rejected_before_emission() {
    let mut applier = PaintApplier::default();
    let mut layer = PdfLayer::new("test");
    let paint = Paint::Texture(Texture {
        image: RawImage {
            pixels: vec![0; 4],
            width: usize::MAX / 2,
            height: 4,
            data_format: RawImageFormat::RGB8,
        },
        anchor_rect: Rect::from_wh(20.0, 10.0),
    });

    let result = applier.apply_paint(&paint, &mut layer, &CurTransMat::Identity, None, &mut Vec::new());

    assert!(matches!(
        result,
        Err(pdfpaint::Error::Texture(pdfpaint::TextureError::ImageTooLarge { height: 4, .. }))
    ));
    assert!(layer.operations().is_empty());
    assert!(layer.resources().patterns().is_empty());
}
