//! Tiling patterns for texture paints

use lopdf::Object::{Array, Dictionary, Integer, Name, Real};

use crate::context::DrawingContext;
use crate::errors::{Error, TextureError};
use crate::graphics::Rect;
use crate::image::{EmbeddedImage, ImageEncoder};
use crate::matrix::CurTransMat;
use crate::paint::Texture;
use crate::pdf_layer::PdfLayer;

/* /PaintType 1 */
/// Colored tiling pattern (the cell carries its own colors)
const PAINT_COLORED: i64 = 1;
/* /TilingType 2 */
/// Constant spacing, cells may be distorted by up to one device pixel
const TILING_CONSTANT_SPACING_FASTER_TILING: i64 = 2;

/// `/PatternType 1` pattern: the `cell` content is repeated every
/// `x_step` / `y_step` units in pattern space
#[derive(Debug, Clone)]
pub struct TilingPattern {
    pub bbox: Rect,
    pub x_step: f32,
    pub y_step: f32,
    /// Maps pattern space into the default space of the page
    pub matrix: CurTransMat,
    /// Content stream of one cell, with its own resources
    pub cell: PdfLayer,
}

impl TilingPattern {
    pub fn into_with_document(self, doc: &mut lopdf::Document) -> Result<lopdf::ObjectId, Error> {
        let (mut stream, resources) = self.cell.into_with_document(doc)?;
        stream.dict = lopdf::Dictionary::from_iter(vec![
            ("Type", Name("Pattern".into())),
            ("PatternType", Integer(1)),
            ("PaintType", Integer(PAINT_COLORED)),
            ("TilingType", Integer(TILING_CONSTANT_SPACING_FASTER_TILING)),
            ("BBox", Array(self.bbox.to_array())),
            ("XStep", Real(self.x_step)),
            ("YStep", Real(self.y_step)),
            ("Matrix", self.matrix.into_pdf_array()),
            ("Resources", Dictionary(resources)),
        ]);
        Ok(doc.add_object(stream))
    }
}

/// Checks what can be checked before any image data is encoded
pub(crate) fn validate_texture(texture: &Texture) -> Result<(), TextureError> {
    let r = &texture.anchor_rect;
    let finite = [r.x, r.y, r.width, r.height].iter().all(|v| v.is_finite());
    if !finite || r.width <= 0.0 || r.height <= 0.0 {
        return Err(TextureError::EmptyAnchorRect);
    }
    texture.image.validate()
}

/// Builds a tiling pattern that repeats the texture image in a grid of
/// anchor rectangle sized cells. The pattern space is flipped vertically,
/// so the image itself is drawn with a negative height.
///
/// Returns the pattern together with the image as embedded into the cell.
pub fn build_texture_pattern(
    texture: &Texture,
    encoder: &mut dyn ImageEncoder,
) -> Result<(TilingPattern, EmbeddedImage), Error> {
    validate_texture(texture)?;

    let anchor = texture.anchor_rect;
    let mut cell = PdfLayer::new("texture cell");
    let image = encoder.encode_image(&mut cell, &texture.image)?;

    let image_w = image.width as f32;
    let image_h = image.height as f32;
    let ratio_w = anchor.width / image_w;
    let ratio_h = anchor.height / image_h;
    let paint_height = image_h * ratio_h;
    cell.draw_image(
        &image,
        anchor.x,
        anchor.y + paint_height,
        image_w * ratio_w,
        -paint_height,
    )?;

    let pattern = TilingPattern {
        bbox: anchor,
        x_step: anchor.width,
        y_step: anchor.height,
        matrix: CurTransMat::Translate(0.0, anchor.height).concat(&CurTransMat::Scale(1.0, -1.0)),
        cell,
    };

    Ok((pattern, image))
}
