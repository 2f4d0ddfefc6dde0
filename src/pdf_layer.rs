//! Content stream with its own resources. Used both as the target that paints
//! are applied to and as the cell of a tiling pattern.

use std::rc::Rc;

use lopdf::content::Operation;
use lopdf::Object::{Name, Real};

use crate::color::{DeviceColor, PatternColor, PdfColor};
use crate::context::DrawingContext;
use crate::errors::Error;
use crate::graphics::ExtendedGraphicsState;
use crate::image::EmbeddedImage;
use crate::matrix::CurTransMat;
use crate::pattern::TilingPattern;
use crate::pdf_resources::PdfResources;
use crate::shading::Shading;
use crate::xobject::ImageXObject;

/// One layer of PDF data
#[derive(Debug, Clone)]
pub struct PdfLayer {
    /// Name of the layer, for diagnostics
    pub(crate) name: String,
    /// Operators of the content stream, in order
    pub(crate) operations: Vec<Operation>,
    /// Everything the operators reference by name
    pub(crate) resources: PdfResources,
}

impl PdfLayer {
    #[inline]
    pub fn new<S>(name: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            operations: Vec::new(),
            resources: PdfResources::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn resources(&self) -> &PdfResources {
        &self.resources
    }

    #[inline]
    pub fn add_operation<T>(&mut self, op: T)
    where
        T: Into<Operation>,
    {
        self.operations.push(op.into());
    }

    fn add_color(&mut self, color: PdfColor) {
        self.operations.extend(color.into_stream_op());
    }

    /// Saves the graphics state (`q`)
    #[inline]
    pub fn save_graphics_state(&mut self) {
        self.add_operation(Operation::new("q", Vec::new()));
    }

    /// Restores the graphics state (`Q`)
    #[inline]
    pub fn restore_graphics_state(&mut self) {
        self.add_operation(Operation::new("Q", Vec::new()));
    }

    /// Concatenates a matrix into the CTM (`cm`)
    pub fn set_ctm(&mut self, ctm: CurTransMat) {
        let operands = ctm.as_array().iter().copied().map(Real).collect();
        self.add_operation(Operation::new("cm", operands));
    }

    /// Registers the shading and fills the current clip with it (`sh`)
    pub fn paint_shading(&mut self, shading: &Rc<Shading>) -> Result<(), Error> {
        let name = self.add_shading(shading)?;
        self.add_operation(Operation::new("sh", vec![Name(name.into_bytes())]));
        Ok(())
    }

    /// Encodes the operators into content stream bytes
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        let content = lopdf::content::Content {
            operations: self.operations.clone(),
        };
        Ok(content.encode()?)
    }

    /// Returns the content stream and the `/Resources` dictionary that goes with it
    pub fn into_with_document(
        self,
        doc: &mut lopdf::Document,
    ) -> Result<(lopdf::Stream, lopdf::Dictionary), Error> {
        let bytes = lopdf::content::Content {
            operations: self.operations,
        }
        .encode()?;
        let resources = self.resources.into_with_document(doc)?;
        Ok((lopdf::Stream::new(lopdf::Dictionary::new(), bytes), resources))
    }
}

impl DrawingContext for PdfLayer {
    fn set_stroking_color(&mut self, color: &DeviceColor) -> Result<(), Error> {
        self.add_color(PdfColor::OutlineColor(color.clone()));
        Ok(())
    }

    fn set_non_stroking_color(&mut self, color: &DeviceColor) -> Result<(), Error> {
        self.add_color(PdfColor::FillColor(color.clone()));
        Ok(())
    }

    fn set_stroking_pattern(&mut self, pattern: &PatternColor) -> Result<(), Error> {
        self.add_color(PdfColor::OutlinePattern(pattern.clone()));
        Ok(())
    }

    fn set_non_stroking_pattern(&mut self, pattern: &PatternColor) -> Result<(), Error> {
        self.add_color(PdfColor::FillPattern(pattern.clone()));
        Ok(())
    }

    fn set_graphics_state(&mut self, gs: &Rc<ExtendedGraphicsState>) -> Result<(), Error> {
        let name = self.resources.add_graphics_state(gs);
        self.add_operation(Operation::new("gs", vec![Name(name.into_bytes())]));
        Ok(())
    }

    fn draw_image(
        &mut self,
        image: &EmbeddedImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), Error> {
        self.save_graphics_state();
        self.set_ctm(CurTransMat::Raw([width, 0.0, 0.0, height, x, y]));
        self.add_operation(Operation::new("Do", vec![Name(image.name.clone().into_bytes())]));
        self.restore_graphics_state();
        Ok(())
    }

    fn add_image(&mut self, image: ImageXObject) -> Result<String, Error> {
        Ok(self.resources.add_xobject(image))
    }

    fn add_pattern(&mut self, pattern: TilingPattern) -> Result<String, Error> {
        Ok(self.resources.add_pattern(pattern))
    }

    fn add_shading(&mut self, shading: &Rc<Shading>) -> Result<String, Error> {
        Ok(self.resources.add_shading(shading))
    }

    fn add_color_space(&mut self, color_space: lopdf::Object) -> Result<String, Error> {
        Ok(self.resources.add_color_space(color_space))
    }
}
