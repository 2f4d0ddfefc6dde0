use std::rc::Rc;

use crate::color::{DeviceColor, PatternColor};
use crate::errors::Error;
use crate::graphics::ExtendedGraphicsState;
use crate::image::EmbeddedImage;
use crate::pattern::TilingPattern;
use crate::shading::Shading;
use crate::xobject::ImageXObject;

/// Content stream plus resource dictionary that paints are applied to.
///
/// The `add_*` methods register a resource and return the name it can be
/// referenced by from the content stream. Registering the same `Rc` twice
/// must return the same name.
pub trait DrawingContext {
    fn set_stroking_color(&mut self, color: &DeviceColor) -> Result<(), Error>;
    fn set_non_stroking_color(&mut self, color: &DeviceColor) -> Result<(), Error>;
    fn set_stroking_pattern(&mut self, pattern: &PatternColor) -> Result<(), Error>;
    fn set_non_stroking_pattern(&mut self, pattern: &PatternColor) -> Result<(), Error>;

    /// Registers the graphics state and emits the `gs` operator for it
    fn set_graphics_state(&mut self, gs: &Rc<ExtendedGraphicsState>) -> Result<(), Error>;

    /// Draws a registered image into the rectangle `(x, y, width, height)`.
    /// Negative sizes mirror the image.
    fn draw_image(
        &mut self,
        image: &EmbeddedImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), Error>;

    fn add_image(&mut self, image: ImageXObject) -> Result<String, Error>;
    fn add_pattern(&mut self, pattern: TilingPattern) -> Result<String, Error>;
    fn add_shading(&mut self, shading: &Rc<Shading>) -> Result<String, Error>;
    fn add_color_space(&mut self, color_space: lopdf::Object) -> Result<String, Error>;
}
