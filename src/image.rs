use std::io::Write;

use flate2::{write::ZlibEncoder, Compression};
use serde_derive::{Deserialize, Serialize};

use crate::color::{ColorBits, ColorSpace};
use crate::context::DrawingContext;
use crate::errors::{Error, TextureError};
use crate::xobject::{ImageFilter, ImageXObject};

/// Uncompressed 8-bit raster image, rows top to bottom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawImage {
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub data_format: RawImageFormat,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RawImageFormat {
    R8,
    RG8,
    RGB8,
    RGBA8,
}

impl RawImageFormat {
    pub fn channels(&self) -> usize {
        match self {
            RawImageFormat::R8 => 1,
            RawImageFormat::RG8 => 2,
            RawImageFormat::RGB8 => 3,
            RawImageFormat::RGBA8 => 4,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, RawImageFormat::RG8 | RawImageFormat::RGBA8)
    }

    pub fn color_space(&self) -> ColorSpace {
        match self {
            RawImageFormat::R8 | RawImageFormat::RG8 => ColorSpace::Greyscale,
            RawImageFormat::RGB8 | RawImageFormat::RGBA8 => ColorSpace::Rgb,
        }
    }
}

impl RawImage {
    /// Number of bytes `pixels` must hold, `None` on overflow
    pub fn byte_len(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)?
            .checked_mul(self.data_format.channels())
    }

    /// Checks that the image has pixels and that the buffer is large enough
    pub fn validate(&self) -> Result<(), TextureError> {
        if self.width == 0 || self.height == 0 {
            return Err(TextureError::EmptyImage);
        }
        let expected = self.byte_len().ok_or(TextureError::ImageTooLarge {
            width: self.width,
            height: self.height,
        })?;
        if self.pixels.len() < expected {
            return Err(TextureError::PixelBufferTooShort {
                expected,
                found: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Splits interleaved pixels into color samples and (if present) alpha samples
    pub fn split_alpha(&self) -> (Vec<u8>, Option<Vec<u8>>) {
        let channels = self.data_format.channels();
        let len = self.byte_len().unwrap_or(usize::MAX).min(self.pixels.len());
        let pixels = &self.pixels[..len];

        if !self.data_format.has_alpha() {
            return (pixels.to_vec(), None);
        }

        let color_channels = channels - 1;
        let count = pixels.len() / channels;
        let mut color = Vec::with_capacity(count * color_channels);
        let mut alpha = Vec::with_capacity(count);
        for px in pixels.chunks_exact(channels) {
            color.extend_from_slice(&px[..color_channels]);
            alpha.push(px[color_channels]);
        }

        // fully opaque images don't need a soft mask
        if alpha.iter().all(|a| *a == 255) {
            (color, None)
        } else {
            (color, Some(alpha))
        }
    }
}

#[cfg(feature = "images")]
impl From<image::DynamicImage> for RawImage {
    fn from(img: image::DynamicImage) -> Self {
        use image::DynamicImage::*;
        let width = img.width() as usize;
        let height = img.height() as usize;
        let (pixels, data_format) = match img {
            ImageLuma8(buf) => (buf.into_raw(), RawImageFormat::R8),
            ImageLumaA8(buf) => (buf.into_raw(), RawImageFormat::RG8),
            ImageRgb8(buf) => (buf.into_raw(), RawImageFormat::RGB8),
            other => (other.to_rgba8().into_raw(), RawImageFormat::RGBA8),
        };
        RawImage {
            pixels,
            width,
            height,
            data_format,
        }
    }
}

/// An image that has been added to the resources of a drawing context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    /// Resource name of the image XObject, used with `Do`
    pub name: String,
    pub color_space: ColorSpace,
    pub width: usize,
    pub height: usize,
}

/// Turns raster images into image XObjects registered in a drawing context
pub trait ImageEncoder {
    fn encode_image(
        &mut self,
        ctx: &mut dyn DrawingContext,
        image: &RawImage,
    ) -> Result<EmbeddedImage, Error>;
}

/// Default encoder: 8 bit samples, optionally Flate compressed, alpha
/// channel split off into a `/SMask`
#[derive(Debug, Copy, Clone)]
pub struct FlateImageEncoder {
    pub compress: bool,
}

impl Default for FlateImageEncoder {
    fn default() -> Self {
        Self { compress: true }
    }
}

impl FlateImageEncoder {
    fn encode_samples(&self, samples: Vec<u8>) -> Result<(Vec<u8>, Option<ImageFilter>), Error> {
        if !self.compress {
            return Ok((samples, None));
        }
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&samples)?;
        Ok((encoder.finish()?, Some(ImageFilter::Flate)))
    }
}

impl ImageEncoder for FlateImageEncoder {
    fn encode_image(
        &mut self,
        ctx: &mut dyn DrawingContext,
        image: &RawImage,
    ) -> Result<EmbeddedImage, Error> {
        image.validate()?;

        let color_space = image.data_format.color_space();
        let (color, alpha) = image.split_alpha();

        let smask = match alpha {
            Some(alpha) => {
                let (image_data, image_filter) = self.encode_samples(alpha)?;
                Some(Box::new(ImageXObject {
                    width: image.width,
                    height: image.height,
                    color_space: ColorSpace::Greyscale,
                    bits_per_component: ColorBits::Bit8,
                    interpolate: false,
                    image_data,
                    image_filter,
                    smask: None,
                }))
            }
            None => None,
        };

        let (image_data, image_filter) = self.encode_samples(color)?;
        let xobject = ImageXObject {
            width: image.width,
            height: image.height,
            color_space,
            bits_per_component: ColorBits::Bit8,
            interpolate: false,
            image_data,
            image_filter,
            smask,
        };

        let name = ctx.add_image(xobject)?;
        debug!(
            "embedded {}x{} {:?} image as /{}",
            image.width,
            image.height,
            color_space,
            name
        );

        Ok(EmbeddedImage {
            name,
            color_space,
            width: image.width,
            height: image.height,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rgba(pixels: Vec<u8>, width: usize, height: usize) -> RawImage {
        RawImage {
            pixels,
            width,
            height,
            data_format: RawImageFormat::RGBA8,
        }
    }

    #[test]
    fn test_split_alpha() {
        let img = rgba(vec![1, 2, 3, 128, 4, 5, 6, 255], 2, 1);
        let (color, alpha) = img.split_alpha();
        assert_eq!(color, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(alpha, Some(vec![128, 255]));
    }

    #[test]
    fn test_opaque_alpha_is_dropped() {
        let img = rgba(vec![1, 2, 3, 255], 1, 1);
        let (color, alpha) = img.split_alpha();
        assert_eq!(color, vec![1, 2, 3]);
        assert_eq!(alpha, None);
    }

    #[test]
    fn test_validate() {
        assert_eq!(rgba(vec![], 0, 3).validate(), Err(TextureError::EmptyImage));
        assert_eq!(
            rgba(vec![0; 7], 2, 1).validate(),
            Err(TextureError::PixelBufferTooShort {
                expected: 8,
                found: 7
            })
        );
        assert_eq!(rgba(vec![0; 8], 2, 1).validate(), Ok(()));
    }

    #[test]
    fn test_oversized_image_is_rejected() {
        let img = RawImage {
            pixels: vec![0; 4],
            width: usize::MAX / 2,
            height: 4,
            data_format: RawImageFormat::RGB8,
        };
        assert_eq!(img.byte_len(), None);
        assert_eq!(
            img.validate(),
            Err(TextureError::ImageTooLarge {
                width: usize::MAX / 2,
                height: 4
            })
        );

        // the buffer is never read past its end
        let (color, alpha) = img.split_alpha();
        assert_eq!(color, vec![0; 4]);
        assert_eq!(alpha, None);
    }
}
