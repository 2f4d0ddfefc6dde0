use lopdf::Object::{Integer, Name, Reference};

use crate::color::{ColorBits, ColorSpace};

/* Parent: Resources dictionary of the layer or pattern cell */
/// Image XObject, invoked from a content stream with the `/Do` operator.
/// `layer.add_image()` inserts it into the `/XObject` resource dictionary.
#[derive(Debug, PartialEq, Clone)]
pub struct ImageXObject {
    /// Width of the image (original width, not scaled width)
    pub width: usize,
    /// Height of the image (original height, not scaled height)
    pub height: usize,
    /// Color space (Greyscale, RGB, CMYK)
    pub color_space: ColorSpace,
    /// Bits per color component - 1 for black/white, 8 Greyscale / RGB, etc.
    pub bits_per_component: ColorBits,
    /// Should the image be interpolated when scaled?
    pub interpolate: bool,
    /// The actual data from the image
    pub image_data: Vec<u8>,
    /// Compression filter of `image_data`, `None` for raw samples
    pub image_filter: Option<ImageFilter>,
    /// Soft mask for transparency, always a greyscale image of the same size
    pub smask: Option<Box<ImageXObject>>,
}

/// Describes the format the image bytes are compressed with.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ImageFilter {
    /// zlib / deflate
    Flate,
}

impl ImageFilter {
    pub fn get_id(&self) -> &'static str {
        match self {
            ImageFilter::Flate => "FlateDecode",
        }
    }
}

impl ImageXObject {
    /// Adds the image (and its soft mask) as indirect objects to the document
    pub fn into_with_document(self, doc: &mut lopdf::Document) -> lopdf::ObjectId {
        let cs: &'static str = self.color_space.into();

        let mut dict = lopdf::Dictionary::from_iter(vec![
            ("Type", Name("XObject".into())),
            ("Subtype", Name("Image".into())),
            ("Width", Integer(self.width as i64)),
            ("Height", Integer(self.height as i64)),
            ("Interpolate", self.interpolate.into()),
            ("BitsPerComponent", Integer(self.bits_per_component.into())),
            ("ColorSpace", Name(cs.into())),
        ]);

        if let Some(filter) = self.image_filter {
            dict.set("Filter", Name(filter.get_id().into()));
        }

        if let Some(smask) = self.smask {
            let smask_id = smask.into_with_document(doc);
            dict.set("SMask", Reference(smask_id));
        }

        doc.add_object(lopdf::Stream::new(dict, self.image_data).with_compression(false))
    }
}
