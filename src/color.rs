//! Color module: the RGBA colors that paints carry and the device colors
//! (RGB, CMYK, greyscale) they map to inside the PDF.

use lopdf::content::Operation;
use lopdf::Object::{Name, Real};
use serde_derive::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Color components of a device color, at most four (CMYK)
pub type Components = SmallVec<[f32; 4]>;

/// sRGB color with an alpha channel, 0 - 255 per channel.
/// This is the color that paints (solid colors, gradient stops) are specified in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

/// Color space (enum for marking the number of components a color has)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSpace {
    Rgb,
    Cmyk,
    Greyscale,
}

impl ColorSpace {
    pub fn num_components(&self) -> usize {
        match self {
            ColorSpace::Rgb => 3,
            ColorSpace::Cmyk => 4,
            ColorSpace::Greyscale => 1,
        }
    }

    pub(crate) fn into_pdf_name(self) -> lopdf::Object {
        let name: &'static str = self.into();
        Name(name.into())
    }
}

impl From<ColorSpace> for &'static str {
    fn from(cs: ColorSpace) -> &'static str {
        match cs {
            ColorSpace::Rgb => "DeviceRGB",
            ColorSpace::Cmyk => "DeviceCMYK",
            ColorSpace::Greyscale => "DeviceGray",
        }
    }
}

/// How many bits does a color have?
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorBits {
    Bit1,
    Bit8,
    Bit16,
}

impl From<ColorBits> for i64 {
    fn from(bits: ColorBits) -> i64 {
        match bits {
            ColorBits::Bit1 => 1,
            ColorBits::Bit8 => 8,
            ColorBits::Bit16 => 16,
        }
    }
}

/// A color in one of the PDF device color spaces, components in `0.0 ..= 1.0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type", content = "data")]
pub enum DeviceColor {
    Rgb(Rgb),
    Cmyk(Cmyk),
    Greyscale(Greyscale),
}

impl DeviceColor {
    /// The color components, in the order the color space expects them
    pub fn components(&self) -> Components {
        match self {
            DeviceColor::Rgb(rgb) => smallvec::smallvec![rgb.r, rgb.g, rgb.b],
            DeviceColor::Cmyk(cmyk) => smallvec::smallvec![cmyk.c, cmyk.m, cmyk.y, cmyk.k],
            DeviceColor::Greyscale(gs) => smallvec::smallvec![gs.percent],
        }
    }

    pub fn color_space(&self) -> ColorSpace {
        match self {
            DeviceColor::Rgb(_) => ColorSpace::Rgb,
            DeviceColor::Cmyk(_) => ColorSpace::Cmyk,
            DeviceColor::Greyscale(_) => ColorSpace::Greyscale,
        }
    }
}

/// RGB color
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// CMYK color
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cmyk {
    pub c: f32,
    pub m: f32,
    pub y: f32,
    pub k: f32,
}

impl Cmyk {
    /// Creates a new CMYK color
    pub fn new(c: f32, m: f32, y: f32, k: f32) -> Self {
        Self { c, m, y, k }
    }
}

/// Greyscale color
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Greyscale {
    pub percent: f32,
}

impl Greyscale {
    pub fn new(percent: f32) -> Self {
        Self { percent }
    }
}

/// Maps the RGBA color of a paint into the document's native color space.
///
/// Implementations must be deterministic: equal inputs have to produce equal
/// outputs, otherwise the resource cache cannot detect duplicate shadings.
/// The alpha channel is ignored here, it is handled through the ExtGState.
pub trait ColorMapper {
    fn map_color(&self, color: &Rgba) -> DeviceColor;
}

/// Maps colors 1:1 into `/DeviceRGB`
#[derive(Debug, Default, Copy, Clone)]
pub struct DeviceRgbMapper;

impl ColorMapper for DeviceRgbMapper {
    fn map_color(&self, color: &Rgba) -> DeviceColor {
        DeviceColor::Rgb(Rgb::new(
            color.r as f32 / 255.0,
            color.g as f32 / 255.0,
            color.b as f32 / 255.0,
        ))
    }
}

/// A tiling pattern used as a color: the name of the `[/Pattern <cs>]` color
/// space resource and the name of the pattern resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternColor {
    pub color_space: String,
    pub pattern: String,
}

/// Tuple for differentiating outline and fill colors
#[derive(Debug, Clone, PartialEq)]
pub enum PdfColor {
    FillColor(DeviceColor),
    OutlineColor(DeviceColor),
    FillPattern(PatternColor),
    OutlinePattern(PatternColor),
}

impl PdfColor {
    /// Converts the color into the content stream operators that select it
    pub fn into_stream_op(self) -> Vec<Operation> {
        use self::PdfColor::*;
        match self {
            FillColor(fill) => {
                let op = match fill {
                    DeviceColor::Rgb(_) => "rg",
                    DeviceColor::Cmyk(_) => "k",
                    DeviceColor::Greyscale(_) => "g",
                };
                vec![Operation::new(op, fill.components().into_iter().map(Real).collect())]
            }
            OutlineColor(outline) => {
                let op = match outline {
                    DeviceColor::Rgb(_) => "RG",
                    DeviceColor::Cmyk(_) => "K",
                    DeviceColor::Greyscale(_) => "G",
                };
                vec![Operation::new(op, outline.components().into_iter().map(Real).collect())]
            }
            FillPattern(p) => vec![
                Operation::new("cs", vec![Name(p.color_space.into_bytes())]),
                Operation::new("scn", vec![Name(p.pattern.into_bytes())]),
            ],
            OutlinePattern(p) => vec![
                Operation::new("CS", vec![Name(p.color_space.into_bytes())]),
                Operation::new("SCN", vec![Name(p.pattern.into_bytes())]),
            ],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rgb_mapper_ignores_alpha() {
        let mapper = DeviceRgbMapper;
        let opaque = mapper.map_color(&Rgba::opaque(255, 0, 51));
        let transparent = mapper.map_color(&Rgba::new(255, 0, 51, 10));
        assert_eq!(opaque, transparent);
        assert_eq!(opaque.components().as_slice(), &[1.0, 0.0, 0.2]);
        assert_eq!(opaque.color_space(), ColorSpace::Rgb);
    }

    #[test]
    fn test_fill_and_outline_operators() {
        let red = DeviceColor::Rgb(Rgb::new(1.0, 0.0, 0.0));
        let fill = PdfColor::FillColor(red.clone()).into_stream_op();
        assert_eq!(fill.len(), 1);
        assert_eq!(fill[0].operator, "rg");
        assert_eq!(fill[0].operands, vec![Real(1.0), Real(0.0), Real(0.0)]);

        let stroke = PdfColor::OutlineColor(DeviceColor::Cmyk(Cmyk::new(0.0, 0.0, 0.0, 1.0)))
            .into_stream_op();
        assert_eq!(stroke[0].operator, "K");
        assert_eq!(stroke[0].operands.len(), 4);
    }

    #[test]
    fn test_pattern_operators() {
        let pc = PatternColor {
            color_space: "CS0".to_string(),
            pattern: "PT0".to_string(),
        };
        let ops = PdfColor::OutlinePattern(pc).into_stream_op();
        let names = ops.iter().map(|o| o.operator.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["CS", "SCN"]);
        assert_eq!(ops[1].operands, vec![Name(b"PT0".to_vec())]);
    }
}
