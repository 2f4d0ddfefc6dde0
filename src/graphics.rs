use lopdf::Object::{Name, Real};
use serde_derive::{Deserialize, Serialize};

/// A point in user space (points, origin bottom left)
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Rectangle struct (x, y, width, height)
#[derive(Debug, Default, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_wh(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// `[llx lly urx ury]`, as used by `/BBox` and `/MediaBox`
    pub fn to_array(&self) -> Vec<lopdf::Object> {
        vec![
            Real(self.x),
            Real(self.y),
            Real(self.x + self.width),
            Real(self.y + self.height),
        ]
    }
}

/* BM name or array */
/// Blend mode of the transparent imaging model, PDF Reference 1.7, Table 7.2.
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type", content = "mode")]
pub enum BlendMode {
    Seperable(SeperableBlendMode),
    NonSeperable(NonSeperableBlendMode),
}

impl BlendMode {
    pub fn normal() -> BlendMode { BlendMode::Seperable(SeperableBlendMode::Normal) }
    pub fn compatible() -> BlendMode { BlendMode::Seperable(SeperableBlendMode::Compatible) }
    pub fn multiply() -> BlendMode { BlendMode::Seperable(SeperableBlendMode::Multiply) }
    pub fn screen() -> BlendMode { BlendMode::Seperable(SeperableBlendMode::Screen) }
    pub fn overlay() -> BlendMode { BlendMode::Seperable(SeperableBlendMode::Overlay) }
    pub fn darken() -> BlendMode { BlendMode::Seperable(SeperableBlendMode::Darken) }
    pub fn lighten() -> BlendMode { BlendMode::Seperable(SeperableBlendMode::Lighten) }
    pub fn color_dodge() -> BlendMode { BlendMode::Seperable(SeperableBlendMode::ColorDodge) }
    pub fn color_burn() -> BlendMode { BlendMode::Seperable(SeperableBlendMode::ColorBurn) }
    pub fn hard_light() -> BlendMode { BlendMode::Seperable(SeperableBlendMode::HardLight) }
    pub fn soft_light() -> BlendMode { BlendMode::Seperable(SeperableBlendMode::SoftLight) }
    pub fn difference() -> BlendMode { BlendMode::Seperable(SeperableBlendMode::Difference) }
    pub fn exclusion() -> BlendMode { BlendMode::Seperable(SeperableBlendMode::Exclusion) }
    pub fn hue() -> BlendMode { BlendMode::NonSeperable(NonSeperableBlendMode::Hue) }
    pub fn saturation() -> BlendMode { BlendMode::NonSeperable(NonSeperableBlendMode::Saturation) }
    pub fn color() -> BlendMode { BlendMode::NonSeperable(NonSeperableBlendMode::Color) }
    pub fn luminosity() -> BlendMode { BlendMode::NonSeperable(NonSeperableBlendMode::Luminosity) }

    /// Name of the blend mode as written into the `/BM` entry
    pub fn get_id(&self) -> &'static str {
        use self::NonSeperableBlendMode::*;
        use self::SeperableBlendMode::*;
        match self {
            BlendMode::Seperable(s) => match s {
                Normal => "Normal",
                Compatible => "Compatible",
                Multiply => "Multiply",
                Screen => "Screen",
                Overlay => "Overlay",
                Darken => "Darken",
                Lighten => "Lighten",
                ColorDodge => "ColorDodge",
                ColorBurn => "ColorBurn",
                HardLight => "HardLight",
                SoftLight => "SoftLight",
                Difference => "Difference",
                Exclusion => "Exclusion",
            },
            BlendMode::NonSeperable(n) => match n {
                Hue => "Hue",
                Saturation => "Saturation",
                Color => "Color",
                Luminosity => "Luminosity",
            },
        }
    }
}

/// Blending modes for objects. Each formula gets the new color (the thing
/// to paint on top) and the old color (the backdrop) and is run once per
/// color channel.
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub enum SeperableBlendMode {
    /// Selects the source color, ignoring the old color.
    ///
    /// `color_new`
    Normal,
    /// Deprecated PDF 1.3 alias of `Normal`. Still the default that writers
    /// emit for plain source-over painting.
    Compatible,
    /// `color_old * color_new`
    Multiply,
    /// `color_old + color_new - (color_old * color_new)`
    Screen,
    /// Inverse of HardLight
    Overlay,
    /// `min(color_old, color_new)`
    Darken,
    /// `max(color_old, color_new)`
    Lighten,
    /// Brightens the backdrop color to reflect the source color
    ColorDodge,
    /// Darkens the backdrop color to reflect the source color
    ColorBurn,
    /// Multiplies or screens the colors, depending on the source color value
    HardLight,
    /// Darkens or lightens the colors, depending on the source color value
    SoftLight,
    /// `abs(color_old - color_new)`
    Difference,
    /// `color_old + color_new - (2 * color_old * color_new)`
    Exclusion,
}

/// Blend modes that consider all color components in combination
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub enum NonSeperableBlendMode {
    Hue,
    Saturation,
    Color,
    Luminosity,
}

/// `ExtGState` dictionary, reduced to the entries that paint mapping touches.
///
/// Every field is optional: `None` means the entry is not written at all,
/// so two states that differ only in untouched entries serialize identically.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct ExtendedGraphicsState {
    /* CA float */
    /// __(Optional; PDF 1.4)__ The current stroking alpha constant
    pub(crate) current_stroke_alpha: Option<f32>,

    /* ca float */
    /// __(Optional; PDF 1.4)__ Same as CA, but for nonstroking operations.
    pub(crate) current_fill_alpha: Option<f32>,

    /* BM name or array */
    /// __(Optional; PDF 1.4)__ The current blend mode
    pub(crate) blend_mode: Option<BlendMode>,
}

impl ExtendedGraphicsState {
    pub fn current_stroke_alpha(&self) -> Option<f32> {
        self.current_stroke_alpha
    }

    pub fn current_fill_alpha(&self) -> Option<f32> {
        self.current_fill_alpha
    }

    pub fn blend_mode(&self) -> Option<BlendMode> {
        self.blend_mode
    }

    /// Overwrites both alpha constants
    pub fn set_alpha(&mut self, alpha: f32) {
        self.current_stroke_alpha = Some(alpha);
        self.current_fill_alpha = Some(alpha);
    }

    /// Multiplies both alpha constants with `factor`, an absent constant counts as 1.0
    pub fn multiply_alpha(&mut self, factor: f32) {
        self.current_stroke_alpha = Some(self.current_stroke_alpha.unwrap_or(1.0) * factor);
        self.current_fill_alpha = Some(self.current_fill_alpha.unwrap_or(1.0) * factor);
    }

    pub fn set_blend_mode(&mut self, blend_mode: BlendMode) {
        self.blend_mode = Some(blend_mode);
    }
}

impl From<&ExtendedGraphicsState> for lopdf::Dictionary {
    fn from(gs: &ExtendedGraphicsState) -> Self {
        let mut dict = lopdf::Dictionary::from_iter(vec![("Type", Name("ExtGState".into()))]);
        if let Some(ca) = gs.current_stroke_alpha {
            dict.set("CA", Real(ca));
        }
        if let Some(ca) = gs.current_fill_alpha {
            dict.set("ca", Real(ca));
        }
        if let Some(bm) = gs.blend_mode {
            dict.set("BM", Name(bm.get_id().into()));
        }
        dict
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtendedGraphicsStateBuilder {
    gs: ExtendedGraphicsState,
}

impl ExtendedGraphicsStateBuilder {
    /// Creates a new graphics state builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the blend mode
    #[inline]
    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.gs.blend_mode = Some(blend_mode);
        self
    }

    /// Sets the stroking alpha constant (`CA`)
    #[inline]
    pub fn with_current_stroke_alpha(mut self, current_stroke_alpha: f32) -> Self {
        self.gs.current_stroke_alpha = Some(current_stroke_alpha);
        self
    }

    /// Sets the nonstroking alpha constant (`ca`)
    #[inline]
    pub fn with_current_fill_alpha(mut self, current_fill_alpha: f32) -> Self {
        self.gs.current_fill_alpha = Some(current_fill_alpha);
        self
    }

    /// Consumes the builder and returns an actual ExtendedGraphicsState
    #[inline]
    pub fn build(self) -> ExtendedGraphicsState {
        self.gs
    }
}
