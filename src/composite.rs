//! Porter-Duff composites and how they end up in the `ExtGState`.
//!
//! PDF has no notion of Porter-Duff rules, so a composite can only be
//! approximated by a constant alpha plus a blend mode.

use serde_derive::{Deserialize, Serialize};

use crate::errors::PaintWarning;
use crate::graphics::{BlendMode, ExtendedGraphicsState};

/// Porter-Duff compositing rule
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeRule {
    Clear,
    Src,
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    Dst,
    SrcAtop,
    DstAtop,
    Xor,
}

impl CompositeRule {
    /// Parses the numeric rule ids used by AWT-style composites (`1` = clear ... `12` = xor)
    pub fn from_id(id: i32) -> Option<CompositeRule> {
        use self::CompositeRule::*;
        let rule = match id {
            1 => Clear,
            2 => Src,
            3 => SrcOver,
            4 => DstOver,
            5 => SrcIn,
            6 => DstIn,
            7 => SrcOut,
            8 => DstOut,
            9 => Dst,
            10 => SrcAtop,
            11 => DstAtop,
            12 => Xor,
            _ => return None,
        };
        Some(rule)
    }

    /// Closest PDF blend mode for the rule
    pub fn blend_mode(&self) -> BlendMode {
        match self {
            CompositeRule::Src => BlendMode::normal(),
            CompositeRule::Xor => BlendMode::exclusion(),
            _ => BlendMode::compatible(),
        }
    }
}

impl Default for CompositeRule {
    fn default() -> Self {
        CompositeRule::SrcOver
    }
}

/// Constant alpha combined with a compositing rule
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlphaComposite {
    /// `0.0 ..= 1.0`
    pub alpha: f32,
    #[serde(default)]
    pub rule: CompositeRule,
}

impl AlphaComposite {
    pub fn new(alpha: f32, rule: CompositeRule) -> Self {
        Self { alpha, rule }
    }
}

impl Default for AlphaComposite {
    fn default() -> Self {
        Self::new(1.0, CompositeRule::SrcOver)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type", content = "data")]
pub enum Composite {
    Alpha(AlphaComposite),
    /// A composite that could not be recognized, `kind` names its type
    Unsupported { kind: String },
}

impl From<AlphaComposite> for Composite {
    fn from(c: AlphaComposite) -> Self {
        Composite::Alpha(c)
    }
}

/// Capability probes for a composite of unknown origin. Anything exposing
/// both an alpha and a rule id is treated as an alpha composite.
pub trait CompositeSource {
    fn type_name(&self) -> &str;

    fn alpha(&self) -> Option<f32> {
        None
    }

    /// Numeric rule id, see [`CompositeRule::from_id`]
    fn rule(&self) -> Option<i32> {
        None
    }
}

impl Composite {
    pub fn recognize(source: &dyn CompositeSource) -> Composite {
        match (source.alpha(), source.rule().and_then(CompositeRule::from_id)) {
            (Some(alpha), Some(rule)) => Composite::Alpha(AlphaComposite { alpha, rule }),
            _ => Composite::Unsupported {
                kind: source.type_name().to_string(),
            },
        }
    }

    /// Resolves the composite into `(alpha, blend mode)`. Unknown composites
    /// are reported and behave like an opaque source-over.
    pub fn resolve(&self, warnings: &mut Vec<PaintWarning>) -> (f32, BlendMode) {
        let c = match self {
            Composite::Alpha(c) => *c,
            Composite::Unsupported { kind } => {
                let msg = format!("unsupported composite {}, using source-over", kind);
                warn!("{}", msg);
                warnings.push(PaintWarning::warning(msg));
                AlphaComposite::default()
            }
        };
        (c.alpha, c.rule.blend_mode())
    }
}

/// Starts the pending graphics state of one paint call from the composite.
///
/// No composite leaves `pending` untouched. Otherwise the state is created,
/// the blend mode is always written and an alpha below 1 overwrites both
/// alpha constants.
pub fn apply_composite(
    composite: Option<&Composite>,
    pending: &mut Option<ExtendedGraphicsState>,
    warnings: &mut Vec<PaintWarning>,
) {
    let composite = match composite {
        Some(c) => c,
        None => return,
    };

    let (alpha, blend_mode) = composite.resolve(warnings);
    let gs = pending.get_or_insert_with(ExtendedGraphicsState::default);
    if alpha < 1.0 {
        gs.set_alpha(alpha);
    }
    gs.set_blend_mode(blend_mode);
}
