//! Maps paints onto a drawing context.
//!
//! One call of [`PaintApplier::apply_paint`] resolves the composite, emits
//! the color (or pattern) operators for the paint, and collects every alpha
//! contribution into a single pending `ExtGState`. That state is
//! deduplicated against everything the applier has emitted before and then
//! set with `gs`. Gradients are not painted here: the canonical shading is
//! returned so the caller can decide whether to fill a clip with `sh` or
//! wrap it into a shading pattern.

use std::rc::Rc;

use crate::cache::{CacheableResource, ResourceCache};
use crate::color::{ColorMapper, DeviceRgbMapper, PatternColor, Rgba};
use crate::composite::{apply_composite, Composite};
use crate::context::DrawingContext;
use crate::errors::{Error, PaintWarning};
use crate::graphics::ExtendedGraphicsState;
use crate::image::{FlateImageEncoder, ImageEncoder};
use crate::matrix::CurTransMat;
use crate::options::PaintOptions;
use crate::paint::{Paint, PaintSource, Texture};
use crate::pattern::build_texture_pattern;
use crate::shading::{build_linear_shading, build_radial_shading, build_two_stop_shading, Shading};

/// Paint mapper for one document. Holds the resource caches, so all paints
/// of a document should go through the same applier.
pub struct PaintApplier {
    mapper: Box<dyn ColorMapper>,
    encoder: Box<dyn ImageEncoder>,
    options: PaintOptions,
    graphics_states: ResourceCache<ExtendedGraphicsState>,
    shadings: ResourceCache<Shading>,
}

impl Default for PaintApplier {
    fn default() -> Self {
        Self::new(PaintOptions::default())
    }
}

impl std::fmt::Debug for PaintApplier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("PaintApplier")
            .field("options", &self.options)
            .field("graphics_states", &self.graphics_states.len())
            .field("shadings", &self.shadings.len())
            .finish()
    }
}

impl PaintApplier {
    /// Applier writing `/DeviceRGB` colors and Flate encoded images
    pub fn new(options: PaintOptions) -> Self {
        let encoder = FlateImageEncoder {
            compress: options.compress_images,
        };
        Self::with_collaborators(options, Box::new(DeviceRgbMapper), Box::new(encoder))
    }

    pub fn with_collaborators(
        options: PaintOptions,
        mapper: Box<dyn ColorMapper>,
        encoder: Box<dyn ImageEncoder>,
    ) -> Self {
        Self {
            mapper,
            encoder,
            options,
            graphics_states: ResourceCache::new(),
            shadings: ResourceCache::new(),
        }
    }

    pub fn options(&self) -> &PaintOptions {
        &self.options
    }

    /// Number of distinct graphics states emitted so far
    pub fn graphics_state_count(&self) -> usize {
        self.graphics_states.len()
    }

    /// Number of distinct shadings returned so far
    pub fn shading_count(&self) -> usize {
        self.shadings.len()
    }

    /// Normalizes a paint of unknown origin, then applies it
    pub fn apply_paint_source(
        &mut self,
        source: &dyn PaintSource,
        ctx: &mut dyn DrawingContext,
        ctm: &CurTransMat,
        composite: Option<&Composite>,
        warnings: &mut Vec<PaintWarning>,
    ) -> Result<Option<Rc<Shading>>, Error> {
        let paint = Paint::recognize(source)?;
        self.apply_paint(&paint, ctx, ctm, composite, warnings)
    }

    /// Applies `paint` to `ctx`.
    ///
    /// Returns the shading of gradient paints. Malformed paints fail before
    /// anything is written to `ctx`.
    pub fn apply_paint(
        &mut self,
        paint: &Paint,
        ctx: &mut dyn DrawingContext,
        ctm: &CurTransMat,
        composite: Option<&Composite>,
        warnings: &mut Vec<PaintWarning>,
    ) -> Result<Option<Rc<Shading>>, Error> {
        let mut pending = None;
        apply_composite(composite, &mut pending, warnings);

        let stop_bounds = self.options.stop_bounds;
        let shading = match paint {
            Paint::Solid(color) => {
                self.apply_color(color, ctx, &mut pending)?;
                None
            }
            Paint::LinearGradient(g) => {
                let shading = build_linear_shading(g, ctm, &*self.mapper, stop_bounds)?;
                self.apply_first_color(g.stops.first().map(|s| &s.color), ctx, &mut pending)?;
                Some(shading)
            }
            Paint::RadialGradient(g) => {
                let shading = build_radial_shading(g, ctm, &*self.mapper, stop_bounds)?;
                self.apply_first_color(g.stops.first().map(|s| &s.color), ctx, &mut pending)?;
                Some(shading)
            }
            Paint::TwoStopGradient(g) => {
                let shading = build_two_stop_shading(g, ctm, &*self.mapper, stop_bounds)?;
                self.apply_color(&g.color1, ctx, &mut pending)?;
                Some(shading)
            }
            Paint::Texture(t) => {
                self.apply_texture(t, ctx)?;
                None
            }
            Paint::Unsupported { kind } => {
                let msg = format!("unsupported paint {}, nothing applied", kind);
                warn!("{}", msg);
                warnings.push(PaintWarning::warning(msg));
                None
            }
        };

        if let Some(gs) = pending {
            let gs = canonicalize(&mut self.graphics_states, gs, self.options.deduplicate);
            ctx.set_graphics_state(&gs)?;
        }

        Ok(shading.map(|s| {
            debug!(
                "{:?} shading with {} segments",
                s.shading_type,
                s.function.functions.len()
            );
            canonicalize(&mut self.shadings, s, self.options.deduplicate)
        }))
    }

    /// Sets the color for stroking and filling, folding its alpha into the pending state
    fn apply_color(
        &self,
        color: &Rgba,
        ctx: &mut dyn DrawingContext,
        pending: &mut Option<ExtendedGraphicsState>,
    ) -> Result<(), Error> {
        let device = self.mapper.map_color(color);
        ctx.set_stroking_color(&device)?;
        ctx.set_non_stroking_color(&device)?;

        if !color.is_opaque() {
            pending
                .get_or_insert_with(ExtendedGraphicsState::default)
                .multiply_alpha(color.a as f32 / 255.0);
        }
        Ok(())
    }

    /// Gradients set their first color too, for consumers that cannot use the shading
    fn apply_first_color(
        &self,
        color: Option<&Rgba>,
        ctx: &mut dyn DrawingContext,
        pending: &mut Option<ExtendedGraphicsState>,
    ) -> Result<(), Error> {
        match color {
            Some(color) => self.apply_color(color, ctx, pending),
            None => Ok(()),
        }
    }

    fn apply_texture(&mut self, texture: &Texture, ctx: &mut dyn DrawingContext) -> Result<(), Error> {
        let (pattern, image) = build_texture_pattern(texture, &mut *self.encoder)?;

        let pattern = ctx.add_pattern(pattern)?;
        let color_space = ctx.add_color_space(lopdf::Object::Array(vec![
            lopdf::Object::Name("Pattern".into()),
            image.color_space.into_pdf_name(),
        ]))?;

        let pattern_color = PatternColor {
            color_space,
            pattern,
        };
        ctx.set_stroking_pattern(&pattern_color)?;
        ctx.set_non_stroking_pattern(&pattern_color)?;
        Ok(())
    }
}

fn canonicalize<T: CacheableResource>(cache: &mut ResourceCache<T>, value: T, deduplicate: bool) -> Rc<T> {
    if deduplicate {
        cache.make_unique(value)
    } else {
        Rc::new(value)
    }
}
