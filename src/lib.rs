//! # pdfpaint
//!
//! pdfpaint maps the paints of a 2D drawing API (solid colors, linear and
//! radial gradients, textures) and their Porter-Duff composites onto the
//! things PDF actually has: device colors, `ExtGState` alpha constants and
//! blend modes, axial / radial shadings with stitching functions, and
//! tiling patterns.
//!
//! # Getting started
//!
//! ```rust
//! use pdfpaint::*;
//!
//! let mut applier = PaintApplier::new(PaintOptions::default());
//! let mut layer = PdfLayer::new("Layer 1");
//! let mut warnings = Vec::new();
//!
//! let gradient = LinearGradient {
//!     stops: vec![
//!         GradientStop::new(Rgba::opaque(255, 0, 0), 0.0),
//!         GradientStop::new(Rgba::new(0, 0, 255, 128), 1.0),
//!     ],
//!     start: Point::new(0.0, 0.0),
//!     end: Point::new(100.0, 0.0),
//!     transform: None,
//! };
//!
//! // Colors and the graphics state are written into the layer,
//! // the shading is handed back to be painted
//! let shading = applier
//!     .apply_paint(
//!         &Paint::from(gradient),
//!         &mut layer,
//!         &CurTransMat::Identity,
//!         Some(&Composite::from(AlphaComposite::new(0.5, CompositeRule::SrcOver))),
//!         &mut warnings,
//!     )
//!     .unwrap();
//!
//! if let Some(shading) = shading {
//!     layer.paint_shading(&shading).unwrap();
//! }
//!
//! let mut doc = lopdf::Document::with_version("1.7");
//! let (content, resources) = layer.into_with_document(&mut doc).unwrap();
//! assert!(resources.get(b"Shading").is_ok());
//! assert!(!content.content.is_empty());
//! ```
//!
//! Equal graphics states and shadings are only created once per applier:
//! applying the same paint twice hands out the same `Rc`.
//!
//! Paints from other libraries can be passed in through the [`PaintSource`]
//! trait, they are recognized by what they expose.

#[macro_use]
extern crate log;

pub mod applier;
pub mod cache;
pub mod color;
pub mod composite;
pub mod context;
pub mod errors;
pub mod function;
pub mod graphics;
pub mod image;
pub mod matrix;
pub mod options;
pub mod paint;
pub mod pattern;
pub mod pdf_layer;
pub mod pdf_resources;
pub mod shading;
pub mod xobject;

pub use crate::applier::PaintApplier;
pub use crate::cache::{CacheableResource, ResourceCache};
pub use crate::color::*;
pub use crate::composite::*;
pub use crate::context::DrawingContext;
pub use crate::errors::*;
pub use crate::function::*;
pub use crate::graphics::*;
pub use crate::image::*;
pub use crate::matrix::CurTransMat;
pub use crate::options::PaintOptions;
pub use crate::paint::*;
pub use crate::pattern::{build_texture_pattern, TilingPattern};
pub use crate::pdf_layer::PdfLayer;
pub use crate::pdf_resources::PdfResources;
pub use crate::shading::*;
pub use crate::xobject::{ImageFilter, ImageXObject};
