use std::rc::Rc;

use lopdf::Object::{Dictionary, Reference};

use crate::cache::objects_equal;
use crate::errors::Error;
use crate::graphics::ExtendedGraphicsState;
use crate::pattern::TilingPattern;
use crate::shading::Shading;
use crate::xobject::ImageXObject;

/// Resources referenced from one content stream (a layer or a pattern cell)
#[derive(Default, Debug, Clone)]
pub struct PdfResources {
    /// `/ExtGState`, named `GS0`, `GS1`, ...
    pub(crate) graphics_states: Vec<Rc<ExtendedGraphicsState>>,
    /// `/Shading`, named `SH0`, ...
    pub(crate) shadings: Vec<Rc<Shading>>,
    /// `/Pattern`, named `PT0`, ...
    pub(crate) patterns: Vec<TilingPattern>,
    /// `/XObject`, named `Im0`, ...
    pub(crate) xobjects: Vec<ImageXObject>,
    /// `/ColorSpace`, named `CS0`, ...
    pub(crate) color_spaces: Vec<lopdf::Object>,
}

fn position_rc<T>(list: &[Rc<T>], item: &Rc<T>) -> Option<usize> {
    list.iter().position(|i| Rc::ptr_eq(i, item))
}

impl PdfResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the graphics state unless this exact instance is already registered
    pub fn add_graphics_state(&mut self, gs: &Rc<ExtendedGraphicsState>) -> String {
        let index = position_rc(&self.graphics_states, gs).unwrap_or_else(|| {
            self.graphics_states.push(gs.clone());
            self.graphics_states.len() - 1
        });
        format!("GS{}", index)
    }

    pub fn add_shading(&mut self, shading: &Rc<Shading>) -> String {
        let index = position_rc(&self.shadings, shading).unwrap_or_else(|| {
            self.shadings.push(shading.clone());
            self.shadings.len() - 1
        });
        format!("SH{}", index)
    }

    pub fn add_pattern(&mut self, pattern: TilingPattern) -> String {
        self.patterns.push(pattern);
        format!("PT{}", self.patterns.len() - 1)
    }

    pub fn add_xobject(&mut self, image: ImageXObject) -> String {
        self.xobjects.push(image);
        format!("Im{}", self.xobjects.len() - 1)
    }

    /// Color spaces are small arrays, equal ones share a name
    pub fn add_color_space(&mut self, color_space: lopdf::Object) -> String {
        let index = self
            .color_spaces
            .iter()
            .position(|cs| objects_equal(cs, &color_space))
            .unwrap_or_else(|| {
                self.color_spaces.push(color_space);
                self.color_spaces.len() - 1
            });
        format!("CS{}", index)
    }

    pub fn graphics_states(&self) -> &[Rc<ExtendedGraphicsState>] {
        &self.graphics_states
    }

    pub fn shadings(&self) -> &[Rc<Shading>] {
        &self.shadings
    }

    pub fn patterns(&self) -> &[TilingPattern] {
        &self.patterns
    }

    pub fn xobjects(&self) -> &[ImageXObject] {
        &self.xobjects
    }

    pub fn color_spaces(&self) -> &[lopdf::Object] {
        &self.color_spaces
    }

    /// Builds the `/Resources` dictionary, adding streams (images, patterns)
    /// to the document as indirect objects. Empty categories are left out.
    pub fn into_with_document(self, doc: &mut lopdf::Document) -> Result<lopdf::Dictionary, Error> {
        let mut dict = lopdf::Dictionary::new();

        let graphics_state_dict = lopdf::Dictionary::from_iter(
            self.graphics_states
                .iter()
                .enumerate()
                .map(|(i, gs)| (format!("GS{}", i), Dictionary(gs.as_ref().into()))),
        );

        let shading_dict = lopdf::Dictionary::from_iter(
            self.shadings
                .iter()
                .enumerate()
                .map(|(i, sh)| (format!("SH{}", i), Dictionary(sh.as_ref().into()))),
        );

        let mut pattern_dict = lopdf::Dictionary::new();
        for (i, pattern) in self.patterns.into_iter().enumerate() {
            let id = pattern.into_with_document(doc)?;
            pattern_dict.set(format!("PT{}", i), Reference(id));
        }

        let mut xobjects_dict = lopdf::Dictionary::new();
        for (i, image) in self.xobjects.into_iter().enumerate() {
            let id = image.into_with_document(doc);
            xobjects_dict.set(format!("Im{}", i), Reference(id));
        }

        let color_space_dict = lopdf::Dictionary::from_iter(
            self.color_spaces
                .into_iter()
                .enumerate()
                .map(|(i, cs)| (format!("CS{}", i), cs)),
        );

        if !graphics_state_dict.is_empty() {
            dict.set("ExtGState", Dictionary(graphics_state_dict));
        }

        if !shading_dict.is_empty() {
            dict.set("Shading", Dictionary(shading_dict));
        }

        if !pattern_dict.is_empty() {
            dict.set("Pattern", Dictionary(pattern_dict));
        }

        if !xobjects_dict.is_empty() {
            dict.set("XObject", Dictionary(xobjects_dict));
        }

        if !color_space_dict.is_empty() {
            dict.set("ColorSpace", Dictionary(color_space_dict));
        }

        Ok(dict)
    }
}
