//! Structural deduplication of graphics states and shadings.
//!
//! Every paint call builds fresh resource values. Without deduplication a
//! document that paints the same gradient a thousand times would carry a
//! thousand identical `/Shading` dictionaries. The cache compares the PDF
//! form of the candidates and hands out one shared instance per distinct
//! structure.

use std::collections::HashMap;
use std::rc::Rc;

use lopdf::Object;

use crate::graphics::ExtendedGraphicsState;
use crate::shading::Shading;

/// A resource that can be compared by its PDF serialization
pub trait CacheableResource {
    fn to_pdf_object(&self) -> Object;
}

impl CacheableResource for ExtendedGraphicsState {
    fn to_pdf_object(&self) -> Object {
        Object::Dictionary(self.into())
    }
}

impl CacheableResource for Shading {
    fn to_pdf_object(&self) -> Object {
        Object::Dictionary(self.into())
    }
}

/// First-seen-wins store of canonical resources.
///
/// Candidates are bucketed by the number of top-level dictionary entries,
/// inside a bucket the first structurally equal entry is returned.
#[derive(Debug)]
pub struct ResourceCache<T> {
    buckets: HashMap<usize, Vec<(Object, Rc<T>)>>,
    len: usize,
}

impl<T> Default for ResourceCache<T> {
    fn default() -> Self {
        Self {
            buckets: HashMap::new(),
            len: 0,
        }
    }
}

impl<T: CacheableResource> ResourceCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical instance for `candidate`: a previously cached,
    /// structurally equal value or `candidate` itself (which is then cached)
    pub fn make_unique(&mut self, candidate: T) -> Rc<T> {
        let object = candidate.to_pdf_object();
        let bucket = self.buckets.entry(bucket_key(&object)).or_default();

        if let Some((_, existing)) = bucket.iter().find(|(o, _)| objects_equal(o, &object)) {
            return existing.clone();
        }

        let canonical = Rc::new(candidate);
        bucket.push((object, canonical.clone()));
        self.len += 1;
        canonical
    }

    /// Number of distinct resources seen so far
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn bucket_key(object: &Object) -> usize {
    match object {
        Object::Dictionary(d) => d.len(),
        Object::Stream(s) => s.dict.len(),
        _ => 0,
    }
}

/// Deep structural equality of two PDF objects
pub fn objects_equal(a: &Object, b: &Object) -> bool {
    use lopdf::Object::*;
    match (a, b) {
        (Null, Null) => true,
        (Boolean(a), Boolean(b)) => a == b,
        (Integer(a), Integer(b)) => a == b,
        (Real(a), Real(b)) => a == b,
        (Name(a), Name(b)) => a == b,
        (String(a, _), String(b, _)) => a == b,
        (Reference(a), Reference(b)) => a == b,
        (Array(a), Array(b)) => arrays_equal(a, b),
        (Dictionary(a), Dictionary(b)) => dictionaries_equal(a, b),
        (Stream(a), Stream(b)) => dictionaries_equal(&a.dict, &b.dict) && a.content == b.content,
        _ => false,
    }
}

/// Equal iff both have the same size and every key maps to equal values
pub fn dictionaries_equal(a: &lopdf::Dictionary, b: &lopdf::Dictionary) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|(key, value)| match b.get(key) {
        Ok(other) => objects_equal(value, other),
        Err(_) => false,
    })
}

pub fn arrays_equal(a: &[Object], b: &[Object]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| objects_equal(x, y))
}
