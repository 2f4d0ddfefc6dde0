//! Current transformation matrix, for mapping gradient geometry into device space

use serde_derive::{Deserialize, Serialize};

use crate::graphics::Point;

/// PDF "current transformation matrix". Used both for the caller's
/// user-to-device transform and for the paint-local gradient transform.
///
/// Matrices are stored in PDF order `[a b c d e f]`, points are row vectors:
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type", content = "data")]
pub enum CurTransMat {
    /// Translation matrix (in points from bottom left corner)
    /// X and Y can have different values
    Translate(f32, f32),
    /// Rotation matrix (clockwise, in degrees)
    Rotate(f32),
    /// Combined rotate + translate matrix
    TranslateRotate(f32, f32, f32),
    /// Scale matrix (1.0 = 100% scale, no change)
    /// X and Y can have different values
    Scale(f32, f32),
    /// Raw (PDF-internal) PDF matrix
    Raw([f32; 6]),
    /// Identity matrix
    Identity,
}

impl Default for CurTransMat {
    fn default() -> Self {
        CurTransMat::Identity
    }
}

impl CurTransMat {
    pub fn as_array(&self) -> [f32; 6] {
        use self::CurTransMat::*;
        match self {
            Translate(x, y) => {
                // 1 0 0 1 x y cm
                [1.0, 0.0, 0.0, 1.0, *x, *y]
            }
            TranslateRotate(x, y, rot) => {
                let rad = (360.0 - rot).to_radians();
                [rad.cos(), -rad.sin(), rad.sin(), rad.cos(), *x, *y] /* cos sin -sin cos x y cm */
            }
            Rotate(rot) => {
                // cos sin -sin cos 0 0 cm
                let rad = (360.0 - rot).to_radians();
                [rad.cos(), -rad.sin(), rad.sin(), rad.cos(), 0.0, 0.0]
            }
            Raw(r) => *r,
            Scale(x, y) => {
                // x 0 0 y 0 0 cm
                [*x, 0.0, 0.0, *y, 0.0, 0.0]
            }
            Identity => [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    /// Multiplies two matrices in PDF order: the result applies `a` first, then `b`.
    pub fn combine_matrix(a: [f32; 6], b: [f32; 6]) -> [f32; 6] {
        [
            mul_add(a[0], b[0], a[1] * b[2]),
            mul_add(a[0], b[1], a[1] * b[3]),
            mul_add(a[2], b[0], a[3] * b[2]),
            mul_add(a[2], b[1], a[3] * b[3]),
            mul_add(a[4], b[0], mul_add(a[5], b[2], b[4])),
            mul_add(a[4], b[1], mul_add(a[5], b[3], b[5])),
        ]
    }

    /// Concatenates `inner` into `self`: points are mapped through `inner`
    /// first and then through `self`. This is what a `cm` operator inside an
    /// already transformed content stream does to the CTM.
    pub fn concat(&self, inner: &CurTransMat) -> CurTransMat {
        CurTransMat::Raw(Self::combine_matrix(inner.as_array(), self.as_array()))
    }

    /// Maps a point from user space into the space of this matrix
    pub fn transform_point(&self, p: Point) -> Point {
        let m = self.as_array();
        Point {
            x: mul_add(m[0], p.x, mul_add(m[2], p.y, m[4])),
            y: mul_add(m[1], p.x, mul_add(m[3], p.y, m[5])),
        }
    }

    /// The `a` component of the matrix, i.e. the X scale factor for
    /// matrices without rotation or shear
    pub fn scale_x(&self) -> f32 {
        self.as_array()[0]
    }

    pub(crate) fn into_pdf_array(self) -> lopdf::Object {
        lopdf::Object::Array(
            self.as_array()
                .iter()
                .copied()
                .map(lopdf::Object::Real)
                .collect(),
        )
    }
}

/// Multiply add. Computes `(self * a) + b` with workaround for
/// arm-unknown-linux-gnueabi.
///
/// `{f32, f64}::mul_add` is completly broken on arm-unknown-linux-gnueabi.
/// See issue https://github.com/rust-lang/rust/issues/46950.
#[inline(always)]
fn mul_add(a: f32, b: f32, c: f32) -> f32 {
    if cfg!(all(
        target_arch = "arm",
        target_os = "linux",
        target_env = "gnu"
    )) {
        (a * b) + c
    } else {
        a.mul_add(b, c)
    }
}
