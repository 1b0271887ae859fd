//! Small geometric aliases shared by the object model.

/// A point as `(x, top)` in page space, or `(x, y)` for PDF-space input.
pub type Point = (f64, f64);

/// A bounding box `(x0, y0, x1, y1)` in bottom-up PDF space.
pub type PdfBBox = (f64, f64, f64, f64);

/// A 6-value affine transformation matrix `(a, b, c, d, e, f)`.
pub type Matrix = (f64, f64, f64, f64, f64, f64);

/// Relative tolerance used when a caller-supplied derived value is checked
/// against the value computed from its inputs.
pub const DERIVED_TOLERANCE: f64 = 1e-9;

/// Compare two floats within [`DERIVED_TOLERANCE`], scaled by magnitude.
pub fn approx_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= DERIVED_TOLERANCE * scale
}
