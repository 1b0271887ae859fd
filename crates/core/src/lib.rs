//! pageobj - the typed record model for objects extracted from PDF pages.
//!
//! Characters, lines, rectangles, curves, images and text lines/boxes are
//! produced by a content-stream walker and read by layout, table and text
//! consumers. This crate defines those records, validates them on the way
//! in, and gives generic code absent-tolerant field access.

pub mod error;
pub mod json;
pub mod model;
pub mod utils;

pub use error::{Result, SchemaViolation};
pub use model::{
    BaseFields, Char, CharBuilder, Color, Curve, CurveBuilder, Dash, FieldMap, FieldValue, Image,
    ImageBuilder, Line, Number, ObjectType, PageFrame, PageObject, PageObjects, PathSegment,
    PathStyle, Rect, TextContainer,
};
