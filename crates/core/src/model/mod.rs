//! The page object model.
//!
//! - `kind` - the nine object kinds (ObjectType)
//! - `value` - loosely-typed field values and maps (FieldValue, FieldMap, Number, Color)
//! - `base` - validated base fields shared by every kind (BaseFields)
//! - `records` - kind-specific records (Char, Line, Rect, Curve, Image, TextContainer)
//! - `object` - the tagged union and its construct/specialize/get operations (PageObject)
//! - `frame` - page coordinate frames and doctop accumulation (PageFrame)
//! - `collection` - per-kind grouping and batch construction (PageObjects)

pub mod base;
pub mod collection;
pub mod frame;
pub mod kind;
pub mod object;
pub mod records;
pub mod value;

pub use base::BaseFields;
pub use collection::PageObjects;
pub use frame::PageFrame;
pub use kind::ObjectType;
pub use object::PageObject;
pub use records::{
    Char, CharBuilder, Curve, CurveBuilder, Image, ImageBuilder, Line, PathStyle, Rect,
    TextContainer,
};
pub use value::{Color, Dash, FieldMap, FieldValue, Number, PathSegment};
