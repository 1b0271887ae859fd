//! The closed set of page object kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaViolation};

/// Kind of a page-level object, serialized as its `object_type` literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Char,
    Curve,
    Image,
    Line,
    Rect,
    TextBoxHorizontal,
    TextBoxVertical,
    TextLineHorizontal,
    TextLineVertical,
}

impl ObjectType {
    /// Every kind, in `object_type` literal order.
    pub const ALL: [Self; 9] = [
        Self::Char,
        Self::Curve,
        Self::Image,
        Self::Line,
        Self::Rect,
        Self::TextBoxHorizontal,
        Self::TextBoxVertical,
        Self::TextLineHorizontal,
        Self::TextLineVertical,
    ];

    /// The `object_type` literal.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::Curve => "curve",
            Self::Image => "image",
            Self::Line => "line",
            Self::Rect => "rect",
            Self::TextBoxHorizontal => "textboxhorizontal",
            Self::TextBoxVertical => "textboxvertical",
            Self::TextLineHorizontal => "textlinehorizontal",
            Self::TextLineVertical => "textlinevertical",
        }
    }

    /// Plural key used when objects are grouped per kind (`chars`, `rects`, ...).
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Char => "chars",
            Self::Curve => "curves",
            Self::Image => "images",
            Self::Line => "lines",
            Self::Rect => "rects",
            Self::TextBoxHorizontal => "textboxhorizontals",
            Self::TextBoxVertical => "textboxverticals",
            Self::TextLineHorizontal => "textlinehorizontals",
            Self::TextLineVertical => "textlineverticals",
        }
    }

    pub const fn is_text_container(self) -> bool {
        matches!(
            self,
            Self::TextBoxHorizontal
                | Self::TextBoxVertical
                | Self::TextLineHorizontal
                | Self::TextLineVertical
        )
    }

    /// Parse an `object_type` literal. Matching is exact.
    pub fn parse(literal: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == literal)
            .ok_or_else(|| SchemaViolation::UnknownObjectType(literal.to_string()))
    }
}

impl FromStr for ObjectType {
    type Err = SchemaViolation;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
