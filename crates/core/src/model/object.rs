//! `PageObject`: the tagged union of all page-level object kinds.
//!
//! Records enter through [`PageObject::construct`] (or
//! [`PageObject::specialize`] when the base is already validated) and are
//! read generically through [`PageObject::get`], which never fails.

use serde::ser::{Serialize, SerializeMap, Serializer};
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::error::Result;

use super::base::{BASE_KEYS, BaseFields};
use super::kind::ObjectType;
use super::records::{Char, Curve, Image, Line, Rect, TextContainer};
use super::value::{FieldMap, FieldReader, FieldValue};

/// One object extracted from a page content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum PageObject {
    Char(Char),
    Curve(Curve),
    Image(Image),
    Line(Line),
    Rect(Rect),
    TextBoxHorizontal(TextContainer),
    TextBoxVertical(TextContainer),
    TextLineHorizontal(TextContainer),
    TextLineVertical(TextContainer),
}

impl PageObject {
    /// Validate `fields` as a record of the kind named by `object_type`.
    ///
    /// Rejects unknown kinds, missing required fields, wrongly typed values,
    /// and a supplied `width`/`height` that disagrees with the extents.
    /// Keys that the kind does not define are dropped.
    pub fn construct(object_type: &str, fields: &FieldMap) -> Result<Self> {
        let kind = ObjectType::parse(object_type).inspect_err(|e| debug!(%e, "rejected record"))?;
        let base = BaseFields::from_fields(kind.as_str(), fields)
            .inspect_err(|e| debug!(%kind, %e, "rejected base fields"))?;
        Self::specialize(base, kind, fields)
    }

    /// Like [`PageObject::construct`], reading the kind from the
    /// `object_type` entry of `fields`.
    pub fn from_fields(fields: &FieldMap) -> Result<Self> {
        let reader = FieldReader::new("object", fields);
        let literal = reader.require("object_type", reader.string("object_type")?)?;
        Self::construct(&literal, fields)
    }

    /// Attach the kind-specific fields of `fields` to a validated base.
    pub fn specialize(base: BaseFields, kind: ObjectType, fields: &FieldMap) -> Result<Self> {
        let reader = FieldReader::new(kind.as_str(), fields);
        let object = match kind {
            ObjectType::Char => Self::Char(Char::from_reader(base, &reader)?),
            ObjectType::Curve => Self::Curve(Curve::from_reader(base, &reader)?),
            ObjectType::Image => Self::Image(Image::from_reader(base, &reader)?),
            ObjectType::Line => Self::Line(Line::from_reader(base, &reader)?),
            ObjectType::Rect => Self::Rect(Rect::from_reader(base, &reader)?),
            ObjectType::TextBoxHorizontal => Self::TextBoxHorizontal(TextContainer::new(base)),
            ObjectType::TextBoxVertical => Self::TextBoxVertical(TextContainer::new(base)),
            ObjectType::TextLineHorizontal => Self::TextLineHorizontal(TextContainer::new(base)),
            ObjectType::TextLineVertical => Self::TextLineVertical(TextContainer::new(base)),
        };

        let dropped: Vec<&SmolStr> = fields
            .keys()
            .filter(|key| !object.defines(key))
            .collect();
        if !dropped.is_empty() {
            debug!(%kind, ?dropped, "dropped fields not defined for kind");
        }
        trace!(%kind, page = base.page_number(), "specialized record");
        Ok(object)
    }

    pub const fn object_type(&self) -> ObjectType {
        match self {
            Self::Char(_) => ObjectType::Char,
            Self::Curve(_) => ObjectType::Curve,
            Self::Image(_) => ObjectType::Image,
            Self::Line(_) => ObjectType::Line,
            Self::Rect(_) => ObjectType::Rect,
            Self::TextBoxHorizontal(_) => ObjectType::TextBoxHorizontal,
            Self::TextBoxVertical(_) => ObjectType::TextBoxVertical,
            Self::TextLineHorizontal(_) => ObjectType::TextLineHorizontal,
            Self::TextLineVertical(_) => ObjectType::TextLineVertical,
        }
    }

    pub const fn base(&self) -> &BaseFields {
        match self {
            Self::Char(c) => c.base(),
            Self::Curve(c) => c.base(),
            Self::Image(i) => i.base(),
            Self::Line(l) => l.base(),
            Self::Rect(r) => r.base(),
            Self::TextBoxHorizontal(t)
            | Self::TextBoxVertical(t)
            | Self::TextLineHorizontal(t)
            | Self::TextLineVertical(t) => t.base(),
        }
    }

    /// Field names this kind can carry, beyond `object_type` and the base.
    pub fn kind_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Char(_) => Char::KEYS,
            Self::Curve(_) => Curve::KEYS,
            Self::Image(_) => Image::KEYS,
            Self::Line(_) => Line::KEYS,
            Self::Rect(_) => Rect::KEYS,
            _ => &[],
        }
    }

    fn defines(&self, key: &str) -> bool {
        key == "object_type" || BASE_KEYS.contains(&key) || self.kind_keys().contains(&key)
    }

    /// Safe field lookup. `None` means the field is absent for this record,
    /// whether it is optional and unset or not defined for the kind at all.
    pub fn get(&self, key: &str) -> Option<FieldValue> {
        if key == "object_type" {
            return Some(self.object_type().as_str().into());
        }
        if let Some(value) = self.base().get(key) {
            return Some(value);
        }
        match self {
            Self::Char(c) => c.get(key),
            Self::Curve(c) => c.get(key),
            Self::Image(i) => i.get(key),
            Self::Line(l) => l.get(key),
            Self::Rect(r) => r.get(key),
            _ => None,
        }
    }

    /// Every present field, in `object_type`, base, kind order.
    pub fn fields(&self) -> FieldMap {
        std::iter::once("object_type")
            .chain(BASE_KEYS.iter().copied())
            .chain(self.kind_keys().iter().copied())
            .filter_map(|key| Some((SmolStr::new_static(key), self.get(key)?)))
            .collect()
    }

    pub const fn as_char(&self) -> Option<&Char> {
        match self {
            Self::Char(c) => Some(c),
            _ => None,
        }
    }

    pub const fn as_curve(&self) -> Option<&Curve> {
        match self {
            Self::Curve(c) => Some(c),
            _ => None,
        }
    }

    pub const fn as_image(&self) -> Option<&Image> {
        match self {
            Self::Image(i) => Some(i),
            _ => None,
        }
    }

    pub const fn as_line(&self) -> Option<&Line> {
        match self {
            Self::Line(l) => Some(l),
            _ => None,
        }
    }

    pub const fn as_rect(&self) -> Option<&Rect> {
        match self {
            Self::Rect(r) => Some(r),
            _ => None,
        }
    }
}

impl std::ops::Deref for PageObject {
    type Target = BaseFields;
    fn deref(&self) -> &Self::Target {
        self.base()
    }
}

impl From<Char> for PageObject {
    fn from(c: Char) -> Self {
        Self::Char(c)
    }
}

impl From<Curve> for PageObject {
    fn from(c: Curve) -> Self {
        Self::Curve(c)
    }
}

impl From<Image> for PageObject {
    fn from(i: Image) -> Self {
        Self::Image(i)
    }
}

impl From<Line> for PageObject {
    fn from(l: Line) -> Self {
        Self::Line(l)
    }
}

impl From<Rect> for PageObject {
    fn from(r: Rect) -> Self {
        Self::Rect(r)
    }
}

impl TryFrom<&FieldMap> for PageObject {
    type Error = crate::error::SchemaViolation;

    fn try_from(fields: &FieldMap) -> Result<Self> {
        Self::from_fields(fields)
    }
}

/// Serializes as the flat field dict.
impl Serialize for PageObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let fields = self.fields();
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (key, value) in &fields {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}
