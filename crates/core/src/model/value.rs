//! Loosely-typed field values and the typed readers built on them.
//!
//! Producers hand records over as a [`FieldMap`]; each kind reads its
//! fields back out through a [`FieldReader`], which turns a wrong type into
//! a [`SchemaViolation::FieldType`]. `Null` always reads as absent.

use bytes::Bytes;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use smol_str::SmolStr;

use crate::error::{Result, SchemaViolation};
use crate::utils::Point;

/// Ordered map of field name to value, the dict shape of a record.
pub type FieldMap = IndexMap<SmolStr, FieldValue>;

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    Str(String),
    Array(Vec<Self>),
    /// Opaque byte payload (image streams)
    Bytes(Bytes),
}

impl FieldValue {
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Real(_) => "real",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Bytes(_) => "bytes",
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric value, keeping whether it was written as an int or a real.
    pub const fn as_number(&self) -> Option<Number> {
        match self {
            Self::Int(n) => Some(Number::Int(*n)),
            Self::Real(n) => Some(Number::Real(*n)),
            _ => None,
        }
    }

    /// Numeric value, with ints widened to f64.
    pub const fn as_num(&self) -> Option<f64> {
        match self.as_number() {
            Some(n) => Some(n.as_f64()),
            None => None,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Interpret a two-element numeric array as a point.
    pub fn as_point(&self) -> Option<Point> {
        match self.as_array()? {
            [x, y] => Some((x.as_num()?, y.as_num()?)),
            _ => None,
        }
    }

    /// Interpret an array of two-element arrays as a point sequence.
    pub fn as_points(&self) -> Option<Vec<Point>> {
        self.as_array()?.iter().map(Self::as_point).collect()
    }

    /// Interpret an array of numbers as a vector of f64.
    pub fn as_nums(&self) -> Option<Vec<f64>> {
        self.as_array()?.iter().map(Self::as_num).collect()
    }

    /// Interpret an array of numbers, keeping each number's kind.
    pub fn as_numbers(&self) -> Option<Vec<Number>> {
        self.as_array()?.iter().map(Self::as_number).collect()
    }

    /// Byte payload, accepting either raw bytes or an array of byte values.
    pub fn as_bytes(&self) -> Option<Bytes> {
        match self {
            Self::Bytes(b) => Some(b.clone()),
            Self::Array(items) => items
                .iter()
                .map(|v| v.as_int().and_then(|n| u8::try_from(n).ok()))
                .collect::<Option<Vec<u8>>>()
                .map(Bytes::from),
            _ => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Real(n) => serializer.serialize_f64(*n),
            Self::Str(s) => serializer.serialize_str(s),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Bytes(b) => serializer.serialize_bytes(b),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<SmolStr> for FieldValue {
    fn from(v: SmolStr) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Bytes> for FieldValue {
    fn from(v: Bytes) -> Self {
        Self::Bytes(v)
    }
}

impl From<Point> for FieldValue {
    fn from((x, y): Point) -> Self {
        Self::Array(vec![Self::Real(x), Self::Real(y)])
    }
}

impl From<Number> for FieldValue {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(v) => Self::Int(v),
            Number::Real(v) => Self::Real(v),
        }
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// A supplied number, stored as the kind it was written in so that it
/// reads back unchanged. Typed accessors use the [`Number::as_f64`] view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Real(f64),
}

impl Number {
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Real(n) => n,
        }
    }

    pub const fn is_finite(self) -> bool {
        self.as_f64().is_finite()
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

/// A stroking or non-stroking color: one intensity or a component tuple,
/// depending on the colorspace in effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Scalar(Number),
    Tuple(Vec<Number>),
}

impl Color {
    fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Int(_) | FieldValue::Real(_) => value.as_number().map(Self::Scalar),
            FieldValue::Array(_) => value.as_numbers().map(Self::Tuple),
            _ => None,
        }
    }

    /// Gray intensity.
    pub const fn gray(v: f64) -> Self {
        Self::Scalar(Number::Real(v))
    }

    /// Component tuple from reals (RGB, CMYK, ...).
    pub fn components_of(values: &[f64]) -> Self {
        Self::Tuple(values.iter().copied().map(Number::Real).collect())
    }

    pub fn components(&self) -> Vec<f64> {
        match self {
            Self::Scalar(n) => vec![n.as_f64()],
            Self::Tuple(ns) => ns.iter().map(|n| n.as_f64()).collect(),
        }
    }
}

impl From<Color> for FieldValue {
    fn from(c: Color) -> Self {
        match c {
            Color::Scalar(n) => n.into(),
            Color::Tuple(ns) => ns.into(),
        }
    }
}

/// One original path construction operation, e.g. `('c', [p1, p2, p3])`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub op: char,
    pub points: Vec<Point>,
}

impl PathSegment {
    pub fn new(op: char, points: Vec<Point>) -> Self {
        Self { op, points }
    }

    fn from_value(value: &FieldValue) -> Option<Self> {
        let (op, rest) = value.as_array()?.split_first()?;
        let mut chars = op.as_str()?.chars();
        let op = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let points = rest.iter().map(FieldValue::as_point).collect::<Option<_>>()?;
        Some(Self { op, points })
    }
}

impl From<PathSegment> for FieldValue {
    fn from(seg: PathSegment) -> Self {
        let mut items = Vec::with_capacity(seg.points.len() + 1);
        items.push(Self::Str(seg.op.to_string()));
        items.extend(seg.points.into_iter().map(Self::from));
        Self::Array(items)
    }
}

/// Dash pattern and phase of a stroked path.
#[derive(Debug, Clone, PartialEq)]
pub struct Dash {
    pub pattern: Vec<f64>,
    pub phase: f64,
}

impl Dash {
    fn from_value(value: &FieldValue) -> Option<Self> {
        match value.as_array()? {
            [pattern, phase] => Some(Self {
                pattern: pattern.as_nums()?,
                phase: phase.as_num()?,
            }),
            _ => None,
        }
    }
}

impl From<Dash> for FieldValue {
    fn from(d: Dash) -> Self {
        Self::Array(vec![d.pattern.into(), Self::Real(d.phase)])
    }
}

/// Typed access to the fields of one record under construction.
pub(crate) struct FieldReader<'a> {
    kind: &'static str,
    fields: &'a FieldMap,
}

impl<'a> FieldReader<'a> {
    pub(crate) const fn new(kind: &'static str, fields: &'a FieldMap) -> Self {
        Self { kind, fields }
    }

    /// Present, non-null value for `key`.
    pub(crate) fn raw(&self, key: &str) -> Option<&'a FieldValue> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    fn typed<T>(
        &self,
        key: &'static str,
        expected: &'static str,
        convert: impl FnOnce(&FieldValue) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.raw(key) {
            None => Ok(None),
            Some(value) => convert(value).map(Some).ok_or_else(|| SchemaViolation::FieldType {
                field: key.to_string(),
                expected,
                got: value.type_name(),
            }),
        }
    }

    pub(crate) fn require<T>(&self, key: &'static str, value: Option<T>) -> Result<T> {
        value.ok_or(SchemaViolation::MissingField {
            kind: self.kind,
            field: key,
        })
    }

    /// Finite number as supplied; NaN and infinities are rejected.
    pub(crate) fn number(&self, key: &'static str) -> Result<Option<Number>> {
        match self.typed(key, "number", FieldValue::as_number)? {
            Some(v) if !v.is_finite() => Err(SchemaViolation::NonFinite(key)),
            other => Ok(other),
        }
    }

    /// Finite number widened to f64.
    pub(crate) fn num(&self, key: &'static str) -> Result<Option<f64>> {
        Ok(self.number(key)?.map(Number::as_f64))
    }

    pub(crate) fn int(&self, key: &'static str) -> Result<Option<i64>> {
        self.typed(key, "int", FieldValue::as_int)
    }

    pub(crate) fn bool(&self, key: &'static str) -> Result<Option<bool>> {
        self.typed(key, "bool", FieldValue::as_bool)
    }

    pub(crate) fn string(&self, key: &'static str) -> Result<Option<String>> {
        self.typed(key, "string", |v| v.as_str().map(str::to_string))
    }

    pub(crate) fn name(&self, key: &'static str) -> Result<Option<SmolStr>> {
        self.typed(key, "string", |v| v.as_str().map(SmolStr::new))
    }

    /// A single name or a list of names.
    pub(crate) fn names(&self, key: &'static str) -> Result<Option<Vec<SmolStr>>> {
        self.typed(key, "string or array of strings", |v| match v {
            FieldValue::Str(s) => Some(vec![SmolStr::new(s)]),
            FieldValue::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(SmolStr::new))
                .collect(),
            _ => None,
        })
    }

    pub(crate) fn color(&self, key: &'static str) -> Result<Option<Color>> {
        self.typed(key, "number or array of numbers", Color::from_value)
    }

    pub(crate) fn matrix(&self, key: &'static str) -> Result<Option<[Number; 6]>> {
        self.typed(key, "array of 6 numbers", |v| v.as_numbers()?.try_into().ok())
    }

    pub(crate) fn points(&self, key: &'static str) -> Result<Option<Vec<Point>>> {
        self.typed(key, "array of (x, top) pairs", FieldValue::as_points)
    }

    pub(crate) fn int_pair(&self, key: &'static str) -> Result<Option<(i64, i64)>> {
        self.typed(key, "array of 2 ints", |v| match v.as_array()? {
            [w, h] => Some((w.as_int()?, h.as_int()?)),
            _ => None,
        })
    }

    pub(crate) fn path(&self, key: &'static str) -> Result<Option<Vec<PathSegment>>> {
        self.typed(key, "array of path operations", |v| {
            v.as_array()?.iter().map(PathSegment::from_value).collect()
        })
    }

    pub(crate) fn dash(&self, key: &'static str) -> Result<Option<Dash>> {
        self.typed(key, "[pattern, phase]", Dash::from_value)
    }

    pub(crate) fn bytes(&self, key: &'static str) -> Result<Option<Bytes>> {
        self.typed(key, "bytes", FieldValue::as_bytes)
    }
}
