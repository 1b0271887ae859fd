//! Kind-specific records: Char, Line, Rect, Curve, Image and text containers.
//!
//! Each record embeds the validated [`BaseFields`] and derefs to it, so
//! `ch.x0()` and `curve.doctop()` work directly on the specialization.
//! Use `Char::builder()` / `Curve::builder()` / `Image::builder()` to set
//! optional fields. Builders run the same checks as construction.

use bytes::Bytes;
use smol_str::SmolStr;

use crate::error::{Result, SchemaViolation};
use crate::utils::{Matrix, Point};

use super::base::BaseFields;
use super::value::{Color, Dash, FieldReader, FieldValue, Number, PathSegment};

fn finite(field: &'static str, values: impl IntoIterator<Item = f64>) -> Result<()> {
    if values.into_iter().all(f64::is_finite) {
        Ok(())
    } else {
        Err(SchemaViolation::NonFinite(field))
    }
}

fn finite_points<'a>(field: &'static str, points: impl IntoIterator<Item = &'a Point>) -> Result<()> {
    finite(field, points.into_iter().flat_map(|&(x, y)| [x, y]))
}

fn finite_color(field: &'static str, color: Option<&Color>) -> Result<()> {
    finite(field, color.into_iter().flat_map(Color::components))
}

macro_rules! impl_base_deref {
    ($ty:ty) => {
        impl std::ops::Deref for $ty {
            type Target = BaseFields;
            fn deref(&self) -> &Self::Target {
                &self.base
            }
        }

        impl $ty {
            /// The embedded base record.
            pub const fn base(&self) -> &BaseFields {
                &self.base
            }
        }
    };
}

/// A single rendered glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct Char {
    base: BaseFields,
    text: String,
    fontname: SmolStr,
    size: Option<Number>,
    adv: Option<Number>,
    matrix: Option<[Number; 6]>,
    upright: Option<bool>,
    stroking_color: Option<Color>,
    non_stroking_color: Option<Color>,
    font: Option<SmolStr>,
    mcid: Option<i64>,
    tag: Option<SmolStr>,
    ncs: Option<SmolStr>,
    scs: Option<SmolStr>,
}

impl Char {
    pub(crate) const KEYS: &'static [&'static str] = &[
        "text",
        "fontname",
        "size",
        "adv",
        "matrix",
        "upright",
        "stroking_color",
        "non_stroking_color",
        "font",
        "mcid",
        "tag",
        "ncs",
        "scs",
    ];

    pub fn builder(base: BaseFields, text: &str, fontname: &str) -> CharBuilder {
        CharBuilder::new(base, text, fontname)
    }

    pub(crate) fn from_reader(base: BaseFields, r: &FieldReader<'_>) -> Result<Self> {
        let ch = Self {
            base,
            text: r.require("text", r.string("text")?)?,
            fontname: r.require("fontname", r.name("fontname")?)?,
            size: r.number("size")?,
            adv: r.number("adv")?,
            matrix: r.matrix("matrix")?,
            upright: r.bool("upright")?,
            stroking_color: r.color("stroking_color")?,
            non_stroking_color: r.color("non_stroking_color")?,
            font: r.name("font")?,
            mcid: r.int("mcid")?,
            tag: r.name("tag")?,
            ncs: r.name("ncs")?,
            scs: r.name("scs")?,
        };
        ch.validate()?;
        Ok(ch)
    }

    fn validate(&self) -> Result<()> {
        finite("size", self.size.map(Number::as_f64))?;
        finite("adv", self.adv.map(Number::as_f64))?;
        finite("matrix", self.matrix.iter().flatten().map(|n| n.as_f64()))?;
        finite_color("stroking_color", self.stroking_color.as_ref())?;
        finite_color("non_stroking_color", self.non_stroking_color.as_ref())
    }

    pub(crate) fn get(&self, key: &str) -> Option<FieldValue> {
        Some(match key {
            "text" => self.text.as_str().into(),
            "fontname" => self.fontname.clone().into(),
            "size" => self.size?.into(),
            "adv" => self.adv?.into(),
            "matrix" => self.matrix?.to_vec().into(),
            "upright" => self.upright?.into(),
            "stroking_color" => self.stroking_color.clone()?.into(),
            "non_stroking_color" => self.non_stroking_color.clone()?.into(),
            "font" => self.font.clone()?.into(),
            "mcid" => self.mcid?.into(),
            "tag" => self.tag.clone()?.into(),
            "ncs" => self.ncs.clone()?.into(),
            "scs" => self.scs.clone()?.into(),
            _ => return None,
        })
    }

    /// The rendered character, possibly whitespace.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fontname(&self) -> &str {
        &self.fontname
    }

    /// Font size.
    pub fn size(&self) -> Option<f64> {
        self.size.map(Number::as_f64)
    }

    /// Advance width: glyph width * font size * horizontal scaling.
    pub fn adv(&self) -> Option<f64> {
        self.adv.map(Number::as_f64)
    }

    /// The current transformation matrix applied to the glyph.
    pub fn matrix(&self) -> Option<Matrix> {
        let [a, b, c, d, e, f] = self.matrix?.map(Number::as_f64);
        Some((a, b, c, d, e, f))
    }

    pub const fn upright(&self) -> Option<bool> {
        self.upright
    }

    pub const fn stroking_color(&self) -> Option<&Color> {
        self.stroking_color.as_ref()
    }

    pub const fn non_stroking_color(&self) -> Option<&Color> {
        self.non_stroking_color.as_ref()
    }

    /// Font resource name from the page's resource dictionary.
    pub fn font(&self) -> Option<&str> {
        self.font.as_deref()
    }

    /// Marked Content ID for tagged PDF.
    pub const fn mcid(&self) -> Option<i64> {
        self.mcid
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Non-stroking colorspace name (e.g. "DeviceRGB").
    pub fn ncs(&self) -> Option<&str> {
        self.ncs.as_deref()
    }

    /// Stroking colorspace name.
    pub fn scs(&self) -> Option<&str> {
        self.scs.as_deref()
    }
}

impl_base_deref!(Char);

/// Builder for [`Char`] with fluent setters for optional fields.
///
/// # Example
/// ```
/// use pageobj_core::{BaseFields, Char};
///
/// let base = BaseFields::new(1, 10.0, 15.0, 100.0, 112.0, 100.0).unwrap();
/// let ch = Char::builder(base, "A", "Helvetica")
///     .size(12.0)
///     .upright(true)
///     .build()
///     .unwrap();
/// assert_eq!(ch.width(), 5.0);
/// assert!(Char::builder(base, "A", "Helvetica").size(f64::NAN).build().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CharBuilder {
    inner: Char,
}

impl CharBuilder {
    pub fn new(base: BaseFields, text: &str, fontname: &str) -> Self {
        Self {
            inner: Char {
                base,
                text: text.to_string(),
                fontname: SmolStr::new(fontname),
                size: None,
                adv: None,
                matrix: None,
                upright: None,
                stroking_color: None,
                non_stroking_color: None,
                font: None,
                mcid: None,
                tag: None,
                ncs: None,
                scs: None,
            },
        }
    }

    pub const fn size(mut self, size: f64) -> Self {
        self.inner.size = Some(Number::Real(size));
        self
    }

    pub const fn adv(mut self, adv: f64) -> Self {
        self.inner.adv = Some(Number::Real(adv));
        self
    }

    pub const fn matrix(mut self, (a, b, c, d, e, f): Matrix) -> Self {
        self.inner.matrix = Some([
            Number::Real(a),
            Number::Real(b),
            Number::Real(c),
            Number::Real(d),
            Number::Real(e),
            Number::Real(f),
        ]);
        self
    }

    pub const fn upright(mut self, upright: bool) -> Self {
        self.inner.upright = Some(upright);
        self
    }

    pub fn stroking_color(mut self, color: Color) -> Self {
        self.inner.stroking_color = Some(color);
        self
    }

    pub fn non_stroking_color(mut self, color: Color) -> Self {
        self.inner.non_stroking_color = Some(color);
        self
    }

    pub fn font(mut self, font: &str) -> Self {
        self.inner.font = Some(SmolStr::new(font));
        self
    }

    /// Sets the Marked Content ID and tag.
    pub fn marked_content(mut self, mcid: Option<i64>, tag: Option<&str>) -> Self {
        self.inner.mcid = mcid;
        self.inner.tag = tag.map(SmolStr::new);
        self
    }

    /// Sets the non-stroking and stroking colorspace names.
    pub fn colorspaces(mut self, ncs: Option<&str>, scs: Option<&str>) -> Self {
        self.inner.ncs = ncs.map(SmolStr::new);
        self.inner.scs = scs.map(SmolStr::new);
        self
    }

    /// Fails on a non-finite size, advance, matrix entry or color component.
    pub fn build(self) -> Result<Char> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

/// Stroke and fill attributes shared by path objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathStyle {
    pub linewidth: Option<Number>,
    pub stroke: Option<bool>,
    pub fill: Option<bool>,
    pub stroking_color: Option<Color>,
    pub non_stroking_color: Option<Color>,
    pub mcid: Option<i64>,
    pub tag: Option<SmolStr>,
}

impl PathStyle {
    pub(crate) const KEYS: &'static [&'static str] = &[
        "linewidth",
        "stroke",
        "fill",
        "stroking_color",
        "non_stroking_color",
        "mcid",
        "tag",
    ];

    fn from_reader(r: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            linewidth: r.number("linewidth")?,
            stroke: r.bool("stroke")?,
            fill: r.bool("fill")?,
            stroking_color: r.color("stroking_color")?,
            non_stroking_color: r.color("non_stroking_color")?,
            mcid: r.int("mcid")?,
            tag: r.name("tag")?,
        })
    }

    fn validate(&self) -> Result<()> {
        finite("linewidth", self.linewidth.map(Number::as_f64))?;
        finite_color("stroking_color", self.stroking_color.as_ref())?;
        finite_color("non_stroking_color", self.non_stroking_color.as_ref())
    }

    fn get(&self, key: &str) -> Option<FieldValue> {
        Some(match key {
            "linewidth" => self.linewidth?.into(),
            "stroke" => self.stroke?.into(),
            "fill" => self.fill?.into(),
            "stroking_color" => self.stroking_color.clone()?.into(),
            "non_stroking_color" => self.non_stroking_color.clone()?.into(),
            "mcid" => self.mcid?.into(),
            "tag" => self.tag.clone()?.into(),
            _ => return None,
        })
    }
}

/// A straight path segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    base: BaseFields,
    style: PathStyle,
    pts: Option<Vec<Point>>,
}

impl Line {
    pub(crate) const KEYS: &'static [&'static str] = &[
        "linewidth",
        "stroke",
        "fill",
        "stroking_color",
        "non_stroking_color",
        "mcid",
        "tag",
        "pts",
    ];

    pub fn new(base: BaseFields, style: PathStyle) -> Result<Self> {
        style.validate()?;
        Ok(Self {
            base,
            style,
            pts: None,
        })
    }

    /// Attach the segment endpoints as `(x, top)`.
    pub fn with_endpoints(mut self, p0: Point, p1: Point) -> Result<Self> {
        finite_points("pts", [&p0, &p1])?;
        self.pts = Some(vec![p0, p1]);
        Ok(self)
    }

    pub(crate) fn from_reader(base: BaseFields, r: &FieldReader<'_>) -> Result<Self> {
        let line = Self::new(base, PathStyle::from_reader(r)?)?;
        match r.points("pts")? {
            Some(pts) => {
                finite_points("pts", &pts)?;
                Ok(Self { pts: Some(pts), ..line })
            }
            None => Ok(line),
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<FieldValue> {
        match key {
            "pts" => self.pts.clone().map(Into::into),
            _ => self.style.get(key),
        }
    }

    pub const fn style(&self) -> &PathStyle {
        &self.style
    }

    pub fn linewidth(&self) -> Option<f64> {
        self.style.linewidth.map(Number::as_f64)
    }

    pub const fn stroking_color(&self) -> Option<&Color> {
        self.style.stroking_color.as_ref()
    }

    pub const fn non_stroking_color(&self) -> Option<&Color> {
        self.style.non_stroking_color.as_ref()
    }

    pub fn pts(&self) -> Option<&[Point]> {
        self.pts.as_deref()
    }
}

impl_base_deref!(Line);

/// An axis-aligned rectangle path.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    base: BaseFields,
    style: PathStyle,
}

impl Rect {
    pub(crate) const KEYS: &'static [&'static str] = PathStyle::KEYS;

    pub fn new(base: BaseFields, style: PathStyle) -> Result<Self> {
        style.validate()?;
        Ok(Self { base, style })
    }

    pub(crate) fn from_reader(base: BaseFields, r: &FieldReader<'_>) -> Result<Self> {
        Self::new(base, PathStyle::from_reader(r)?)
    }

    pub(crate) fn get(&self, key: &str) -> Option<FieldValue> {
        self.style.get(key)
    }

    pub const fn style(&self) -> &PathStyle {
        &self.style
    }

    pub fn linewidth(&self) -> Option<f64> {
        self.style.linewidth.map(Number::as_f64)
    }

    pub const fn stroking_color(&self) -> Option<&Color> {
        self.style.stroking_color.as_ref()
    }

    pub const fn non_stroking_color(&self) -> Option<&Color> {
        self.style.non_stroking_color.as_ref()
    }
}

impl_base_deref!(Rect);

/// An arbitrary path, described by its ordered `(x, top)` vertices.
///
/// The vertices are readable under two names, `points` and `pts`. Both
/// always hold the same sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    base: BaseFields,
    style: PathStyle,
    points: Vec<Point>,
    evenodd: Option<bool>,
    path: Option<Vec<PathSegment>>,
    dash: Option<Dash>,
}

impl Curve {
    pub(crate) const KEYS: &'static [&'static str] = &[
        "linewidth",
        "stroke",
        "fill",
        "stroking_color",
        "non_stroking_color",
        "mcid",
        "tag",
        "points",
        "pts",
        "evenodd",
        "path",
        "dash",
    ];

    pub fn builder(base: BaseFields, points: Vec<Point>) -> CurveBuilder {
        CurveBuilder {
            inner: Self {
                base,
                style: PathStyle::default(),
                points,
                evenodd: None,
                path: None,
                dash: None,
            },
        }
    }

    pub(crate) fn from_reader(base: BaseFields, r: &FieldReader<'_>) -> Result<Self> {
        let points = match (r.points("points")?, r.points("pts")?) {
            (Some(points), Some(pts)) if points != pts => {
                return Err(SchemaViolation::AliasMismatch {
                    field: "points",
                    alias: "pts",
                });
            }
            (Some(points), _) | (None, Some(points)) => Some(points),
            (None, None) => None,
        };
        let curve = Self {
            base,
            style: PathStyle::from_reader(r)?,
            points: r.require("points", points)?,
            evenodd: r.bool("evenodd")?,
            path: r.path("path")?,
            dash: r.dash("dash")?,
        };
        curve.validate()?;
        Ok(curve)
    }

    fn validate(&self) -> Result<()> {
        self.style.validate()?;
        finite_points("points", &self.points)?;
        finite_points("path", self.path.iter().flatten().flat_map(|seg| &seg.points))?;
        if let Some(dash) = &self.dash {
            finite("dash", dash.pattern.iter().copied().chain([dash.phase]))?;
        }
        Ok(())
    }

    pub(crate) fn get(&self, key: &str) -> Option<FieldValue> {
        match key {
            "points" | "pts" => Some(self.points.clone().into()),
            "evenodd" => self.evenodd.map(Into::into),
            "path" => self.path.clone().map(Into::into),
            "dash" => self.dash.clone().map(Into::into),
            _ => self.style.get(key),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Same sequence as [`Curve::points`].
    pub fn pts(&self) -> &[Point] {
        &self.points
    }

    pub const fn style(&self) -> &PathStyle {
        &self.style
    }

    pub fn linewidth(&self) -> Option<f64> {
        self.style.linewidth.map(Number::as_f64)
    }

    /// Whether the enclosed region is painted.
    pub const fn fill(&self) -> Option<bool> {
        self.style.fill
    }

    pub const fn stroking_color(&self) -> Option<&Color> {
        self.style.stroking_color.as_ref()
    }

    pub const fn non_stroking_color(&self) -> Option<&Color> {
        self.style.non_stroking_color.as_ref()
    }

    /// Whether the even-odd fill rule applies.
    pub const fn evenodd(&self) -> Option<bool> {
        self.evenodd
    }

    /// Original path construction operations.
    pub fn path(&self) -> Option<&[PathSegment]> {
        self.path.as_deref()
    }

    pub const fn dash(&self) -> Option<&Dash> {
        self.dash.as_ref()
    }
}

impl_base_deref!(Curve);

/// Builder for [`Curve`].
#[derive(Debug, Clone)]
pub struct CurveBuilder {
    inner: Curve,
}

impl CurveBuilder {
    pub fn style(mut self, style: PathStyle) -> Self {
        self.inner.style = style;
        self
    }

    pub const fn evenodd(mut self, evenodd: bool) -> Self {
        self.inner.evenodd = Some(evenodd);
        self
    }

    pub fn path(mut self, path: Vec<PathSegment>) -> Self {
        self.inner.path = Some(path);
        self
    }

    pub fn dash(mut self, pattern: Vec<f64>, phase: f64) -> Self {
        self.inner.dash = Some(Dash { pattern, phase });
        self
    }

    /// Fails on a non-finite vertex, path point, dash value, linewidth or
    /// color component.
    pub fn build(self) -> Result<Curve> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

/// An embedded raster image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    base: BaseFields,
    name: Option<SmolStr>,
    srcsize: Option<(i64, i64)>,
    bits: Option<i64>,
    imagemask: Option<bool>,
    colorspace: Option<Vec<SmolStr>>,
    stream: Option<Bytes>,
}

impl Image {
    pub(crate) const KEYS: &'static [&'static str] = &[
        "name",
        "srcsize",
        "bits",
        "imagemask",
        "colorspace",
        "stream",
    ];

    pub fn builder(base: BaseFields) -> ImageBuilder {
        ImageBuilder {
            inner: Self {
                base,
                name: None,
                srcsize: None,
                bits: None,
                imagemask: None,
                colorspace: None,
                stream: None,
            },
        }
    }

    pub(crate) fn from_reader(base: BaseFields, r: &FieldReader<'_>) -> Result<Self> {
        let image = Self {
            base,
            name: r.name("name")?,
            srcsize: r.int_pair("srcsize")?,
            bits: r.int("bits")?,
            imagemask: r.bool("imagemask")?,
            colorspace: r.names("colorspace")?,
            stream: r.bytes("stream")?,
        };
        image.validate()?;
        Ok(image)
    }

    /// `bits` must be positive, `srcsize` non-negative.
    fn validate(&self) -> Result<()> {
        if let Some(bits) = self.bits.filter(|b| *b <= 0) {
            return Err(SchemaViolation::OutOfRange { field: "bits", value: bits });
        }
        if let Some(value) = self.srcsize.into_iter().flat_map(|(w, h)| [w, h]).find(|v| *v < 0) {
            return Err(SchemaViolation::OutOfRange { field: "srcsize", value });
        }
        Ok(())
    }

    pub(crate) fn get(&self, key: &str) -> Option<FieldValue> {
        Some(match key {
            "name" => self.name.clone()?.into(),
            "srcsize" => {
                let (w, h) = self.srcsize?;
                vec![w, h].into()
            }
            "bits" => self.bits?.into(),
            "imagemask" => self.imagemask?.into(),
            "colorspace" => self.colorspace.clone()?.into(),
            "stream" => self.stream.clone()?.into(),
            _ => return None,
        })
    }

    /// XObject resource name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Native pixel size `(width, height)`.
    pub const fn srcsize(&self) -> Option<(i64, i64)> {
        self.srcsize
    }

    /// Bits per component.
    pub const fn bits(&self) -> Option<i64> {
        self.bits
    }

    pub const fn imagemask(&self) -> Option<bool> {
        self.imagemask
    }

    pub fn colorspace(&self) -> Option<&[SmolStr]> {
        self.colorspace.as_deref()
    }

    /// Encoded image payload, left opaque.
    pub const fn stream(&self) -> Option<&Bytes> {
        self.stream.as_ref()
    }
}

impl_base_deref!(Image);

/// Builder for [`Image`].
#[derive(Debug, Clone)]
pub struct ImageBuilder {
    inner: Image,
}

impl ImageBuilder {
    pub fn name(mut self, name: &str) -> Self {
        self.inner.name = Some(SmolStr::new(name));
        self
    }

    pub const fn srcsize(mut self, width: i64, height: i64) -> Self {
        self.inner.srcsize = Some((width, height));
        self
    }

    pub const fn bits(mut self, bits: i64) -> Self {
        self.inner.bits = Some(bits);
        self
    }

    pub const fn imagemask(mut self, imagemask: bool) -> Self {
        self.inner.imagemask = Some(imagemask);
        self
    }

    pub fn colorspace(mut self, names: &[&str]) -> Self {
        self.inner.colorspace = Some(names.iter().copied().map(SmolStr::new).collect());
        self
    }

    pub fn stream(mut self, stream: Bytes) -> Self {
        self.inner.stream = Some(stream);
        self
    }

    /// Fails on non-positive `bits` or a negative `srcsize` dimension.
    pub fn build(self) -> Result<Image> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

/// A text line or text box. Carries only base fields; the writing mode
/// and grouping level live in the object kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextContainer {
    base: BaseFields,
}

impl TextContainer {
    pub const fn new(base: BaseFields) -> Self {
        Self { base }
    }
}

impl_base_deref!(TextContainer);
