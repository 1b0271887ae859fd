//! Base fields shared by every page object.

use crate::error::{Result, SchemaViolation};
use crate::utils::approx_eq;

use super::value::{FieldMap, FieldReader, FieldValue, Number};

/// Field names owned by the base record, in output order.
pub(crate) const BASE_KEYS: &[&str] = &[
    "page_number",
    "x0",
    "y0",
    "x1",
    "y1",
    "top",
    "bottom",
    "doctop",
    "width",
    "height",
];

/// Validated position of an object on its page.
///
/// `top`/`bottom` grow downward from the page top, `y0`/`y1` grow upward
/// from the page bottom, and `doctop` is `top` offset by the heights of all
/// earlier pages, so it is never less than `top`. `width` and `height` are
/// always derived. Coordinates keep the number kind they were supplied in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseFields {
    page_number: u32,
    x0: Number,
    x1: Number,
    top: Number,
    bottom: Number,
    doctop: Number,
    y0: Option<Number>,
    y1: Option<Number>,
}

impl BaseFields {
    /// Validate extents and build the base record.
    ///
    /// Fails when an extent is inverted, `doctop` lies above `top`, a
    /// coordinate is not finite, or `page_number` is zero.
    pub fn new(page_number: u32, x0: f64, x1: f64, top: f64, bottom: f64, doctop: f64) -> Result<Self> {
        let base = Self {
            page_number,
            x0: x0.into(),
            x1: x1.into(),
            top: top.into(),
            bottom: bottom.into(),
            doctop: doctop.into(),
            y0: None,
            y1: None,
        };
        base.validate()?;
        Ok(base)
    }

    /// Attach bottom-up extents.
    pub fn with_y(mut self, y0: f64, y1: f64) -> Result<Self> {
        self.y0 = Some(y0.into());
        self.y1 = Some(y1.into());
        self.validate()?;
        Ok(self)
    }

    /// Read and validate the base fields out of a field map.
    ///
    /// A supplied `width` or `height` must agree with the extents; it is
    /// never stored.
    pub fn from_fields(kind: &'static str, fields: &FieldMap) -> Result<Self> {
        let reader = FieldReader::new(kind, fields);

        let page_number = reader.require("page_number", reader.int("page_number")?)?;
        let page_number = u32::try_from(page_number)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or(SchemaViolation::InvalidPageNumber(page_number))?;

        let base = Self {
            page_number,
            x0: reader.require("x0", reader.number("x0")?)?,
            x1: reader.require("x1", reader.number("x1")?)?,
            top: reader.require("top", reader.number("top")?)?,
            bottom: reader.require("bottom", reader.number("bottom")?)?,
            doctop: reader.require("doctop", reader.number("doctop")?)?,
            y0: reader.number("y0")?,
            y1: reader.number("y1")?,
        };
        base.validate()?;

        if let Some(width) = reader.num("width")? {
            check_derived("width", width, base.width())?;
        }
        if let Some(height) = reader.num("height")? {
            check_derived("height", height, base.height())?;
        }
        Ok(base)
    }

    fn validate(&self) -> Result<()> {
        if self.page_number == 0 {
            return Err(SchemaViolation::InvalidPageNumber(0));
        }
        for (name, value) in [
            ("x0", self.x0()),
            ("x1", self.x1()),
            ("top", self.top()),
            ("bottom", self.bottom()),
            ("doctop", self.doctop()),
        ] {
            if !value.is_finite() {
                return Err(SchemaViolation::NonFinite(name));
            }
        }
        for (name, value) in [("y0", self.y0()), ("y1", self.y1())] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(SchemaViolation::NonFinite(name));
            }
        }
        ordered("x0", self.x0(), "x1", self.x1())?;
        ordered("top", self.top(), "bottom", self.bottom())?;
        ordered("top", self.top(), "doctop", self.doctop())?;
        if let (Some(y0), Some(y1)) = (self.y0(), self.y1()) {
            ordered("y0", y0, "y1", y1)?;
        }
        Ok(())
    }

    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    pub const fn x0(&self) -> f64 {
        self.x0.as_f64()
    }

    pub const fn x1(&self) -> f64 {
        self.x1.as_f64()
    }

    pub const fn top(&self) -> f64 {
        self.top.as_f64()
    }

    pub const fn bottom(&self) -> f64 {
        self.bottom.as_f64()
    }

    pub const fn doctop(&self) -> f64 {
        self.doctop.as_f64()
    }

    pub const fn y0(&self) -> Option<f64> {
        match self.y0 {
            Some(n) => Some(n.as_f64()),
            None => None,
        }
    }

    pub const fn y1(&self) -> Option<f64> {
        match self.y1 {
            Some(n) => Some(n.as_f64()),
            None => None,
        }
    }

    pub const fn width(&self) -> f64 {
        self.x1() - self.x0()
    }

    pub const fn height(&self) -> f64 {
        self.bottom() - self.top()
    }

    /// Bounding box as `(x0, top, x1, bottom)`.
    pub const fn bbox(&self) -> (f64, f64, f64, f64) {
        (self.x0(), self.top(), self.x1(), self.bottom())
    }

    pub(crate) fn get(&self, key: &str) -> Option<FieldValue> {
        let value = match key {
            "page_number" => FieldValue::from(self.page_number),
            "x0" => self.x0.into(),
            "x1" => self.x1.into(),
            "top" => self.top.into(),
            "bottom" => self.bottom.into(),
            "doctop" => self.doctop.into(),
            "width" => self.width().into(),
            "height" => self.height().into(),
            "y0" => self.y0?.into(),
            "y1" => self.y1?.into(),
            _ => return None,
        };
        Some(value)
    }
}

fn ordered(low_name: &'static str, low: f64, high_name: &'static str, high: f64) -> Result<()> {
    if low > high {
        return Err(SchemaViolation::InvertedExtent {
            low_name,
            low,
            high_name,
            high,
        });
    }
    Ok(())
}

fn check_derived(field: &'static str, supplied: f64, derived: f64) -> Result<()> {
    if approx_eq(supplied, derived) {
        Ok(())
    } else {
        Err(SchemaViolation::Inconsistent {
            field,
            supplied,
            derived,
        })
    }
}
