//! Page frames: the link between PDF user space and page object positions.
//!
//! A producer walking a document keeps one `PageFrame` per page. The frame
//! flips bottom-up PDF boxes into `top`/`bottom` and injects `doctop`, the
//! only value that depends on earlier pages.

use crate::error::{Result, SchemaViolation};
use crate::utils::PdfBBox;

use super::base::BaseFields;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFrame {
    page_number: u32,
    height: f64,
    initial_doctop: f64,
}

impl PageFrame {
    pub fn new(page_number: u32, height: f64, initial_doctop: f64) -> Result<Self> {
        if page_number == 0 {
            return Err(SchemaViolation::InvalidPageNumber(0));
        }
        if !height.is_finite() || height < 0.0 {
            return Err(SchemaViolation::InvalidPageHeight(height));
        }
        if !initial_doctop.is_finite() {
            return Err(SchemaViolation::NonFinite("doctop"));
        }
        Ok(Self {
            page_number,
            height,
            initial_doctop,
        })
    }

    /// Frame for page 1 of a document.
    pub fn first(height: f64) -> Result<Self> {
        Self::new(1, height, 0.0)
    }

    /// Frame for the following page; its `doctop` starts below this page.
    pub fn next_page(&self, height: f64) -> Result<Self> {
        let page_number = self
            .page_number
            .checked_add(1)
            .ok_or(SchemaViolation::InvalidPageNumber(i64::from(self.page_number) + 1))?;
        Self::new(page_number, height, self.initial_doctop + self.height)
    }

    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Cumulative height of all earlier pages.
    pub const fn initial_doctop(&self) -> f64 {
        self.initial_doctop
    }

    /// Convert a PDF-space box `(x0, y0, x1, y1)` into base fields.
    pub fn base_from_pdf_bbox(&self, (x0, y0, x1, y1): PdfBBox) -> Result<BaseFields> {
        let top = self.height - y1;
        let bottom = self.height - y0;
        BaseFields::new(
            self.page_number,
            x0,
            x1,
            top,
            bottom,
            self.initial_doctop + top,
        )?
        .with_y(y0, y1)
    }
}
