//! Per-kind grouping of page objects.

use std::cmp::Ordering;

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;

use super::kind::ObjectType;
use super::object::PageObject;
use super::value::FieldMap;

/// Objects grouped by kind, each group in insertion order.
#[derive(Debug, Clone, Default)]
pub struct PageObjects {
    groups: IndexMap<ObjectType, Vec<PageObject>>,
}

impl PageObjects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, object: PageObject) {
        self.groups
            .entry(object.object_type())
            .or_default()
            .push(object);
    }

    /// Objects of one kind; empty when none were added.
    pub fn get(&self, kind: ObjectType) -> &[PageObject] {
        self.groups.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Look up a group by its plural key (`chars`, `rects`, ...).
    pub fn get_plural(&self, key: &str) -> Option<&[PageObject]> {
        let kind = ObjectType::ALL.into_iter().find(|k| k.plural() == key)?;
        Some(self.get(kind))
    }

    pub fn kinds(&self) -> impl Iterator<Item = ObjectType> + '_ {
        self.groups.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageObject> {
        self.groups.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All objects in document reading order: by `doctop`, then `x0`.
    ///
    /// Uses `doctop` rather than `top` so objects from different pages of
    /// the same document compare correctly.
    pub fn sorted_by_doctop(&self) -> Vec<&PageObject> {
        let mut objects: Vec<&PageObject> = self.iter().collect();
        objects.sort_by(|a, b| document_order(a, b));
        objects
    }

    /// Validate many records at once. Each result stands alone; one bad
    /// record does not affect the others.
    pub fn construct_batch(records: &[FieldMap]) -> Vec<Result<PageObject>> {
        let results: Vec<Result<PageObject>> = records.par_iter().map(PageObject::from_fields).collect();
        let rejected = results.iter().filter(|r| r.is_err()).count();
        if rejected > 0 {
            debug!(rejected, total = records.len(), "batch contained invalid records");
        }
        results
    }
}

impl FromIterator<PageObject> for PageObjects {
    fn from_iter<I: IntoIterator<Item = PageObject>>(iter: I) -> Self {
        let mut objects = Self::new();
        for object in iter {
            objects.push(object);
        }
        objects
    }
}

impl Extend<PageObject> for PageObjects {
    fn extend<I: IntoIterator<Item = PageObject>>(&mut self, iter: I) {
        for object in iter {
            self.push(object);
        }
    }
}

fn document_order(a: &PageObject, b: &PageObject) -> Ordering {
    a.doctop()
        .total_cmp(&b.doctop())
        .then_with(|| a.x0().total_cmp(&b.x0()))
}
