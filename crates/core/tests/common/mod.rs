//! Shared helpers for page object tests.

#![allow(dead_code, unused_macros)]

/// Build a `FieldMap` from `"key" => value` pairs.
macro_rules! fields {
    ($($key:literal => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = pageobj_core::FieldMap::new();
        $( map.insert($key.into(), pageobj_core::FieldValue::from($value)); )*
        map
    }};
}

pub(crate) use fields;

/// Install a test-scoped tracing subscriber; repeated calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Base fields for a small box on page 1.
pub fn base_map() -> pageobj_core::FieldMap {
    fields! {
        "page_number" => 1i64,
        "x0" => 0.0,
        "x1" => 10.0,
        "top" => 20.0,
        "bottom" => 30.0,
        "doctop" => 20.0,
    }
}

/// `base_map()` with extra entries appended.
pub fn with(extra: pageobj_core::FieldMap) -> pageobj_core::FieldMap {
    let mut map = base_map();
    map.extend(extra);
    map
}
