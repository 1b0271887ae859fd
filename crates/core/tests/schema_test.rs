//! Construction and validation of page object records.

mod common;

use common::{base_map, fields, init_tracing, with};
use pageobj_core::{FieldValue, ObjectType, PageObject, SchemaViolation};

fn char_scenario() -> pageobj_core::FieldMap {
    fields! {
        "x0" => 10.0,
        "x1" => 15.0,
        "top" => 100.0,
        "bottom" => 112.0,
        "doctop" => 100.0,
        "page_number" => 1i64,
        "text" => "A",
        "fontname" => "Helvetica",
        "size" => 12.0,
    }
}

#[test]
fn test_char_scenario() {
    init_tracing();
    let obj = PageObject::construct("char", &char_scenario()).unwrap();
    assert_eq!(obj.object_type(), ObjectType::Char);
    assert_eq!(obj.width(), 5.0);
    assert_eq!(obj.height(), 12.0);
    assert_eq!(obj.get("size"), Some(FieldValue::Real(12.0)));
    assert_eq!(obj.get("linewidth"), None);

    let ch = obj.as_char().unwrap();
    assert_eq!(ch.text(), "A");
    assert_eq!(ch.fontname(), "Helvetica");
    assert_eq!(ch.size(), Some(12.0));
    assert_eq!(ch.upright(), None);
}

#[test]
fn test_unknown_object_type() {
    assert_eq!(
        PageObject::construct("paragraph", &base_map()),
        Err(SchemaViolation::UnknownObjectType("paragraph".into()))
    );
}

#[test]
fn test_every_literal_constructs() {
    let extra = fields! {
        "text" => "x",
        "fontname" => "Courier",
        "points" => vec![(0.0, 20.0), (10.0, 30.0)],
    };
    for kind in ObjectType::ALL {
        let obj = PageObject::construct(kind.as_str(), &with(extra.clone())).unwrap();
        assert_eq!(obj.object_type(), kind);
        assert_eq!(obj.get("object_type"), Some(kind.as_str().into()));
    }
}

#[test]
fn test_char_requires_text_and_fontname() {
    let no_text = with(fields! { "fontname" => "Helvetica" });
    assert_eq!(
        PageObject::construct("char", &no_text),
        Err(SchemaViolation::MissingField {
            kind: "char",
            field: "text",
        })
    );

    let no_font = with(fields! { "text" => "A" });
    assert_eq!(
        PageObject::construct("char", &no_font),
        Err(SchemaViolation::MissingField {
            kind: "char",
            field: "fontname",
        })
    );

    let null_font = with(fields! { "text" => "A", "fontname" => FieldValue::Null });
    assert!(matches!(
        PageObject::construct("char", &null_font),
        Err(SchemaViolation::MissingField { field: "fontname", .. })
    ));
}

#[test]
fn test_whitespace_char_is_valid() {
    let map = with(fields! { "text" => " ", "fontname" => "Helvetica" });
    let obj = PageObject::construct("char", &map).unwrap();
    assert_eq!(obj.as_char().unwrap().text(), " ");
}

#[test]
fn test_missing_base_fields() {
    for key in ["page_number", "x0", "x1", "top", "bottom", "doctop"] {
        let mut map = base_map();
        map.shift_remove(key);
        assert!(
            matches!(
                PageObject::construct("rect", &map),
                Err(SchemaViolation::MissingField { kind: "rect", field }) if field == key
            ),
            "missing {key} should be rejected"
        );
    }
}

#[test]
fn test_y_extents_are_optional() {
    let obj = PageObject::construct("rect", &base_map()).unwrap();
    assert_eq!(obj.get("y0"), None);
    let obj = PageObject::construct("rect", &with(fields! { "y0" => 762.0, "y1" => 772.0 })).unwrap();
    assert_eq!(obj.y1(), Some(772.0));
}

#[test]
fn test_contradicting_width_is_rejected() {
    let map = fields! {
        "page_number" => 1i64,
        "x0" => 0.0,
        "x1" => 0.0,
        "top" => 0.0,
        "bottom" => 0.0,
        "doctop" => 0.0,
        "width" => 5.0,
    };
    assert_eq!(
        PageObject::construct("rect", &map),
        Err(SchemaViolation::Inconsistent {
            field: "width",
            supplied: 5.0,
            derived: 0.0,
        })
    );
}

#[test]
fn test_contradicting_height_is_rejected() {
    let map = with(fields! { "height" => 11.0 });
    assert!(matches!(
        PageObject::construct("line", &map),
        Err(SchemaViolation::Inconsistent { field: "height", .. })
    ));
}

#[test]
fn test_consistent_width_and_height_are_accepted() {
    let map = with(fields! { "width" => 10.0, "height" => 10i64 });
    let obj = PageObject::construct("rect", &map).unwrap();
    assert_eq!(obj.width(), 10.0);
    assert_eq!(obj.height(), 10.0);

    // float noise from a producer computing x1 - x0 itself
    let map = fields! {
        "page_number" => 1i64,
        "x0" => 10.1,
        "x1" => 15.1,
        "top" => 0.0,
        "bottom" => 1.0,
        "doctop" => 0.0,
        "width" => 5.0,
    };
    assert!(PageObject::construct("rect", &map).is_ok());
}

#[test]
fn test_derived_dimensions_are_exact() {
    let cases = [(0.0, 10.0, 20.0, 30.0), (3.25, 7.5, 1.125, 9.0), (100.0, 100.0, 5.0, 5.0)];
    for (x0, x1, top, bottom) in cases {
        let map = fields! {
            "page_number" => 1i64,
            "x0" => x0,
            "x1" => x1,
            "top" => top,
            "bottom" => bottom,
            "doctop" => top,
        };
        let obj = PageObject::construct("textlinehorizontal", &map).unwrap();
        assert_eq!(obj.width(), x1 - x0);
        assert_eq!(obj.height(), bottom - top);
    }
}

#[test]
fn test_inverted_extents_are_rejected() {
    let mut map = base_map();
    map.insert("x1".into(), FieldValue::Real(-1.0));
    assert!(matches!(
        PageObject::construct("rect", &map),
        Err(SchemaViolation::InvertedExtent { low_name: "x0", high_name: "x1", .. })
    ));
}

#[test]
fn test_doctop_above_top_is_rejected() {
    let map = fields! {
        "page_number" => 3i64,
        "x0" => 0.0, "x1" => 10.0, "top" => 500.0, "bottom" => 510.0, "doctop" => 0.0,
    };
    assert_eq!(
        PageObject::construct("rect", &map),
        Err(SchemaViolation::InvertedExtent {
            low_name: "top",
            low: 500.0,
            high_name: "doctop",
            high: 0.0,
        })
    );
}

#[test]
fn test_int_numbers_read_back_as_ints() {
    let map = fields! {
        "page_number" => 1i64,
        "x0" => 10i64, "x1" => 15i64, "top" => 100i64, "bottom" => 112i64, "doctop" => 100i64,
        "text" => "A",
        "fontname" => "Helvetica",
        "size" => 12i64,
        "matrix" => vec![12i64, 0, 0, 12, 10, 680],
        "stroking_color" => 0i64,
        "non_stroking_color" => vec![0i64, 0, 1],
    };
    let obj = PageObject::construct("char", &map).unwrap();
    for key in ["x0", "doctop", "size", "matrix", "stroking_color", "non_stroking_color"] {
        assert_eq!(obj.get(key).as_ref(), map.get(key), "field {key}");
    }
    // derived values are computed in floating point
    assert_eq!(obj.get("width"), Some(FieldValue::Real(5.0)));
    assert_eq!(obj.as_char().and_then(|c| c.size()), Some(12.0));
}

#[test]
fn test_non_finite_optional_numbers_are_rejected() {
    let map = with(fields! {
        "text" => "A",
        "fontname" => "F1",
        "non_stroking_color" => vec![0.0, f64::NAN, 0.0],
    });
    assert_eq!(
        PageObject::construct("char", &map),
        Err(SchemaViolation::NonFinite("non_stroking_color"))
    );

    let map = with(fields! {
        "text" => "A",
        "fontname" => "F1",
        "matrix" => vec![1.0, 0.0, 0.0, 1.0, f64::INFINITY, 0.0],
    });
    assert_eq!(
        PageObject::construct("char", &map),
        Err(SchemaViolation::NonFinite("matrix"))
    );

    let dash = vec![FieldValue::from(vec![f64::NAN]), FieldValue::Real(0.0)];
    let map = with(fields! { "points" => vec![(0.0, 20.0)], "dash" => dash });
    assert_eq!(
        PageObject::construct("curve", &map),
        Err(SchemaViolation::NonFinite("dash"))
    );
}

#[test]
fn test_page_number_must_be_positive_int() {
    let mut map = base_map();
    map.insert("page_number".into(), FieldValue::Int(0));
    assert_eq!(
        PageObject::construct("rect", &map),
        Err(SchemaViolation::InvalidPageNumber(0))
    );

    map.insert("page_number".into(), FieldValue::Real(1.5));
    assert!(matches!(
        PageObject::construct("rect", &map),
        Err(SchemaViolation::FieldType { expected: "int", got: "real", .. })
    ));
}

#[test]
fn test_wrongly_typed_optional_field() {
    let map = with(fields! { "text" => "A", "fontname" => "F1", "upright" => "yes" });
    assert_eq!(
        PageObject::construct("char", &map),
        Err(SchemaViolation::FieldType {
            field: "upright".into(),
            expected: "bool",
            got: "string",
        })
    );
}

#[test]
fn test_curve_populates_points_and_pts() {
    let pts = vec![(0.0, 20.0), (5.0, 25.0), (10.0, 30.0)];

    for key in ["points", "pts"] {
        let mut map = base_map();
        map.insert(key.into(), pts.clone().into());
        let obj = PageObject::construct("curve", &map).unwrap();
        let curve = obj.as_curve().unwrap();
        assert_eq!(curve.points(), pts.as_slice());
        assert_eq!(curve.pts(), curve.points());
        assert_eq!(obj.get("points"), obj.get("pts"));
        assert!(obj.get("points").is_some());
    }
}

#[test]
fn test_curve_alias_mismatch() {
    let map = with(fields! {
        "points" => vec![(0.0, 20.0), (10.0, 30.0)],
        "pts" => vec![(0.0, 20.0)],
    });
    assert_eq!(
        PageObject::construct("curve", &map),
        Err(SchemaViolation::AliasMismatch {
            field: "points",
            alias: "pts",
        })
    );
}

#[test]
fn test_curve_requires_points() {
    assert_eq!(
        PageObject::construct("curve", &with(fields! { "fill" => true })),
        Err(SchemaViolation::MissingField {
            kind: "curve",
            field: "points",
        })
    );
}

#[test]
fn test_image_ignores_curve_fields() {
    let map = with(fields! {
        "srcsize" => vec![640i64, 480i64],
        "bits" => 8i64,
        "imagemask" => false,
        "colorspace" => vec!["DeviceRGB"],
        "stream" => bytes::Bytes::from_static(b"\xff\xd8"),
        "linewidth" => 1.0,
        "pts" => vec![(0.0, 0.0)],
    });
    let obj = PageObject::construct("image", &map).unwrap();
    let image = obj.as_image().unwrap();
    assert_eq!(image.srcsize(), Some((640, 480)));
    assert_eq!(image.bits(), Some(8));
    assert_eq!(image.imagemask(), Some(false));
    assert_eq!(image.colorspace().map(|s| s.len()), Some(1));
    assert_eq!(image.stream().map(|s| s.len()), Some(2));
    assert_eq!(obj.get("linewidth"), None);
    assert_eq!(obj.get("pts"), None);
}

#[test]
fn test_image_sizes_must_be_in_range() {
    assert_eq!(
        PageObject::construct("image", &with(fields! { "bits" => -1i64 })),
        Err(SchemaViolation::OutOfRange { field: "bits", value: -1 })
    );
    assert_eq!(
        PageObject::construct("image", &with(fields! { "srcsize" => vec![-640i64, 480] })),
        Err(SchemaViolation::OutOfRange { field: "srcsize", value: -640 })
    );
}

#[test]
fn test_image_colorspace_accepts_single_name() {
    let obj = PageObject::construct("image", &with(fields! { "colorspace" => "DeviceGray" })).unwrap();
    assert_eq!(
        obj.get("colorspace"),
        Some(FieldValue::Array(vec!["DeviceGray".into()]))
    );
}

#[test]
fn test_specialize_from_validated_base() {
    let base = pageobj_core::BaseFields::from_fields("line", &base_map()).unwrap();
    let obj = PageObject::specialize(
        base,
        ObjectType::Line,
        &fields! { "linewidth" => 0.5, "pts" => vec![(0.0, 20.0), (10.0, 30.0)] },
    )
    .unwrap();
    let line = obj.as_line().unwrap();
    assert_eq!(line.linewidth(), Some(0.5));
    assert_eq!(line.pts().map(|s| s.len()), Some(2));
    assert_eq!(line.base(), &base);

    assert!(matches!(
        PageObject::specialize(base, ObjectType::Char, &fields! { "text" => "A" }),
        Err(SchemaViolation::MissingField { field: "fontname", .. })
    ));
}
