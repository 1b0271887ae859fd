//! Flat JSON dict conversion.

mod common;

use common::{fields, with};
use pageobj_core::json::{from_value, to_value};
use pageobj_core::{BaseFields, Image, ObjectType, PageObject, SchemaViolation};
use serde_json::json;

#[test]
fn test_char_from_pdfplumber_dict() {
    let value = json!({
        "object_type": "char",
        "page_number": 1,
        "x0": 10.0,
        "x1": 15.0,
        "y0": 680.0,
        "y1": 692.0,
        "top": 100.0,
        "bottom": 112.0,
        "doctop": 100.0,
        "width": 5.0,
        "height": 12.0,
        "text": "A",
        "fontname": "Helvetica",
        "size": 12,
        "adv": 0.667,
        "upright": true,
        "matrix": [12, 0, 0, 12, 10, 680],
        "stroking_color": null,
        "non_stroking_color": [0, 0, 0],
    });
    let obj = from_value(&value).unwrap();
    assert_eq!(obj.object_type(), ObjectType::Char);
    assert_eq!(obj.get("stroking_color"), None);

    let out = to_value(&obj);
    assert_eq!(out["object_type"], "char");
    assert_eq!(out["width"], 5.0);
    assert_eq!(out["size"], json!(12));
    assert!(out["size"].is_i64());
    assert_eq!(out["adv"], json!(0.667));
    assert_eq!(out["matrix"], json!([12, 0, 0, 12, 10, 680]));
    assert!(out["matrix"][0].is_i64());
    assert_eq!(out["non_stroking_color"], json!([0, 0, 0]));
    assert!(out.get("stroking_color").is_none());
}

#[test]
fn test_curve_emits_both_point_names() {
    let value = json!({
        "object_type": "curve",
        "page_number": 2,
        "x0": 0.0, "x1": 10.0, "top": 5.0, "bottom": 15.0, "doctop": 797.0,
        "pts": [[0.0, 5.0], [10.0, 15.0]],
        "fill": false,
    });
    let out = to_value(&from_value(&value).unwrap());
    assert_eq!(out["points"], json!([[0.0, 5.0], [10.0, 15.0]]));
    assert_eq!(out["pts"], out["points"]);
}

#[test]
fn test_round_trip_through_json() {
    let mut objects = vec![
        PageObject::construct(
            "rect",
            &with(fields! { "linewidth" => 0.5, "stroke" => true, "non_stroking_color" => vec![1.0, 0.0, 0.0, 0.0] }),
        )
        .unwrap(),
        Image::builder(BaseFields::from_fields("image", &common::base_map()).unwrap())
            .name("Im0")
            .srcsize(2, 2)
            .bits(8)
            .colorspace(&["DeviceGray"])
            .stream(bytes::Bytes::from_static(&[0, 127, 255, 3]))
            .build()
            .unwrap()
            .into(),
    ];
    objects.push(
        from_value(&json!({
            "object_type": "char", "page_number": 1,
            "x0": 0, "x1": 5, "top": 10, "bottom": 22, "doctop": 10,
            "text": "i", "fontname": "Courier", "size": 12, "stroking_color": 0,
        }))
        .unwrap(),
    );
    for obj in objects {
        let back = from_value(&to_value(&obj)).unwrap();
        assert_eq!(back, obj);
    }
}

#[test]
fn test_serialize_matches_to_value() {
    let obj = PageObject::construct("textlinevertical", &common::base_map()).unwrap();
    let via_serde = serde_json::to_value(&obj).unwrap();
    assert_eq!(via_serde, to_value(&obj));
}

#[test]
fn test_json_violations() {
    assert!(matches!(
        from_value(&json!([1, 2, 3])),
        Err(SchemaViolation::FieldType { got: "array", .. })
    ));
    assert_eq!(
        from_value(&json!({ "object_type": "paragraph" })),
        Err(SchemaViolation::UnknownObjectType("paragraph".into()))
    );
    assert!(matches!(
        from_value(&json!({ "object_type": "rect", "page_number": 1, "x0": {"nested": true} })),
        Err(SchemaViolation::FieldType { expected: "scalar or array", got: "object", .. })
    ));
}
