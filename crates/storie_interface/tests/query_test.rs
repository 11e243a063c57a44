use serde_json::json;
use storie_interface::{Direction, Filter, HttpResponse, Query};

#[test]
fn equality_filter_compares_text_forms() {
    let row = json!({"id": "abc", "page_number": 3, "image_url": null});

    assert!(Filter::Eq("id".into(), "abc".into()).matches(&row));
    assert!(Filter::Eq("page_number".into(), "3".into()).matches(&row));
    assert!(!Filter::Eq("page_number".into(), "4".into()).matches(&row));
    assert!(!Filter::Eq("image_url".into(), "null".into()).matches(&row));
    assert!(!Filter::Eq("missing".into(), "x".into()).matches(&row));
}

#[test]
fn query_requires_every_filter() {
    let row = json!({"storybook_id": "b1", "page_number": 2});
    let query = Query::new().eq("storybook_id", "b1").eq("page_number", 2);
    assert!(query.matches(&row));

    let query = Query::new().eq("storybook_id", "b1").eq("page_number", 1);
    assert!(!query.matches(&row));

    assert!(Query::new().matches(&row));
}

#[test]
fn order_direction_renders_lowercase() {
    let query = Query::new().order_by("created_at", Direction::Desc);
    let order = query.order.unwrap();
    assert_eq!(order.column, "created_at");
    assert_eq!(order.direction.to_string(), "desc");
}

#[test]
fn response_json_reports_invalid_bodies() {
    let ok = HttpResponse::new(200, r#"{"value": 1}"#);
    assert!(ok.is_success());
    let value: serde_json::Value = ok.json("test").unwrap();
    assert_eq!(value["value"], 1);

    let bad = HttpResponse::new(200, "<html>");
    let err = bad.json::<serde_json::Value>("test").unwrap_err();
    assert_eq!(err.service, "test");

    assert!(!HttpResponse::new(429, "").is_success());
}
