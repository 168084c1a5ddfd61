//! Typed Record Tests
//!
//! Record types declared with `record_type!`:
//! - One accessor method per field
//! - Mutators rebuild the same type
//! - A `prepare` step runs on every construction path

use recordkit::registry::{to_date, to_year};
use recordkit::{record_type, FieldConfig, RawData, RecordType, Value};
use serde_json::json;

record_type! {
    /// Calendar entry
    pub struct Event {
        title: "untitled",
        start: FieldConfig::spec("2000-01-01")
            .with_get(|v, _| to_date(v))
            .with_set(to_year),
        tags: json!([]),
    }
}

fn derive_slug(mut raw: RawData) -> RawData {
    if raw.contains_key("slug") {
        return raw;
    }
    let slug = raw
        .get("title")
        .and_then(Value::as_str)
        .map(|title| title.to_lowercase().replace(' ', "-"));
    if let Some(slug) = slug {
        raw.insert("slug".into(), Value::String(slug));
    }
    raw
}

record_type! {
    pub struct Article {
        title: "",
        slug: "",
    }
    prepare = derive_slug;
}

// =============================================================================
// Accessors and defaults
// =============================================================================

#[test]
fn test_accessor_methods() {
    let event = Event::default();
    assert_eq!(event.title(), json!("untitled"));
    assert_eq!(event.start(), json!("2000-01-01"));
    assert_eq!(event.tags(), json!([]));
}

#[test]
fn test_date_scenario() {
    let mut raw = RawData::new();
    raw.insert("start".into(), json!("2001-01-01"));
    let event = Event::new(raw).unwrap();

    let moved = event.set("start", to_date(&json!("2222-01-01"))).unwrap();
    assert_eq!(moved.raw_data()["start"], json!(2222));
    assert_eq!(moved.start(), json!("2222-01-01"));
    assert_eq!(event.start(), json!("2001-01-01"));
}

#[test]
fn test_typed_constructor_rejects_undeclared() {
    let mut raw = RawData::new();
    raw.insert("location".into(), json!("Mars"));
    let err = Event::new(raw).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot create record with property \"location\". Must be one of title, start, tags"
    );
}

#[test]
fn test_inspect_uses_type_name() {
    let event = Event::from_unknown(&json!({"title": "Launch"}));
    assert_eq!(
        event.inspect(),
        r#"Event {"title":"Launch","start":"2000-01-01","tags":[]}"#
    );
    assert_eq!(event.to_string(), event.inspect());
}

#[test]
fn test_typed_and_dynamic_views_agree() {
    let event = Event::from_unknown(&json!({"title": "Launch", "tags": ["a"]}));
    let record = event.clone().into_record();
    assert_eq!(record.to_json(), event.to_json());
    assert!(std::sync::Arc::ptr_eq(record.schema(), &Event::type_schema()));
}

#[test]
fn test_nested_update() {
    let event = Event::from_unknown(&json!({"tags": []}));
    let tagged = event.set_in(recordkit::path!("tags", 0), "launch").unwrap();
    assert_eq!(tagged.tags(), json!(["launch"]));
    assert_eq!(tagged.get_in(recordkit::path!("tags", 0)), Some(json!("launch")));
    assert_eq!(event.get_in("tags.0"), None);
}

// =============================================================================
// Prepare hook
// =============================================================================

#[test]
fn test_prepare_on_every_path() {
    let article = Article::from_unknown(&json!({"title": "Hello World"}));
    assert_eq!(article.slug(), json!("hello-world"));

    let renamed = Article::default().set("title", "Second Post").unwrap();
    assert_eq!(renamed.slug(), json!("second-post"));

    let mut raw = RawData::new();
    raw.insert("title".into(), json!("Kept"));
    raw.insert("slug".into(), json!("custom"));
    let custom = Article::new(raw).unwrap();
    assert_eq!(custom.slug(), json!("custom"));

    let merged = Article::default().merge(&custom).unwrap();
    assert_eq!(merged.slug(), json!("custom"));
}

#[test]
fn test_prepared_clone_shares_raw_data() {
    let article = Article::from_unknown(&json!({"title": "Hello", "slug": "hello"}));
    let copy = article.clone_record().unwrap();
    assert!(copy.record().shares_raw_data(article.record()));

    let derived = Article::from_unknown(&json!({"title": "Hello World"}));
    let derived_copy = derived.clone_record().unwrap();
    assert!(derived_copy.record().shares_raw_data(derived.record()));
}

#[test]
fn test_typed_equality() {
    let a = Article::from_unknown(&json!({"title": "x"}));
    let b = Article::default().set("title", "x").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, Article::default());
}
