//! `to_have_query_params` and query-string parsing.

use mox_matchers::matchers::parse_query;
use mox_matchers::prelude::*;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn host() -> TestHost {
    let mut host = TestHost::new();
    install(&mut host);
    host
}

#[test]
fn test_positive_and_negative_expectations() {
    let host = host();
    let uri = json!("/api/items?page=2&sort=name");

    host.expect(&uri).to("to_have_query_params", &[json!({ "page": "2" }).into()]);
    host.expect(&uri)
        .not()
        .to("to_have_query_params", &[json!({ "page": "3" }).into()]);
    host.expect(&uri).not().to(
        "to_have_query_params",
        &[json!({ "page": "2" }).into(), true.into()],
    );
    host.expect(&uri).to(
        "to_have_query_params",
        &[json!({ "sort": "name", "page": "2" }).into(), true.into()],
    );
}

#[test]
fn test_string_subjects() {
    let host = host();
    let uri = String::from("path?flag");
    host.expect(&uri).to("to_have_query_params", &[json!({ "flag": "" }).into()]);
    host.expect(&"path?x=1").to("to_have_query_params", &[json!({ "x": "1" }).into()]);
}

#[test]
fn test_uri_without_query() {
    let host = host();
    host.expect(&json!("path")).to("to_have_query_params", &[json!({}).into(), true.into()]);

    let err = host
        .expect(&json!("path"))
        .try_to("to_have_query_params", &[json!({ "a": "1" }).into()])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expected URI to have params Object({ a: '1' }), actual params were Object({  }) in 'path'"
    );
}

#[test]
fn test_expected_must_be_object() {
    let host = host();
    let err = host
        .expect(&json!("path?a=1"))
        .try_to("to_have_query_params", &[json!(["a"]).into()])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidOperand(_)));
}

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

fn value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9%._-]{0,8}"
}

proptest! {
    #[test]
    fn prop_parse_recovers_distinct_pairs(
        params in proptest::collection::btree_map(key(), value(), 0..6)
    ) {
        let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let uri = format!("/path?{}", query.join("&"));

        let parsed = parse_query(&uri);
        let expected: Map<String, Value> = params
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        prop_assert_eq!(Value::Object(parsed), Value::Object(expected));
    }

    #[test]
    fn prop_last_value_wins(k in key(), first in value(), last in value()) {
        let parsed = parse_query(&format!("p?{k}={first}&{k}={last}"));
        prop_assert_eq!(parsed.get(&k), Some(&Value::String(last)));
    }

    #[test]
    fn prop_strict_subset_of_non_strict(
        params in proptest::collection::btree_map(key(), value(), 1..5),
        take in 0usize..5,
    ) {
        let host = host();
        let uri = json!(format!(
            "p?{}",
            params.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join("&")
        ));
        let subset: Map<String, Value> = params
            .iter()
            .take(take)
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        let expected = Value::Object(subset);

        let strict = host
            .expect(&uri)
            .try_to("to_have_query_params", &[expected.clone().into(), true.into()])
            .is_ok();
        let loose = host
            .expect(&uri)
            .try_to("to_have_query_params", &[expected.into()])
            .is_ok();

        prop_assert!(loose);
        prop_assert_eq!(strict, take >= params.len());
    }
}
