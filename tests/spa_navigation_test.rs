//! End-to-end navigation flow over the application route table.
//!
//! Exercises the full path both ways: navigation intent -> URL string,
//! and incoming URL -> resolved route plus decoded query.

use proptest::prelude::*;
use relval_pages::{AppViews, NavigationTarget, QueryMap, Router, RouterError, app_router, query};
use rstest::rstest;
use serde_json::{Value, json};

fn views() -> AppViews<&'static str> {
	AppViews {
		home: "home-view",
		dashboard: "dashboard-view",
		tickets: "tickets-view",
		tickets_edit: "tickets-edit-view",
		relvals: "relvals-view",
		relvals_edit: "relvals-edit-view",
		relvals_edit_many: "relvals-edit-many-view",
	}
}

fn router() -> Router<&'static str> {
	app_router(views(), "")
}

#[test]
fn navigation_intent_round_trips_through_the_url() {
	let router = router();
	let target = NavigationTarget::new("relvals")
		.query_value("prepid", "*CMSSW_14_0*")
		.query_value("dataset", "/RelValZMM/std")
		.query_value("workflows", "139.001,139.002");

	let url = router.push(&target).unwrap();
	assert_eq!(
		url,
		"/relvals?prepid=*CMSSW_14_0*&dataset=/RelValZMM/std&workflows=139.001,139.002"
	);

	let resolved = router.resolve(&url).unwrap();
	assert_eq!(resolved.route.name(), "relvals");
	assert_eq!(*resolved.route.view(), "relvals-view");
	assert_eq!(resolved.query["prepid"], json!("*CMSSW_14_0*"));
	assert_eq!(resolved.query["dataset"], json!("/RelValZMM/std"));
	assert_eq!(resolved.query["workflows"], json!("139.001,139.002"));
}

#[rstest]
#[case(json!({"a": "x*y"}), "?a=x*y")]
#[case(json!({"a": "p/q"}), "?a=p/q")]
#[case(json!({"a": "x!"}), "?a=x!")]
#[case(json!({"a": "1,2"}), "?a=1,2")]
fn preserved_characters_stay_literal(#[case] query: Value, #[case] expected: &str) {
	let query = query.as_object().cloned().unwrap();
	assert_eq!(query::encode(&query), expected);
}

#[test]
fn empty_query_encodes_to_empty_string() {
	assert_eq!(query::encode(&QueryMap::new()), "");
	let url = router().url_for(&NavigationTarget::new("dashboard")).unwrap();
	assert_eq!(url, "/dashboard");
}

#[test]
fn edit_routes_win_over_their_prefix_routes() {
	let router = router();
	assert_eq!(router.resolve("/tickets/edit").unwrap().route.name(), "tickets_edit");
	assert_eq!(router.resolve("/tickets").unwrap().route.name(), "tickets");
	assert_eq!(
		router.resolve("/relvals/edit_many").unwrap().route.name(),
		"relvals_edit_many"
	);
}

#[test]
fn unknown_paths_resolve_to_a_not_found_value() {
	let err = router().resolve("/unknown").unwrap_err();
	assert_eq!(err, RouterError::NotFound("/unknown".to_string()));

	let router = app_router(views(), "").not_found("missing-view");
	assert_eq!(router.view("/unknown"), Some(&"missing-view"));
}

#[test]
fn base_prefix_applies_both_ways() {
	let router = app_router(views(), "/relval");

	let url = router
		.url_for(&NavigationTarget::new("tickets_edit").query_value("prepid", "hlt-2024"))
		.unwrap();
	assert_eq!(url, "/relval/tickets/edit?prepid=hlt-2024");

	let resolved = router.resolve(&url).unwrap();
	assert_eq!(resolved.route.name(), "tickets_edit");
	assert_eq!(resolved.query["prepid"], json!("hlt-2024"));
}

#[test]
fn exempted_characters_appear_literally_in_the_intermediate_string() {
	let mut map = QueryMap::new();
	map.insert("expr".to_string(), json!("a*/b!,c d"));
	let encoded = query::encode(&map);

	// The four exemptions stay raw; everything else still escapes.
	assert_eq!(encoded, "?expr=a*/b!,c%20d");
	assert!(!encoded.contains("%2A"));
	assert!(!encoded.contains("%2F"));
	assert!(!encoded.contains("%21"));
	assert!(!encoded.contains("%2C"));
}

#[test]
fn a_shared_url_reconstructs_the_same_navigation() {
	let router = router();
	let shared = "/relvals?prepid=*CMSSW_14_0*&filter%5Bmatrix%5D=upgrade";

	let resolved = router.resolve(shared).unwrap();
	let target = NavigationTarget::new(resolved.route.name()).with_query(resolved.query);

	assert_eq!(router.url_for(&target).unwrap(), shared);
}

#[test]
fn escaped_and_literal_input_forms_decode_identically() {
	let from_escaped = query::decode("?prepid=%2A2024%2A&dataset=%2FRelVal%2Fstd");
	let from_literal = query::decode("?prepid=*2024*&dataset=/RelVal/std");
	assert_eq!(from_escaped, from_literal);
}

fn query_value() -> impl Strategy<Value = Value> {
	let leaf = "[ -~]{0,12}".prop_map(Value::String);
	leaf.prop_recursive(3, 24, 4, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 1..4).prop_map(Value::Array),
			prop::collection::btree_map("[a-z][a-z0-9_]{0,7}", inner, 1..4)
				.prop_map(|map| Value::Object(map.into_iter().collect())),
		]
	})
}

fn query_map() -> impl Strategy<Value = QueryMap> {
	prop::collection::btree_map("[a-z][a-z0-9_]{0,7}", query_value(), 0..4)
		.prop_map(|map| map.into_iter().collect())
}

proptest! {
	// Round-trip law over printable-ASCII values: decoding what encode
	// produced restores the mapping, exemptions included.
	#[test]
	fn decode_inverts_encode(query in query_map()) {
		let encoded = query::encode(&query);
		prop_assert_eq!(query::decode(&encoded), query);
	}

	// Arbitrary junk never panics the decoder.
	#[test]
	fn decode_never_panics(input in "[ -~]{0,64}") {
		let _ = query::decode(&input);
	}
}
