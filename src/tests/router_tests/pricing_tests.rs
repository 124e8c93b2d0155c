use crate::router::{handle, respond};
use crate::tests::utils::{body_json, json_request, test_state};
use astra::Body;
use http::{Method, Request};
use serde_json::json;

#[test]
fn catalog_lists_all_categories() {
    let state = test_state();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/pricing/standalone")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let v = body_json(resp);
    assert_eq!(v["variant"], "standalone");
    assert_eq!(v["complexityScale"], "discrete");
    assert_eq!(v["categories"].as_array().unwrap().len(), 4);
    assert_eq!(v["timeFrames"].as_array().unwrap().len(), 3);
    assert!(v["addOns"]["web-app"].is_array());
}

#[test]
fn category_listing_keeps_catalog_order() {
    let state = test_state();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/pricing/standalone/web")
        .body(Body::empty())
        .unwrap();

    let v = body_json(handle(req, &state).unwrap());
    let ids: Vec<&str> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["landing-page", "corporate-site", "web-app", "e-commerce"]);
}

#[test]
fn unknown_category_or_catalog_is_404() {
    let state = test_state();
    for uri in ["/api/pricing/standalone/robotics", "/api/pricing/premium"] {
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let resp = respond(req, &state);
        assert_eq!(resp.status(), 404, "{uri}");
    }
}

#[test]
fn estimate_matches_worked_example() {
    let state = test_state();
    let req = json_request(
        Method::POST,
        "/api/pricing/standalone/estimate",
        &json!({
            "optionId": "web-app",
            "complexity": "advanced",
            "timeFrame": "rush",
            "features": ["admin-panel"]
        }),
    );

    let v = body_json(handle(req, &state).unwrap());
    assert_eq!(v["basePrice"], 5000);
    assert_eq!(v["selectedFeatureTotal"], 1200);
    assert_eq!(v["total"], 13200);
}

#[test]
fn estimate_with_nothing_selected_is_zero() {
    let state = test_state();
    let req = json_request(Method::POST, "/api/pricing/admin/estimate", &json!({}));
    let v = body_json(handle(req, &state).unwrap());
    assert_eq!(v["total"], 0);
}

#[test]
fn admin_catalog_accepts_slider_complexity() {
    let state = test_state();
    let req = json_request(
        Method::POST,
        "/api/pricing/admin/estimate",
        &json!({ "optionId": "web-app", "complexity": 100, "timeFrame": "standard" }),
    );
    let v = body_json(handle(req, &state).unwrap());
    // round(6500 * 1.2)
    assert_eq!(v["total"], 7800);
}

#[test]
fn malformed_estimate_body_is_400() {
    let state = test_state();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/pricing/standalone/estimate")
        .body(Body::from("{not json".to_string()))
        .unwrap();
    let resp = respond(req, &state);
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "bad_request");
}
