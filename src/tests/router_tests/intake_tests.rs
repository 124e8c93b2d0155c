use crate::config::AppConfig;
use crate::db::leads::list_leads;
use crate::domain::LeadKind;
use crate::router::{handle, respond};
use crate::tests::utils::{body_json, json_request, test_state, test_state_with};
use astra::Body;
use http::{Method, Request};
use serde_json::{json, Value};

fn project_request() -> Value {
    json!({
        "clientName": "Ada Lovelace",
        "clientEmail": "ada@example.com",
        "projectType": "web-app",
        "budget": "10k-20k",
        "description": "A booking platform"
    })
}

#[test]
fn project_request_is_created_with_new_status() {
    let state = test_state();
    let req = json_request(Method::POST, "/api/project-requests", &project_request());

    let resp = handle(req, &state).expect("Handler failed");
    assert_eq!(resp.status(), 201);

    let v = body_json(resp);
    assert_eq!(v["kind"], "project_request");
    assert_eq!(v["status"], "new");
    assert_eq!(v["clientEmail"], "ada@example.com");
    assert!(v["id"].as_i64().unwrap() > 0);
    assert!(v["createdAt"].is_string());
}

#[test]
fn each_kind_starts_in_its_initial_status() {
    let state = test_state();
    let cases = [
        (
            "/api/freelancer-applications",
            json!({ "name": "Grace", "email": "grace@example.com", "specialty": "Backend", "experience": "4" }),
            "pending",
        ),
        (
            "/api/contact-messages",
            json!({ "name": "Lin", "email": "lin@example.com", "message": "Hi there" }),
            "unread",
        ),
        (
            "/api/price-requests",
            json!({ "name": "Sam", "email": "sam@example.com", "optionId": "logo", "estimatedTotal": 500 }),
            "new",
        ),
    ];

    for (uri, body, expected) in cases {
        let resp = handle(json_request(Method::POST, uri, &body), &state).unwrap();
        assert_eq!(resp.status(), 201, "{uri}");
        assert_eq!(body_json(resp)["status"], expected, "{uri}");
    }
}

#[test]
fn missing_client_email_names_the_field() {
    let state = test_state();
    let mut body = project_request();
    body.as_object_mut().unwrap().remove("clientEmail");

    let resp = respond(json_request(Method::POST, "/api/project-requests", &body), &state);
    assert_eq!(resp.status(), 400);

    let v = body_json(resp);
    assert_eq!(v["error"], "validation_failed");
    let fields = v["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0]["field"], "clientEmail");
    assert_eq!(fields[0]["problem"], "missing");
}

#[test]
fn malformed_client_email_is_a_different_problem() {
    let state = test_state();
    let mut body = project_request();
    body["clientEmail"] = json!("not-an-email");

    let resp = respond(json_request(Method::POST, "/api/project-requests", &body), &state);
    assert_eq!(resp.status(), 400);

    let v = body_json(resp);
    assert_eq!(v["fields"][0]["field"], "clientEmail");
    assert_eq!(v["fields"][0]["problem"], "invalid_email");
}

#[test]
fn numeric_client_name_is_an_invalid_type_field_error() {
    let state = test_state();
    let mut body = project_request();
    body["clientName"] = json!(42);

    let resp = respond(json_request(Method::POST, "/api/project-requests", &body), &state);
    assert_eq!(resp.status(), 400);

    let v = body_json(resp);
    assert_eq!(v["error"], "validation_failed");
    let fields = v["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0]["field"], "clientName");
    assert_eq!(fields[0]["problem"], "invalid_type");
}

#[test]
fn features_given_as_text_is_an_invalid_type_field_error() {
    let state = test_state();
    let body = json!({
        "name": "Sam",
        "email": "sam@example.com",
        "optionId": "web-app",
        "features": "admin-panel",
        "estimatedTotal": 500
    });

    let resp = respond(json_request(Method::POST, "/api/price-requests", &body), &state);
    assert_eq!(resp.status(), 400);

    let v = body_json(resp);
    assert_eq!(v["error"], "validation_failed");
    assert_eq!(v["fields"][0]["field"], "features");
    assert_eq!(v["fields"][0]["problem"], "invalid_type");

    let stored = state
        .db
        .with_conn(|conn| list_leads(conn, LeadKind::PriceRequest))
        .unwrap();
    assert!(stored.is_empty());
}

#[test]
fn json_array_body_is_a_bad_request() {
    let state = test_state();
    let resp = respond(
        json_request(Method::POST, "/api/contact-messages", &json!(["hello"])),
        &state,
    );
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "bad_request");
}

#[test]
fn every_bad_field_is_reported_and_nothing_is_stored() {
    let state = test_state();
    let body = json!({
        "name": "",
        "email": "grace@example.com",
        "specialty": "Design",
        "experience": -2,
        "portfolioUrl": "ftp://files.example.com"
    });

    let resp = respond(
        json_request(Method::POST, "/api/freelancer-applications", &body),
        &state,
    );
    assert_eq!(resp.status(), 400);

    let v = body_json(resp);
    let problems: Vec<(&str, &str)> = v["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| (f["field"].as_str().unwrap(), f["problem"].as_str().unwrap()))
        .collect();
    assert!(problems.contains(&("name", "missing")));
    assert!(problems.contains(&("experience", "invalid_number")));
    assert!(problems.contains(&("portfolioUrl", "invalid_url")));

    let stored = state
        .db
        .with_conn(|conn| list_leads(conn, LeadKind::FreelancerApplication))
        .unwrap();
    assert!(stored.is_empty());
}

#[test]
fn unknown_kind_is_404() {
    let state = test_state();
    let resp = respond(
        json_request(Method::POST, "/api/newsletter-signups", &json!({})),
        &state,
    );
    assert_eq!(resp.status(), 404);
}

#[test]
fn oversized_body_is_413() {
    let mut config = AppConfig::default();
    config.server.max_body_bytes = 64;
    let state = test_state_with(config);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/contact-messages")
        .body(Body::from("x".repeat(65)))
        .unwrap();
    let resp = respond(req, &state);
    assert_eq!(resp.status(), 413);
    assert_eq!(body_json(resp)["error"], "payload_too_large");
}

#[test]
fn client_total_is_stored_verbatim_by_default() {
    let state = test_state();
    let body = json!({
        "name": "Sam",
        "email": "sam@example.com",
        "optionId": "web-app",
        "complexity": "advanced",
        "timeFrame": "rush",
        "features": ["admin-panel"],
        "estimatedTotal": 1
    });
    let resp = handle(json_request(Method::POST, "/api/price-requests", &body), &state).unwrap();
    assert_eq!(body_json(resp)["estimatedTotal"], 1.0);
}

#[test]
fn price_verification_rejects_tampered_total() {
    let mut config = AppConfig::default();
    config.pricing.verify_price_requests = true;
    let state = test_state_with(config);

    let mut body = json!({
        "name": "Sam",
        "email": "sam@example.com",
        "optionId": "web-app",
        "complexity": "advanced",
        "timeFrame": "rush",
        "features": ["admin-panel"],
        "estimatedTotal": 100
    });

    let resp = respond(json_request(Method::POST, "/api/price-requests", &body), &state);
    assert_eq!(resp.status(), 400);
    let v = body_json(resp);
    assert_eq!(v["fields"][0]["field"], "estimatedTotal");
    assert_eq!(v["fields"][0]["problem"], "price_mismatch");

    body["estimatedTotal"] = json!(13200);
    let resp = respond(json_request(Method::POST, "/api/price-requests", &body), &state);
    assert_eq!(resp.status(), 201);

    let stored = state
        .db
        .with_conn(|conn| list_leads(conn, LeadKind::PriceRequest))
        .unwrap();
    assert_eq!(stored.len(), 1);
}
