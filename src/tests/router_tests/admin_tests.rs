use crate::domain::LeadKind;
use crate::router::{handle, respond, AppState};
use crate::tests::utils::{
    body_json, body_string, create_session_for, json_request, test_state, with_session,
};
use astra::Body;
use http::{Method, Request};
use serde_json::{json, Value};

fn submit_contact(state: &AppState, name: &str) -> Value {
    let body = json!({ "name": name, "email": "lead@example.com", "message": "Call me" });
    let resp = handle(json_request(Method::POST, "/api/contact-messages", &body), state)
        .expect("Handler failed");
    body_json(resp)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn admin_lists_records_oldest_first() {
    let state = test_state();
    let token = create_session_for(&state.db, "boss", true);
    let first = submit_contact(&state, "First");
    let second = submit_contact(&state, "Second");

    let resp = handle(with_session(get("/api/admin/contact-messages"), &token), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let v = body_json(resp);
    let ids: Vec<i64> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first["id"].as_i64().unwrap(), second["id"].as_i64().unwrap()]);
}

#[test]
fn transition_updates_status_and_keeps_identity() {
    let state = test_state();
    let token = create_session_for(&state.db, "boss", true);
    let created = submit_contact(&state, "Lin");
    let id = created["id"].as_i64().unwrap();

    let req = with_session(
        json_request(
            Method::PATCH,
            &format!("/api/admin/contact-messages/{id}/status"),
            &json!({ "status": "approved" }),
        ),
        &token,
    );
    let updated = body_json(handle(req, &state).unwrap());

    assert_eq!(updated["status"], "approved");
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["message"], created["message"]);

    let fetched = body_json(
        handle(
            with_session(get(&format!("/api/admin/contact-messages/{id}")), &token),
            &state,
        )
        .unwrap(),
    );
    assert_eq!(fetched["status"], "approved");
}

#[test]
fn transition_on_missing_id_is_404_and_changes_nothing() {
    let state = test_state();
    let token = create_session_for(&state.db, "boss", true);
    let created = submit_contact(&state, "Lin");

    let req = with_session(
        json_request(
            Method::PATCH,
            "/api/admin/contact-messages/9999/status",
            &json!({ "status": "read" }),
        ),
        &token,
    );
    let resp = respond(req, &state);
    assert_eq!(resp.status(), 404);

    let all = body_json(
        handle(with_session(get("/api/admin/contact-messages"), &token), &state).unwrap(),
    );
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["status"], created["status"]);
}

#[test]
fn blank_status_is_a_validation_error() {
    let state = test_state();
    let token = create_session_for(&state.db, "boss", true);
    let id = submit_contact(&state, "Lin")["id"].as_i64().unwrap();

    let req = with_session(
        json_request(
            Method::PATCH,
            &format!("/api/admin/contact-messages/{id}/status"),
            &json!({ "status": "   " }),
        ),
        &token,
    );
    let resp = respond(req, &state);
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["fields"][0]["field"], "status");
}

#[test]
fn anonymous_caller_gets_401_and_nothing_changes() {
    let state = test_state();
    let id = submit_contact(&state, "Lin")["id"].as_i64().unwrap();

    let resp = respond(get("/api/admin/contact-messages"), &state);
    assert_eq!(resp.status(), 401);
    assert_eq!(body_json(resp)["error"], "unauthorized");

    let req = json_request(
        Method::PATCH,
        &format!("/api/admin/contact-messages/{id}/status"),
        &json!({ "status": "read" }),
    );
    assert_eq!(respond(req, &state).status(), 401);

    let token = create_session_for(&state.db, "boss", true);
    let rec = body_json(
        handle(
            with_session(get(&format!("/api/admin/contact-messages/{id}")), &token),
            &state,
        )
        .unwrap(),
    );
    assert_eq!(rec["status"], "unread");
}

#[test]
fn non_admin_gets_403_and_nothing_changes() {
    let state = test_state();
    let viewer = create_session_for(&state.db, "viewer", false);
    let id = submit_contact(&state, "Lin")["id"].as_i64().unwrap();

    let resp = respond(with_session(get("/api/admin/contact-messages"), &viewer), &state);
    assert_eq!(resp.status(), 403);

    let req = with_session(
        json_request(
            Method::PATCH,
            &format!("/api/admin/contact-messages/{id}/status"),
            &json!({ "status": "read" }),
        ),
        &viewer,
    );
    assert_eq!(respond(req, &state).status(), 403);

    let admin = create_session_for(&state.db, "boss", true);
    let rec = body_json(
        handle(
            with_session(get(&format!("/api/admin/contact-messages/{id}")), &admin),
            &state,
        )
        .unwrap(),
    );
    assert_eq!(rec["status"], "unread");
}

#[test]
fn dashboard_redirects_anonymous_to_login() {
    let state = test_state();
    let resp = handle(get("/admin"), &state).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(
        resp.headers().get("Location").unwrap().to_str().unwrap(),
        "/login"
    );
}

#[test]
fn dashboard_is_forbidden_for_non_admin() {
    let state = test_state();
    let viewer = create_session_for(&state.db, "viewer", false);
    let resp = respond(with_session(get("/admin"), &viewer), &state);
    assert_eq!(resp.status(), 403);
    assert!(body_string(resp).contains("Error 403"));
}

#[test]
fn dashboard_shows_every_kind() {
    let state = test_state();
    let token = create_session_for(&state.db, "boss", true);
    submit_contact(&state, "Dashboard Lead");

    let resp = handle(with_session(get("/admin"), &token), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Admin Dashboard"));
    assert!(body.contains("Dashboard Lead"));
    for title in [
        "Project Requests",
        "Freelancer Applications",
        "Contact Messages",
        "Price Calculator Requests",
    ] {
        assert!(body.contains(title), "missing section {title}");
    }
    for kind in LeadKind::ALL {
        let anchor = format!(r#"id="{}""#, kind.slug());
        assert!(body.contains(&anchor), "missing anchor {anchor}");
    }
}

#[test]
fn dashboard_form_transitions_and_redirects() {
    let state = test_state();
    let token = create_session_for(&state.db, "boss", true);
    let id = submit_contact(&state, "Lin")["id"].as_i64().unwrap();

    let req = Request::builder()
        .method(Method::POST)
        .uri(format!("/admin/contact-messages/{id}/status"))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from("status=replied".to_string()))
        .unwrap();
    let resp = handle(with_session(req, &token), &state).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(
        resp.headers().get("Location").unwrap().to_str().unwrap(),
        "/admin#contact-messages"
    );

    let rec = body_json(
        handle(
            with_session(get(&format!("/api/admin/contact-messages/{id}")), &token),
            &state,
        )
        .unwrap(),
    );
    assert_eq!(rec["status"], "replied");
}
