use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use parcel_booking::api::rest::router;
use parcel_booking::config::Config;
use parcel_booking::state::AppState;
use parcel_booking::wizard::rwb::FixedClock;
use serde_json::{json, Value};
use tower::ServiceExt;

const CUSTOMER: &str = "customer@tnstc.com";
const ADMIN: &str = "admin@tnstc.com";

fn setup() -> (Router, Arc<AppState>) {
    let config = Config {
        login_delay_ms: 0,
        ..Config::default()
    };
    let state = Arc::new(AppState::with_clock(
        &config,
        Arc::new(FixedClock(1_705_312_845_123)),
    ));
    (router(state.clone()), state)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.unwrap()
}

async fn login(app: &Router, email: &str) -> String {
    let res = send(
        app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": email, "password": "password" })),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    body_json(res).await["token"].as_str().unwrap().to_string()
}

async fn open_wizard(app: &Router, token: &str) -> String {
    let res = send(app, request("POST", "/wizards", Some(token), None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    body_json(res).await["id"].as_str().unwrap().to_string()
}

async fn set_field(app: &Router, token: &str, id: &str, field: &str, value: &str) {
    let res = send(
        app,
        request(
            "PATCH",
            &format!("/wizards/{id}"),
            Some(token),
            Some(json!({ "field": field, "value": value })),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "setting {field}");
}

async fn step(app: &Router, token: &str, id: &str, action: &str) -> axum::response::Response {
    send(
        app,
        request("POST", &format!("/wizards/{id}/{action}"), Some(token), None),
    )
    .await
}

#[tokio::test]
async fn health_returns_ok() {
    let (app, _state) = setup();
    let response = send(&app, request("GET", "/health", None, None)).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["sessions"], 0);
    assert_eq!(body["wizards"], 0);
    assert_eq!(body["bookings"], 4);
}

#[tokio::test]
async fn metrics_returns_prometheus_format() {
    let (app, _state) = setup();
    let response = send(&app, request("GET", "/metrics", None, None)).await;

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.contains("text/plain"));

    let body = body_string(response).await;
    assert!(body.contains("active_wizards"));
}

#[tokio::test]
async fn login_returns_token_and_role() {
    let (app, _state) = setup();
    let res = send(
        &app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": ADMIN, "password": "password" })),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["name"], "Admin TNSTC");
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_password_returns_401() {
    let (app, _state) = setup();
    let res = send(
        &app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": CUSTOMER, "password": "letmein" })),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(res).await;
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn requests_without_session_return_401() {
    let (app, _state) = setup();
    let res = send(&app, request("POST", "/wizards", None, None)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = send(
        &app,
        request("GET", "/bookings", Some("not-a-token"), None),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_invalidates_token() {
    let (app, _state) = setup();
    let token = login(&app, CUSTOMER).await;

    let res = send(&app, request("POST", "/auth/logout", Some(&token), None)).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = send(&app, request("GET", "/me", Some(&token), None)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn same_pickup_and_drop_keeps_wizard_on_first_step() {
    let (app, _state) = setup();
    let token = login(&app, CUSTOMER).await;
    let id = open_wizard(&app, &token).await;

    set_field(&app, &token, &id, "pickup_point", "Chennai").await;
    set_field(&app, &token, &id, "drop_point", "Chennai").await;

    let res = step(&app, &token, &id, "next").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(res).await;
    assert_eq!(body["error"], "Pickup and drop points must be different");

    let res = send(&app, request("GET", &format!("/wizards/{id}"), Some(&token), None)).await;
    let wizard = body_json(res).await;
    assert_eq!(wizard["step_index"], 1);
    assert_eq!(wizard["can_go_back"], false);
}

#[tokio::test]
async fn incomplete_step_reports_missing_fields() {
    let (app, _state) = setup();
    let token = login(&app, CUSTOMER).await;
    let id = open_wizard(&app, &token).await;

    set_field(&app, &token, &id, "pickup_point", "Madurai Central Bus Stand").await;

    let res = step(&app, &token, &id, "next").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(res).await;
    assert_eq!(body["error"], "Please fill in all required fields");
    assert_eq!(body["missing"], json!(["drop_point"]));
}

#[tokio::test]
async fn back_and_submit_are_rejected_out_of_order() {
    let (app, _state) = setup();
    let token = login(&app, CUSTOMER).await;
    let id = open_wizard(&app, &token).await;

    let res = step(&app, &token, &id, "back").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = step(&app, &token, &id, "submit").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn full_booking_flow() {
    let (app, state) = setup();
    let token = login(&app, CUSTOMER).await;
    let id = open_wizard(&app, &token).await;

    set_field(&app, &token, &id, "pickup_point", "Chennai Koyambedu Bus Stand").await;
    set_field(&app, &token, &id, "drop_point", "Coimbatore Central Bus Stand").await;
    let res = step(&app, &token, &id, "next").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["step"], "package");

    set_field(&app, &token, &id, "package_category", "Personal").await;
    set_field(&app, &token, &id, "package_type", "Electronics").await;
    set_field(&app, &token, &id, "weight", "2.5").await;
    set_field(&app, &token, &id, "description", "Phone and charger").await;

    let res = step(&app, &token, &id, "back").await;
    assert_eq!(body_json(res).await["step_index"], 1);
    let res = step(&app, &token, &id, "next").await;
    assert_eq!(body_json(res).await["step_index"], 2);
    let res = step(&app, &token, &id, "next").await;
    let wizard = body_json(res).await;
    assert_eq!(wizard["step_index"], 3);
    assert_eq!(wizard["draft"]["description"], "Phone and charger");

    set_field(&app, &token, &id, "receiver_name", "Suresh Kumar").await;
    set_field(&app, &token, &id, "receiver_phone", "+91 9876543212").await;
    set_field(&app, &token, &id, "receiver_email", "suresh.kumar@email.com").await;

    let res = send(&app, request("GET", &format!("/wizards/{id}"), Some(&token), None)).await;
    let wizard = body_json(res).await;
    assert_eq!(wizard["summary"]["package"], "Electronics (2.5 kg)");

    let res = step(&app, &token, &id, "submit").await;
    assert_eq!(res.status(), StatusCode::OK);
    let submitted = body_json(res).await;
    assert_eq!(submitted["wizard"]["step"], "submitted");
    assert_eq!(submitted["wizard"]["rwb"], "RWB845123");
    assert_eq!(submitted["booking"]["status"], "Booked");
    assert_eq!(
        submitted["booking"]["route"],
        "Chennai Koyambedu Bus Stand → Coimbatore Central Bus Stand"
    );

    let res = send(&app, request("GET", "/bookings?q=rwb845", Some(&token), None)).await;
    let found = body_json(res).await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let res = send(&app, request("GET", "/tracking/RWB845123", Some(&token), None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let tracking = body_json(res).await;
    assert_eq!(tracking["package"]["receiver"], "Suresh Kumar");
    assert_eq!(tracking["timeline"][0]["status"], "Package Booked");

    let res = step(&app, &token, &id, "submit").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = send(&app, request("DELETE", &format!("/wizards/{id}"), Some(&token), None)).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(state.wizards.is_empty());
    assert_eq!(state.metrics.bookings_submitted_total.get(), 1);
}

#[tokio::test]
async fn admin_cannot_open_or_see_customer_wizards() {
    let (app, _state) = setup();
    let customer = login(&app, CUSTOMER).await;
    let admin = login(&app, ADMIN).await;
    let id = open_wizard(&app, &customer).await;

    let res = send(&app, request("POST", "/wizards", Some(&admin), None)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = send(&app, request("GET", &format!("/wizards/{id}"), Some(&admin), None)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bookings_are_scoped_by_role() {
    let (app, _state) = setup();
    let customer = login(&app, CUSTOMER).await;
    let admin = login(&app, ADMIN).await;

    let res = send(&app, request("GET", "/bookings", Some(&admin), None)).await;
    assert_eq!(body_json(res).await.as_array().unwrap().len(), 4);

    let res = send(&app, request("GET", "/bookings", Some(&customer), None)).await;
    let own = body_json(res).await;
    assert_eq!(own.as_array().unwrap().len(), 1);
    assert_eq!(own[0]["rwb"], "RWB001");

    let res = send(&app, request("GET", "/bookings/RWB002", Some(&customer), None)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_and_menu_follow_role() {
    let (app, _state) = setup();
    let customer = login(&app, CUSTOMER).await;
    let admin = login(&app, ADMIN).await;

    let res = send(&app, request("GET", "/dashboard", Some(&admin), None)).await;
    let dashboard = body_json(res).await;
    assert_eq!(dashboard["kind"], "admin");
    assert_eq!(dashboard["stats"].as_array().unwrap().len(), 4);
    assert_eq!(dashboard["recent_bookings"].as_array().unwrap().len(), 3);

    let res = send(&app, request("GET", "/dashboard", Some(&customer), None)).await;
    let dashboard = body_json(res).await;
    assert_eq!(dashboard["kind"], "customer");
    assert_eq!(dashboard["user"], "Ravi Kumar");
    assert_eq!(dashboard["quick_actions"].as_array().unwrap().len(), 2);

    let res = send(&app, request("GET", "/menu", Some(&customer), None)).await;
    let menu = body_json(res).await;
    assert_eq!(menu[1]["label"], "New Booking");
    assert_eq!(menu[1]["route"], "/new-booking");
}

#[tokio::test]
async fn customers_cannot_reach_admin_screens() {
    let (app, _state) = setup();
    let customer = login(&app, CUSTOMER).await;

    for uri in ["/pickup-points", "/bus-assignments", "/user-logs"] {
        let res = send(&app, request("GET", uri, Some(&customer), None)).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "{uri}");
    }
}

#[tokio::test]
async fn admin_manages_pickup_points() {
    let (app, _state) = setup();
    let admin = login(&app, ADMIN).await;

    let res = send(
        &app,
        request(
            "POST",
            "/pickup-points",
            Some(&admin),
            Some(json!({
                "name": "Vellore Bus Stand",
                "code": "VLR001",
                "address": "New Bus Stand, Vellore - 632004",
                "phone": "+91 416 2345 678"
            })),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let point = body_json(res).await;
    assert_eq!(point["id"], 6);
    assert_eq!(point["active"], true);
    assert_eq!(point["routes"], 0);

    let res = send(
        &app,
        request("PATCH", "/pickup-points/6/toggle", Some(&admin), None),
    )
    .await;
    assert_eq!(body_json(res).await["active"], false);

    let res = send(
        &app,
        request(
            "POST",
            "/pickup-points",
            Some(&admin),
            Some(json!({ "name": "Hosur", "code": "", "address": "x", "phone": "y" })),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(&app, request("DELETE", "/pickup-points/6", Some(&admin), None)).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = send(&app, request("GET", "/pickup-points", Some(&admin), None)).await;
    assert_eq!(body_json(res).await.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn wizard_options_list_active_points_only() {
    let (app, _state) = setup();
    let customer = login(&app, CUSTOMER).await;

    let res = send(&app, request("GET", "/wizards/options", Some(&customer), None)).await;
    let options = body_json(res).await;
    let points = options["points"].as_array().unwrap();
    assert_eq!(points.len(), 4);
    assert!(!points.contains(&json!("Trichy Central Bus Stand")));
    assert_eq!(options["package_categories"], json!(["Personal", "Commercial"]));
    assert_eq!(options["package_types"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn admin_updates_bus_status() {
    let (app, _state) = setup();
    let admin = login(&app, ADMIN).await;

    let res = send(
        &app,
        request(
            "PATCH",
            "/bus-assignments/2/status",
            Some(&admin),
            Some(json!({ "status": "in-transit" })),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["status"], "in-transit");

    let res = send(&app, request("GET", "/bus-assignments", Some(&admin), None)).await;
    let board = body_json(res).await;
    assert_eq!(board["assignments"][1]["status"], "in-transit");
    assert_eq!(board["available_buses"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn history_and_user_logs_are_filtered() {
    let (app, _state) = setup();
    let customer = login(&app, CUSTOMER).await;
    let admin = login(&app, ADMIN).await;

    let res = send(&app, request("GET", "/history?filter=sent", Some(&customer), None)).await;
    assert_eq!(body_json(res).await.as_array().unwrap().len(), 4);

    let res = send(
        &app,
        request("GET", "/history?q=books&filter=received", Some(&customer), None),
    )
    .await;
    let found = body_json(res).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["rwb"], "RWB004");

    let res = send(&app, request("GET", "/user-logs?filter=inactive", Some(&admin), None)).await;
    let page = body_json(res).await;
    assert_eq!(page["users"].as_array().unwrap().len(), 1);
    assert_eq!(page["users"][0]["name"], "Arjun Raj");
}

#[tokio::test]
async fn incoming_package_can_only_be_decided_once() {
    let (app, _state) = setup();
    let customer = login(&app, CUSTOMER).await;

    let res = send(&app, request("GET", "/confirmations", Some(&customer), None)).await;
    let confirmations = body_json(res).await;
    assert_eq!(confirmations["pending"].as_array().unwrap().len(), 3);
    assert_eq!(confirmations["delivery_pending"].as_array().unwrap().len(), 1);

    let res = send(&app, request("POST", "/confirmations/1/accept", Some(&customer), None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["decision"], "accepted");

    let res = send(&app, request("POST", "/confirmations/1/reject", Some(&customer), None)).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = send(&app, request("POST", "/confirmations/4/accept", Some(&customer), None)).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_tracking_id_returns_404() {
    let (app, _state) = setup();
    let customer = login(&app, CUSTOMER).await;

    let res = send(&app, request("GET", "/tracking/RWB424242", Some(&customer), None)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&app, request("GET", "/tracking/rwb001", Some(&customer), None)).await;
    assert_eq!(body_json(res).await["current_location"], "Salem Central Bus Stand");
}

#[tokio::test]
async fn language_setting_translates_validation_errors() {
    let (app, _state) = setup();
    let token = login(&app, CUSTOMER).await;

    let res = send(
        &app,
        request("PATCH", "/settings", Some(&token), Some(json!({ "language": "ta" }))),
    )
    .await;
    assert_eq!(body_json(res).await["language"], "ta");

    let id = open_wizard(&app, &token).await;
    let res = step(&app, &token, &id, "next").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(res).await["error"],
        "தயவுசெய்து தேவையான அனைத்து புலங்களையும் நிரப்பவும்"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_pickup_point_creation_keeps_every_point() {
    let (app, _state) = setup();
    let admin = login(&app, ADMIN).await;

    let handles: Vec<_> = (0..100)
        .map(|n| {
            let app = app.clone();
            let admin = admin.clone();
            tokio::spawn(async move {
                let res = send(
                    &app,
                    request(
                        "POST",
                        "/pickup-points",
                        Some(&admin),
                        Some(json!({
                            "name": format!("Stand {n}"),
                            "code": format!("STD{n:03}"),
                            "address": "Main Road",
                            "phone": "+91 44 0000 0000"
                        })),
                    ),
                )
                .await;
                assert_eq!(res.status(), StatusCode::OK);
                body_json(res).await["id"].as_u64().unwrap()
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 100);

    let res = send(&app, request("GET", "/pickup-points", Some(&admin), None)).await;
    assert_eq!(body_json(res).await.as_array().unwrap().len(), 105);
}

#[tokio::test]
async fn admin_toggles_and_edits_settings() {
    let (app, _state) = setup();
    let admin = login(&app, ADMIN).await;

    let res = send(&app, request("GET", "/settings", Some(&admin), None)).await;
    let settings = body_json(res).await;
    assert_eq!(settings["notifications"]["sms_notifications"], false);
    assert_eq!(settings["system"]["max_package_weight"], 25);

    let res = send(
        &app,
        request(
            "POST",
            "/settings/notifications/sms_notifications/toggle",
            Some(&admin),
            None,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let changed = body_json(res).await;
    assert_eq!(changed["settings"]["notifications"]["sms_notifications"], true);
    assert_eq!(changed["message"], "Setting updated successfully");

    let res = send(
        &app,
        request(
            "PUT",
            "/settings/security/session_timeout",
            Some(&admin),
            Some(json!({ "value": "45" })),
        ),
    )
    .await;
    assert_eq!(body_json(res).await["settings"]["security"]["session_timeout"], 45);

    let res = send(
        &app,
        request(
            "PUT",
            "/settings/system/package_retention_days",
            Some(&admin),
            Some(json!({ "value": "a week" })),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(
        &app,
        request("POST", "/settings/system/dark_mode/toggle", Some(&admin), None),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&app, request("GET", "/settings", Some(&admin), None)).await;
    let settings = body_json(res).await;
    assert_eq!(settings["notifications"]["sms_notifications"], true);
    assert_eq!(settings["security"]["session_timeout"], 45);
    assert_eq!(settings["system"]["package_retention_days"], 7);
}

#[tokio::test]
async fn customers_cannot_change_system_settings() {
    let (app, _state) = setup();
    let customer = login(&app, CUSTOMER).await;

    let res = send(
        &app,
        request(
            "POST",
            "/settings/system/allow_cancellation/toggle",
            Some(&customer),
            None,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn profile_summarises_customer_activity() {
    let (app, _state) = setup();
    let customer = login(&app, CUSTOMER).await;
    let admin = login(&app, ADMIN).await;

    let res = send(&app, request("GET", "/profile", Some(&customer), None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let profile = body_json(res).await;
    assert_eq!(profile["user"]["name"], "Ravi Kumar");
    assert_eq!(profile["stats"]["total_sent"], 4);
    assert_eq!(profile["stats"]["total_received"], 3);
    assert_eq!(profile["stats"]["pending_deliveries"], 2);
    assert_eq!(profile["recent_activity"][0]["rwb"], "RWB001");
    assert_eq!(profile["recent_activity"][0]["status"], "In Transit");

    let res = send(&app, request("GET", "/profile", Some(&admin), None)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admins_cannot_decide_incoming_packages() {
    let (app, state) = setup();
    let admin = login(&app, ADMIN).await;

    let res = send(&app, request("POST", "/confirmations/1/accept", Some(&admin), None)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = send(&app, request("POST", "/confirmations/2/reject", Some(&admin), None)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    assert!(state.incoming.iter().all(|entry| entry.decision.is_none()));
}
