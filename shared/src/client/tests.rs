use super::*;
use crate::error::ApiError;
use crate::models::{Attachment, TrackingType};
use crate::request::{FormField, HttpMethod, MockHttpClient, RequestBody};
use crate::session::MemoryStore;
use serde_json::json;

const BASE: &str = "http://api.test";

fn api() -> FleetApi<MockHttpClient, MemoryStore> {
    FleetApi::new(
        "http://api.test/",
        MockHttpClient::new(),
        Session::new(MemoryStore::new()),
    )
}

fn vehicle_json(id: i64, name: &str, mileage: f64) -> serde_json::Value {
    json!({
        "id": id,
        "geotab_id": format!("b{id}"),
        "name": name,
        "vin": null,
        "current_mileage": mileage,
        "current_hours": 0.0,
        "last_sync": "2024-05-02T08:00:00"
    })
}

#[tokio::test]
async fn test_list_vehicles_trims_base_url() {
    let api = api();
    api.http.mock_response(
        HttpMethod::Get,
        &format!("{BASE}/vehicles"),
        200,
        json!([vehicle_json(1, "Truck 1", 5200.0)]),
    );

    let vehicles = api.list_vehicles().await.unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].name, "Truck 1");

    let (method, url, headers, body) = api.http.last_request().unwrap();
    assert_eq!(method, HttpMethod::Get);
    assert_eq!(url, "http://api.test/vehicles");
    assert!(!headers.contains_key("Authorization"));
    assert_eq!(body, RequestBody::Empty);
}

#[tokio::test]
async fn test_add_vehicle_sends_json_body() {
    let api = api();
    api.http.mock_response(
        HttpMethod::Post,
        &format!("{BASE}/vehicles"),
        200,
        vehicle_json(7, "Van 7", 0.0),
    );

    let created = api
        .add_vehicle(&NewVehicle::new("Van 7", "b7", ""))
        .await
        .unwrap();
    assert_eq!(created.id, 7);

    let (_, _, headers, body) = api.http.last_request().unwrap();
    assert_eq!(headers.get("Content-Type").map(String::as_str), Some("application/json"));
    let RequestBody::Json(raw) = body else {
        panic!("expected json body");
    };
    let sent: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(sent, json!({"name": "Van 7", "geotab_id": "b7", "vin": null}));
}

#[tokio::test]
async fn test_optional_auth_attaches_token_when_present() {
    let api = api();
    api.http.mock_response(
        HttpMethod::Delete,
        &format!("{BASE}/vehicles/3"),
        200,
        json!({"message": "deleted"}),
    );

    api.delete_vehicle(3).await.unwrap();
    let (_, _, headers, _) = api.http.last_request().unwrap();
    assert!(!headers.contains_key("Authorization"));

    api.session().set_token("tok-1");
    api.delete_vehicle(3).await.unwrap();
    let (_, _, headers, _) = api.http.last_request().unwrap();
    assert_eq!(
        headers.get("Authorization").map(String::as_str),
        Some("Bearer tok-1")
    );
}

#[tokio::test]
async fn test_required_auth_fails_locally_without_token() {
    let api = api();
    let err = api.profile().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(api.http.requests.borrow().is_empty());
}

#[tokio::test]
async fn test_auth_header_comes_from_session() {
    let api = api();
    api.http.mock_response(
        HttpMethod::Get,
        &format!("{BASE}/auth/me"),
        200,
        json!({"email": "ops@fleet.test"}),
    );

    api.session().set_token("tok-2");
    api.profile().await.unwrap();
    let (_, _, headers, _) = api.http.last_request().unwrap();
    let (name, value) = api.session().bearer_header().unwrap();
    assert_eq!(headers.get(name), Some(&value));
    assert_eq!(headers.len(), 1);
}

#[tokio::test]
async fn test_blank_token_counts_as_signed_out() {
    let api = api();
    api.session().set_token("   ");
    let err = api.profile().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(api.http.requests.borrow().is_empty());
}

#[tokio::test]
async fn test_login_stores_token_then_profile_uses_it() {
    let api = api();
    api.http.mock_response(
        HttpMethod::Post,
        &format!("{BASE}/auth/login"),
        200,
        json!({"access_token": "jwt-abc", "token_type": "bearer"}),
    );
    api.http.mock_response(
        HttpMethod::Get,
        &format!("{BASE}/auth/me"),
        200,
        json!({"email": "ops@fleet.io", "full_name": "Ops Lead"}),
    );

    api.login(&Credentials {
        email: "ops@fleet.io".into(),
        password: "pw".into(),
    })
    .await
    .unwrap();
    assert_eq!(api.session().token().as_deref(), Some("jwt-abc"));

    let profile = api.profile().await.unwrap();
    assert_eq!(profile.display_name(), "Ops Lead");
    let (_, _, headers, _) = api.http.last_request().unwrap();
    assert_eq!(
        headers.get("Authorization").map(String::as_str),
        Some("Bearer jwt-abc")
    );

    api.logout();
    assert!(!api.session().is_authenticated());
}

#[tokio::test]
async fn test_failed_login_keeps_session_empty() {
    let api = api();
    api.http.mock_response(
        HttpMethod::Post,
        &format!("{BASE}/auth/login"),
        401,
        json!({"detail": "Incorrect email or password"}),
    );

    let err = api
        .login(&Credentials {
            email: "a@b.c".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Incorrect email or password");
    assert!(api.session().token().is_none());
}

#[tokio::test]
async fn test_backend_detail_text_is_surfaced() {
    let api = api();
    api.http.mock_response(
        HttpMethod::Post,
        &format!("{BASE}/vehicles"),
        400,
        json!({"detail": "Vehicle with this Geotab ID already exists"}),
    );

    let err = api
        .add_vehicle(&NewVehicle::new("Dup", "b1", ""))
        .await
        .unwrap_err();
    match &err {
        ApiError::Backend { status, detail } => {
            assert_eq!(*status, 400);
            assert_eq!(detail.render(), "Vehicle with this Geotab ID already exists");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_backend_structured_detail_is_preserved() {
    let api = api();
    api.http.mock_response(
        HttpMethod::Post,
        &format!("{BASE}/logs"),
        422,
        json!({"detail": [{"loc": ["body", "cost"], "msg": "value is not a valid float"}]}),
    );

    let vehicle: Vehicle = serde_json::from_value(vehicle_json(2, "Truck 2", 10.0)).unwrap();
    let err = api
        .log_maintenance(&NewMaintenanceLog::for_vehicle(&vehicle))
        .await
        .unwrap_err();
    let detail = err.detail().unwrap();
    assert!(matches!(detail, Detail::Structured(_)));
    assert!(err.user_message().contains("value is not a valid float"));
}

#[tokio::test]
async fn test_non_json_error_falls_back_to_raw_text() {
    let api = api();
    api.http
        .mock_raw(HttpMethod::Get, &format!("{BASE}/settings/all"), 502, "Bad Gateway");

    let err = api.settings().await.unwrap_err();
    assert_eq!(err.user_message(), "Bad Gateway");

    api.http
        .mock_raw(HttpMethod::Get, &format!("{BASE}/settings/all"), 500, "");
    let err = api.settings().await.unwrap_err();
    assert_eq!(err.user_message(), "Request failed with status 500");
}

#[tokio::test]
async fn test_offline_is_network_error() {
    let api = api();
    api.http.go_offline();
    let err = api.list_vehicles().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.user_message(), "Backend unreachable. Check your connection.");
}

#[tokio::test]
async fn test_empty_success_body_is_accepted() {
    let api = api();
    api.http
        .mock_raw(HttpMethod::Post, &format!("{BASE}/notifications/read-all"), 200, "");
    api.mark_all_notifications_read().await.unwrap();

    api.http.mock_response(
        HttpMethod::Post,
        &format!("{BASE}/notifications/5/read"),
        200,
        json!({"message": "ok"}),
    );
    api.mark_notification_read(5).await.unwrap();
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let api = api();
    api.http.mock_response(
        HttpMethod::Get,
        &format!("{BASE}/analytics/cost"),
        200,
        json!({"total": "lots"}),
    );
    let err = api.cost_summary().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_settings_round_trip_posts_whole_map() {
    let api = api();
    api.http.mock_response(
        HttpMethod::Get,
        &format!("{BASE}/settings/all"),
        200,
        json!({"geotab_server": "my.geotab.com", "geotab_db": "fleet"}),
    );
    api.http.mock_response(
        HttpMethod::Post,
        &format!("{BASE}/settings"),
        200,
        json!({"message": "Settings updated"}),
    );

    let mut settings = api.settings().await.unwrap();
    settings.set("geotab_user", "ops");
    api.save_settings(&settings).await.unwrap();

    let (_, _, _, body) = api.http.last_request().unwrap();
    let RequestBody::Json(raw) = body else {
        panic!("expected json body");
    };
    let sent: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        sent,
        json!({"geotab_server": "my.geotab.com", "geotab_db": "fleet", "geotab_user": "ops"})
    );
}

#[tokio::test]
async fn test_support_ticket_is_multipart() {
    let api = api();
    api.http.mock_response(
        HttpMethod::Post,
        &format!("{BASE}/support/submit"),
        200,
        json!({"message": "Ticket submitted"}),
    );

    let ticket = SupportTicket {
        issue_type: "Sync".into(),
        impact_count: 3,
        description: "Odometer frozen".into(),
        user_email: "ops@fleet.io".into(),
        attachment: Some(Attachment {
            file_name: "shot.png".into(),
            content_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        }),
    };
    api.submit_support_ticket(&ticket).await.unwrap();

    let (_, _, headers, body) = api.http.last_request().unwrap();
    assert!(!headers.contains_key("Content-Type"));
    let RequestBody::Multipart(fields) = body else {
        panic!("expected multipart body");
    };
    let names: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        names,
        ["issue_type", "impact_count", "description", "user_email", "attachment"]
    );
    assert_eq!(fields[1].1, FormField::Text("3".into()));
}

#[tokio::test]
async fn test_schedule_endpoints() {
    let api = api();
    api.http.mock_response(
        HttpMethod::Get,
        &format!("{BASE}/schedules/4"),
        200,
        json!([{
            "id": 11,
            "vehicle_id": 4,
            "task_name": "Oil Change",
            "tracking_type": "miles",
            "interval_value": 5000.0,
            "alert_thresholds": "500,100",
            "last_performed_value": 20000.0
        }]),
    );
    api.http.mock_response(
        HttpMethod::Put,
        &format!("{BASE}/schedules/11"),
        200,
        json!({"message": "updated"}),
    );

    let schedules = api.schedules(4).await.unwrap();
    assert_eq!(schedules[0].tracking_type, TrackingType::Miles);
    assert!(schedules[0].is_active);

    api.update_schedule(
        11,
        ScheduleUpdate {
            interval_value: 6000.0,
            last_performed_value: 25000.0,
        },
    )
    .await
    .unwrap();
    let (method, url, _, _) = api.http.last_request().unwrap();
    assert_eq!(method, HttpMethod::Put);
    assert_eq!(url, "http://api.test/schedules/11");
}

#[tokio::test]
async fn test_vehicle_history_filters_global_logs() {
    let api = api();
    api.http.mock_response(
        HttpMethod::Get,
        &format!("{BASE}/analytics/logs"),
        200,
        json!([
            {"id": 1, "vehicle_id": 2, "vehicle_name": "Truck 2", "task_name": "Oil",
             "performed_date": "2024-01-10T09:00:00", "cost": 80.0, "performed_at_mileage": 5000.0},
            {"id": 2, "vehicle_id": 3, "vehicle_name": "Truck 3", "task_name": "Tires",
             "performed_date": "2024-02-10T09:00:00", "cost": 400.0, "performed_at_mileage": 9000.0},
            {"id": 3, "vehicle_id": 2, "vehicle_name": "Truck 2", "task_name": "Brakes",
             "performed_date": "2024-03-10T09:00:00", "cost": 220.0, "performed_at_mileage": 10000.0}
        ]),
    );

    let vehicle: Vehicle = serde_json::from_value(vehicle_json(2, "Truck 2", 10500.0)).unwrap();
    let history = api.vehicle_history(&vehicle).await.unwrap();
    let ids: Vec<i64> = history.iter().map(|r| r.id).collect();
    assert_eq!(ids, [3, 1]);
}
