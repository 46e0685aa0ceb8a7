use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use luna_backend::{app, AppState, MemoryStore};

fn test_app() -> Router {
    app(AppState::new(Arc::new(MemoryStore::new())))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body.get("timestamp").is_some());
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Endpoint not found");
}

#[tokio::test]
async fn test_profile_created_with_defaults() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/profile?userId=alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], "alice");
    assert_eq!(body["cycleLength"], 28);
    assert_eq!(body["periodLength"], 5);
    assert!(body["lastPeriodDate"].is_null());
}

#[tokio::test]
async fn test_profile_update_validates_lengths() {
    let app = test_app();
    let (status, _) = send(
        &app,
        "POST",
        "/api/profile",
        Some(json!({ "userId": "alice", "cycleLength": 5, "periodLength": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/profile",
        Some(json!({ "userId": "alice", "cycleLength": 30, "lastPeriodDate": "2024-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cycleLength"], 30);
    assert_eq!(body["periodLength"], 5);
    assert_eq!(body["lastPeriodDate"], "2024-01-01");
}

#[tokio::test]
async fn test_absurd_cycle_length_rejected() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/profile",
        Some(json!({ "userId": "ivy", "cycleLength": 2000000000, "lastPeriodDate": "2024-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("cycleLength"));

    let (status, body) = send(&app, "GET", "/api/cycle?userId=ivy&asOf=2024-01-10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["prediction"].is_null());
}

#[tokio::test]
async fn test_profile_put_and_clear_last_period() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "PUT",
        "/api/profile",
        Some(json!({ "userId": "jo", "name": "Jo", "lastPeriodDate": "2024-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lastPeriodDate"], "2024-01-01");

    // omitted field is left alone
    let (_, body) = send(&app, "PUT", "/api/profile", Some(json!({ "userId": "jo", "age": 30 }))).await;
    assert_eq!(body["lastPeriodDate"], "2024-01-01");
    assert_eq!(body["name"], "Jo");

    let (status, body) = send(
        &app,
        "POST",
        "/api/profile",
        Some(json!({ "userId": "jo", "lastPeriodDate": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["lastPeriodDate"].is_null());
    assert_eq!(body["age"], 30);
}

#[tokio::test]
async fn test_period_log_lifecycle() {
    let app = test_app();
    let (status, created) = send(
        &app,
        "POST",
        "/api/period-logs",
        Some(json!({
            "userId": "bob",
            "date": "2024-02-01",
            "flow": "medium",
            "pain": 4,
            "symptoms": ["cramps"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        "/api/period-logs",
        Some(json!({ "userId": "bob", "date": "2024-02-01", "flow": "light", "pain": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/period-logs/{}", id),
        Some(json!({ "pain": 7, "notes": "rough day" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["pain"], 7);
    assert_eq!(updated["notes"], "rough day");
    assert_eq!(updated["flow"], "medium");

    let (status, _) = send(&app, "DELETE", &format!("/api/period-logs/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", &format!("/api/period-logs/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pain_out_of_range_rejected() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/period-logs",
        Some(json!({ "date": "2024-02-01", "flow": "heavy", "pain": 11 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("pain"));
}

#[tokio::test]
async fn test_logs_listed_newest_first() {
    let app = test_app();
    for date in ["2024-01-03", "2024-03-01", "2024-02-10"] {
        send(
            &app,
            "POST",
            "/api/period-logs",
            Some(json!({ "userId": "cara", "date": date, "flow": "light", "pain": 2 })),
        )
        .await;
    }
    let (_, logs) = send(&app, "GET", "/api/period-logs?userId=cara", None).await;
    let dates: Vec<&str> = logs
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-02-10", "2024-01-03"]);
}

#[tokio::test]
async fn test_cycle_without_data_has_no_prediction() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/cycle?userId=dana", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["prediction"].is_null());
    assert_eq!(body["inFertileWindow"], false);
    assert!(body["phaseColor"].is_null());
}

#[tokio::test]
async fn test_cycle_prediction_uses_latest_log() {
    let app = test_app();
    send(
        &app,
        "POST",
        "/api/profile",
        Some(json!({ "userId": "erin", "lastPeriodDate": "2024-01-01" })),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/period-logs",
        Some(json!({ "userId": "erin", "date": "2024-02-15", "flow": "heavy", "pain": 5 })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/cycle?userId=erin&asOf=2024-02-28", None).await;
    assert_eq!(status, StatusCode::OK);

    let prediction = &body["prediction"];
    assert_eq!(prediction["nextPeriodDate"], "2024-03-14");
    assert_eq!(prediction["daysUntil"], 15);
    assert_eq!(prediction["phase"], "ovulation");
    assert_eq!(prediction["fertilityWindow"]["ovulationDate"], "2024-02-29");
    assert_eq!(prediction["fertilityWindow"]["fertileStart"], "2024-02-24");
    assert_eq!(prediction["fertilityWindow"]["fertileEnd"], "2024-03-01");
    assert_eq!(body["inFertileWindow"], true);
    assert_eq!(body["phaseColor"], "lavender");
}

#[tokio::test]
async fn test_cycle_stats() {
    let app = test_app();
    let (_, empty) = send(&app, "GET", "/api/cycle/stats?userId=finn", None).await;
    assert_eq!(empty["averagePain"], 0.0);
    assert_eq!(empty["mostCommonSymptoms"], json!([]));
    assert_eq!(
        empty["flowPattern"],
        json!({ "light": 0, "medium": 0, "heavy": 0, "spotting": 0 })
    );

    for (date, pain) in [("2024-02-01", 3), ("2024-02-02", 4)] {
        send(
            &app,
            "POST",
            "/api/period-logs",
            Some(json!({
                "userId": "finn", "date": date, "flow": "heavy", "pain": pain,
                "symptoms": ["cramps", "fatigue"]
            })),
        )
        .await;
    }
    let (_, stats) = send(&app, "GET", "/api/cycle/stats?userId=finn", None).await;
    assert_eq!(stats["averagePain"], 3.5);
    assert_eq!(stats["mostCommonSymptoms"], json!(["cramps", "fatigue"]));
    assert_eq!(stats["flowPattern"]["heavy"], 2);
}

#[tokio::test]
async fn test_hygiene_defaults_and_ack() {
    let app = test_app();
    let (status, reminders) = send(&app, "GET", "/api/hygiene?userId=gia", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reminders.as_array().unwrap().len(), 4);

    // second read returns the same seeded rows
    let (_, again) = send(&app, "GET", "/api/hygiene?userId=gia", None).await;
    assert_eq!(again, reminders);

    let (_, due) = send(&app, "GET", "/api/hygiene/due?userId=gia", None).await;
    assert_eq!(due.as_array().unwrap().len(), 3);

    let first_id = due[0]["id"].as_str().unwrap().to_string();
    let (status, acked) = send(&app, "POST", &format!("/api/hygiene/{}/ack", first_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(acked["lastReminded"].is_string());

    let (_, due) = send(&app, "GET", "/api/hygiene/due?userId=gia", None).await;
    assert_eq!(due.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_hygiene_crud() {
    let app = test_app();
    let (status, created) = send(
        &app,
        "POST",
        "/api/hygiene",
        Some(json!({ "userId": "hana", "title": "Evening shower", "interval": 24 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["enabled"], true);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/hygiene/{}", id),
        Some(json!({ "enabled": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["enabled"], false);
    assert_eq!(updated["interval"], 24);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/hygiene/{}", id),
        Some(json!({ "interval": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", &format!("/api/hygiene/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", &format!("/api/hygiene/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_defaults_stay_deleted() {
    let app = test_app();
    let (_, reminders) = send(&app, "GET", "/api/hygiene?userId=kai", None).await;
    let reminders = reminders.as_array().unwrap().clone();
    assert_eq!(reminders.len(), 4);

    for reminder in &reminders {
        let uri = format!("/api/hygiene/{}", reminder["id"].as_str().unwrap());
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, after) = send(&app, "GET", "/api/hygiene?userId=kai", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, json!([]));
    let (_, due) = send(&app, "GET", "/api/hygiene/due?userId=kai", None).await;
    assert_eq!(due, json!([]));
}

#[tokio::test]
async fn test_reminder_interval_capped() {
    let app = test_app();
    let (status, _) = send(
        &app,
        "POST",
        "/api/hygiene",
        Some(json!({ "userId": "lea", "title": "Forever", "interval": 4294967295u32 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, created) = send(
        &app,
        "POST",
        "/api/hygiene",
        Some(json!({ "userId": "lea", "title": "Yearly checkup", "interval": 8760 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/hygiene/{}", created["id"].as_str().unwrap());

    let (status, _) = send(&app, "PUT", &uri, Some(json!({ "interval": 8761 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // own reminder counts as stored, so no starter set is added
    let (_, list) = send(&app, "GET", "/api/hygiene?userId=lea", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_chat_round_trip() {
    let app = test_app();
    let (status, reply) = send(
        &app,
        "POST",
        "/api/chat/message",
        Some(json!({ "userId": "ivy", "message": "How do I deal with cramps?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["role"], "assistant");
    assert_eq!(reply["category"], "symptoms");

    let (_, history) = send(&app, "GET", "/api/chat/history?userId=ivy", None).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["role"], "user");
    assert_eq!(history[1]["role"], "assistant");

    let (status, _) = send(&app, "DELETE", "/api/chat/history?userId=ivy", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, history) = send(&app, "GET", "/api/chat/history?userId=ivy", None).await;
    assert_eq!(history, json!([]));
}

#[tokio::test]
async fn test_chat_doctor_search() {
    let app = test_app();
    let (_, reply) = send(
        &app,
        "POST",
        "/api/chat/message",
        Some(json!({ "message": "I need a doctor" })),
    )
    .await;
    assert_eq!(reply["type"], "gynecologist_search");
    assert_eq!(reply["doctors"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_gynecologist_directory() {
    let app = test_app();
    let (_, all) = send(&app, "GET", "/api/gynecologists", None).await;
    assert_eq!(all.as_array().unwrap().len(), 8);
    assert_eq!(all[0]["id"], "3");

    let (_, filtered) = send(&app, "GET", "/api/gynecologists?area=park", None).await;
    let areas: Vec<&str> = filtered
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["area"].as_str().unwrap())
        .collect();
    assert_eq!(areas, vec!["Raja Park", "Bani Park"]);

    let (_, found) = send(&app, "GET", "/api/gynecologists/search?q=laparoscopic", None).await;
    assert_eq!(found[0]["id"], "3");

    let (status, one) = send(&app, "GET", "/api/gynecologists/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["consultationFee"], 700);

    let (status, _) = send(&app, "GET", "/api/gynecologists/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
