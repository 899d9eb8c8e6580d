use chrono::{Duration, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::support::start_server;

fn service_body(plate: &str, delivery_in: Duration) -> Value {
    json!({
        "name": "Ana",
        "phone": "11 90000-0001",
        "plate": plate,
        "carModel": "Gol",
        "washPrice": "R$ 1.234,56",
        "deliveryTime": (Utc::now() + delivery_in).to_rfc3339_opts(SecondsFormat::Millis, true),
        "paymentMethod": "pix",
    })
}

async fn register(client: &reqwest::Client, base: &str, body: &Value) -> reqwest::Response {
    client
        .post(format!("{base}/services"))
        .json(body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn register_service_returns_client_and_wash() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = register(&client, &base, &service_body("ABC1234", Duration::hours(2))).await;
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["client"]["plate"], "ABC1234");
    assert_eq!(body["wash"]["status"], "pending");
    assert_eq!(body["wash"]["price"].as_f64(), Some(1234.56));
    assert_eq!(body["wash"]["clientId"], body["client"]["id"]);
}

#[tokio::test]
async fn long_car_model_is_a_bad_request() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let mut body = service_body("ABC1234", Duration::hours(2));
    body["carModel"] = json!("Volkswagen Gol 1.0 Trendline Flex 2018");

    let resp = register(&client, &base, &body).await;
    assert_eq!(resp.status(), 400);
    let err: Value = resp.json().await.unwrap();
    assert!(err["error"].as_str().unwrap().contains("carModel"));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let base = start_server().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/services"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn second_pending_registration_conflicts() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let body = service_body("ABC1234", Duration::hours(2));

    assert_eq!(register(&client, &base, &body).await.status(), 201);
    let resp = register(&client, &base, &body).await;
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
async fn queue_listing_sweeps_and_filters() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    register(&client, &base, &service_body("LATE001", -Duration::minutes(5))).await;
    register(&client, &base, &service_body("SOON001", Duration::hours(1))).await;
    let cancelled: Value = register(&client, &base, &service_body("GONE001", Duration::hours(2)))
        .await
        .json()
        .await
        .unwrap();
    let gone_id = cancelled["wash"]["id"].as_str().unwrap().to_string();

    let resp = client
        .patch(format!("{base}/services/{gone_id}/status"))
        .json(&json!({ "status": "cancelled" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let listed: Vec<Value> = client
        .get(format!("{base}/services"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let plates: Vec<_> = listed.iter().map(|e| e["plate"].as_str().unwrap()).collect();
    assert_eq!(plates, vec!["LATE001", "SOON001"]);
    assert_eq!(listed[0]["status"], "completed");
    assert_eq!(listed[0]["clientName"], "Ana");
    assert_eq!(listed[0]["clientPhone"], "11 90000-0001");

    let pending: Vec<Value> = client
        .get(format!("{base}/services"))
        .query(&[("status", "pending")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["plate"], "SOON001");

    let all: Vec<Value> = client
        .get(format!("{base}/services"))
        .query(&[("status", "all")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn unknown_status_values_are_rejected() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let body: Value = register(&client, &base, &service_body("ABC1234", Duration::hours(2)))
        .await
        .json()
        .await
        .unwrap();
    let id = body["wash"]["id"].as_str().unwrap().to_string();

    let resp = client
        .patch(format!("{base}/services/{id}/status"))
        .json(&json!({ "status": "washing" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .get(format!("{base}/services"))
        .query(&[("status", "washing")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn status_update_on_unknown_wash_is_not_found() {
    let base = start_server().await;
    let resp = reqwest::Client::new()
        .patch(format!("{base}/services/does-not-exist/status"))
        .json(&json!({ "status": "completed" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
