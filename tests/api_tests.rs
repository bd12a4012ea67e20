use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use routine::config::LedgerMarkers;
use routine::db::RoutineStorage;
use routine::middleware::auth::KEY_HEADER;
use routine::router::{RoutineState, routine_router};
use routine::service::{Dashboard, MarkerClassifier};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::{
    fs,
    path::PathBuf,
    str::FromStr,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

const KEY: &str = "pwd";

async fn test_app(tag: &str) -> (Router, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "routine-api-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let storage = RoutineStorage::connect(&database_url)
        .await
        .expect("failed to open temp database");
    let classifier = Arc::new(MarkerClassifier::new(LedgerMarkers::default()));
    let dashboard = Dashboard::new(storage.clone(), classifier);
    let state = RoutineState::new(storage, dashboard, Arc::from(KEY));
    (routine_router(state), temp_path)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(KEY_HEADER, KEY)
        .header("content-type", "application/json");
    let body = match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("request failed");

    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not json")
    };
    (status, value)
}

async fn create_user(app: &Router, name: &str) -> String {
    let (status, user) = call(
        app,
        "POST",
        "/api/users",
        Some(json!({ "username": name, "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(user.get("password_digest").is_none());
    user["user_id"].as_str().expect("user_id").to_string()
}

fn decimal(v: &Value) -> Decimal {
    match v {
        Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        other => Decimal::from_str(&other.to_string()).expect("decimal number"),
    }
}

#[tokio::test]
async fn health_is_open_and_api_requires_key() {
    let (app, path) = test_app("auth").await;

    let resp = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(Request::builder().uri("/api/users").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/users?key={KEY}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn error_statuses_follow_error_kind() {
    let (app, path) = test_app("errors").await;
    let ann = create_user(&app, "ann").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/fitness",
        Some(json!({ "activity_date": "2024-01-05", "activities": [], "user_id": ann })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");

    let (status, _) = call(
        &app,
        "POST",
        "/api/fitness",
        Some(json!({ "activity_date": "2024-01-05", "activities": ["rest", "legs"], "user_id": ann })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let record = json!({ "activity_date": "2024-01-05", "activities": ["legs"], "user_id": ann });
    let (status, _) = call(&app, "POST", "/api/fitness", Some(record.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = call(&app, "POST", "/api/fitness", Some(record)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONSTRAINT_VIOLATION");

    let (status, body) = call(&app, "GET", "/api/users/nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = call(&app, "GET", "/api/stats/fitness?user_id=nobody&year=2024", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn fitness_stats_count_distinct_trained_days() {
    let (app, path) = test_app("fitness").await;
    let ann = create_user(&app, "ann").await;
    let bob = create_user(&app, "bob").await;

    for (user, date, activities) in [
        (&ann, "2024-01-05", json!(["chest", "arms"])),
        (&ann, "2024-01-06", json!(["rest"])),
        (&ann, "2024-01-20", json!(["back"])),
        (&ann, "2024-02-02", json!(["cardio"])),
        (&bob, "2024-01-07", json!(["legs"])),
    ] {
        let (status, _) = call(
            &app,
            "POST",
            "/api/fitness",
            Some(json!({ "activity_date": date, "activities": activities, "user_id": user })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, report) = call(
        &app,
        "GET",
        &format!("/api/stats/fitness?user_id={ann}&year=2024&month=1"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["period"]["label"], "2024-01");
    assert_eq!(report["summary"]["trained_days"], 2);
    assert_eq!(report["summary"]["total_days"], 31);
    assert_eq!(report["summary"]["total_activities"], 3);
    assert_eq!(report["summary"]["activity_counts"]["chest"], 1);
    assert_eq!(report["summary"]["total_minutes"], 90);
    assert_eq!(report["records"].as_array().unwrap().len(), 3);

    let (_, periods) = call(
        &app,
        "GET",
        &format!("/api/stats/fitness/periods?user_id={ann}&granularity=month"),
        None,
    )
    .await;
    let labels: Vec<&str> = periods
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["2024-02", "2024-01"]);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn ledger_stats_attribute_early_salary_to_previous_month() {
    let (app, path) = test_app("ledger").await;
    let ann = create_user(&app, "ann").await;

    for (id, name) in [("income", "Income"), ("food", "Food")] {
        let (status, _) = call(
            &app,
            "POST",
            "/api/categories",
            Some(json!({ "category_id": id, "name": name })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    for (id, category) in [("salary", "income"), ("groceries", "food")] {
        let (status, _) = call(
            &app,
            "POST",
            "/api/items",
            Some(json!({ "item_id": id, "category_id": category, "name": id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    for (date, category, item, expense) in [
        ("2024-03-15", "income", "salary", "5000.00"),
        ("2024-02-10", "food", "groceries", "1000.00"),
        ("2024-03-25", "food", "groceries", "20.50"),
    ] {
        let (status, _) = call(
            &app,
            "POST",
            "/api/ledger",
            Some(json!({
                "date": date,
                "category_id": category,
                "item_id": item,
                "expense": expense,
                "user_id": ann,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, feb) = call(
        &app,
        "GET",
        &format!("/api/stats/ledger?user_id={ann}&year=2024&month=2"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feb["summary"]["entry_count"], 2);
    assert_eq!(decimal(&feb["summary"]["income"]), Decimal::new(500000, 2));
    assert_eq!(decimal(&feb["summary"]["expense"]), Decimal::new(100000, 2));
    assert_eq!(decimal(&feb["summary"]["balance"]), Decimal::new(400000, 2));
    assert_eq!(decimal(&feb["summary"]["expense_ratio"]), Decimal::new(2, 1));
    let salary = &feb["entries"][0];
    assert_eq!(salary["date"], "2024-03-15");
    assert_eq!(salary["effective_date"], "2024-02-29");

    let (_, mar) = call(
        &app,
        "GET",
        &format!("/api/stats/ledger?user_id={ann}&year=2024&month=3"),
        None,
    )
    .await;
    assert_eq!(mar["summary"]["entry_count"], 1);
    assert_eq!(decimal(&mar["summary"]["income"]), Decimal::ZERO);
    assert_eq!(decimal(&mar["summary"]["expense_ratio"]), Decimal::ZERO);

    let (_, periods) = call(
        &app,
        "GET",
        &format!("/api/stats/ledger/periods?user_id={ann}"),
        None,
    )
    .await;
    let labels: Vec<&str> = periods
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["2024-03", "2024-02"]);

    let (status, _) = call(
        &app,
        "POST",
        "/api/ledger",
        Some(json!({
            "date": "2024-03-01",
            "category_id": "food",
            "item_id": "salary",
            "expense": "1.00",
            "user_id": ann,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn malformed_requests_use_the_error_envelope() {
    let (app, path) = test_app("malformed").await;
    let ann = create_user(&app, "ann").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/fitness",
        Some(json!({ "activity_date": "2024-01-05", "user_id": ann })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");

    let (status, body) = call(
        &app,
        "GET",
        &format!("/api/stats/fitness?user_id={ann}&year=twenty"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn out_of_range_inputs_are_rejected() {
    let (app, path) = test_app("ranges").await;
    let ann = create_user(&app, "ann").await;

    let (status, _) = call(
        &app,
        "POST",
        "/api/fitness",
        Some(json!({ "activity_date": "2024-01-05", "activities": ["legs"], "user_id": ann })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    for query in ["year=262142", "year=262142&month=12", "year=0"] {
        let (status, body) = call(
            &app,
            "GET",
            &format!("/api/stats/fitness?user_id={ann}&{query}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{query}");
        assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
    }

    call(
        &app,
        "POST",
        "/api/categories",
        Some(json!({ "category_id": "food", "name": "Food" })),
    )
    .await;
    call(
        &app,
        "POST",
        "/api/items",
        Some(json!({ "item_id": "groceries", "category_id": "food", "name": "Groceries" })),
    )
    .await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/ledger",
        Some(json!({
            "date": "2024-03-02",
            "category_id": "food",
            "item_id": "groceries",
            "expense": "50000000000000000000000000000",
            "user_id": ann,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");

    for _ in 0..2 {
        let (status, _) = call(
            &app,
            "POST",
            "/api/ledger",
            Some(json!({
                "date": "2024-03-02",
                "category_id": "food",
                "item_id": "groceries",
                "expense": "1000000000000000",
                "user_id": ann,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, report) = call(
        &app,
        "GET",
        &format!("/api/stats/ledger?user_id={ann}&year=2024"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        decimal(&report["summary"]["expense"]),
        Decimal::new(2_000_000_000_000_000, 0)
    );

    let _ = fs::remove_file(&path);
}
