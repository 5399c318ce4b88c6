use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

fn unique_suffix() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, json)
}

fn contains_id(items: &JsonValue, id: i64) -> bool {
    items
        .as_array()
        .unwrap()
        .iter()
        .any(|item| item["id"].as_i64() == Some(id))
}

#[tokio::test]
async fn usuarios_crud_end_to_end() {
    if env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set; skipping usuarios_crud_end_to_end");
        return;
    }
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    let _ = tramites_backend::config::init_config();

    let pool = tramites_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let app = tramites_backend::routes::api_router()
        .with_state(tramites_backend::AppState::new(pool));

    let suffix = unique_suffix();
    let nombre = format!("Ana{}", suffix);
    let email = format!("ana_{}@mail.com", suffix);

    // create
    let (status, body) = send(
        &app,
        "POST",
        "/usuarios",
        Some(json!({
            "nombre": nombre,
            "apellido": "Mendez",
            "email": email,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().expect("generated id");
    assert_eq!(body["activo"], true);
    assert!(body["fechaCreacion"].is_string());

    // get by id
    let (status, body) = send(&app, "GET", &format!("/usuarios/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], email.as_str());

    // case-insensitive substring filter on nombre
    let fragment = format!("ana{}", suffix);
    let (status, body) = send(&app, "GET", &format!("/usuarios?nombre={}", fragment), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(contains_id(&body, id));

    // partial update keeps unspecified fields
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/usuarios/{}", id),
        Some(json!({ "telefono": "5551234" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["telefono"], "5551234");
    assert_eq!(body["nombre"], nombre.as_str());

    // activo=false is a real filter, not a truthy string
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/usuarios/{}", id),
        Some(json!({ "activo": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/usuarios?activo=false&nombre={}", fragment),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(contains_id(&body, id));

    let (status, body) = send(
        &app,
        "GET",
        &format!("/usuarios?activo=true&nombre={}", fragment),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!contains_id(&body, id));

    // duplicate email hits the unique index
    let (status, body) = send(
        &app,
        "POST",
        "/usuarios",
        Some(json!({
            "nombre": "Otra",
            "apellido": "Persona",
            "email": email,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    // hard delete
    let (status, body) = send(&app, "DELETE", &format!("/usuarios/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mensaje"], "Usuario eliminado");

    let (status, body) = send(&app, "GET", &format!("/usuarios/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Usuario no encontrado");

    let (status, _) = send(&app, "DELETE", &format!("/usuarios/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn usuarios_invalid_payload_is_rejected() {
    if env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set; skipping usuarios_invalid_payload_is_rejected");
        return;
    }
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    let _ = tramites_backend::config::init_config();

    let pool = tramites_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let app = tramites_backend::routes::api_router()
        .with_state(tramites_backend::AppState::new(pool));

    let (status, body) = send(
        &app,
        "POST",
        "/usuarios",
        Some(json!({
            "nombre": "",
            "apellido": "Mendez",
            "email": format!("vacio_{}@mail.com", unique_suffix()),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
