// GET / - APIドキュメント

use axum::Json;
use serde_json::{json, Value};
use truecrime_common::types::CatalogKind;

/// エンドポイント一覧を返す
pub async fn api_info() -> Json<Value> {
    let mut endpoints = vec![
        json!({ "method": "POST", "path": "/register", "body": ["username", "mail", "password"] }),
        json!({ "method": "POST", "path": "/login", "body": ["mail", "password"] }),
    ];

    for kind in CatalogKind::ALL {
        endpoints.push(json!({ "method": "GET", "path": format!("/{}", kind.collection()) }));
        endpoints.push(json!({ "method": "GET", "path": format!("/{}/:id", kind.collection()) }));
    }

    for (method, path) in [
        ("GET", "/todos"),
        ("POST", "/todos"),
        ("PATCH", "/todos/:id"),
        ("PATCH", "/todos/:id/completed"),
        ("DELETE", "/todos/:id"),
        ("GET", "/me"),
        ("PATCH", "/me"),
    ] {
        endpoints.push(json!({ "method": method, "path": path, "authorization": true }));
    }

    Json(json!({
        "Welcome": "True crime catalog API",
        "Endpoints": endpoints,
    }))
}
