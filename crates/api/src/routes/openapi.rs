//! OpenAPI document describing the public routes.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde_json::{Map, Value, json};

use crate::info::AppInfo;

/// A documented `GET` route: path, summary, operation id.
struct Operation {
    path: &'static str,
    summary: &'static str,
    operation_id: &'static str,
}

const OPERATIONS: &[Operation] = &[
    Operation {
        path: "/",
        summary: "Root",
        operation_id: "root__get",
    },
    Operation {
        path: "/health",
        summary: "Health Check",
        operation_id: "health_check_health_get",
    },
];

/// Builds the OpenAPI 3.1 document for `info`.
pub fn document(info: &AppInfo) -> Value {
    let paths: Map<String, Value> = OPERATIONS
        .iter()
        .map(|op| {
            let item = json!({
                "get": {
                    "summary": op.summary,
                    "operationId": op.operation_id,
                    "responses": {
                        "200": {
                            "description": "Successful Response",
                            "content": {
                                "application/json": { "schema": {} }
                            }
                        }
                    }
                }
            });
            (op.path.to_string(), item)
        })
        .collect();

    json!({
        "openapi": "3.1.0",
        "info": info,
        "paths": paths,
    })
}

/// GET /openapi.json — returns the OpenAPI document.
pub async fn get(State(info): State<Arc<AppInfo>>) -> Json<Value> {
    Json(document(&info))
}
