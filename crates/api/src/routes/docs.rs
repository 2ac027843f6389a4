//! Interactive documentation pages backed by `/openapi.json`.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::info::AppInfo;

pub const OPENAPI_URL: &str = "/openapi.json";

const SWAGGER_UI_JS: &str = "https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js";
const SWAGGER_UI_CSS: &str = "https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css";
const REDOC_JS: &str = "https://cdn.jsdelivr.net/npm/redoc@2/bundles/redoc.standalone.js";

pub fn swagger_ui_html(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<link type="text/css" rel="stylesheet" href="{SWAGGER_UI_CSS}">
<title>{title} - Swagger UI</title>
</head>
<body>
<div id="swagger-ui"></div>
<script src="{SWAGGER_UI_JS}"></script>
<script>
const ui = SwaggerUIBundle({{
    url: '{OPENAPI_URL}',
    dom_id: '#swagger-ui',
    presets: [SwaggerUIBundle.presets.apis, SwaggerUIBundle.SwaggerUIStandalonePreset],
    layout: "BaseLayout",
    deepLinking: true
}})
</script>
</body>
</html>
"#
    )
}

pub fn redoc_html(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>{title} - ReDoc</title>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1">
</head>
<body>
<redoc spec-url="{OPENAPI_URL}"></redoc>
<script src="{REDOC_JS}"></script>
</body>
</html>
"#
    )
}

/// GET /docs — Swagger UI.
pub async fn swagger_ui(State(info): State<Arc<AppInfo>>) -> Html<String> {
    Html(swagger_ui_html(&info.title))
}

/// GET /redoc — ReDoc.
pub async fn redoc(State(info): State<Arc<AppInfo>>) -> Html<String> {
    Html(redoc_html(&info.title))
}
