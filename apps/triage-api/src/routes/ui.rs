//! Form UI shell
//!
//! The UI is a static single-page script; the server only hands out the
//! HTML shell and the script itself. All view state lives in the
//! browser.

use axum::http::header;
use axum::response::{Html, IntoResponse};

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Anesthesiology Triage</title>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
      .triage-red { background-color: #ef4444; color: white; }
      .triage-orange { background-color: #f97316; color: white; }
      .triage-yellow { background-color: #fbbf24; color: black; }
      .triage-green { background-color: #22c55e; color: white; }
      .triage-blue { background-color: #3b82f6; color: white; }
    </style>
</head>
<body class="bg-gray-50">
    <div id="app"></div>
    <script src="/static/app.js"></script>
</body>
</html>
"#;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /static/app.js
pub async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        include_str!("../../static/app.js"),
    )
}
