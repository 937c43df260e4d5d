use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// Admin page assets embedded at compile time.
#[derive(RustEmbed)]
#[folder = "assets/admin"]
pub struct AdminAssets;

/// Serve the admin page from embedded assets with index fallback.
pub async fn serve_admin(uri: Uri) -> Response {
    let path = uri
        .path()
        .trim_start_matches("/admin")
        .trim_start_matches('/');

    let path = if path.is_empty() { "index.html" } else { path };

    match AdminAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
        }
        None => match AdminAssets::get("index.html") {
            Some(content) => {
                ([(header::CONTENT_TYPE, "text/html")], content.data).into_response()
            }
            None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
        },
    }
}
