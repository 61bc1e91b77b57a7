//! Static assets and the missing-image placeholder.
//!
//! Files under the asset root are served by `ServeDir`. Image paths that do
//! not resolve still succeed with a 1x1 transparent GIF so the browser UI
//! shows no broken-image icons.

use axum::{http::header::CONTENT_TYPE, response::IntoResponse};

/// 1x1 transparent GIF89a.
pub const PLACEHOLDER_GIF: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xff, 0xff, 0xff, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x01, 0x44, 0x00, 0x3b,
];

/// Routes answered with the placeholder when the file is missing. The bare
/// prefixes are listed because a wildcard never matches an empty suffix.
pub const IMAGE_ROUTES: [&str; 4] = [
    "/images/",
    "/Images/",
    "/images/{*path}",
    "/Images/{*path}",
];

pub async fn placeholder_image() -> impl IntoResponse {
    ([(CONTENT_TYPE, "image/gif")], PLACEHOLDER_GIF)
}
