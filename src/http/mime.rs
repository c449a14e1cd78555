//! MIME type detection.
//!
//! Returns the Content-Type for a static asset based on its file extension.

use crate::routing::matcher::extension_of;

/// Fallback when neither the table nor the asset record knows the type.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Look up the Content-Type for a (lowercase or mixed case) extension.
pub fn content_type_for(extension: &str) -> Option<&'static str> {
    let content_type = match extension.to_ascii_lowercase().as_str() {
        // Text
        "html" | "htm" => "text/html; charset=UTF-8",
        "css" => "text/css",
        "txt" => "text/plain; charset=UTF-8",
        "xml" => "application/xml",
        "webmanifest" => "application/manifest+json",

        // JavaScript/WASM
        "js" | "mjs" => "application/javascript",
        "json" | "map" => "application/json",
        "wasm" => "application/wasm",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "avif" => "image/avif",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "eot" => "application/vnd.ms-fontobject",

        // Documents
        "pdf" => "application/pdf",

        _ => return None,
    };
    Some(content_type)
}

/// Content-Type for an asset served at `path`.
///
/// The extension table wins; the type recorded with the asset is used only
/// when the table has no entry; otherwise `application/octet-stream`.
pub fn resolve_content_type(path: &str, recorded: Option<&str>) -> String {
    extension_of(path)
        .and_then(content_type_for)
        .or(recorded)
        .unwrap_or(OCTET_STREAM)
        .to_string()
}
