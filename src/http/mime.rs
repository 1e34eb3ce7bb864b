use std::path::Path;

/// Fallback for unknown or missing extensions.
pub const DEFAULT_MIME: &str = "text/plain";

/// Resolves a MIME type from the file extension (exact, case-sensitive match).
pub fn get_mime_type(path: &str) -> &'static str {
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => DEFAULT_MIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(get_mime_type("index.html"), "text/html");
        assert_eq!(get_mime_type("css/site.css"), "text/css");
        assert_eq!(get_mime_type("app.js"), "application/javascript");
        assert_eq!(get_mime_type("a.jpg"), "image/jpeg");
        assert_eq!(get_mime_type("a.jpeg"), "image/jpeg");
        assert_eq!(get_mime_type("logo.png"), "image/png");
    }

    #[test]
    fn unknown_or_missing_extension_is_plain_text() {
        assert_eq!(get_mime_type("README"), "text/plain");
        assert_eq!(get_mime_type("data.bin"), "text/plain");
        assert_eq!(get_mime_type("v1.2/notes"), "text/plain");
        assert_eq!(get_mime_type("PAGE.HTML"), "text/plain");
    }
}
