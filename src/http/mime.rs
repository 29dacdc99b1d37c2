//! Content type inference from the file extension.

/// Fallback for extensions not in the table.
pub const OCTET_STREAM: &str = "application/octet-stream";

const TABLE: &[(&str, &str)] = &[
    (".txt", "text/plain"),
    (".html", "text/html"),
    (".htm", "text/html"),
    (".css", "text/css"),
    (".js", "application/javascript"),
    (".xml", "text/xml"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".gif", "image/gif"),
];

/// Returns the MIME type for `path` based on its suffix (case-sensitive).
///
/// ```
/// # use filegate::http::mime::content_type_for;
/// assert_eq!(content_type_for("./index.html"), "text/html");
/// assert_eq!(content_type_for("./blob.bin"), "application/octet-stream");
/// ```
pub fn content_type_for(path: &str) -> &'static str {
    TABLE
        .iter()
        .find(|(ext, _)| path.ends_with(ext))
        .map(|(_, mime)| *mime)
        .unwrap_or(OCTET_STREAM)
}
