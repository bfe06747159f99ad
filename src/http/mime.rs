//! # Tipos MIME
//! src/http/mime.rs

/// Tipo MIME según la extensión del archivo
///
/// Sin extensión o con una extensión desconocida retorna `text/plain`.
///
/// # Ejemplo
/// ```
/// use server_support::http::mime_type;
///
/// assert_eq!(mime_type("index.html"), "text/html");
/// assert_eq!(mime_type("unknown.xyz"), "text/plain");
/// ```
pub fn mime_type(filename: &str) -> &'static str {
    let Some(dot) = filename.rfind('.') else {
        return "text/plain";
    };

    match &filename[dot..] {
        ".html" | ".htm" => "text/html",
        ".css" => "text/css",
        ".js" => "application/javascript",
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".svg" => "image/svg+xml",
        ".json" => "application/json",
        _ => "text/plain",
    }
}
