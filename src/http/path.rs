//! # Utilidades de Paths
//! src/http/path.rs
//!
//! Decodificación de URLs y validación contra directory traversal.

/// Decodifica una URL: `%XX` → byte, `+` → espacio
///
/// Los escapes malformados (`%G1`, `%2` al final) se dejan tal cual.
///
/// # Ejemplo
/// ```
/// use server_support::http::url_decode;
///
/// assert_eq!(url_decode("/path%20with+spaces"), "/path with spaces");
/// assert_eq!(url_decode("/100%"), "/100%");
/// ```
pub fn url_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(high), Some(low)) => {
                        decoded.push((high << 4) | low);
                        i += 3;
                    }
                    _ => {
                        decoded.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            byte => {
                decoded.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Verifica que el path no intente salir del document root
///
/// # Ejemplo
/// ```
/// use server_support::http::is_safe_path;
///
/// assert!(is_safe_path("/css/style.css"));
/// assert!(!is_safe_path("/../etc/passwd"));
/// ```
pub fn is_safe_path(path: &str) -> bool {
    !path.contains("..")
}
