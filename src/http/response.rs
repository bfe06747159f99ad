//! # Headers de Respuesta HTTP
//! src/http/response.rs
//!
//! Construye el bloque de headers que precede al contenido de un archivo.
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Server: Concurrent-HTTP-Server\r\n
//! Date: Sat, 10 Oct 2026 13:55:36 GMT\r\n
//! Connection: close\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 2048\r\n
//! \r\n
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use server_support::http::ResponseHeader;
//!
//! let header = ResponseHeader::new(200)
//!     .with_content_type("text/html")
//!     .with_content_length(2048);
//!
//! let text = header.render();
//! assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
//! assert!(text.ends_with("Content-Length: 2048\r\n\r\n"));
//! ```

use super::status::reason_phrase;
use chrono::{DateTime, Utc};

/// Nombre que se anuncia en el header `Server`
pub const SERVER_NAME: &str = "Concurrent-HTTP-Server";

/// Formato RFC 1123 del header `Date`
const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Headers de una respuesta HTTP/1.1
#[derive(Debug, Clone)]
pub struct ResponseHeader {
    /// Código numérico (los desconocidos se anuncian como "Unknown")
    status: u16,

    content_type: Option<String>,

    /// `Content-Length` solo se escribe si es mayor que cero
    content_length: u64,

    date: DateTime<Utc>,
}

impl ResponseHeader {
    /// Crea los headers para un código de estado, fechados ahora
    pub fn new(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            content_length: 0,
            date: Utc::now(),
        }
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    pub fn with_content_length(mut self, content_length: u64) -> Self {
        self.content_length = content_length;
        self
    }

    /// Fija la fecha del header `Date`
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Genera el texto completo, terminado en la línea vacía
    pub fn render(&self) -> String {
        let mut header = format!(
            "HTTP/1.1 {} {}\r\nServer: {}\r\nDate: {}\r\nConnection: close\r\n",
            self.status,
            reason_phrase(self.status),
            SERVER_NAME,
            self.date.format(DATE_FORMAT),
        );

        if let Some(content_type) = &self.content_type {
            header.push_str(&format!("Content-Type: {}\r\n", content_type));
        }

        if self.content_length > 0 {
            header.push_str(&format!("Content-Length: {}\r\n", self.content_length));
        }

        // Línea vacía que separa headers del body
        header.push_str("\r\n");
        header
    }

    /// Convierte los headers a bytes listos para enviar por el socket
    pub fn to_bytes(&self) -> Vec<u8> {
        self.render().into_bytes()
    }
}
