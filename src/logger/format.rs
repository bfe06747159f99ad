//! # Formato de las Líneas del Log
//! src/logger/format.rs
//!
//! Los analizadores de logs dependen byte a byte de este formato.
//!
//! ## Mensaje con nivel
//!
//! ```text
//! [10/Oct/2026:13:55:36 -0300] [INFO] Logger initialized - Log file: access.log
//! ```
//!
//! ## Acceso HTTP (Apache Combined Log Format)
//!
//! ```text
//! 127.0.0.1 - - [10/Oct/2026:13:55:36 -0300] "GET /index.html HTTP/1.1" 200 2048 "-" "Mozilla/5.0"
//! ```
//!
//! Cada llamada produce exactamente una línea: los caracteres de control
//! se escriben como `\xNN` y, en los campos del access log, `"` y `\`
//! se escapan con `\` (igual que Apache).

use crate::http::Request;
use chrono::Local;
use std::borrow::Cow;
use std::fmt::Write;

/// Formato `strftime` del timestamp (convención de los logs HTTP)
pub const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Versión HTTP que se escribe cuando la entrada no indica otra
pub const DEFAULT_VERSION: &str = "HTTP/1.1";

/// Placeholder para campos ausentes
const MISSING_FIELD: &str = "-";

/// Hora local actual en el formato del log
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Construye la línea de un mensaje con nivel, terminada en `\n`
pub fn format_message(timestamp: &str, level: &str, message: &str) -> String {
    format!("[{}] [{}] {}\n", timestamp, level, escape(message, false))
}

/// Construye la línea de acceso, terminada en `\n`
pub fn format_access(timestamp: &str, entry: &AccessEntry) -> String {
    format!(
        "{} - - [{}] \"{} {} {}\" {} {} \"{}\" \"{}\"\n",
        escape(&entry.client_ip, true),
        timestamp,
        escape(&entry.method, true),
        escape(&entry.url, true),
        escape(&entry.version, true),
        entry.status_code,
        entry.response_size,
        escape(entry.referer.as_deref().unwrap_or(MISSING_FIELD), true),
        escape(entry.user_agent.as_deref().unwrap_or(MISSING_FIELD), true),
    )
}

/// Escapa los caracteres de control como `\xNN`
///
/// Con `quoted` también escapa `"` y `\`, que delimitan los campos
/// entre comillas del access log.
fn escape(field: &str, quoted: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| c.is_control() || (quoted && matches!(c, '"' | '\\'));

    if !field.chars().any(needs_escape) {
        return Cow::Borrowed(field);
    }

    let mut escaped = String::with_capacity(field.len() + 8);
    for c in field.chars() {
        match c {
            '"' | '\\' if quoted => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_control() => {
                let _ = write!(escaped, "\\x{:02x}", c as u32);
            }
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Datos de un registro de acceso HTTP
///
/// # Ejemplo
/// ```
/// use server_support::logger::AccessEntry;
///
/// let entry = AccessEntry::new("127.0.0.1", "GET", "/index.html", 200, 2048)
///     .with_user_agent("Mozilla/5.0");
///
/// assert_eq!(entry.version, "HTTP/1.1");
/// assert_eq!(entry.referer, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEntry {
    pub client_ip: String,
    pub method: String,
    pub url: String,
    /// Versión del request line (`HTTP/1.1` por defecto)
    pub version: String,
    pub status_code: u16,
    pub response_size: u64,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
}

impl AccessEntry {
    /// Crea una entrada sin referer ni user agent
    pub fn new(client_ip: &str, method: &str, url: &str, status_code: u16, response_size: u64) -> Self {
        Self {
            client_ip: client_ip.to_string(),
            method: method.to_string(),
            url: url.to_string(),
            version: DEFAULT_VERSION.to_string(),
            status_code,
            response_size,
            referer: None,
            user_agent: None,
        }
    }

    /// Crea una entrada a partir de un request parseado
    ///
    /// Usa el método, path y versión reales del request, y toma
    /// `Referer` y `User-Agent` de sus headers si existen.
    pub fn from_request(client_ip: &str, request: &Request, status_code: u16, response_size: u64) -> Self {
        Self {
            client_ip: client_ip.to_string(),
            method: request.method_str().to_string(),
            url: request.path().to_string(),
            version: request.version_str().to_string(),
            status_code,
            response_size,
            referer: request.header("Referer").map(str::to_string),
            user_agent: request.header("User-Agent").map(str::to_string),
        }
    }

    pub fn with_referer(mut self, referer: &str) -> Self {
        self.referer = Some(referer.to_string());
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    /// Reemplaza la versión HTTP escrita en el request line
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }
}
