//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Parser del request line y de los headers.
//!
//! ## Formato de un Request
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! User-Agent: Mozilla/5.0\r\n
//! \r\n
//! ```
//!
//! Un método o versión desconocidos no son errores: quedan como
//! `Method::Unsupported` / `Version::Unknown` y el llamador decide
//! (por ejemplo responder 501). El token original se conserva para el log.

use super::path::url_decode;
use thiserror::Error;

/// Largo máximo del token de método
const MAX_METHOD_LEN: usize = 15;

/// Largo máximo del path (sin decodificar)
const MAX_PATH_LEN: usize = 1023;

/// Largo máximo del token de versión
const MAX_VERSION_LEN: usize = 15;

/// Métodos HTTP reconocidos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    Get,

    /// HEAD - Como GET pero solo retorna headers
    Head,

    /// Cualquier otro método (POST, PUT, ...)
    Unsupported,
}

impl Method {
    fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            _ => Method::Unsupported,
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Unsupported => "UNSUPPORTED",
        }
    }
}

/// Versiones HTTP reconocidas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Http10,
    Http11,
    Unknown,
}

impl Version {
    fn from_token(s: &str) -> Self {
        match s {
            "HTTP/1.0" => Version::Http10,
            "HTTP/1.1" => Version::Http11,
            _ => Version::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Http10 => "HTTP/1.0",
            Version::Http11 => "HTTP/1.1",
            Version::Unknown => "UNKNOWN",
        }
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request vacío
    #[error("Empty request")]
    EmptyRequest,

    /// Request line con menos de 3 partes, tokens demasiado largos o bytes no UTF-8
    #[error("Invalid request line format")]
    InvalidRequestLine,

    /// Header sin ':'
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,

    /// Token del método tal como llegó (ej: "POST")
    method_token: String,

    /// Path decodificado (ej: "/path with spaces.html")
    path: String,

    version: Version,

    /// Token de la versión tal como llegó (ej: "HTTP/2.0")
    version_token: String,

    /// Headers en el orden en que llegaron
    headers: Vec<(String, String)>,

    /// Todo lo que sigue al request line, sin procesar
    raw_headers: String,
}

impl Request {
    /// Parsea un request HTTP desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use server_support::http::{Method, Request, Version};
    ///
    /// let raw = b"GET /path%20with%20spaces.html HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), Method::Get);
    /// assert_eq!(request.path(), "/path with spaces.html");
    /// assert_eq!(request.version(), Version::Http11);
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let request_str = std::str::from_utf8(buffer)
            .map_err(|_| ParseError::InvalidRequestLine)?;

        // Las líneas vacías iniciales se ignoran
        let request_str = request_str.trim_start_matches(['\r', '\n']);
        if request_str.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let (request_line, raw_headers) = match request_str.find('\n') {
            Some(pos) => (&request_str[..pos], &request_str[pos + 1..]),
            None => (request_str, ""),
        };

        // 1. Request line
        let (method_token, raw_path, version_token) = Self::parse_request_line(request_line)?;

        // 2. Headers
        let headers = Self::parse_headers(raw_headers)?;

        Ok(Request {
            method: Method::from_token(method_token),
            method_token: method_token.to_string(),
            path: url_decode(raw_path),
            version: Version::from_token(version_token),
            version_token: version_token.to_string(),
            headers,
            raw_headers: raw_headers.to_string(),
        })
    }

    /// Separa `METHOD PATH VERSION`; las partes extra se ignoran
    fn parse_request_line(line: &str) -> Result<(&str, &str, &str), ParseError> {
        let mut parts = line.split_whitespace();

        let (Some(method), Some(path), Some(version)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseError::InvalidRequestLine);
        };

        if method.len() > MAX_METHOD_LEN
            || path.len() > MAX_PATH_LEN
            || version.len() > MAX_VERSION_LEN
        {
            return Err(ParseError::InvalidRequestLine);
        }

        Ok((method, path, version))
    }

    /// Parsea los headers `Name: Value` hasta la primera línea vacía
    fn parse_headers(raw: &str) -> Result<Vec<(String, String)>, ParseError> {
        let mut headers = Vec::new();

        for line in raw.lines() {
            if line.trim().is_empty() {
                break;
            }

            match line.split_once(':') {
                Some((name, value)) => {
                    headers.push((name.trim().to_string(), value.trim().to_string()));
                }
                None => return Err(ParseError::InvalidHeader(line.trim_end().to_string())),
            }
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    pub fn method(&self) -> Method {
        self.method
    }

    /// Token del método tal como llegó en el request line
    pub fn method_str(&self) -> &str {
        &self.method_token
    }

    /// Path decodificado
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Token de la versión tal como llegó en el request line
    pub fn version_str(&self) -> &str {
        &self.version_token
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene un header (sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Bloque de headers sin procesar
    pub fn raw_headers(&self) -> &str {
        &self.raw_headers
    }
}
