//! # Módulo HTTP
//!
//! Piezas del protocolo que necesitan el logger y el servidor de archivos:
//!
//! - Parsing del request line y headers
//! - Construcción de headers de respuesta
//! - Códigos de estado y tipos MIME
//! - Decodificación de URLs y validación de paths
//!
//! ### Formato de Request
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! El logger solo usa el método, el path decodificado y la versión;
//! no valida nada por su cuenta.

pub mod mime;      // Tipos MIME por extensión
pub mod path;      // url_decode e is_safe_path
pub mod request;   // Parsing de HTTP requests
pub mod response;  // Headers de respuesta
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use mime::mime_type;
pub use path::{is_safe_path, url_decode};
pub use request::{Method, ParseError, Request, Version};
pub use response::ResponseHeader;
pub use status::StatusCode;
