//! # Server Support
//! src/lib.rs
//!
//! Utilidades de soporte para un servidor HTTP concurrente: configuración,
//! parsing de requests y un logger append-only con rotación por tamaño
//! que comparten varios threads.
//!
//! ## Arquitectura
//!
//! - `config`: Carga y validación de `server.conf` + CLI
//! - `http`: Parsing del request line, headers de respuesta, MIME, paths
//! - `logger`: Logger concurrente con rotación (`access.log` → `access.log.N`)
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use server_support::config::ServerConfig;
//! use server_support::http::Request;
//! use server_support::logger::{AccessEntry, Logger};
//!
//! let config = ServerConfig::create(None).unwrap();
//! let logger = Logger::init(config.log_path(), config.log_max_bytes).unwrap();
//!
//! let request = Request::parse(b"GET /test.html HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();
//! logger.log_access(&AccessEntry::from_request("127.0.0.1", &request, 200, 1024));
//!
//! logger.close();
//! ```

pub mod config;
pub mod http;
pub mod logger;
