//! # Logger con Rotación
//! src/logger/mod.rs
//!
//! Logger append-only compartido entre threads. Cada registro se escribe
//! en el archivo (con flush inmediato) y se refleja en la consola.
//!
//! - `level`: niveles de severidad
//! - `format`: formato de las líneas (mensajes y Apache Combined Log Format)
//! - `rotation`: nombres de los backups
//! - `writer`: el logger y su protocolo de rotación
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use server_support::logger::{AccessEntry, Logger};
//! use server_support::{log_info, log_warning};
//!
//! let logger = Logger::init("access.log", 10 * 1024 * 1024).unwrap();
//!
//! log_info!(logger, "Processing request #{} from thread {}", 1, 0);
//! log_warning!(logger, "Queue at {}%", 90);
//! logger.log_access(
//!     &AccessEntry::new("127.0.0.1", "GET", "/index.html", 200, 2048)
//!         .with_user_agent("Mozilla/5.0"),
//! );
//!
//! logger.close();
//! ```

pub mod format;
pub mod level;
pub mod rotation;
pub mod writer;

pub use format::AccessEntry;
pub use level::LogLevel;
pub use writer::{Logger, LoggerError, LoggerOptions, DEFAULT_MAX_BYTES};

// ------------- Macros de conveniencia -------------

/// Escribe un registro DEBUG
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogLevel::Debug, format_args!($($arg)*))
    };
}

/// Escribe un registro INFO
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogLevel::Info, format_args!($($arg)*))
    };
}

/// Escribe un registro WARNING
#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogLevel::Warning, format_args!($($arg)*))
    };
}

/// Escribe un registro ERROR
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogLevel::Error, format_args!($($arg)*))
    };
}
