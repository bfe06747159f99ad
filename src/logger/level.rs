//! # Niveles de Log
//! src/logger/level.rs
//!
//! Etiquetas de severidad que acompañan a cada registro del log.

use std::fmt;

/// Nivel de un registro del log
///
/// No hay filtrado por nivel: el nivel solo selecciona la etiqueta
/// que aparece entre corchetes en la línea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Información detallada para depuración
    Debug,

    /// Operación normal del servidor
    Info,

    /// Problema potencial
    Warning,

    /// Algo salió mal
    Error,

    /// Registro de acceso HTTP
    Access,
}

impl LogLevel {
    /// Convierte el nivel a la etiqueta que se escribe en el log
    ///
    /// # Ejemplo
    /// ```
    /// use server_support::logger::LogLevel;
    /// assert_eq!(LogLevel::Warning.as_str(), "WARNING");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Access => "ACCESS",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(LogLevel::Debug.as_str(), "DEBUG");
        assert_eq!(LogLevel::Info.as_str(), "INFO");
        assert_eq!(LogLevel::Warning.as_str(), "WARNING");
        assert_eq!(LogLevel::Error.as_str(), "ERROR");
        assert_eq!(LogLevel::Access.as_str(), "ACCESS");
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(LogLevel::Info.to_string(), "INFO");
        assert_eq!(format!("[{}]", LogLevel::Error), "[ERROR]");
    }
}
