//! # Logger Concurrente con Rotación por Tamaño
//! src/logger/writer.rs
//!
//! Escribe cada registro en el archivo de log y en la consola.
//! Todas las operaciones pasan por una única sección crítica:
//!
//! ```text
//! lock → rotar si hace falta → formatear → archivo (flush) → consola → contador → unlock
//! ```
//!
//! Con el lock tomado ninguna línea queda cortada ni intercalada, y el
//! archivo nunca se renombra mientras otro thread escribe en él.

use crate::logger::format::{self, AccessEntry};
use crate::logger::level::LogLevel;
use crate::logger::rotation;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::error;

/// Tamaño por defecto a partir del cual se rota el archivo (10 MiB)
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Errores que puede devolver la inicialización del logger
///
/// Es el único error que cruza hacia el llamador: una vez inicializado,
/// el logger nunca devuelve errores ni hace panic.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// No se pudo crear o abrir el archivo de log
    #[error("Failed to open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Umbral de rotación inválido
    #[error("Invalid max log size: {0} (must be > 0)")]
    InvalidMaxBytes(u64),
}

/// Opciones de inicialización del logger
pub struct LoggerOptions {
    path: PathBuf,
    max_bytes: u64,
    console: Option<Box<dyn Write + Send>>,
}

impl LoggerOptions {
    /// Opciones por defecto: umbral de 10 MiB y espejo en stdout
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_bytes: DEFAULT_MAX_BYTES,
            console: Some(Box::new(io::stdout())),
        }
    }

    pub fn max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Reemplaza la consola por otro destino (o `None` para no reflejar)
    pub fn console(mut self, console: Option<Box<dyn Write + Send>>) -> Self {
        self.console = console;
        self
    }
}

/// Estado compartido del logger, siempre accedido bajo el lock
struct LoggerState {
    /// Ruta del archivo principal (inmutable)
    path: PathBuf,

    /// Handle abierto en modo append. `None` después de `close()`
    /// o si falló la reapertura durante una rotación
    file: Option<File>,

    console: Option<Box<dyn Write + Send>>,

    /// Umbral de rotación en bytes
    max_bytes: u64,

    /// Bytes escritos desde la última apertura o rotación
    current_bytes: u64,

    /// Rotaciones completadas; nombra los backups
    rotation_count: u64,

    closed: bool,
}

/// Logger thread-safe con rotación por tamaño
///
/// Es un handle barato de clonar: todos los clones comparten el mismo
/// archivo y los mismos contadores.
///
/// # Ejemplo
/// ```no_run
/// use server_support::logger::{AccessEntry, Logger, LogLevel};
///
/// let logger = Logger::init("access.log", 10 * 1024 * 1024).unwrap();
/// logger.log(LogLevel::Info, format_args!("Processing request #{}", 1));
/// logger.log_access(&AccessEntry::new("127.0.0.1", "GET", "/index.html", 200, 2048));
/// logger.close();
/// ```
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Mutex<LoggerState>>,
}

impl Logger {
    /// Abre `path` en modo append y devuelve el logger listo para usar
    ///
    /// El contador de bytes arranca desde el tamaño actual del archivo,
    /// así un reinicio del proceso sigue contando hacia la rotación.
    pub fn init(path: impl AsRef<Path>, max_bytes: u64) -> Result<Self, LoggerError> {
        Self::init_with(LoggerOptions::new(path).max_bytes(max_bytes))
    }

    /// Igual que [`Logger::init`] pero con opciones completas
    pub fn init_with(options: LoggerOptions) -> Result<Self, LoggerError> {
        if options.max_bytes == 0 {
            return Err(LoggerError::InvalidMaxBytes(options.max_bytes));
        }

        let file = open_append(&options.path).map_err(|source| LoggerError::Open {
            path: options.path.clone(),
            source,
        })?;

        let current_bytes = file.metadata().map(|meta| meta.len()).unwrap_or(0);

        let logger = Self {
            inner: Arc::new(Mutex::new(LoggerState {
                path: options.path,
                file: Some(file),
                console: options.console,
                max_bytes: options.max_bytes,
                current_bytes,
                rotation_count: 0,
                closed: false,
            })),
        };

        {
            let mut state = logger.lock();
            let message = format!("Logger initialized - Log file: {}", state.path.display());
            state.rotate_if_needed();
            state.write_record(LogLevel::Info, &message);
        }

        Ok(logger)
    }

    /// Escribe un mensaje con nivel
    ///
    /// Después de `close()` es un no-op.
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        // Formatear fuera del lock: un Display del llamador podría loguear
        let message = args.to_string();

        let mut state = self.lock();
        if state.closed {
            return;
        }

        state.rotate_if_needed();
        state.write_record(level, &message);
    }

    /// Escribe un registro de acceso en Apache Combined Log Format
    pub fn log_access(&self, entry: &AccessEntry) {
        let mut state = self.lock();
        if state.closed {
            return;
        }

        state.rotate_if_needed();
        let line = format::format_access(&format::timestamp_now(), entry);
        state.emit(&line);
    }

    /// Escribe el aviso de cierre, hace flush y cierra el archivo
    ///
    /// Llamarlo más de una vez no tiene efecto.
    pub fn close(&self) {
        let mut state = self.lock();
        if state.closed {
            return;
        }

        state.rotate_if_needed();
        state.write_record(LogLevel::Info, "Logger shutting down");

        if let Some(mut file) = state.file.take() {
            if let Err(e) = file.flush().and_then(|_| file.sync_all()) {
                error!(path = %state.path.display(), "Failed to flush log file on close: {}", e);
            }
        }
        if let Some(console) = state.console.as_mut() {
            let _ = console.flush();
        }

        state.closed = true;
    }

    /// Ruta del archivo principal
    pub fn path(&self) -> PathBuf {
        self.lock().path.clone()
    }

    pub fn max_bytes(&self) -> u64 {
        self.lock().max_bytes
    }

    /// Bytes contados desde la última apertura o rotación
    pub fn current_bytes(&self) -> u64 {
        self.lock().current_bytes
    }

    /// Número de rotaciones completadas
    pub fn rotation_count(&self) -> u64 {
        self.lock().rotation_count
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Un panic de otro thread no debe dejar al logger inutilizable
    fn lock(&self) -> MutexGuard<'_, LoggerState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LoggerState {
    /// Rota el archivo si el contador alcanzó el umbral
    ///
    /// Los fallos se reportan y se absorben. Si la reapertura falla,
    /// los contadores no cambian y la siguiente escritura vuelve a intentar.
    fn rotate_if_needed(&mut self) {
        if self.current_bytes < self.max_bytes {
            return;
        }

        // Cerrar el handle actual (drop cierra el descriptor)
        if let Some(mut file) = self.file.take() {
            let _ = file.flush();
        }

        let backup = rotation::backup_path(&self.path, self.rotation_count);

        if let Err(e) = fs::rename(&self.path, &backup) {
            error!(
                path = %self.path.display(),
                backup = %backup.display(),
                "Failed to rotate log file: {}", e
            );
        }

        match open_append(&self.path) {
            Ok(file) => self.file = Some(file),
            Err(e) => {
                error!(
                    path = %self.path.display(),
                    "Failed to create new log file after rotation: {}", e
                );
                return;
            }
        }

        self.current_bytes = 0;
        self.rotation_count += 1;

        let message = format!("Log file rotated to {}", backup.display());
        self.write_record(LogLevel::Info, &message);
    }

    fn write_record(&mut self, level: LogLevel, message: &str) {
        let line = format::format_message(&format::timestamp_now(), level.as_str(), message);
        self.emit(&line);
    }

    /// Escribe la línea al archivo (con flush) y luego a la consola
    fn emit(&mut self, line: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        if let Err(e) = file.write_all(line.as_bytes()).and_then(|_| file.flush()) {
            error!(path = %self.path.display(), "Failed to write log line: {}", e);
            return;
        }

        if let Some(console) = self.console.as_mut() {
            let _ = console.write_all(line.as_bytes()).and_then(|_| console.flush());
        }

        self.current_bytes += line.len() as u64;
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Consola en memoria para verificar el espejo
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn quiet_logger(path: &Path, max_bytes: u64) -> Logger {
        Logger::init_with(LoggerOptions::new(path).max_bytes(max_bytes).console(None)).unwrap()
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_init_writes_startup_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("access.log");
        let logger = quiet_logger(&path, DEFAULT_MAX_BYTES);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("[INFO] Logger initialized - Log file: "));
        assert!(lines[0].ends_with("access.log"));
        assert_eq!(logger.rotation_count(), 0);
    }

    #[test]
    fn test_init_fails_on_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_such_dir").join("access.log");

        let result = Logger::init(&path, DEFAULT_MAX_BYTES);
        assert!(matches!(result, Err(LoggerError::Open { .. })));
    }

    #[test]
    fn test_init_rejects_zero_threshold() {
        let dir = TempDir::new().unwrap();
        let result = Logger::init(dir.path().join("a.log"), 0);
        assert!(matches!(result, Err(LoggerError::InvalidMaxBytes(0))));
    }

    #[test]
    fn test_counter_is_exact_byte_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("access.log");
        let logger = quiet_logger(&path, DEFAULT_MAX_BYTES);

        logger.log(LogLevel::Debug, format_args!("detalle {}", 1));
        logger.log_access(&AccessEntry::new("127.0.0.1", "GET", "/", 200, 5));

        let on_disk = fs::metadata(&path).unwrap().len();
        assert_eq!(logger.current_bytes(), on_disk);
    }

    #[test]
    fn test_counter_seeded_from_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("access.log");
        fs::write(&path, vec![b'x'; 900]).unwrap();

        let logger = quiet_logger(&path, DEFAULT_MAX_BYTES);
        let on_disk = fs::metadata(&path).unwrap().len();

        assert!(logger.current_bytes() > 900);
        assert_eq!(logger.current_bytes(), on_disk);
    }

    #[test]
    fn test_console_mirrors_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("access.log");
        let console = SharedBuffer::default();

        let logger = Logger::init_with(
            LoggerOptions::new(&path).console(Some(Box::new(console.clone()))),
        )
        .unwrap();
        logger.log(LogLevel::Warning, format_args!("disco casi lleno"));
        logger.log_access(&AccessEntry::new("10.0.0.5", "GET", "/logo.png", 200, 15643));
        logger.close();

        assert_eq!(console.contents(), fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn test_rotation_preserves_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("access.log");
        let logger = quiet_logger(&path, 200);

        while logger.current_bytes() < 200 {
            logger.log(LogLevel::Info, format_args!("llenando el archivo"));
        }
        let before = fs::read_to_string(&path).unwrap();
        assert_eq!(logger.rotation_count(), 0);

        logger.log(LogLevel::Info, format_args!("primera linea nueva"));

        assert_eq!(logger.rotation_count(), 1);
        let backup = dir.path().join("access.log.0");
        assert_eq!(fs::read_to_string(&backup).unwrap(), before);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(&format!("Log file rotated to {}", backup.display())));
        assert!(lines[1].ends_with("primera linea nueva"));
    }

    #[test]
    fn test_rotation_reopen_failure_degrades_silently() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("logs");
        fs::create_dir(&sub).unwrap();
        let path = sub.join("access.log");
        let logger = quiet_logger(&path, 1);

        // Sin directorio no se puede renombrar ni reabrir
        fs::remove_dir_all(&sub).unwrap();
        logger.log(LogLevel::Error, format_args!("se pierde"));
        logger.log(LogLevel::Error, format_args!("tambien se pierde"));

        assert_eq!(logger.rotation_count(), 0);
        assert!(!path.exists());

        // Al volver el directorio la siguiente escritura rota y recupera
        fs::create_dir(&sub).unwrap();
        logger.log(LogLevel::Info, format_args!("recuperado"));

        assert_eq!(logger.rotation_count(), 1);
        let lines = read_lines(&path);
        assert!(lines.last().unwrap().ends_with("recuperado"));
    }

    #[test]
    fn test_rotation_rename_failure_keeps_writing_to_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("access.log");

        // El nombre del backup está ocupado por un directorio no vacío
        let blocked = dir.path().join("access.log.0");
        fs::create_dir(&blocked).unwrap();
        fs::write(blocked.join("ocupado"), "x").unwrap();

        let logger = quiet_logger(&path, 1);
        let before = fs::read_to_string(&path).unwrap();

        logger.log(LogLevel::Info, format_args!("sigue escribiendo"));

        assert_eq!(logger.rotation_count(), 1);
        assert!(blocked.is_dir());

        let after = fs::read_to_string(&path).unwrap();
        assert!(after.starts_with(&before));
        assert_eq!(logger.current_bytes(), (after.len() - before.len()) as u64);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Log file rotated to "));
        assert!(lines[2].ends_with("sigue escribiendo"));
    }

    #[test]
    fn test_close_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("access.log");
        let logger = quiet_logger(&path, DEFAULT_MAX_BYTES);

        logger.close();
        let after_first = fs::read_to_string(&path).unwrap();
        assert!(after_first.trim_end().ends_with("[INFO] Logger shutting down"));

        logger.close();
        logger.log(LogLevel::Info, format_args!("ignorado"));
        logger.log_access(&AccessEntry::new("127.0.0.1", "GET", "/", 200, 1));

        assert!(logger.is_closed());
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
    }

    #[test]
    fn test_clones_share_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("access.log");
        let logger = quiet_logger(&path, DEFAULT_MAX_BYTES);
        let other = logger.clone();

        other.log(LogLevel::Info, format_args!("desde el clon"));
        assert_eq!(logger.current_bytes(), other.current_bytes());

        other.close();
        assert!(logger.is_closed());
    }
}
