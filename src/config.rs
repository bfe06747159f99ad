//! # Configuración del Servidor
//! src/config.rs
//!
//! Carga la configuración desde un archivo `KEY = VALUE` (por ejemplo
//! `server.conf`), con valores por defecto para todo lo que falte, y
//! permite sobrescribir valores desde la línea de comandos o variables
//! de entorno.
//!
//! ## Formato del archivo
//!
//! ```text
//! # Comentario
//! PORT = 8080
//! DOCUMENT_ROOT = /var/www/html
//! NUM_WORKERS = 4
//! THREADS_PER_WORKER = 10
//! MAX_QUEUE_SIZE = 100
//! LOG_FILE = access.log
//! LOG_MAX_BYTES = 10485760
//! CACHE_SIZE_MB = 10
//! TIMEOUT_SECONDS = 30
//! ```
//!
//! ### CLI
//! ```bash
//! ./server_support --config server.conf --log-file /tmp/access.log
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! SERVER_CONFIG=server.conf LOG_MAX_BYTES=1048576 ./server_support
//! ```

use clap::Parser;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Largo máximo de las rutas configurables
pub const MAX_PATH_LENGTH: usize = 512;

/// Umbral de rotación por defecto (10 MiB)
pub const DEFAULT_LOG_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Errores de carga y validación de la configuración
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid port: {0}")]
    InvalidPort(u32),

    #[error("Invalid document root: {0:?}")]
    InvalidDocumentRoot(String),

    #[error("Invalid log file: {0:?}")]
    InvalidLogFile(String),

    #[error("Invalid number of workers: {0}")]
    InvalidNumWorkers(usize),

    #[error("Invalid threads per worker: {0}")]
    InvalidThreadsPerWorker(usize),

    #[error("Invalid max queue size: {0}")]
    InvalidMaxQueueSize(usize),

    #[error("Invalid max log size: {0}")]
    InvalidLogMaxBytes(u64),

    #[error("Invalid cache size: {0} MB")]
    InvalidCacheSize(u64),

    #[error("Invalid timeout: {0} seconds")]
    InvalidTimeout(u64),
}

/// Argumentos de línea de comandos
///
/// Todo es opcional: lo que no se indique sale del archivo de
/// configuración o de los valores por defecto.
#[derive(Debug, Clone, Parser)]
#[command(name = "server_support")]
#[command(about = "Logger de accesos HTTP con rotación por tamaño")]
#[command(version = "0.1.0")]
pub struct CliArgs {
    /// Archivo de configuración (formato KEY = VALUE)
    #[arg(short, long, env = "SERVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Puerto del servidor
    #[arg(short, long, env = "HTTP_PORT")]
    pub port: Option<u32>,

    /// Ruta del archivo de log
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<String>,

    /// Tamaño en bytes a partir del cual se rota el log
    #[arg(long, env = "LOG_MAX_BYTES")]
    pub log_max_bytes: Option<u64>,

    /// Imprime la configuración efectiva antes de arrancar
    #[arg(long)]
    pub show_config: bool,

    /// Con --show-config, imprime en JSON
    #[arg(long, requires = "show_config")]
    pub json: bool,
}

/// Configuración del servidor
///
/// `num_workers`, `threads_per_worker` y `max_queue_size` se validan
/// pero ningún componente de este crate los consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    /// Puerto en el que escucha el servidor (1-65535)
    pub port: u16,

    /// Directorio raíz de los archivos servidos
    pub document_root: String,

    /// Número de procesos worker
    pub num_workers: usize,

    /// Threads por cada worker
    pub threads_per_worker: usize,

    /// Capacidad máxima de la cola de conexiones
    pub max_queue_size: usize,

    /// Ruta del archivo de log
    pub log_file: String,

    /// Umbral de rotación del log en bytes
    pub log_max_bytes: u64,

    /// Tamaño del cache de archivos en MB
    pub cache_size_mb: u64,

    /// Timeout de conexión en segundos
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            document_root: "/var/www/html".to_string(),
            num_workers: 4,
            threads_per_worker: 10,
            max_queue_size: 100,
            log_file: "access.log".to_string(),
            log_max_bytes: DEFAULT_LOG_MAX_BYTES,
            cache_size_mb: 10,
            timeout_seconds: 30,
        }
    }
}

impl ServerConfig {
    /// Carga desde un archivo si se indica, o usa los valores por defecto
    pub fn create(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Carga y valida la configuración desde un archivo
    ///
    /// Las líneas inválidas, claves desconocidas o valores rechazados se
    /// reportan y se ignoran; solo falla si no se puede leer el archivo
    /// o si la configuración final no es válida.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents)
    }

    /// Parsea el contenido de un archivo de configuración
    ///
    /// # Ejemplo
    /// ```
    /// use server_support::config::ServerConfig;
    ///
    /// let config = ServerConfig::parse("PORT = 9090\n# comentario\nLOG_FILE = /tmp/a.log\n").unwrap();
    /// assert_eq!(config.port, 9090);
    /// assert_eq!(config.log_file, "/tmp/a.log");
    /// assert_eq!(config.num_workers, 4);
    /// ```
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for (index, line) in contents.lines().enumerate() {
            let line_num = index + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                warn!(line = line_num, "Invalid config line: {}", line);
                continue;
            };

            config.apply(key.trim(), value.trim(), line_num);
        }

        config.validate()?;
        Ok(config)
    }

    /// Construye la configuración efectiva a partir de la CLI
    ///
    /// Los valores de la CLI tienen prioridad sobre los del archivo.
    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::create(args.config.as_deref())?;

        if let Some(port) = args.port {
            config.set_port(port)?;
        }
        if let Some(log_file) = &args.log_file {
            config.set_log_file(log_file)?;
        }
        if let Some(log_max_bytes) = args.log_max_bytes {
            config.set_log_max_bytes(log_max_bytes)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Aplica una entrada `KEY = VALUE`; los rechazos se reportan y se ignoran
    fn apply(&mut self, key: &str, value: &str, line_num: usize) {
        let result = match key {
            "PORT" => parse_value(key, value).and_then(|v| self.set_port(v)),
            "DOCUMENT_ROOT" => self.set_document_root(value),
            "NUM_WORKERS" => parse_value(key, value).and_then(|v| self.set_num_workers(v)),
            "THREADS_PER_WORKER" => {
                parse_value(key, value).and_then(|v| self.set_threads_per_worker(v))
            }
            "MAX_QUEUE_SIZE" => parse_value(key, value).and_then(|v| self.set_max_queue_size(v)),
            "LOG_FILE" => self.set_log_file(value),
            "LOG_MAX_BYTES" => parse_value(key, value).and_then(|v| self.set_log_max_bytes(v)),
            "CACHE_SIZE_MB" => parse_value(key, value).and_then(|v| self.set_cache_size_mb(v)),
            "TIMEOUT_SECONDS" => parse_value(key, value).and_then(|v| self.set_timeout_seconds(v)),
            _ => {
                warn!(line = line_num, "Unknown config option: {}", key);
                return;
            }
        };

        if let Err(e) = result {
            warn!(line = line_num, "Ignoring {}: {}", key, e);
        }
    }

    /// Valida la configuración completa
    ///
    /// Que el document root no exista es solo un warning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(0));
        }
        if self.num_workers < 1 {
            return Err(ConfigError::InvalidNumWorkers(self.num_workers));
        }
        if self.threads_per_worker < 1 {
            return Err(ConfigError::InvalidThreadsPerWorker(self.threads_per_worker));
        }
        if self.max_queue_size < 1 {
            return Err(ConfigError::InvalidMaxQueueSize(self.max_queue_size));
        }
        if !is_valid_path(&self.log_file) {
            return Err(ConfigError::InvalidLogFile(self.log_file.clone()));
        }
        if self.log_max_bytes < 1 {
            return Err(ConfigError::InvalidLogMaxBytes(self.log_max_bytes));
        }

        if !Path::new(&self.document_root).is_dir() {
            warn!("Document root does not exist: {}", self.document_root);
        }

        Ok(())
    }

    // === Setters con validación ===
    // Si el valor es rechazado la configuración no cambia.

    pub fn set_port(&mut self, port: u32) -> Result<(), ConfigError> {
        match u16::try_from(port) {
            Ok(port) if port >= 1 => {
                self.port = port;
                Ok(())
            }
            _ => Err(ConfigError::InvalidPort(port)),
        }
    }

    pub fn set_document_root(&mut self, document_root: &str) -> Result<(), ConfigError> {
        if !is_valid_path(document_root) {
            return Err(ConfigError::InvalidDocumentRoot(document_root.to_string()));
        }
        self.document_root = document_root.to_string();
        Ok(())
    }

    pub fn set_num_workers(&mut self, num_workers: usize) -> Result<(), ConfigError> {
        if num_workers < 1 {
            return Err(ConfigError::InvalidNumWorkers(num_workers));
        }
        self.num_workers = num_workers;
        Ok(())
    }

    pub fn set_threads_per_worker(&mut self, threads_per_worker: usize) -> Result<(), ConfigError> {
        if threads_per_worker < 1 {
            return Err(ConfigError::InvalidThreadsPerWorker(threads_per_worker));
        }
        self.threads_per_worker = threads_per_worker;
        Ok(())
    }

    pub fn set_max_queue_size(&mut self, max_queue_size: usize) -> Result<(), ConfigError> {
        if max_queue_size < 1 {
            return Err(ConfigError::InvalidMaxQueueSize(max_queue_size));
        }
        self.max_queue_size = max_queue_size;
        Ok(())
    }

    pub fn set_log_file(&mut self, log_file: &str) -> Result<(), ConfigError> {
        if !is_valid_path(log_file) {
            return Err(ConfigError::InvalidLogFile(log_file.to_string()));
        }
        self.log_file = log_file.to_string();
        Ok(())
    }

    pub fn set_log_max_bytes(&mut self, log_max_bytes: u64) -> Result<(), ConfigError> {
        if log_max_bytes < 1 {
            return Err(ConfigError::InvalidLogMaxBytes(log_max_bytes));
        }
        self.log_max_bytes = log_max_bytes;
        Ok(())
    }

    pub fn set_cache_size_mb(&mut self, cache_size_mb: u64) -> Result<(), ConfigError> {
        if cache_size_mb < 1 {
            return Err(ConfigError::InvalidCacheSize(cache_size_mb));
        }
        self.cache_size_mb = cache_size_mb;
        Ok(())
    }

    pub fn set_timeout_seconds(&mut self, timeout_seconds: u64) -> Result<(), ConfigError> {
        if timeout_seconds < 1 {
            return Err(ConfigError::InvalidTimeout(timeout_seconds));
        }
        self.timeout_seconds = timeout_seconds;
        Ok(())
    }

    // === Getters derivados ===

    /// Dirección de bind (todas las interfaces)
    pub fn address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Ruta del log como `Path`
    pub fn log_path(&self) -> &Path {
        Path::new(&self.log_file)
    }

    /// Configuración en JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║                  Server Configuration                        ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Port:               {}", self.port);
        println!("   Document Root:      {}", self.document_root);
        println!("   Timeout:            {} seconds", self.timeout_seconds);
        println!();
        println!("👷 Workers:");
        println!("   Workers:            {}", self.num_workers);
        println!("   Threads per Worker: {}", self.threads_per_worker);
        println!("   Max Queue Size:     {}", self.max_queue_size);
        println!("   Cache Size:         {} MB", self.cache_size_mb);
        println!();
        println!("📝 Logging:");
        println!("   Log File:           {}", self.log_file);
        println!(
            "   Rotate at:          {} bytes ({:.1} MiB)",
            self.log_max_bytes,
            self.log_max_bytes as f64 / (1024.0 * 1024.0)
        );
        println!();
        println!("═══════════════════════════════════════════════════════════════");
        println!();
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn is_valid_path(path: &str) -> bool {
    !path.is_empty() && path.len() < MAX_PATH_LENGTH
}
