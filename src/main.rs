//! # Server Support - Entry Point
//! src/main.rs
//!
//! Carga la configuración, inicializa el logger y registra en el access log
//! cada request line que llega por stdin (uno por línea).
//!
//! ```bash
//! printf 'GET /index.html HTTP/1.1\nPOST /api HTTP/1.0\n' | ./server_support --config server.conf
//! ```

use clap::Parser;
use server_support::config::{CliArgs, ServerConfig};
use server_support::http::{is_safe_path, Method, Request, StatusCode};
use server_support::logger::{AccessEntry, Logger};
use server_support::{log_info, log_warning};
use std::io::{self, BufRead};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Los requests de stdin se registran como locales
const CLIENT_IP: &str = "127.0.0.1";

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();

    let config = match ServerConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration validation failed: {}", e);
            std::process::exit(1);
        }
    };

    if args.show_config {
        if args.json {
            match config.to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => error!("Failed to render configuration: {}", e),
            }
        } else {
            config.print_summary();
        }
    }

    // Sin archivo de log no hay nada que hacer
    let logger = match Logger::init(config.log_path(), config.log_max_bytes) {
        Ok(logger) => logger,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    log_info!(logger, "Reading request lines from stdin (document root: {})", config.document_root);

    let mut processed = 0u64;
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log_warning!(logger, "Failed to read stdin: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        logger.log_access(&access_entry_for(&logger, &line));
        processed += 1;
    }

    log_info!(logger, "Processed {} requests", processed);
    logger.close();
}

/// Parsea un request line y arma la entrada con el status que correspondería
fn access_entry_for(logger: &Logger, line: &str) -> AccessEntry {
    let raw = format!("{}\r\n\r\n", line);

    match Request::parse(raw.as_bytes()) {
        Ok(request) => {
            let status = status_for(&request);
            AccessEntry::from_request(CLIENT_IP, &request, status.as_u16(), 0)
        }
        Err(e) => {
            log_warning!(logger, "Bad request line {:?}: {}", line, e);
            AccessEntry::new(CLIENT_IP, "-", "-", StatusCode::BadRequest.as_u16(), 0)
        }
    }
}

fn status_for(request: &Request) -> StatusCode {
    match request.method() {
        Method::Unsupported => StatusCode::NotImplemented,
        _ if !is_safe_path(request.path()) => StatusCode::Forbidden,
        _ => StatusCode::Ok,
    }
}
