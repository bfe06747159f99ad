//! # Nombres de Backup para la Rotación
//! src/logger/rotation.rs
//!
//! Cada rotación renombra el archivo actual a `<path>.<N>`, donde `N` es
//! el número de rotaciones completadas hasta ese momento:
//!
//! ```text
//! access.log  →  access.log.0  (primera rotación)
//! access.log  →  access.log.1  (segunda rotación)
//! ```

use std::path::{Path, PathBuf};

/// Largo máximo (en bytes) del nombre de backup
pub const MAX_BACKUP_NAME_LEN: usize = 1024;

/// Nombre usado cuando `<path>.<N>` excede [`MAX_BACKUP_NAME_LEN`]
pub const FALLBACK_BACKUP_NAME: &str = "access.log.backup";

/// Calcula el nombre del backup para la rotación número `rotation_count`
///
/// # Ejemplo
/// ```
/// use server_support::logger::rotation::backup_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(backup_path(Path::new("logs/access.log"), 3), PathBuf::from("logs/access.log.3"));
/// ```
pub fn backup_path(path: &Path, rotation_count: u64) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{}", rotation_count));

    if name.len() >= MAX_BACKUP_NAME_LEN {
        return fallback_backup_path(path);
    }

    PathBuf::from(name)
}

/// El backup de emergencia vive en el mismo directorio que el log
fn fallback_backup_path(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(FALLBACK_BACKUP_NAME),
        _ => PathBuf::from(FALLBACK_BACKUP_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_numbering() {
        let path = Path::new("access.log");
        assert_eq!(backup_path(path, 0), PathBuf::from("access.log.0"));
        assert_eq!(backup_path(path, 1), PathBuf::from("access.log.1"));
        assert_eq!(backup_path(path, 42), PathBuf::from("access.log.42"));
    }

    #[test]
    fn test_backup_keeps_directory() {
        let path = Path::new("/var/log/server/access.log");
        assert_eq!(backup_path(path, 7), PathBuf::from("/var/log/server/access.log.7"));
    }

    #[test]
    fn test_too_long_uses_fallback() {
        let long_name = "a".repeat(MAX_BACKUP_NAME_LEN);
        let path = PathBuf::from("/tmp/logs").join(long_name);

        assert_eq!(backup_path(&path, 0), PathBuf::from("/tmp/logs/access.log.backup"));
    }

    #[test]
    fn test_fallback_without_directory() {
        let path = PathBuf::from("b".repeat(MAX_BACKUP_NAME_LEN + 10));
        assert_eq!(backup_path(&path, 5), PathBuf::from(FALLBACK_BACKUP_NAME));
    }

    #[test]
    fn test_name_just_under_limit() {
        // "x...x.0" con largo total MAX - 1
        let path = PathBuf::from("x".repeat(MAX_BACKUP_NAME_LEN - 3));
        let backup = backup_path(&path, 0);
        assert_eq!(backup.as_os_str().len(), MAX_BACKUP_NAME_LEN - 1);
    }
}
