//! # Configuration File I/O
//!
//! Saves and loads [`ColumnConfig`] documents:
//! - **Atomic saves**: write `<file>.tmp`, fsync, rename over the target
//! - **File locking**: `<file>.lock` with holder metadata plus an OS lock
//! - **Version validation**: refuse documents from an incompatible schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use strut_core::file_io::{save_config, load_config, FileLock};
//! use strut_core::project::ColumnConfig;
//! use std::path::Path;
//!
//! let config = ColumnConfig::new("P-1");
//! let path = Path::new("p1.strut.json");
//!
//! let lock = FileLock::acquire(path, "ana@estudio.es").unwrap();
//! save_config(&config, path).unwrap();
//! drop(lock);
//!
//! let reopened = load_config(path).unwrap();
//! assert_eq!(reopened.meta.id, config.meta.id);
//! ```

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{CalcError, CalcResult};
use crate::project::{ColumnConfig, SCHEMA_VERSION};

/// File name used by [`default_config_path`]
pub const DEFAULT_CONFIG_FILE: &str = "default.strut.json";

/// Locks older than this are considered abandoned
const STALE_LOCK_HOURS: i64 = 24;

/// Metadata written to the `.lock` file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Held by a process that no longer runs, or older than a day
    fn is_stale(&self) -> bool {
        if hostname().as_deref() == Some(self.machine.as_str()) && !process_alive(self.pid) {
            return true;
        }
        (Utc::now() - self.locked_at).num_hours() > STALE_LOCK_HOURS
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME").ok().or_else(|| std::env::var("HOST").ok())
    }
}

#[cfg(target_os = "linux")]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

// Without a cheap liveness probe, rely on the age limit alone
#[cfg(not(target_os = "linux"))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// `<file>` + `suffix`, keeping the full original file name
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

fn lock_path_for(path: &Path) -> PathBuf {
    sibling_path(path, ".lock")
}

fn tmp_path_for(path: &Path) -> PathBuf {
    sibling_path(path, ".tmp")
}

fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let contents = fs::read_to_string(lock_path)
        .map_err(|e| CalcError::file_error("read lock", lock_path.display().to_string(), e.to_string()))?;
    Ok(serde_json::from_str(&contents)?)
}

/// Exclusive lock on a configuration file, released on drop.
///
/// Combines an fs2 OS-level lock with a `.lock` file naming the holder.
#[derive(Debug)]
pub struct FileLock {
    config_path: PathBuf,
    lock_path: PathBuf,
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire the lock for `path`.
    ///
    /// Fails with `FileLocked` when a live holder exists; stale lock files
    /// are taken over.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if let Some(existing) = Self::check(path) {
            return Err(CalcError::file_locked(
                path.display().to_string(),
                format!("{} ({})", existing.user_id, existing.machine),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let lock_json = serde_json::to_string_pretty(&info)?;
        lock_file
            .write_all(lock_json.as_bytes())
            .and_then(|_| lock_file.sync_all())
            .map_err(|e| CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        debug!(path = %path.display(), user = %info.user_id, "Acquired configuration lock");
        Ok(FileLock {
            config_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Current live holder of the lock on `path`, if any.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if !lock_path.exists() {
            return None;
        }
        match read_lock_info(&lock_path) {
            Ok(info) if !info.is_stale() => Some(info),
            Ok(info) => {
                warn!(path = %path.display(), holder = %info.user_id, "Ignoring stale lock");
                None
            }
            Err(e) => {
                warn!(path = %lock_path.display(), error = %e, "Unreadable lock file");
                None
            }
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// Save a configuration with atomic write semantics.
///
/// Parent directories are created as needed. The document is written to
/// `<file>.tmp`, synced, then renamed over `path`.
pub fn save_config(config: &ColumnConfig, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CalcError::file_error("create directory", parent.display().to_string(), e.to_string()))?;
    }

    let tmp_path = tmp_path_for(path);
    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp_file
        .write_all(json.as_bytes())
        .and_then(|_| tmp_file.sync_all())
        .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), "Saved configuration");
    Ok(())
}

/// Load a configuration and check its schema version.
///
/// # Errors
///
/// * `FileError` - the file cannot be read
/// * `SerializationError` - invalid JSON or wrong shape
/// * `VersionMismatch` - written by an incompatible schema
pub fn load_config(path: &Path) -> CalcResult<ColumnConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let config: ColumnConfig = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid configuration in {}: {}", path.display(), e),
    })?;

    validate_version(&config.meta.version)?;
    debug!(path = %path.display(), label = %config.meta.label, "Loaded configuration");
    Ok(config)
}

/// Load a configuration and report whether someone else holds its lock.
pub fn load_config_with_lock_check(path: &Path) -> CalcResult<(ColumnConfig, Option<LockInfo>)> {
    let config = load_config(path)?;
    Ok((config, FileLock::check(path)))
}

/// Default configuration file inside `dir`
pub fn default_config_path(dir: &Path) -> PathBuf {
    dir.join(DEFAULT_CONFIG_FILE)
}

/// Load `path`, or return a fresh default configuration when it does not exist.
///
/// Other failures (bad JSON, version mismatch) are still errors.
pub fn load_config_or_default(path: &Path) -> CalcResult<ColumnConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "No configuration file, using defaults");
        return Ok(ColumnConfig::default());
    }
    load_config(path)
}

/// Accept documents with the same major version; within 0.x, reject newer minors.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Option<(u32, u32)> {
        let mut parts = v.split('.').map(|p| p.parse::<u32>());
        let major = parts.next()?.ok()?;
        let minor = parts.next().unwrap_or(Ok(0)).ok()?;
        Some((major, minor))
    };
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let (file_major, file_minor) = parse(file_version).ok_or_else(mismatch)?;
    let (major, minor) = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_major != major || (major == 0 && file_minor > minor) {
        return Err(mismatch());
    }
    Ok(())
}
