//! Unified logging system for PinNote.
//!
//! Provides persistent file logging for both frontend and backend, with
//! automatic log rotation and cleanup. Console output goes through the
//! `log` facade (`env_logger`); this module mirrors everything into the
//! app log directory.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;
use tauri::{command, AppHandle, Manager};

/// Maximum log file size before rotation (2MB)
const MAX_LOG_SIZE: u64 = 2 * 1024 * 1024;

/// Maximum number of log files to keep
const MAX_LOG_FILES: usize = 5;

lazy_static::lazy_static! {
    /// Global log file handle
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
    /// Log directory path
    static ref LOG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

/// Initialize the logging system.
pub fn init_logging(app: &AppHandle) -> Result<(), String> {
    let log_dir = app
        .path()
        .app_log_dir()
        .map_err(|e| format!("Failed to get log directory: {}", e))?;

    fs::create_dir_all(&log_dir).map_err(|e| format!("Failed to create log directory: {}", e))?;

    {
        let mut dir = LOG_DIR
            .lock()
            .map_err(|e| format!("Failed to acquire log directory lock: {}", e))?;
        *dir = Some(log_dir.clone());
    }

    let log_file_path = current_log_path(&log_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .map_err(|e| format!("Failed to open log file: {}", e))?;

    {
        let mut log_file = LOG_FILE
            .lock()
            .map_err(|e| format!("Failed to acquire log file lock: {}", e))?;
        *log_file = Some(file);
    }

    write_line("INFO", "PinNote", "Logging system initialized");
    cleanup_old_logs(&log_dir);

    Ok(())
}

/// Get the path for the current log file (one per day).
fn current_log_path(log_dir: &PathBuf) -> PathBuf {
    let date = Local::now().format("%Y-%m-%d");
    log_dir.join(format!("pinnote_{}.log", date))
}

/// Clean up old log files, keeping only the most recent MAX_LOG_FILES.
fn cleanup_old_logs(log_dir: &PathBuf) {
    if let Ok(entries) = fs::read_dir(log_dir) {
        let mut log_files: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "log")
                    .unwrap_or(false)
            })
            .collect();

        // Sort by modification time (newest first)
        log_files.sort_by(|a, b| {
            let a_time = a.metadata().and_then(|m| m.modified()).ok();
            let b_time = b.metadata().and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time)
        });

        for file in log_files.into_iter().skip(MAX_LOG_FILES) {
            let _ = fs::remove_file(file.path());
        }
    }
}

/// Check if log rotation is needed and rotate if necessary.
fn check_rotation() {
    let log_dir = {
        let dir = match LOG_DIR.lock() {
            Ok(guard) => guard,
            Err(_) => return, // Mutex poisoned, skip rotation
        };
        match dir.as_ref() {
            Some(d) => d.clone(),
            None => return,
        }
    };

    let current_path = current_log_path(&log_dir);

    if let Ok(metadata) = fs::metadata(&current_path) {
        if metadata.len() > MAX_LOG_SIZE {
            let timestamp = Local::now().format("%Y-%m-%d_%H%M%S");
            let rotated_path = log_dir.join(format!("pinnote_{}.log", timestamp));
            let _ = fs::rename(&current_path, &rotated_path);

            if let Ok(file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&current_path)
            {
                if let Ok(mut log_file) = LOG_FILE.lock() {
                    *log_file = Some(file);
                }
            }

            cleanup_old_logs(&log_dir);
        }
    }
}

/// Append one line to the current log file.
fn write_line(level: &str, source: &str, message: &str) {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let log_line = format!("[{}] [{}] [{}] {}\n", timestamp, level, source, message);

    if let Ok(mut log_file) = LOG_FILE.lock() {
        if let Some(ref mut file) = *log_file {
            let _ = file.write_all(log_line.as_bytes());
            let _ = file.flush();
        }
    }

    check_rotation();
}

// ============================================================================
// Tauri Commands
// ============================================================================

/// Write a log message from the frontend. Mirrored to the console through
/// the `log` facade and appended to the log file.
#[command]
pub fn write_log(level: String, source: String, message: String) {
    match level.to_lowercase().as_str() {
        "debug" => log::debug!("[{}] {}", source, message),
        "warn" | "warning" => log::warn!("[{}] {}", source, message),
        "error" => log::error!("[{}] {}", source, message),
        _ => log::info!("[{}] {}", source, message),
    }
    write_line(&level.to_uppercase(), &source, &message);
}

/// Get the log directory path.
#[command]
pub fn get_log_dir(app: AppHandle) -> Result<String, String> {
    let log_dir = app
        .path()
        .app_log_dir()
        .map_err(|e| format!("Failed to get log directory: {}", e))?;

    Ok(log_dir.to_string_lossy().to_string())
}

/// Open the log directory in the system file manager.
pub fn open_log_dir_inner(app: &AppHandle) -> Result<(), String> {
    let log_dir = app
        .path()
        .app_log_dir()
        .map_err(|e| format!("Failed to get log directory: {}", e))?;

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("explorer")
            .arg(log_dir)
            .spawn()
            .map_err(|e| format!("Failed to open explorer: {}", e))?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(log_dir)
            .spawn()
            .map_err(|e| format!("Failed to open Finder: {}", e))?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(log_dir)
            .spawn()
            .map_err(|e| format!("Failed to open file manager: {}", e))?;
    }

    Ok(())
}

/// Open the log directory in file explorer.
#[command]
pub async fn open_log_dir(app: AppHandle) -> Result<(), String> {
    open_log_dir_inner(&app)
}
