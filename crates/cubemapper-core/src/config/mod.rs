//! Tool configuration management.
//!
//! This module provides configuration loading and the global verbose flag
//! used for diagnostic output.

mod defaults;

// Re-export public types
pub use defaults::RenderDefaults;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Once, OnceLock};

use serde::Deserialize;

// Global verbose flag for controlling diagnostic output
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set the global verbose flag. When true, diagnostic messages will be printed.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

/// Check if verbose mode is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Print a message to stderr only if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if $crate::config::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Candidate config file names searched for on disk.
const CONFIG_FILENAMES: &[&str] = &["cubemapper.yml", "cubemapper.yaml"];

/// Public handle that stores the loaded configuration, its source path, and warnings.
pub struct ConfigHandle {
    pub config: CubemapperConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl ConfigHandle {
    fn with_config(config: CubemapperConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }
}

/// Complete configuration file structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CubemapperConfig {
    pub defaults: RenderDefaults,
}

impl CubemapperConfig {
    fn sanitize(mut self) -> (Self, Vec<String>) {
        let warnings = self.defaults.sanitize();
        (self, warnings)
    }
}

/// Load configuration from disk, optionally forcing a specific path.
pub fn load_config(custom_path: Option<&Path>) -> ConfigHandle {
    let mut warnings = Vec::new();
    let candidates = get_config_candidates(custom_path);

    for candidate in candidates {
        if !candidate.exists() || !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match serde_yaml::from_str::<CubemapperConfig>(&contents) {
                Ok(config) => {
                    let (sanitized, sanitize_warnings) = config.sanitize();
                    warnings.extend(sanitize_warnings);
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    return ConfigHandle::with_config(sanitized, Some(source), warnings);
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse config {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    ConfigHandle::with_config(CubemapperConfig::default(), None, warnings)
}

/// Get list of config file candidates to try
fn get_config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var("CUBEMAPPER_CONFIG") {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(home_dir.join("cubemapper").join(name));
        }
    }

    candidates
}

static CONFIG_HANDLE: OnceLock<ConfigHandle> = OnceLock::new();
static PRINT_CONFIG_ONCE: Once = Once::new();

/// Access the global configuration (loaded once per process).
pub fn config_handle() -> &'static ConfigHandle {
    CONFIG_HANDLE.get_or_init(|| load_config(None))
}

/// Print config source and warnings the first time it is requested (only in verbose mode).
pub fn log_config_usage() {
    PRINT_CONFIG_ONCE.call_once(|| {
        if !is_verbose() {
            return;
        }
        let handle = config_handle();
        if let Some(source) = &handle.source {
            eprintln!("[cubemapper] Loaded config from {}", source.display());
        } else {
            eprintln!("[cubemapper] Using built-in defaults");
        }

        for warning in &handle.warnings {
            eprintln!("[cubemapper] Config warning: {}", warning);
        }
    });
}
