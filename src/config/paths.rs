//! Path management for the JSON store backend
//!
//! Provides XDG-compliant path resolution for the per-user data files.
//!
//! ## Path Resolution Order
//!
//! 1. `FINANZAS_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/finanzas` or `~/.config/finanzas`
//! 3. Windows: `%APPDATA%\finanzas`
//!
//! All entity data lives under `<base>/users/{user_id}/`, one JSON file
//! per collection.

use std::path::PathBuf;

use crate::error::FinanceError;
use crate::models::UserId;

/// Manages all paths used by the JSON store
#[derive(Debug, Clone)]
pub struct StorePaths {
    /// Base directory for all finanzas data
    base_dir: PathBuf,
}

impl StorePaths {
    /// Create a new StorePaths instance
    ///
    /// Path resolution:
    /// 1. `FINANZAS_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/finanzas` or `~/.config/finanzas`
    /// 3. Windows: `%APPDATA%\finanzas`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, FinanceError> {
        let base_dir = if let Ok(custom) = std::env::var("FINANZAS_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create StorePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/finanzas/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the directory holding all per-user data (~/.config/finanzas/users/)
    pub fn users_dir(&self) -> PathBuf {
        self.base_dir.join("users")
    }

    /// Get the data directory for one user
    pub fn user_dir(&self, user: &UserId) -> PathBuf {
        self.users_dir().join(user.as_str())
    }

    /// Get the path to a user's transactions.json
    pub fn transactions_file(&self, user: &UserId) -> PathBuf {
        self.user_dir(user).join("transactions.json")
    }

    /// Get the path to a user's fixed_expenses.json
    pub fn fixed_expenses_file(&self, user: &UserId) -> PathBuf {
        self.user_dir(user).join("fixed_expenses.json")
    }

    /// Get the path to a user's loans.json
    pub fn loans_file(&self, user: &UserId) -> PathBuf {
        self.user_dir(user).join("loans.json")
    }

    /// Get the path to a user's categories.json
    pub fn categories_file(&self, user: &UserId) -> PathBuf {
        self.user_dir(user).join("categories.json")
    }

    /// Ensure the data directory for a user exists
    pub fn ensure_user_dir(&self, user: &UserId) -> Result<(), FinanceError> {
        std::fs::create_dir_all(self.user_dir(user))
            .map_err(|e| FinanceError::Io(format!("Failed to create user directory: {}", e)))?;
        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, FinanceError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("finanzas"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, FinanceError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| FinanceError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("finanzas"))
}
