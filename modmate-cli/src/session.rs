//! User session persistence
//!
//! Timetables and bookmarks are stored as pretty-printed JSON.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use modmate_core::User;

/// Read a saved user; a missing file is an empty user
pub fn load_user(path: &Path) -> Result<User> {
    if !path.exists() {
        tracing::debug!("No session at {}", path.display());
        return Ok(User::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session file: {}", path.display()))?;
    let user = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse session file: {}", path.display()))?;

    tracing::info!("Restored session from {}", path.display());
    Ok(user)
}

/// A restored user and whether it may be written back on exit
#[derive(Debug, PartialEq)]
pub struct Restored {
    pub user: User,
    pub can_save: bool,
}

/// Load the session, falling back to an empty user on any failure
///
/// An unreadable file is moved to `<path>.bak` first. If that fails too,
/// `can_save` is false so the file is left as it is.
pub fn restore_user(path: Option<&Path>) -> Restored {
    let Some(path) = path else {
        return Restored {
            user: User::new(),
            can_save: true,
        };
    };

    match load_user(path) {
        Ok(user) => Restored {
            user,
            can_save: true,
        },
        Err(e) => {
            tracing::warn!("Could not restore session: {:#}", e);
            eprintln!("Warning: could not restore session ({e:#}); starting fresh.");

            let backup = backup_path(path);
            let can_save = match fs::rename(path, &backup) {
                Ok(()) => {
                    eprintln!("The old session was moved to {}.", backup.display());
                    true
                }
                Err(e) => {
                    tracing::warn!("Could not back up {}: {}", path.display(), e);
                    eprintln!("Warning: this session will not be saved.");
                    false
                }
            };

            Restored {
                user: User::new(),
                can_save,
            }
        }
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

pub fn save_user(path: &Path, user: &User) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(user).context("Failed to serialize session")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write session file: {}", path.display()))?;

    tracing::info!("Saved session to {}", path.display());
    Ok(())
}
