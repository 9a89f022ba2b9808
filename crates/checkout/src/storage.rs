//! Local form mirror.
//!
//! A best-effort JSON copy of the checkout form on disk, so a closed or
//! crashed session comes back with the fields the user already typed.
//! Mirror I/O never fails the checkout; problems are logged and the
//! session carries on with whatever state it has in memory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::form::CheckoutFormState;

/// On-disk mirror of the checkout form.
#[derive(Debug, Clone)]
pub struct FormMirror {
    path: PathBuf,
}

impl FormMirror {
    /// Mirror backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the mirror file lives.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the current form state, replacing any previous mirror.
    pub fn save(&self, form: &CheckoutFormState) {
        if let Err(error) = self.try_save(form) {
            warn!(path = %self.path.display(), %error, "failed to save form mirror");
        }
    }

    fn try_save(&self, form: &CheckoutFormState) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(form).map_err(io::Error::from)?;

        // Write-then-rename keeps a crash from truncating the previous
        // mirror.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }

    /// The mirrored form state, if a readable one exists.
    ///
    /// A missing file is the normal first-run case and returns `None`
    /// silently; an unreadable or corrupt mirror is logged and treated
    /// the same way.
    #[must_use]
    pub fn load(&self) -> Option<CheckoutFormState> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return None,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "failed to read form mirror");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(form) => Some(form),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "form mirror corrupt, ignoring");
                None
            }
        }
    }

    /// Remove the mirror file. Already-gone is not an error.
    pub fn clear(&self) {
        if let Err(error) = fs::remove_file(&self.path) {
            if error.kind() != io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), %error, "failed to clear form mirror");
            }
        }
    }
}
