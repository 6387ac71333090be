//! Results of the previous runs, so each step can pick up where the last
//! one left off (hooks -> script -> speech).

use crate::studio::{GeneratedScript, HookItem};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Session {
    #[serde(default)]
    pub hooks: Vec<HookItem>,

    #[serde(default)]
    pub script: Option<GeneratedScript>,
}

impl Session {
    pub async fn read_or_default(path: &Path) -> Self {
        let res = tokio::fs::read(path).await;

        match res {
            Ok(res) => serde_json::from_slice(&res).unwrap_or_else(|e| {
                warn!("Ignoring unreadable session {}: {e}", path.display());
                Self::default()
            }),
            Err(e) => {
                debug!("No previous session at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Persists the session (write to temp file, then rename).
    pub async fn persist(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self).context("Failed to serialize session")?;

        let mut tmp_path = PathBuf::from(path);
        tmp_path.as_mut_os_string().push(".tmp");

        tokio::fs::write(&tmp_path, &json)
            .await
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .with_context(|| format!("Failed to rename session file to {}", path.display()))?;

        Ok(())
    }

    /// Replaces the hooks. A script written for the old hooks is dropped.
    pub fn set_hooks(&mut self, hooks: Vec<HookItem>) {
        self.hooks = hooks;
        self.script = None;
    }

    /// Hook by 1-based position, as listed to the user
    pub fn hook(&self, position: usize) -> Option<&HookItem> {
        position
            .checked_sub(1)
            .and_then(|index| self.hooks.get(index))
    }
}
