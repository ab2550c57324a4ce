//! `[shell]` table: what a new pane runs when it names no shell itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Empty detects the user's shell (`$SHELL` / `%COMSPEC%`).
    pub program: String,
    pub args: Vec<String>,
    /// Starting directory for panes without their own. A leading `~` is
    /// expanded against the home directory.
    pub working_directory: Option<String>,
    /// Variables added on top of the sanitized environment.
    pub env: BTreeMap<String, String>,
    /// Pass `-l` to bash/zsh when no explicit args are configured.
    pub login_shell: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: String::new(),
            args: Vec::new(),
            working_directory: None,
            env: BTreeMap::new(),
            login_shell: true,
        }
    }
}

impl ShellConfig {
    pub fn program(&self) -> Option<&str> {
        let program = self.program.trim();
        (!program.is_empty()).then_some(program)
    }

    pub fn working_directory(&self) -> Option<PathBuf> {
        let raw = self.working_directory.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if raw == "~" {
            return dirs::home_dir();
        }
        if let Some(rest) = raw.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return Some(home.join(rest));
            }
        }
        Some(PathBuf::from(raw))
    }
}
