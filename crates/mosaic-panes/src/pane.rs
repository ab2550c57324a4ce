//! The pane record and the configuration a pane is created from.

use std::collections::{BTreeMap, VecDeque};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use mosaic_common::{ConnectionKind, PaneError, PaneId, PaneState, Rect};
use serde::{Deserialize, Serialize};

/// Per-pane terminal settings that survive a layout save/load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Shell program override. `None` uses the workspace shell strategy.
    pub shell: Option<String>,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

/// Input to [`PaneManager::create`](crate::PaneManager::create).
///
/// Unset fields take the workspace defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneConfig {
    pub title: Option<String>,
    pub connection_kind: ConnectionKind,
    pub rect: Option<Rect>,
    pub terminal: TerminalConfig,
    pub working_directory: Option<PathBuf>,
}

impl PaneConfig {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn at(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn shell(mut self, program: impl Into<String>) -> Self {
        self.terminal.shell = Some(program.into());
        self
    }

    pub fn remote(mut self) -> Self {
        self.connection_kind = ConnectionKind::Remote;
        self
    }
}

/// Handle to the process attached to a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessRef {
    pub pid: Option<u32>,
}

/// Bounded, oldest-first list of commands typed into a pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandHistory {
    entries: VecDeque<String>,
    limit: usize,
}

impl CommandHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    pub fn push(&mut self, command: String) {
        if self.limit == 0 {
            return;
        }
        if self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct PaneMetadata {
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub working_directory: Option<PathBuf>,
    pub command_history: CommandHistory,
}

impl PaneMetadata {
    pub(crate) fn touch(&mut self) {
        self.last_accessed_at = Utc::now();
    }
}

/// One terminal session's spatial and lifecycle record.
///
/// The manager owns the live record; callers get clones.
#[derive(Debug, Clone)]
pub struct Pane {
    pub id: PaneId,
    pub title: String,
    pub connection_kind: ConnectionKind,
    pub rect: Rect,
    pub state: PaneState,
    pub process: Option<ProcessRef>,
    /// Rect to return to when leaving Maximized.
    pub prior_rect: Option<Rect>,
    pub terminal: TerminalConfig,
    pub metadata: PaneMetadata,
}

impl Pane {
    pub(crate) fn new(
        id: PaneId,
        title: String,
        config: PaneConfig,
        rect: Rect,
        history_limit: usize,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            connection_kind: config.connection_kind,
            rect: rect.clamped(),
            state: PaneState::Created,
            process: None,
            prior_rect: None,
            terminal: config.terminal,
            metadata: PaneMetadata {
                created_at: now,
                last_accessed_at: now,
                working_directory: config.working_directory,
                command_history: CommandHistory::new(history_limit),
            },
        }
    }

    /// Move to `next`, or fail without touching the state.
    ///
    /// Returns the state that was left.
    pub(crate) fn transition(
        &mut self,
        next: PaneState,
        action: &'static str,
    ) -> Result<PaneState, PaneError> {
        if !self.state.can_transition_to(next) {
            return Err(PaneError::InvalidTransition {
                id: self.id,
                action,
                from: self.state,
            });
        }
        let from = self.state;
        self.state = next;
        Ok(from)
    }

    /// The rect the pane occupies when not maximized.
    pub fn restore_rect(&self) -> Rect {
        self.prior_rect.unwrap_or(self.rect)
    }
}

/// Turns raw keyboard input into completed command lines.
///
/// Handles backspace, Ctrl-C and Ctrl-U, and skips escape sequences.
#[derive(Debug, Default)]
pub(crate) struct LineRecorder {
    line: String,
    in_escape: bool,
}

impl LineRecorder {
    /// Feed input bytes; returns every line completed by them.
    pub(crate) fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut done = Vec::new();
        for ch in String::from_utf8_lossy(bytes).chars() {
            if self.in_escape {
                if ch.is_ascii_alphabetic() || ch == '~' {
                    self.in_escape = false;
                }
                continue;
            }
            match ch {
                '\r' | '\n' => {
                    let line = std::mem::take(&mut self.line);
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        done.push(trimmed.to_string());
                    }
                }
                '\u{7f}' | '\u{8}' => {
                    self.line.pop();
                }
                '\u{3}' | '\u{15}' => self.line.clear(),
                '\u{1b}' => self.in_escape = true,
                c if c.is_control() => {}
                c => self.line.push(c),
            }
        }
        done
    }
}
