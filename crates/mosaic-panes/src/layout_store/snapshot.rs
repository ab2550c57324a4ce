use std::path::PathBuf;

use chrono::{DateTime, Utc};
use mosaic_common::{ConnectionKind, LayoutError, PaneState, Rect};
use serde::{Deserialize, Serialize};

use crate::pane::{Pane, PaneConfig, TerminalConfig};

/// Current on-disk layout format.
pub const LAYOUT_SCHEMA_VERSION: u32 = 1;

fn default_version() -> u32 {
    LAYOUT_SCHEMA_VERSION
}

/// Process-free description of one pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneConfigRecord {
    pub title: String,
    #[serde(default)]
    pub connection_kind: ConnectionKind,
    pub rect: Rect,
    #[serde(default)]
    pub terminal: TerminalConfig,
    #[serde(default)]
    pub working_directory: Option<PathBuf>,
}

impl PaneConfigRecord {
    /// Record a pane. A maximized pane is stored at its restore rect.
    pub fn from_pane(pane: &Pane) -> Self {
        Self {
            title: pane.title.clone(),
            connection_kind: pane.connection_kind,
            rect: pane.restore_rect(),
            terminal: pane.terminal.clone(),
            working_directory: pane.metadata.working_directory.clone(),
        }
    }

    pub fn to_config(&self) -> PaneConfig {
        PaneConfig {
            title: Some(self.title.clone()),
            connection_kind: self.connection_kind,
            rect: Some(self.rect),
            terminal: self.terminal.clone(),
            working_directory: self.working_directory.clone(),
        }
    }
}

/// A named set of pane configurations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub panes: Vec<PaneConfigRecord>,
}

impl LayoutSnapshot {
    /// Capture every pane that is not closed, in the given order.
    pub fn capture(name: impl Into<String>, panes: &[Pane]) -> Self {
        Self {
            version: LAYOUT_SCHEMA_VERSION,
            name: name.into(),
            saved_at: Utc::now(),
            panes: panes
                .iter()
                .filter(|p| p.state != PaneState::Closed)
                .map(PaneConfigRecord::from_pane)
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, LayoutError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, LayoutError> {
        let snapshot: Self = serde_json::from_slice(bytes)?;
        if snapshot.version > LAYOUT_SCHEMA_VERSION {
            return Err(LayoutError::Format(format!(
                "layout '{}' uses format version {}, newest supported is {}",
                snapshot.name, snapshot.version, LAYOUT_SCHEMA_VERSION
            )));
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_common::PaneId;

    fn pane(id: u32, title: &str, rect: Rect) -> Pane {
        let mut pane = Pane::new(
            PaneId(id),
            title.into(),
            PaneConfig::default().in_dir("/srv"),
            rect,
            10,
        );
        pane.state = PaneState::Active;
        pane
    }

    #[test]
    fn capture_skips_closed_panes() {
        let a = pane(1, "A", Rect::new(0, 0, 400, 300));
        let mut b = pane(2, "B", Rect::new(400, 0, 400, 300));
        b.state = PaneState::Closed;
        let snapshot = LayoutSnapshot::capture("work", &[a, b]);
        assert_eq!(snapshot.version, LAYOUT_SCHEMA_VERSION);
        assert_eq!(snapshot.panes.len(), 1);
        assert_eq!(snapshot.panes[0].title, "A");
        assert_eq!(
            snapshot.panes[0].working_directory,
            Some(PathBuf::from("/srv"))
        );
    }

    #[test]
    fn maximized_pane_is_stored_at_restore_rect() {
        let mut p = pane(1, "A", Rect::new(0, 0, 1920, 1080));
        p.state = PaneState::Maximized;
        p.prior_rect = Some(Rect::new(50, 60, 400, 300));
        let record = PaneConfigRecord::from_pane(&p);
        assert_eq!(record.rect, Rect::new(50, 60, 400, 300));
    }

    #[test]
    fn record_converts_to_config() {
        let record = PaneConfigRecord::from_pane(&pane(1, "A", Rect::new(5, 6, 300, 200)));
        let config = record.to_config();
        assert_eq!(config.title.as_deref(), Some("A"));
        assert_eq!(config.rect, Some(Rect::new(5, 6, 300, 200)));
        assert_eq!(config.working_directory, Some(PathBuf::from("/srv")));
    }

    #[test]
    fn json_uses_snake_case_kinds_and_defaults_missing_fields() {
        let json = br#"{
            "name": "old",
            "saved_at": "2026-01-02T03:04:05Z",
            "panes": [{"title": "A", "rect": {"x": 0, "y": 0, "width": 400, "height": 300}}]
        }"#;
        let snapshot = LayoutSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.panes[0].connection_kind, ConnectionKind::Local);
        assert!(snapshot.panes[0].terminal.args.is_empty());

        let out = String::from_utf8(snapshot.to_json().unwrap()).unwrap();
        assert!(out.contains("\"connection_kind\": \"local\""));
    }

    #[test]
    fn newer_format_is_rejected() {
        let json = br#"{"version": 9, "name": "x", "saved_at": "2026-01-02T03:04:05Z", "panes": []}"#;
        assert!(matches!(
            LayoutSnapshot::from_json(json),
            Err(LayoutError::Format(_))
        ));
    }

    #[test]
    fn garbage_is_a_format_error() {
        assert!(matches!(
            LayoutSnapshot::from_json(b"not json"),
            Err(LayoutError::Format(_))
        ));
    }
}
