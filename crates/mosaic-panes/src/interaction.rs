//! Pointer gestures to pane commands.
//!
//! The controller is pure: it hit-tests pane rects, tracks one drag at a
//! time, and turns pointer motion into [`PaneCommand`]s. Motion is
//! coalesced to at most one command batch per frame interval; the final
//! position is always committed on release. Callers run the commands
//! through [`PaneManager::execute`](crate::PaneManager::execute).

use std::time::{Duration, Instant};

use mosaic_common::{PaneId, PaneState, Rect, MIN_PANE_HEIGHT, MIN_PANE_WIDTH};
use mosaic_config::schema::InteractionConfig;

use crate::commands::PaneCommand;
use crate::pane::Pane;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionSettings {
    /// Minimum time between emitted drag updates.
    pub frame_interval: Duration,
    /// Width of the resize grab zone inside each pane edge.
    pub edge_margin: i32,
    pub title_bar_height: i32,
}

impl InteractionSettings {
    pub fn from_config(config: &InteractionConfig) -> Self {
        Self {
            frame_interval: Duration::from_millis(config.frame_interval_ms),
            edge_margin: config.edge_margin as i32,
            title_bar_height: config.title_bar_height as i32,
        }
    }
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self::from_config(&InteractionConfig::default())
    }
}

/// Edge or corner grabbed for a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    fn from_flags(north: bool, south: bool, east: bool, west: bool) -> Option<Self> {
        match (north, south, east, west) {
            (true, _, true, _) => Some(ResizeEdge::NorthEast),
            (true, _, _, true) => Some(ResizeEdge::NorthWest),
            (_, true, true, _) => Some(ResizeEdge::SouthEast),
            (_, true, _, true) => Some(ResizeEdge::SouthWest),
            (true, _, _, _) => Some(ResizeEdge::North),
            (_, true, _, _) => Some(ResizeEdge::South),
            (_, _, true, _) => Some(ResizeEdge::East),
            (_, _, _, true) => Some(ResizeEdge::West),
            _ => None,
        }
    }

    fn north(self) -> bool {
        matches!(
            self,
            ResizeEdge::North | ResizeEdge::NorthEast | ResizeEdge::NorthWest
        )
    }

    fn south(self) -> bool {
        matches!(
            self,
            ResizeEdge::South | ResizeEdge::SouthEast | ResizeEdge::SouthWest
        )
    }

    fn east(self) -> bool {
        matches!(
            self,
            ResizeEdge::East | ResizeEdge::NorthEast | ResizeEdge::SouthEast
        )
    }

    fn west(self) -> bool {
        matches!(
            self,
            ResizeEdge::West | ResizeEdge::NorthWest | ResizeEdge::SouthWest
        )
    }

    /// Whether dragging this edge moves the pane's origin.
    pub fn moves_origin(self) -> bool {
        self.north() || self.west()
    }
}

/// Part of a pane under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitZone {
    TitleBar,
    Edge(ResizeEdge),
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    Resize(ResizeEdge),
}

#[derive(Debug, Clone)]
struct DragState {
    pane: PaneId,
    kind: DragKind,
    origin: (i32, i32),
    start_rect: Rect,
    /// Latest rect not yet emitted.
    pending: Option<Rect>,
    last_sent: Option<Rect>,
    last_emit: Option<Instant>,
}

impl DragState {
    fn rect_at(&self, x: i32, y: i32) -> Rect {
        let dx = x.saturating_sub(self.origin.0);
        let dy = y.saturating_sub(self.origin.1);
        drag_rect(self.kind, self.start_rect, dx, dy)
    }
}

// =============================================================================
// HIT TESTING
// =============================================================================

/// Classify a point against a pane rect. `None` if outside.
///
/// Edges win over the title bar so the top corners stay resizable.
pub fn hit_test(rect: Rect, x: i32, y: i32, settings: &InteractionSettings) -> Option<HitZone> {
    if !rect.contains(x, y) {
        return None;
    }
    let m = settings.edge_margin;
    let edge = ResizeEdge::from_flags(
        y < rect.y.saturating_add(m),
        y >= rect.bottom().saturating_sub(m),
        x >= rect.right().saturating_sub(m),
        x < rect.x.saturating_add(m),
    );
    Some(match edge {
        Some(edge) => HitZone::Edge(edge),
        None if y < rect.y.saturating_add(settings.title_bar_height) => HitZone::TitleBar,
        None => HitZone::Body,
    })
}

/// Rect produced by dragging `start` by (`dx`, `dy`).
///
/// Resizing from the west or north keeps the opposite edge fixed, even
/// when the minimum size stops the drag.
pub fn drag_rect(kind: DragKind, start: Rect, dx: i32, dy: i32) -> Rect {
    match kind {
        DragKind::Move => Rect::new(
            start.x.saturating_add(dx),
            start.y.saturating_add(dy),
            start.width,
            start.height,
        ),
        DragKind::Resize(edge) => {
            let mut rect = start;
            if edge.east() {
                rect.width = start.width.saturating_add(dx).max(MIN_PANE_WIDTH);
            }
            if edge.west() {
                rect.width = start.width.saturating_sub(dx).max(MIN_PANE_WIDTH);
                rect.x = start.right().saturating_sub(rect.width);
            }
            if edge.south() {
                rect.height = start.height.saturating_add(dy).max(MIN_PANE_HEIGHT);
            }
            if edge.north() {
                rect.height = start.height.saturating_sub(dy).max(MIN_PANE_HEIGHT);
                rect.y = start.bottom().saturating_sub(rect.height);
            }
            rect
        }
    }
}

fn commands_for(pane: PaneId, kind: DragKind, rect: Rect) -> Vec<PaneCommand> {
    let moved = PaneCommand::Move {
        id: pane,
        x: rect.x,
        y: rect.y,
    };
    let resized = PaneCommand::Resize {
        id: pane,
        width: rect.width,
        height: rect.height,
    };
    match kind {
        DragKind::Move => vec![moved],
        DragKind::Resize(edge) if edge.moves_origin() => vec![moved, resized],
        DragKind::Resize(_) => vec![resized],
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Tracks pointer gestures over panes.
#[derive(Debug, Default)]
pub struct InteractionController {
    settings: InteractionSettings,
    drag: Option<DragState>,
}

impl InteractionController {
    pub fn new(settings: InteractionSettings) -> Self {
        Self {
            settings,
            drag: None,
        }
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn dragging_pane(&self) -> Option<PaneId> {
        self.drag.as_ref().map(|d| d.pane)
    }

    /// Start a drag if the press lands on a title bar or edge.
    ///
    /// Only `Active` panes can be dragged; a maximized pane must be
    /// restored first.
    pub fn begin_drag(&mut self, pane: &Pane, x: i32, y: i32) -> Option<DragKind> {
        if pane.state != PaneState::Active {
            tracing::trace!(pane_id = %pane.id, state = %pane.state, "drag refused");
            return None;
        }
        let kind = match hit_test(pane.rect, x, y, &self.settings)? {
            HitZone::TitleBar => DragKind::Move,
            HitZone::Edge(edge) => DragKind::Resize(edge),
            HitZone::Body => return None,
        };
        self.drag = Some(DragState {
            pane: pane.id,
            kind,
            origin: (x, y),
            start_rect: pane.rect,
            pending: None,
            last_sent: None,
            last_emit: None,
        });
        Some(kind)
    }

    /// Pointer moved during a drag. Emits commands at most once per frame
    /// interval; otherwise the proposal waits for the next tick.
    pub fn pointer_moved(&mut self, x: i32, y: i32, now: Instant) -> Vec<PaneCommand> {
        let interval = self.settings.frame_interval;
        let Some(drag) = self.drag.as_mut() else {
            return Vec::new();
        };
        let rect = drag.rect_at(x, y);
        drag.pending = Some(rect);
        match drag.last_emit {
            Some(at) if now.saturating_duration_since(at) < interval => Vec::new(),
            _ => Self::flush(drag, now),
        }
    }

    /// Emit a proposal held back by coalescing, once its frame is due.
    pub fn frame_tick(&mut self, now: Instant) -> Vec<PaneCommand> {
        let interval = self.settings.frame_interval;
        let Some(drag) = self.drag.as_mut() else {
            return Vec::new();
        };
        match drag.last_emit {
            Some(at) if now.saturating_duration_since(at) < interval => Vec::new(),
            _ => Self::flush(drag, now),
        }
    }

    /// Release the pointer, committing the final rect.
    pub fn end_drag(&mut self, x: i32, y: i32) -> Vec<PaneCommand> {
        let Some(drag) = self.drag.take() else {
            return Vec::new();
        };
        let rect = drag.rect_at(x, y);
        commands_for(drag.pane, drag.kind, rect)
    }

    /// Abandon the drag. Returns commands putting the pane back where it
    /// started if any update was already sent.
    pub fn cancel_drag(&mut self) -> Vec<PaneCommand> {
        match self.drag.take() {
            Some(drag) if drag.last_sent.is_some() => {
                commands_for(drag.pane, drag.kind, drag.start_rect)
            }
            _ => Vec::new(),
        }
    }

    /// Double-click on a title bar toggles maximize.
    pub fn title_double_click(&self, pane: &Pane, x: i32, y: i32) -> Option<PaneCommand> {
        match hit_test(pane.rect, x, y, &self.settings)? {
            HitZone::TitleBar => Some(PaneCommand::Maximize(pane.id)),
            _ => None,
        }
    }

    pub fn minimize_button(&self, pane: PaneId) -> PaneCommand {
        PaneCommand::Minimize(pane)
    }

    pub fn close_button(&self, pane: PaneId) -> PaneCommand {
        PaneCommand::Close(pane)
    }

    fn flush(drag: &mut DragState, now: Instant) -> Vec<PaneCommand> {
        let Some(rect) = drag.pending.take() else {
            return Vec::new();
        };
        if drag.last_sent == Some(rect) {
            return Vec::new();
        }
        drag.last_sent = Some(rect);
        drag.last_emit = Some(now);
        commands_for(drag.pane, drag.kind, rect)
    }
}
