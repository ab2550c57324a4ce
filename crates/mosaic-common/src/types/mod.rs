mod geometry;
mod pane;

pub use geometry::*;
pub use pane::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_default_matches_new_pane_size() {
        assert_eq!(Rect::default(), Rect::new(0, 0, 800, 600));
    }

    #[test]
    fn rect_clamped_raises_to_minimums() {
        let r = Rect::new(10, 20, 50, 50).clamped();
        assert_eq!(r, Rect::new(10, 20, MIN_PANE_WIDTH, MIN_PANE_HEIGHT));
    }

    #[test]
    fn rect_clamped_keeps_large_sizes() {
        let r = Rect::new(-5, 0, 1024, 768);
        assert_eq!(r.clamped(), r);
    }

    #[test]
    fn rect_contains_is_right_exclusive() {
        let r = Rect::new(100, 100, 200, 150);
        assert!(r.contains(100, 100));
        assert!(r.contains(299, 249));
        assert!(!r.contains(300, 120));
        assert!(!r.contains(150, 250));
        assert!(!r.contains(99, 120));
    }

    #[test]
    fn rect_cells_divides_by_cell_size() {
        let r = Rect::new(0, 0, 800, 600);
        assert_eq!(r.cells(8, 16), (100, 37));
    }

    #[test]
    fn rect_cells_never_zero() {
        let r = Rect::new(0, 0, 3, 3);
        assert_eq!(r.cells(8, 16), (1, 1));
        assert_eq!(r.cells(0, 0), (3, 3));
    }

    #[test]
    fn rect_serialization() {
        let r = Rect::new(1, 2, 300, 400);
        let json = serde_json::to_string(&r).unwrap();
        let deserialized: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(r, deserialized);
    }

    #[test]
    fn live_states() {
        assert!(PaneState::Active.is_live());
        assert!(PaneState::Minimized.is_live());
        assert!(PaneState::Maximized.is_live());
        assert!(!PaneState::Created.is_live());
        assert!(!PaneState::Connecting.is_live());
        assert!(!PaneState::Disconnected.is_live());
        assert!(!PaneState::Closed.is_live());
    }

    #[test]
    fn closed_is_terminal() {
        for next in [
            PaneState::Created,
            PaneState::Connecting,
            PaneState::Active,
            PaneState::Closed,
        ] {
            assert!(!PaneState::Closed.can_transition_to(next));
        }
    }

    #[test]
    fn every_open_state_can_close() {
        for state in [
            PaneState::Created,
            PaneState::Connecting,
            PaneState::Active,
            PaneState::Minimized,
            PaneState::Maximized,
            PaneState::Disconnected,
        ] {
            assert!(state.can_transition_to(PaneState::Closed), "{state}");
        }
    }

    #[test]
    fn maximized_restores_only_to_active() {
        assert!(PaneState::Maximized.can_transition_to(PaneState::Active));
        assert!(!PaneState::Maximized.can_transition_to(PaneState::Minimized));
    }

    #[test]
    fn disconnected_can_reconnect() {
        assert!(PaneState::Disconnected.can_transition_to(PaneState::Connecting));
        assert!(!PaneState::Disconnected.can_transition_to(PaneState::Active));
    }

    #[test]
    fn connecting_cannot_minimize() {
        assert!(!PaneState::Connecting.can_transition_to(PaneState::Minimized));
        assert!(!PaneState::Created.can_transition_to(PaneState::Active));
    }

    #[test]
    fn connection_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ConnectionKind::Remote).unwrap(),
            "\"remote\""
        );
        assert_eq!(ConnectionKind::default(), ConnectionKind::Local);
    }

    #[test]
    fn exit_status_display() {
        assert_eq!(ExitStatus::with_code(3).to_string(), "code 3");
        let signaled = ExitStatus {
            code: 1,
            signal: Some("Hangup".into()),
        };
        assert_eq!(signaled.to_string(), "signal Hangup");
        assert!(!signaled.success());
        assert!(ExitStatus::with_code(0).success());
    }
}
