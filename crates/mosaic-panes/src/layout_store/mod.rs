//! Named, persisted pane layouts.
//!
//! A layout records what each pane looks like and what it runs, never the
//! live process. Saving reads the manager's panes; loading creates new
//! panes through [`PaneManager::create`], alongside any that already exist.

mod backend;
mod snapshot;

pub use backend::{FileBackend, MemoryBackend, PersistenceBackend};
pub use snapshot::{LayoutSnapshot, PaneConfigRecord, LAYOUT_SCHEMA_VERSION};

use std::sync::Arc;

use mosaic_common::{LayoutError, PaneError, PaneId};

use crate::manager::PaneManager;

/// Saves and restores layouts through a [`PersistenceBackend`].
#[derive(Clone)]
pub struct LayoutStore {
    backend: Arc<dyn PersistenceBackend>,
}

impl LayoutStore {
    pub fn new(backend: Arc<dyn PersistenceBackend>) -> Self {
        Self { backend }
    }

    /// Snapshot the manager's open panes under `name`, replacing any
    /// layout already saved with that name.
    pub fn save(&self, manager: &PaneManager, name: &str) -> Result<LayoutSnapshot, LayoutError> {
        let snapshot = LayoutSnapshot::capture(name, &manager.panes());
        self.backend.set(name, &snapshot.to_json()?)?;
        tracing::info!(layout = %name, panes = snapshot.panes.len(), "layout saved");
        Ok(snapshot)
    }

    /// Create one pane per record of layout `name`.
    ///
    /// Panes whose shell fails to start are still returned; they remain
    /// registered as `Disconnected`.
    pub async fn load(
        &self,
        manager: &PaneManager,
        name: &str,
    ) -> Result<Vec<PaneId>, LayoutError> {
        let snapshot = self.get(name)?;
        let mut ids = Vec::with_capacity(snapshot.panes.len());
        for record in &snapshot.panes {
            match manager.create(record.to_config()).await {
                Ok(id) => ids.push(id),
                Err(PaneError::Spawn { id, source }) => {
                    tracing::warn!(
                        layout = %name,
                        pane_id = %id,
                        error = %source,
                        "restored pane has no shell"
                    );
                    ids.push(id);
                }
                Err(e) => {
                    tracing::warn!(
                        layout = %name,
                        title = %record.title,
                        error = %e,
                        "pane not restored"
                    );
                }
            }
        }
        tracing::info!(layout = %name, panes = ids.len(), "layout loaded");
        Ok(ids)
    }

    pub fn get(&self, name: &str) -> Result<LayoutSnapshot, LayoutError> {
        let bytes = self
            .backend
            .get(name)?
            .ok_or_else(|| LayoutError::NotFound(name.to_string()))?;
        LayoutSnapshot::from_json(&bytes)
    }

    pub fn list(&self) -> Result<Vec<String>, LayoutError> {
        self.backend.keys()
    }

    pub fn delete(&self, name: &str) -> Result<(), LayoutError> {
        if self.backend.remove(name)? {
            tracing::info!(layout = %name, "layout deleted");
            Ok(())
        } else {
            Err(LayoutError::NotFound(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::PaneConfig;
    use crate::testing::harness;
    use mosaic_common::{ConnectionKind, PaneState, Rect};
    use std::path::PathBuf;

    fn memory_store() -> LayoutStore {
        LayoutStore::new(Arc::new(MemoryBackend::new()))
    }

    type Key = (String, ConnectionKind, Rect, Option<PathBuf>);

    fn keys(mgr: &PaneManager) -> Vec<Key> {
        let mut keys: Vec<Key> = mgr
            .panes()
            .into_iter()
            .map(|p| {
                (
                    p.title,
                    p.connection_kind,
                    p.rect,
                    p.metadata.working_directory,
                )
            })
            .collect();
        keys.sort_by(|a, b| a.0.cmp(&b.0));
        keys
    }

    #[tokio::test]
    async fn save_close_load_round_trip() {
        let (mgr, _spawner, _displays) = harness();
        let store = memory_store();
        let a = mgr
            .create(PaneConfig::titled("A").at(Rect::new(0, 0, 400, 300)))
            .await
            .unwrap();
        mgr.create(
            PaneConfig::titled("B")
                .at(Rect::new(400, 0, 400, 300))
                .in_dir("/tmp"),
        )
        .await
        .unwrap();
        mgr.create(PaneConfig::titled("C").at(Rect::new(0, 300, 800, 300)).remote())
            .await
            .unwrap();
        let before = keys(&mgr);

        let snapshot = store.save(&mgr, "work").unwrap();
        assert_eq!(snapshot.panes.len(), 3);
        assert_eq!(mgr.shutdown().await, 3);

        let ids = store.load(&mgr, "work").await.unwrap();
        assert_eq!(ids.len(), 3);
        assert!(!ids.contains(&a));
        assert_eq!(keys(&mgr), before);
        assert!(ids
            .iter()
            .all(|id| mgr.pane(*id).unwrap().state == PaneState::Active));
    }

    #[tokio::test]
    async fn load_is_additive() {
        let (mgr, _spawner, _displays) = harness();
        let store = memory_store();
        mgr.create(PaneConfig::titled("A")).await.unwrap();
        store.save(&mgr, "one").unwrap();

        store.load(&mgr, "one").await.unwrap();
        assert_eq!(mgr.pane_count(), 2);
    }

    #[tokio::test]
    async fn load_missing_layout_fails() {
        let (mgr, _spawner, _displays) = harness();
        let err = memory_store().load(&mgr, "nope").await.unwrap_err();
        assert!(matches!(err, LayoutError::NotFound(ref n) if n == "nope"));
        assert_eq!(mgr.pane_count(), 0);
    }

    #[tokio::test]
    async fn load_returns_panes_whose_spawn_failed() {
        let (mgr, spawner, _displays) = harness();
        let store = memory_store();
        mgr.create(PaneConfig::titled("A")).await.unwrap();
        store.save(&mgr, "l").unwrap();
        mgr.shutdown().await;

        spawner.set_failing(true);
        let ids = store.load(&mgr, "l").await.unwrap();
        assert_eq!(ids.len(), 1);
        assert_eq!(mgr.pane(ids[0]).unwrap().state, PaneState::Disconnected);
    }

    #[tokio::test]
    async fn maximized_pane_reloads_at_restore_rect() {
        let (mgr, _spawner, _displays) = harness();
        let store = memory_store();
        let original = Rect::new(30, 30, 500, 400);
        let id = mgr
            .create(PaneConfig::titled("M").at(original))
            .await
            .unwrap();
        mgr.maximize(id).unwrap();
        store.save(&mgr, "max").unwrap();
        mgr.shutdown().await;

        let ids = store.load(&mgr, "max").await.unwrap();
        let pane = mgr.pane(ids[0]).unwrap();
        assert_eq!(pane.rect, original);
        assert_eq!(pane.state, PaneState::Active);
    }

    #[tokio::test]
    async fn restored_panes_keep_terminal_settings() {
        let (mgr, spawner, _displays) = harness();
        let store = memory_store();
        let mut config = PaneConfig::titled("T").shell("/bin/bash");
        config.terminal.env.insert("MODE".into(), "dev".into());
        mgr.create(config).await.unwrap();
        store.save(&mgr, "t").unwrap();

        store.load(&mgr, "t").await.unwrap();
        let request = &spawner.requests()[1];
        assert_eq!(request.program, "/bin/bash");
        assert_eq!(request.env.get("MODE").map(String::as_str), Some("dev"));
    }

    #[tokio::test]
    async fn list_get_delete() {
        let (mgr, _spawner, _displays) = harness();
        let dir = tempfile::tempdir().unwrap();
        let store = LayoutStore::new(Arc::new(FileBackend::new(dir.path())));
        mgr.create(PaneConfig::titled("A")).await.unwrap();

        store.save(&mgr, "beta").unwrap();
        store.save(&mgr, "alpha").unwrap();
        assert_eq!(store.list().unwrap(), vec!["alpha", "beta"]);
        assert_eq!(store.get("alpha").unwrap().panes[0].title, "A");

        store.delete("alpha").unwrap();
        assert_eq!(store.list().unwrap(), vec!["beta"]);
        assert!(matches!(
            store.delete("alpha"),
            Err(LayoutError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn save_overwrites_same_name() {
        let (mgr, _spawner, _displays) = harness();
        let store = memory_store();
        mgr.create(PaneConfig::titled("A")).await.unwrap();
        store.save(&mgr, "l").unwrap();
        mgr.create(PaneConfig::titled("B")).await.unwrap();
        store.save(&mgr, "l").unwrap();
        assert_eq!(store.get("l").unwrap().panes.len(), 2);
    }
}
