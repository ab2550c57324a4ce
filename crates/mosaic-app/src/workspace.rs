//! `mosaic run`: a headless workspace driven from stdin.

use std::path::PathBuf;
use std::sync::Arc;

use mosaic_common::{PaneEvent, PaneId, PaneState};
use mosaic_config::MosaicConfig;
use mosaic_panes::{
    FileBackend, LayoutStore, ManagerSettings, PaneCommand, PaneConfig, PaneManager,
    PersistenceBackend,
};
use mosaic_pty::PtySpawner;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use crate::cli::RunArgs;
use crate::console::{parse_line, ConsoleInput, HELP};
use crate::display::StdoutDisplays;
use crate::error::AppError;

/// The layout backend named by the config, or the platform default.
pub fn layout_backend(config: &MosaicConfig) -> Result<Arc<dyn PersistenceBackend>, AppError> {
    let backend = match &config.layouts.directory {
        Some(dir) => FileBackend::new(PathBuf::from(dir)),
        None => FileBackend::open_default()?,
    };
    tracing::debug!(dir = %backend.dir().display(), "layout directory");
    Ok(Arc::new(backend))
}

pub async fn run(config: MosaicConfig, args: RunArgs) -> Result<(), AppError> {
    let manager = PaneManager::new(
        ManagerSettings::from_config(&config),
        Arc::new(PtySpawner),
        Arc::new(StdoutDisplays),
    );
    let store = LayoutStore::new(layout_backend(&config)?);
    let mut events = manager.subscribe();

    match &args.layout {
        Some(name) => {
            store.load(&manager, name).await?;
        }
        None => {
            let count = args.panes.max(1);
            for n in 1..=count {
                let pane_config = if count > 1 {
                    PaneConfig::titled(format!("{} {n}", config.panes.title))
                } else {
                    PaneConfig::default()
                };
                if let Err(e) = manager.create(pane_config).await {
                    tracing::warn!(error = %e, "pane failed to open");
                }
            }
        }
    }
    eprintln!("mosaic: {} pane(s) open, type :help for commands", manager.pane_count());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    if !handle_line(&manager, &store, &line).await {
                        break;
                    }
                }
                None => break,
            },
            event = events.recv() => match event {
                Ok(PaneEvent::Exited { id, status }) => {
                    tracing::info!(pane_id = %id, ?status, "pane shell exited");
                    if !manager.panes().iter().any(|p| p.state.is_live()) {
                        eprintln!("mosaic: no running shells left");
                        break;
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(n)) => tracing::debug!(skipped = n, "event stream lagged"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    if let Some(name) = &args.save_layout {
        let snapshot = store.save(&manager, name)?;
        eprintln!("mosaic: saved layout '{name}' ({} panes)", snapshot.panes.len());
    }
    let closed = manager.shutdown().await;
    tracing::info!(closed, "workspace closed");
    Ok(())
}

fn target(manager: &PaneManager, id: Option<PaneId>) -> Option<PaneId> {
    id.or_else(|| manager.active_pane_id())
}

/// Act on one console line. Returns `false` to end the session.
async fn handle_line(manager: &PaneManager, store: &LayoutStore, line: &str) -> bool {
    let result = match parse_line(line) {
        ConsoleInput::Line(text) => match manager.active_pane_id() {
            Some(id) => manager
                .write(id, format!("{text}\n").as_bytes())
                .map_err(AppError::from),
            None => {
                eprintln!("mosaic: no active pane");
                Ok(())
            }
        },
        ConsoleInput::New => manager
            .create(PaneConfig::default())
            .await
            .map(|_| ())
            .map_err(AppError::from),
        ConsoleInput::Focus(id) => run_command(manager, PaneCommand::Focus(id)).await,
        ConsoleInput::Close(id) => match target(manager, id) {
            Some(id) => run_command(manager, PaneCommand::Close(id)).await,
            None => Ok(()),
        },
        ConsoleInput::Restart(id) => match target(manager, id) {
            Some(id) => manager.restart(id).await.map_err(AppError::from),
            None => Ok(()),
        },
        ConsoleInput::Minimize(id) => match target(manager, id) {
            Some(id) => run_command(manager, PaneCommand::Minimize(id)).await,
            None => Ok(()),
        },
        ConsoleInput::Maximize(id) => match target(manager, id) {
            Some(id) => run_command(manager, PaneCommand::Maximize(id)).await,
            None => Ok(()),
        },
        ConsoleInput::Resize(id, width, height) => match target(manager, id) {
            Some(id) => run_command(manager, PaneCommand::Resize { id, width, height }).await,
            None => Ok(()),
        },
        ConsoleInput::Move(id, x, y) => match target(manager, id) {
            Some(id) => run_command(manager, PaneCommand::Move { id, x, y }).await,
            None => Ok(()),
        },
        ConsoleInput::List => {
            let active = manager.active_pane_id();
            for pane in manager.panes() {
                let marker = if Some(pane.id) == active { '*' } else { ' ' };
                let r = pane.rect;
                eprintln!(
                    "{marker} {:>3}  {:<12} {:<12} {}x{}+{}+{}",
                    pane.id.0,
                    pane.title,
                    pane.state.to_string(),
                    r.width,
                    r.height,
                    r.x,
                    r.y
                );
            }
            Ok(())
        }
        ConsoleInput::Save(name) => store
            .save(manager, &name)
            .map(|s| eprintln!("mosaic: saved layout '{name}' ({} panes)", s.panes.len()))
            .map_err(AppError::from),
        ConsoleInput::Quit => return false,
        ConsoleInput::Help => {
            eprintln!("{HELP}");
            Ok(())
        }
        ConsoleInput::Invalid(line) => {
            eprintln!("mosaic: unrecognized command '{line}' (try :help)");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("mosaic: {e}");
    }
    true
}

async fn run_command(manager: &PaneManager, command: PaneCommand) -> Result<(), AppError> {
    let outcome = manager.execute(command).await?;
    tracing::debug!(?command, ?outcome, "command applied");
    if let PaneCommand::Close(_) = command {
        if manager.pane_ids().is_empty() {
            eprintln!("mosaic: last pane closed, :new opens another");
        }
    }
    if let Some(pane) = manager.pane(command.pane_id()) {
        if pane.state == PaneState::Minimized {
            eprintln!("mosaic: {} minimized, output hidden", pane.id);
        }
    }
    Ok(())
}
