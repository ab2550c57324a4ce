//! `mosaic layouts`: inspect saved layouts without opening a workspace.

use mosaic_config::MosaicConfig;
use mosaic_panes::LayoutStore;

use crate::cli::LayoutAction;
use crate::error::AppError;
use crate::workspace::layout_backend;

pub fn run(config: &MosaicConfig, action: LayoutAction) -> Result<(), AppError> {
    let store = LayoutStore::new(layout_backend(config)?);
    match action {
        LayoutAction::List => {
            for name in store.list()? {
                match store.get(&name) {
                    Ok(snapshot) => println!(
                        "{name}\t{} panes\tsaved {}",
                        snapshot.panes.len(),
                        snapshot.saved_at.format("%Y-%m-%d %H:%M")
                    ),
                    Err(e) => println!("{name}\t(unreadable: {e})"),
                }
            }
        }
        LayoutAction::Show { name } => {
            let snapshot = store.get(&name)?;
            let json = serde_json::to_string_pretty(&snapshot)
                .map_err(mosaic_common::LayoutError::from)?;
            println!("{json}");
        }
        LayoutAction::Delete { name } => {
            store.delete(&name)?;
            println!("deleted layout '{name}'");
        }
    }
    Ok(())
}
