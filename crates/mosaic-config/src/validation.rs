//! Full configuration validation.
//!
//! Validates numeric ranges and collects every problem into one error.

use crate::schema::MosaicConfig;
use mosaic_common::ConfigError;
use mosaic_pty::KILL_WAIT;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &MosaicConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    // Workspace
    validate_range(&mut errors, "workspace.width", config.workspace.width as u64, 200, 16_384);
    validate_range(&mut errors, "workspace.height", config.workspace.height as u64, 150, 16_384);
    validate_range(&mut errors, "workspace.cell_width", config.workspace.cell_width as u64, 1, 64);
    validate_range(&mut errors, "workspace.cell_height", config.workspace.cell_height as u64, 1, 128);
    validate_range(
        &mut errors,
        "workspace.event_capacity",
        config.workspace.event_capacity as u64,
        16,
        65_536,
    );

    // Pane defaults
    if config.panes.title.trim().is_empty() {
        errors.push("panes.title must not be empty".into());
    }
    validate_range(&mut errors, "panes.history_limit", config.panes.history_limit as u64, 0, 10_000);
    validate_range(
        &mut errors,
        "panes.output_buffer_bytes",
        config.panes.output_buffer_bytes as u64,
        4096,
        64 * 1024 * 1024,
    );

    // Process timing
    validate_range(
        &mut errors,
        "process.terminate_grace_ms",
        config.process.terminate_grace_ms,
        0,
        30_000,
    );
    validate_range(
        &mut errors,
        "process.close_timeout_ms",
        config.process.close_timeout_ms,
        100,
        60_000,
    );

    let kill_wait_ms = KILL_WAIT.as_millis() as u64;
    let needed = config.process.terminate_grace_ms.saturating_add(kill_wait_ms);
    if config.process.close_timeout_ms < needed {
        errors.push(format!(
            "process.close_timeout_ms = {} must cover terminate_grace_ms + {kill_wait_ms} ({needed})",
            config.process.close_timeout_ms
        ));
    }

    // Interaction
    validate_range(
        &mut errors,
        "interaction.frame_interval_ms",
        config.interaction.frame_interval_ms,
        1,
        1000,
    );
    validate_range(&mut errors, "interaction.edge_margin", config.interaction.edge_margin as u64, 1, 32);
    validate_range(
        &mut errors,
        "interaction.title_bar_height",
        config.interaction.title_bar_height as u64,
        0,
        200,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
