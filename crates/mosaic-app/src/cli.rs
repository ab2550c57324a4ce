use clap::{Parser, Subcommand};

/// Mosaic: a workspace of independent terminal panes.
#[derive(Parser, Debug)]
#[command(name = "mosaic", version, about)]
pub struct Args {
    /// Working directory to start in.
    #[arg(short = 'd', long, global = true)]
    pub directory: Option<String>,

    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log level override (e.g. `debug`, `mosaic_panes=trace`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a headless workspace on this terminal (the default).
    Run(RunArgs),

    /// Manage saved layouts.
    Layouts {
        #[command(subcommand)]
        action: LayoutAction,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Number of panes to open when no layout is given.
    #[arg(long, default_value_t = 1)]
    pub panes: usize,

    /// Restore this saved layout instead of opening fresh panes.
    #[arg(long)]
    pub layout: Option<String>,

    /// Save the workspace under this name before exiting.
    #[arg(long)]
    pub save_layout: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum LayoutAction {
    /// List saved layout names.
    List,
    /// Print a saved layout as JSON.
    Show { name: String },
    /// Delete a saved layout.
    Delete { name: String },
}

pub fn parse() -> Args {
    Args::parse()
}
