//! Line-oriented control of a headless workspace.
//!
//! Lines starting with `:` are workspace commands; anything else is typed
//! into the active pane.

use mosaic_common::PaneId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Send a line to the active pane.
    Line(String),
    New,
    Focus(PaneId),
    /// Close the given pane, or the active one.
    Close(Option<PaneId>),
    Restart(Option<PaneId>),
    Minimize(Option<PaneId>),
    Maximize(Option<PaneId>),
    Resize(Option<PaneId>, i32, i32),
    Move(Option<PaneId>, i32, i32),
    List,
    Save(String),
    Quit,
    Help,
    Invalid(String),
}

pub const HELP: &str = "\
:new                 open a pane
:focus N             make pane N active
:close [N]           close pane N (default: active)
:restart [N]         restart an exited pane
:min [N] / :max [N]  toggle minimize / maximize
:resize [N] W H      resize a pane
:move [N] X Y        move a pane
:list                list panes
:save NAME           save the layout
:quit                close every pane and exit";

fn pane_id(arg: &str) -> Option<PaneId> {
    arg.trim_start_matches("pane-").parse().ok().map(PaneId)
}

/// Optional leading pane id followed by exactly two integers.
fn geometry(args: &[&str]) -> Option<(Option<PaneId>, i32, i32)> {
    match args {
        [a, b] => Some((None, a.parse().ok()?, b.parse().ok()?)),
        [id, a, b] => Some((Some(pane_id(id)?), a.parse().ok()?, b.parse().ok()?)),
        _ => None,
    }
}

pub fn parse_line(line: &str) -> ConsoleInput {
    let Some(command) = line.strip_prefix(':') else {
        return ConsoleInput::Line(line.to_string());
    };
    let mut words = command.split_whitespace();
    let Some(verb) = words.next() else {
        return ConsoleInput::Help;
    };
    let args: Vec<&str> = words.collect();

    let target = |args: &[&str]| match args {
        [] => Some(None),
        [id] => pane_id(id).map(Some),
        _ => None,
    };
    let invalid = || ConsoleInput::Invalid(line.to_string());

    match verb {
        "new" => ConsoleInput::New,
        "focus" => match args.as_slice() {
            [id] => pane_id(id).map_or_else(invalid, ConsoleInput::Focus),
            _ => invalid(),
        },
        "close" => target(&args[..]).map_or_else(invalid, ConsoleInput::Close),
        "restart" => target(&args[..]).map_or_else(invalid, ConsoleInput::Restart),
        "min" | "minimize" => target(&args[..]).map_or_else(invalid, ConsoleInput::Minimize),
        "max" | "maximize" => target(&args[..]).map_or_else(invalid, ConsoleInput::Maximize),
        "resize" => {
            geometry(&args).map_or_else(invalid, |(id, w, h)| ConsoleInput::Resize(id, w, h))
        }
        "move" => geometry(&args).map_or_else(invalid, |(id, x, y)| ConsoleInput::Move(id, x, y)),
        "list" | "ls" => ConsoleInput::List,
        "save" => match args.as_slice() {
            [name] => ConsoleInput::Save((*name).to_string()),
            _ => invalid(),
        },
        "quit" | "q" => ConsoleInput::Quit,
        "help" | "?" => ConsoleInput::Help,
        _ => invalid(),
    }
}
