use std::process::ExitCode;

use structopt::StructOpt;
use tile_chess::board::Layout;
use tile_chess::game_logic::{self, Match};
use tile_chess::mock::{ScriptedClicks, TerminalDisplay, run_interactive_terminal};
use tracing_subscriber::EnvFilter;

/// Two-click chess board in the terminal.
#[derive(Debug, StructOpt)]
struct Options {
    /// Starting layout: prototype, full or empty.
    #[structopt(short, long, default_value = "prototype")]
    layout: Layout,

    /// Click script to play instead of reading commands, e.g. "e2e4. d7d5."
    #[structopt(short, long)]
    script: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = Options::from_args();
    log::info!("Chess Board - {:?} layout", options.layout);

    let mut game = match Match::with_layout(options.layout) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("invalid setup: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(script) = options.script else {
        run_interactive_terminal(game);
        return ExitCode::SUCCESS;
    };

    let mut clicks = ScriptedClicks::new();
    if let Err(e) = clicks.push_script(&script) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }
    match game_logic::run(&mut game, &mut clicks, &mut TerminalDisplay::new()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
