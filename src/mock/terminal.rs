use std::io::{self, BufRead, Write};

use super::TerminalDisplay;
use crate::BoardDisplay;
use crate::board::Layout;
use crate::feedback::compute_feedback;
use crate::game_logic::{Match, MatchState};
use crate::position::Position;
use crate::selection::Transition;

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// Runs an interactive terminal session standing in for a mouse-driven board.
///
/// Each `c <square>` command is one cell activation; the board is redrawn
/// with selection highlights after every event.
pub fn run_interactive_terminal(mut game: Match) {
    let mut display = TerminalDisplay::new();

    clear_screen();
    draw_interface(&mut display, &game.state());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            eprintln!("Failed to flush stdout: {}", e);
            break;
        }

        let input = match lines.next() {
            Some(Ok(input)) => input,
            Some(Err(e)) => {
                eprintln!("Failed to read input: {}", e);
                break;
            }
            None => break,
        };

        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "c" => {
                let Some(arg) = parts.get(1) else {
                    println!("Usage: c <square>");
                    continue;
                };
                match arg.parse::<Position>() {
                    Ok(pos) => match game.activate(pos) {
                        Ok(state) => {
                            clear_screen();
                            draw_interface(&mut display, &state);
                            if let Some(transition) = state.transition() {
                                println!("{}", describe(transition));
                            }
                        }
                        Err(e) => println!("❌ {}", e),
                    },
                    Err(e) => println!("Invalid square: {}", e),
                }
            }
            "load" => {
                let Some(arg) = parts.get(1) else {
                    println!("Usage: load prototype|full|empty");
                    continue;
                };
                match arg.parse::<Layout>().map(Match::with_layout) {
                    Ok(Ok(loaded)) => {
                        game = loaded;
                        clear_screen();
                        draw_interface(&mut display, &game.state());
                    }
                    Ok(Err(e)) => println!("❌ Invalid setup: {}", e),
                    Err(e) => println!("❌ {}", e),
                }
            }
            "r" => match game.reset() {
                Ok(()) => {
                    clear_screen();
                    draw_interface(&mut display, &game.state());
                    println!("\n🔄 Reset to initial state");
                }
                Err(e) => println!("❌ {}", e),
            },
            "p" => {
                clear_screen();
                draw_interface(&mut display, &game.state());
            }
            "q" => break,
            _ => println!("Unknown command"),
        }
    }
}

/// Draws the complete interface: help text and board.
fn draw_interface(display: &mut TerminalDisplay, state: &MatchState) {
    println!("♟️  Chess Board");
    println!();
    println!("Commands: c <square> | load <layout> | r (reset) | p (refresh) | q (quit)");
    println!();

    if let Err(e) = display.show(state.snapshot(), &compute_feedback(state)) {
        eprintln!("Failed to draw board: {}", e);
    }
}

/// One-line summary of what an activation did.
fn describe(transition: Transition) -> String {
    match transition {
        Transition::Ignored(pos) => format!("{pos} is empty"),
        Transition::Selected(pos) => format!("Selected {pos}"),
        Transition::Deselected(pos) => format!("Deselected {pos}"),
        Transition::Moved {
            from,
            to,
            captured: Some(captured),
        } => format!("{from} → {to}, captured {captured}"),
        Transition::Moved { from, to, .. } => format!("{from} → {to}"),
        Transition::Rejected { from, to } => format!("{from} → {to} is not allowed"),
    }
}
