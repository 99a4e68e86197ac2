//! Play the standard dungeon with a simple strategy and print the transcript.
//!
//! Run with: `cargo run -p dungeon-core --example walkthrough -- [seed]`

use dungeon_core::{Action, HeadlessConfig, HeadlessGame, Outcome};

/// Pick up anything lying around, then fight, then take the newest door.
fn pick_option(actions: &[Action]) -> usize {
    actions
        .iter()
        .position(|a| matches!(a, Action::Pick { .. }))
        .or_else(|| actions.iter().position(|a| matches!(a, Action::Fight { .. })))
        .unwrap_or(actions.len().saturating_sub(1))
}

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(7);

    println!("=== Walking the dungeon with seed {seed} ===\n");

    let config = HeadlessConfig::quick_start("Gandalf").with_seed(seed);
    let mut game = match HeadlessGame::new(config) {
        Ok(game) => game,
        Err(e) => {
            println!("SETUP ERROR: {e}");
            return;
        }
    };

    while !game.is_finished() && game.turn_count() < 100 {
        let choice = pick_option(&game.actions());
        println!("--- Turn {} (option {choice}) ---", game.turn_count() + 1);
        println!("{}\n", game.choose(&choice.to_string()).narrative);
    }

    match game.outcome() {
        Some(Outcome::Victory) => println!("=== Victory after {} turns ===", game.turn_count()),
        Some(Outcome::Defeat) => println!("=== Defeat after {} turns ===", game.turn_count()),
        None => println!("=== Gave up after {} turns ===", game.turn_count()),
    }
}
