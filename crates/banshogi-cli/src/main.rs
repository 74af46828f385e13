// Interactive terminal front end for the banshogi engine.
//
// Reads move commands from stdin ("g3g4", "h6h7+", "P*d4"), prints the board
// after every round and announces the winner. Intended for local play and
// engine debugging; the production surface is the game service, not this
// binary.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use banshogi_core::{Game, GameStatus};
use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sente player name
    #[arg(long, default_value = "sente")]
    sente: String,

    /// Gote player name
    #[arg(long, default_value = "gote")]
    gote: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    info!("starting game: {} vs {}", args.sente, args.gote);
    let mut game = Game::new(args.sente, args.gote);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("Round: {}", game.round() + 1);
        println!("Current player: {}", game.player(game.side_to_move()).name());
        println!();
        print!("{}", game.render());
        println!();
        print!("Input your move: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if command == "quit" {
            break;
        }

        match game.submit(command) {
            Ok(GameStatus::Finished { winner }) => {
                println!();
                print!("{}", game.render());
                println!();
                println!("Winner is {}", game.player(winner).name());
                break;
            }
            Ok(GameStatus::InProgress) => {
                println!("{}", "-".repeat(35));
            }
            Err(err) => {
                println!("Error message: {err}");
                println!("{}", "-".repeat(35));
            }
        }
    }

    Ok(())
}
