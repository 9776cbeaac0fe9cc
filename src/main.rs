mod codec;
mod database;
mod film;
mod index;
mod mapping;
mod path;
mod search;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dialoguer::Input;

use crate::database::Database;
use crate::search::shortest_path;

/// Finds a shortest alternating actor/film path between two performers.
#[derive(Parser)]
#[command(name = "six-degrees")]
struct Cli {
    /// Directory containing `actors.data` and `movies.data`.
    data_directory: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprint!("{e}");
            return ExitCode::from(1);
        }
    };

    let db = Database::open(&cli.data_directory);
    if !db.good() {
        eprintln!("Failed to properly initialize the movie database.");
        eprintln!(
            "Please check to make sure the source files exist and that you have permission to read them."
        );
        return ExitCode::FAILURE;
    }

    run_repl(&db);
    ExitCode::SUCCESS
}

fn run_repl(db: &Database) {
    loop {
        let Some(source) = prompt_for_actor("Actor or actress", db) else {
            break;
        };
        let Some(target) = prompt_for_actor("Another actor or actress", db) else {
            break;
        };

        if source == target {
            println!("Good one.  This is only interesting if you specify two different people.");
            continue;
        }

        let path = shortest_path(db, &source, &target);
        println!();
        if path.length() > 0 {
            print!("{}", path.render());
        } else {
            println!("No path between those two people could be found.");
        }
        println!();
    }

    println!("Thanks for playing!");
}

/// Prompts for an actor name, re-prompting on unknown names until the
/// database confirms the name has at least one credit, or the user quits
/// by hitting enter on an empty line.
fn prompt_for_actor(prompt: &str, db: &Database) -> Option<String> {
    loop {
        let response: String = Input::new()
            .with_prompt(format!("{prompt} [or <enter> to quit]"))
            .allow_empty(true)
            .interact_text()
            .unwrap_or_default();

        if response.is_empty() {
            return None;
        }
        if db.credits(&response).is_some() {
            return Some(response);
        }
        println!("We couldn't find \"{response}\" in the movie database. Please try again.");
    }
}
