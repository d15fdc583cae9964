use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::{ChatTurn, Session};
use crate::core::AppConfig;
use crate::openai::Role;
use crate::planner::{EXAMPLE_PROMPTS, TravelPlanner};

fn print_turn(turn: &ChatTurn) {
    let speaker = match turn.role {
        Role::Assistant => "planner",
        Role::User => "you",
        Role::System => "system",
    };
    println!("{}> {}\n", speaker, turn.content);
}

fn print_examples() {
    println!("Try asking:");
    for example in EXAMPLE_PROMPTS {
        println!("  - {}", example);
    }
    println!();
}

pub async fn run(config: AppConfig) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut session = Session::new(TravelPlanner::new(&config)?);

    for turn in session.transcript().all() {
        print_turn(turn);
    }
    print_examples();
    println!("Commands: /reset /info /examples /quit\n");

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                match line {
                    "" => continue,
                    "/quit" | "/exit" => break,
                    "/reset" => {
                        session.reset();
                        println!("Started a new conversation.\n");
                        for turn in session.transcript().all() {
                            print_turn(turn);
                        }
                        continue;
                    }
                    "/info" => {
                        println!(
                            "Model: {}\nMessages: {}\n",
                            session.planner().model(),
                            session.message_count()
                        );
                        continue;
                    }
                    "/examples" => {
                        print_examples();
                        continue;
                    }
                    _ => {}
                }

                let _ = rl.add_history_entry(line);
                println!("Planning your Hong Kong experience...\n");
                let reply = session.submit(line).await?;
                print_turn(reply);
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
