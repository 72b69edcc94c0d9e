use std::cell::RefCell;
use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use timechat_api::{ClientConfig, PollinationsClient};
use timechat_chat::{run_turn, TurnRequest};
use timechat_models::{Message, Persona};

#[derive(Parser, Debug)]
#[command(name = "timechat", about = "Terminal chat with the TimeMachine personas")]
struct Args {
    /// Persona to chat with: default, girlie, or pro
    #[arg(short, long, default_value = "default")]
    persona: String,

    /// API token, also used for generated image URLs
    #[arg(long, env = "TIMECHAT_POLLINATIONS_TOKEN")]
    token: Option<String>,

    /// Log outgoing requests and raw stream chunks
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let persona = Persona::from_str(&args.persona).unwrap_or_else(|| {
        eprintln!(
            "{} Unknown persona '{}', using default",
            "warning:".yellow(),
            args.persona
        );
        Persona::Default
    });
    let config = persona.config();

    let client = PollinationsClient::new(ClientConfig {
        token: args.token,
        verbose: args.verbose,
        ..ClientConfig::default()
    });

    let mut history: Vec<Message> = vec![config.initial_message()];
    println!(
        "{} {}",
        format!("{}:", config.name).bright_magenta().bold(),
        config.initial_greeting
    );
    println!("{}", "Type a message, or 'exit' to quit.".bright_black());

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline(&format!("{} ", ">".bright_green())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }
        editor.add_history_entry(input)?;

        print!("{} ", format!("{}:", config.name).bright_magenta().bold());
        io::stdout().flush()?;

        // Updates carry the full text; print only the unseen suffix. Byte
        // slicing is safe because content grows append-only.
        let printed = RefCell::new(0usize);
        run_turn(
            &client,
            persona,
            &mut history,
            TurnRequest::text(input),
            |message| {
                let mut printed = printed.borrow_mut();
                if message.content.len() > *printed {
                    print!("{}", &message.content[*printed..]);
                    let _ = io::stdout().flush();
                    *printed = message.content.len();
                }
            },
            |error| {
                if error.is_rate_limit() {
                    eprintln!(
                        "\n{} Rate limit exceeded, please wait a moment and try again.",
                        "error:".red().bold()
                    );
                } else {
                    eprintln!("\n{} {}", "error:".red().bold(), error);
                }
            },
        )
        .await;

        println!();
    }

    println!("{}", "Bye!".bright_black());
    Ok(())
}
