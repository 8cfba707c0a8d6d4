//! Range Bot shell
//!
//! An interactive command-line host for the range bot, classifying through LUIS.
//!
//! # Usage
//!
//! ```bash
//! # Set up environment variables
//! export LuisAppId="your-app-id"
//! export LuisAPIKey="your-subscription-key"
//!
//! # Run the bot
//! cargo run --bin range-bot -p range-bot -- --begin greet-and-continue
//! ```

use clap::Parser;
use range_bot::{BeginBehavior, BotConfig, Command, RangeBot};
use range_core::SeededRandom;
use range_nlu::providers::LuisRecognizer;
use range_utils::{AppConfig, init_tracing_with};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "range-bot")]
#[command(about = "Chat with the random number range bot", long_about = None)]
struct Args {
    /// Conversation id (default: a random one)
    #[arg(short, long)]
    conversation: Option<String>,

    /// Conversation start behavior: greet, greet-and-continue or silent
    #[arg(short, long)]
    begin: Option<BeginBehavior>,

    /// Attach a speech variant to every reply
    #[arg(long)]
    voice: bool,

    /// Print replies as JSON lines
    #[arg(long)]
    json: bool,

    /// Seed the random number source for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = AppConfig::from_env();
    init_tracing_with(app.log_format(), "warn,range_bot=info");

    let args = Args::parse();

    // Flags override the environment
    let env_config = BotConfig::from_env()?;
    let config = BotConfig::builder()
        .intent_threshold(env_config.intent_threshold)
        .begin(args.begin.unwrap_or(env_config.begin))
        .voice(args.voice || env_config.voice)
        .build()?;

    let recognizer = Arc::new(LuisRecognizer::from_env()?);
    info!(
        environment = %app.environment,
        host = %recognizer.config().host_name,
        "Starting range-bot"
    );

    let mut bot = RangeBot::new(recognizer, config)?;
    if let Some(seed) = args.seed {
        bot = bot.with_random(Arc::new(SeededRandom::new(seed)));
    }

    let conversation = args
        .conversation
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!();
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        if input.trim().is_empty() {
            continue;
        }

        let text = match Command::parse(&input) {
            Ok(Command::Say { text }) => text,
            Ok(Command::Reset) => {
                bot.end_conversation(&conversation)?;
                println!("Conversation reset.\n");
                continue;
            }
            Ok(Command::Help) => {
                println!("{}\n", Command::help_text());
                continue;
            }
            Ok(Command::Exit) => break,
            Err(e) => {
                eprintln!("{e}\n");
                continue;
            }
        };

        match bot.on_message(&conversation, &text).await {
            Ok(replies) => {
                for reply in replies {
                    if args.json {
                        println!("{}", reply.to_json_line()?);
                    } else {
                        println!("{}", reply.text);
                    }
                }
                println!();
            }
            Err(e) => eprintln!("Error: {e}\n"),
        }
    }

    Ok(())
}
