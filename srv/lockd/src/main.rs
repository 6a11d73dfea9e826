use actix_web::{web, App, HttpServer};
use clap::{value_parser, Arg, Command};
use log::{error, info, warn};
use std::fs::OpenOptions;
use std::sync::Arc;
use std::time::Duration;

use lockd::handlers;
use lockd::models::AppState;
use lockd::services::game::{GameService, Stores};
use lockd::services::word_loader::WordList;
use lockd::store::MemoryStore;

// Function to initialize logging
fn init_logging(log_file: Option<&String>) -> std::io::Result<()> {
    if let Some(file) = log_file {
        let log_output = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)?;

        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(log_output)))
            .init();
    } else {
        env_logger::init();
    }
    Ok(())
}

fn spawn_daily_scheduler(state: web::Data<AppState>, every: Duration) {
    actix_web::rt::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately; the first daily lock comes one period in.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match state.game.create_daily_puzzle(state.daily_length) {
                Ok(puzzle_id) => info!("Scheduled daily puzzle {} created", puzzle_id),
                Err(e) => error!("Daily puzzle creation failed: {}", e),
            }
        }
    });
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let matches = Command::new("lockd")
        .version("1.0")
        .author("Ron Straight <straightre@gmail.com>")
        .about("Puzzle, scoring and progress service for Crack the Lock")
        .arg(
            Arg::new("listen-host")
                .long("listen-host")
                .num_args(1)
                .default_value("0.0.0.0:2345")
                .help("Specify the listen address (e.g., 0.0.0.0:2345)"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .num_args(1)
                .help("Specify a log file path (if omitted, logs to stderr)"),
        )
        .arg(
            Arg::new("share-dir")
                .long("share-dir")
                .num_args(1)
                .default_value("./share")
                .help("Directory containing the word files"),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .num_args(1)
                .default_value("en")
                .help("Language of the puzzle dictionary"),
        )
        .arg(
            Arg::new("daily-length")
                .long("daily-length")
                .num_args(1)
                .default_value("5")
                .value_parser(value_parser!(usize))
                .help("Word length of scheduled daily puzzles"),
        )
        .arg(
            Arg::new("welcome-length")
                .long("welcome-length")
                .num_args(1)
                .default_value("4")
                .value_parser(value_parser!(usize))
                .help("Word length of the welcome puzzle"),
        )
        .arg(
            Arg::new("daily-interval-secs")
                .long("daily-interval-secs")
                .num_args(1)
                .default_value("86400")
                .value_parser(value_parser!(u64))
                .help("Seconds between daily puzzles (0 disables the scheduler)"),
        )
        .get_matches();

    let listen_host = matches
        .get_one::<String>("listen-host")
        .cloned()
        .unwrap_or_else(|| "0.0.0.0:2345".to_string());
    let log_file = matches.get_one::<String>("log-file");
    let share_dir = matches
        .get_one::<String>("share-dir")
        .cloned()
        .unwrap_or_else(|| "./share".to_string());
    let lang = matches
        .get_one::<String>("lang")
        .cloned()
        .unwrap_or_else(|| "en".to_string());
    let daily_length = matches.get_one::<usize>("daily-length").copied().unwrap_or(5);
    let welcome_length = matches.get_one::<usize>("welcome-length").copied().unwrap_or(4);
    let daily_interval = matches.get_one::<u64>("daily-interval-secs").copied().unwrap_or(86_400);

    init_logging(log_file)?;

    info!("Loading word list for language: {}", lang);
    let words = WordList::load(&share_dir, &lang.to_lowercase());
    if words.is_empty() {
        warn!("Dictionary for {} is empty; puzzle creation will be rejected.", lang);
    } else {
        info!("Dictionary for {} holds {} words", lang, words.len());
    }
    for (purpose, length) in [("daily", daily_length), ("welcome", welcome_length)] {
        if words.count_of_length(length) == 0 {
            warn!("No {}-letter words for the {} puzzle.", length, purpose);
        }
    }

    let store = Arc::new(MemoryStore::new());
    let game = GameService::new(Stores::in_memory(store), Arc::new(words));
    let shared_state = web::Data::new(AppState {
        game,
        daily_length,
        welcome_length,
    });

    if daily_interval > 0 {
        spawn_daily_scheduler(shared_state.clone(), Duration::from_secs(daily_interval));
    }

    info!("Listening on {}", listen_host);
    HttpServer::new(move || {
        App::new()
            .app_data(shared_state.clone())
            .configure(handlers::configure)
    })
    .bind(&listen_host)?
    .run()
    .await
}
