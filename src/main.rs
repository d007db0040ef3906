//! threedaysfit - Three-day home gym program tracker

use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use threedaysfit::db::Database;
use threedaysfit::log_form::LogForm;
use threedaysfit::program::{DayId, Exercise, all_exercise_names, find_day, find_exercise, program};
use threedaysfit::remote::{self, FirestoreClient, client::rejected_status};
use threedaysfit::session::google::{self, USERINFO_ENDPOINT};
use threedaysfit::session::SessionStore;
use threedaysfit::stats::Analytics;
use threedaysfit::tracker::{CompletionSignal, ExerciseCard, TrackerEvent, format_clock};
use threedaysfit::tui::App;
use threedaysfit::Config;

#[derive(Parser)]
#[command(name = "threedaysfit")]
#[command(author, version, about = "Three-day home gym program with rest timers and workout logs")]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "THREEDAYSFIT_DB")]
    db: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui {
        /// Start view ("/", "/upper", "/back", "/legs", "/log-workout")
        #[arg(default_value = "/")]
        path: String,
    },

    /// Show the program, or one day in detail
    Program {
        /// Workout day (upper, back, legs)
        day: Option<DayId>,
    },

    /// Log an exercise
    Log {
        /// Exercise name (e.g., "Bench Press")
        exercise: String,

        /// Workout day (upper, back, legs)
        #[arg(short, long)]
        day: String,

        /// Date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Number of sets
        #[arg(short, long, default_value = "3", allow_negative_numbers = true)]
        sets: i64,

        /// Number of reps per set
        #[arg(short, long, default_value = "10", allow_negative_numbers = true)]
        reps: i64,

        /// Weight used
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        weight: f64,

        /// Optional notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List logged workouts, newest first
    List {
        /// Number of records to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Delete a logged workout by id
    Delete {
        id: String,
    },

    /// Show workout statistics
    Stats {
        /// Filter by exercise name
        exercise: Option<String>,
    },

    /// Show today's sets
    Sets {
        /// Only this exercise
        exercise: Option<String>,
    },

    /// Mark a set of an exercise done for today
    Check {
        exercise: String,

        /// Set number, starting at 1
        set: usize,

        /// Mark the set as not done
        #[arg(long)]
        undo: bool,

        /// Weight used for the set
        #[arg(short, long)]
        weight: Option<f64>,

        /// Reps done in the set
        #[arg(short, long)]
        reps: Option<u32>,
    },

    /// Run the rest timer for an exercise
    Timer {
        exercise: String,
    },

    /// Sign in with Google (prints the sign-in URL without a token)
    Login {
        /// ID token (JWT) from Google sign-in
        #[arg(long, conflicts_with = "access_token")]
        id_token: Option<String>,

        /// OAuth access token, exchanged for the profile
        #[arg(long)]
        access_token: Option<String>,

        /// Redirect URI registered for the client
        #[arg(long, default_value = "http://localhost:5173")]
        redirect_uri: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Upload all logs to the document store
    Sync {
        /// Bearer token (default: the signed-in user's access token)
        #[arg(long, env = "THREEDAYSFIT_TOKEN")]
        token: Option<String>,
    },
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui { path: "/".to_string() });

    // The dashboard owns the terminal; stay quiet unless asked
    match command {
        Commands::Tui { .. } => init_logging("off"),
        _ => init_logging("info"),
    }

    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    let db = Database::open(&config.db_path)?;
    let today = Local::now().date_naive();

    match command {
        Commands::Tui { path } => {
            let session = SessionStore::new(&db).load()?;
            let mut app = App::new(db, config, session)?;
            app.navigate(&path)?;
            app.run()?;
        }

        Commands::Program { day } => {
            match day {
                Some(day) => print_day(day),
                None => {
                    for day in program() {
                        println!("{:6} {} - {}", day.id, day.name, day.description);
                        for ex in day.exercises {
                            println!("         {:28} {}x{}  rest {}", ex.name, ex.sets, ex.reps, ex.rest);
                        }
                    }
                }
            }
        }

        Commands::Log { exercise, day, date, sets, reps, weight, notes } => {
            let mut form = LogForm::new(today);
            form.day = day;
            form.exercise = exercise;
            form.sets = sets;
            form.reps = reps;
            form.weight = weight;
            form.notes = notes;
            if let Some(date) = date {
                form.date = date;
            }

            let entry = match form.validate() {
                Ok(entry) => entry,
                Err(errors) => {
                    for e in &errors {
                        eprintln!("  {}", e);
                    }
                    bail!("invalid workout log ({} field error(s))", errors.len());
                }
            };

            let log = db.save_log(entry)?;
            println!(
                "Logged: {} - {}x{} @ {} (id: {})",
                log.exercise, log.sets, log.reps, log.weight, log.id
            );
        }

        Commands::List { limit } => {
            let logs = db.get_logs()?;
            println!("Recent workouts:");
            println!("{:-<90}", "");
            for l in logs.iter().rev().take(limit) {
                println!(
                    "{} | {:13} | {:26} | {}x{} @ {} | {} | {}",
                    l.date.format("%Y-%m-%d"),
                    l.day.label(),
                    l.exercise,
                    l.sets,
                    l.reps,
                    l.weight,
                    l.notes.as_deref().unwrap_or("-"),
                    l.id
                );
            }
        }

        Commands::Delete { id } => {
            if db.delete_log(&id)? {
                println!("Deleted {}", id);
            } else {
                println!("No workout log with id {}", id);
            }
        }

        Commands::Stats { exercise } => {
            let stats = db.stats(today)?;

            println!("Workout Statistics");
            println!("{:-<40}", "");
            println!("Total workouts: {}", stats.total_workouts);
            println!("Current streak: {} day(s)", stats.current_streak);
            println!("Weekly average: {:.1}", stats.avg_weekly);

            if let Some(ex) = exercise {
                let analytics = Analytics::new(db.get_logs()?);
                println!();
                println!("Exercise: {}", ex);
                println!("Total volume: {}", analytics.total_volume(&ex));
                if let Some(best) = analytics.best_weight(&ex) {
                    println!("Best weight: {}", best);
                }
            }
        }

        Commands::Sets { exercise } => {
            let state = db.exercise_sets()?;
            let key = threedaysfit::db::sets::date_key(today);
            let Some(day) = state.get(&key) else {
                println!("No sets recorded today");
                return Ok(());
            };

            for (name, sets) in day {
                if exercise.as_deref().is_some_and(|e| !name.eq_ignore_ascii_case(e)) {
                    continue;
                }
                let done = sets.iter().filter(|s| s.is_complete).count();
                println!("{} ({}/{})", name, done, sets.len());
                for (i, s) in sets.iter().enumerate() {
                    println!(
                        "  {} set {}: {} x {}",
                        if s.is_complete { "[x]" } else { "[ ]" },
                        i + 1,
                        s.weight,
                        s.reps
                    );
                }
            }
        }

        Commands::Check { exercise, set, undo, weight, reps } => {
            let ex = lookup_exercise(&exercise)?;
            if set == 0 || set > ex.sets {
                bail!("{} has sets 1 to {}", ex.name, ex.sets);
            }

            let mut card = ExerciseCard::load(&db, ex, today, CompletionSignal::from_config(&config))?;
            let index = set - 1;
            if let Some(w) = weight
                && !card.set_weight(&db, index, w)?
            {
                bail!("weight must be zero or more");
            }
            if let Some(r) = reps {
                card.set_reps(&db, index, r)?;
            }
            let event = card.toggle_set(&db, index, !undo)?;

            println!(
                "{}: {}/{} sets done",
                ex.name,
                card.sets().completed_count(),
                ex.sets
            );
            if event == Some(TrackerEvent::Celebration) {
                println!("All sets complete. Great work!");
            }
        }

        Commands::Timer { exercise } => {
            let ex = lookup_exercise(&exercise)?;
            let card = ExerciseCard::new(ex, today, Vec::new(), CompletionSignal::from_config(&config));
            run_timer(card).await?;
        }

        Commands::Login { id_token, access_token, redirect_uri } => {
            let store = SessionStore::new(&db);
            let session = store.load()?;

            let user = match (id_token, access_token) {
                (Some(token), _) => google::user_from_id_token(&token),
                (None, Some(token)) => {
                    let http = reqwest::Client::new();
                    google::fetch_userinfo(&http, USERINFO_ENDPOINT, &token).await
                }
                (None, None) => {
                    let url = google::authorization_url(config.google_client_id.as_deref(), &redirect_uri)?;
                    println!("Open this URL to sign in, then run `threedaysfit login --access-token <token>`:");
                    println!("{}", url);
                    return Ok(());
                }
            };

            let user = match user {
                Ok(user) => user,
                Err(e) => {
                    error!("Sign-in failed: {}", e);
                    return Err(e.into());
                }
            };

            let session = store.login(session, user)?;
            if let Some(user) = session.user() {
                println!("Signed in as {} <{}>", user.name, user.email);
            }
        }

        Commands::Logout => {
            let store = SessionStore::new(&db);
            store.logout(store.load()?)?;
            println!("Signed out");
        }

        Commands::Whoami => {
            let session = SessionStore::new(&db).load()?;
            match session.user() {
                Some(user) => {
                    println!("{} <{}>", user.name, user.email);
                    if let Some(picture) = &user.picture {
                        println!("avatar: {}", picture);
                    }
                }
                None => println!("Not signed in"),
            }
        }

        Commands::Sync { token } => {
            let session = SessionStore::new(&db).load()?;
            let token = token
                .or_else(|| session.access_token().map(String::from))
                .context("no token: sign in with `login --access-token` or pass --token")?;

            let client = FirestoreClient::new(config.firestore_project_id.clone());
            let logs = db.get_logs()?;
            match remote::sync_logs(&client, &token, &logs).await {
                Ok(written) => println!("Synced {} workout log(s)", written),
                Err(e) => {
                    if rejected_status(&e).is_some_and(|s| s.as_u16() == 401 || s.as_u16() == 403) {
                        eprintln!("The document store rejected the token; sign in again.");
                    }
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}

fn lookup_exercise(name: &str) -> Result<&'static Exercise> {
    find_exercise(name).with_context(|| {
        format!("unknown exercise '{}' (known: {})", name, all_exercise_names().join(", "))
    })
}

fn print_day(day: DayId) {
    let workout = find_day(day);
    println!("{}", workout.name);
    println!("{}", workout.description);
    println!();
    println!("Warm-up:");
    for w in workout.warmup {
        println!("  - {}: {}", w.name, w.description);
    }
    println!();
    for (i, ex) in workout.exercises.iter().enumerate() {
        println!("{}. {}", i + 1, ex.name);
        match ex.secondary_muscles {
            Some(secondary) => println!("   Primary: {}, Secondary: {}", ex.primary_muscles, secondary),
            None => println!("   Primary: {}", ex.primary_muscles),
        }
        println!("   {} sets x {} reps, rest {}", ex.sets, ex.reps, ex.rest);
        for step in ex.instructions {
            println!("     * {}", step);
        }
        if let Some(link) = ex.details {
            println!("   {}", link);
        }
    }
}

/// Console rest timer; Ctrl-C resets and exits
async fn run_timer(mut card: ExerciseCard) -> Result<()> {
    use std::io::Write;

    card.start_timer();
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.tick().await;

    loop {
        print!("\rRest {}: {}   ", card.exercise().name, format_clock(card.timer().remaining()));
        std::io::stdout().flush()?;

        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                card.reset_timer();
                println!("\nTimer reset");
                return Ok(());
            }
        }

        for event in card.tick() {
            match event {
                TrackerEvent::TimerCompleted => println!("\rRest over: next set!          "),
                TrackerEvent::TimerCleared => return Ok(()),
                _ => {}
            }
        }
    }
}
