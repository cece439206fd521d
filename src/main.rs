use clap::{Parser, Subcommand};
use std::path::PathBuf;

use persona_fit::config::Config;
use persona_fit::questionnaire::{adjusted_answer, Questionnaire};
use persona_fit::roster::Roster;
use persona_fit::session::QuizSession;

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_RUNTIME: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take the assessment interactively (default if no subcommand)
    Take,
    /// Score a finished answer sequence without the interactive quiz
    Score {
        /// Candidate email (must be on the roster)
        #[arg(long)]
        email: String,

        /// Comma-separated raw Likert answers in question order, e.g. "5,4,3,2,1,..."
        #[arg(long)]
        answers: String,
    },
    /// Show the stored results for a candidate
    Results {
        /// Candidate email
        email: String,
    },
    /// Add a candidate to the roster
    Register {
        /// Candidate email
        email: String,

        /// Screening profile score, used for the fitment composite
        #[arg(long)]
        profile_score: Option<f64>,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "persona-fit")]
#[command(about = "Terminal Big Five personality assessment", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/persona-fit/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Take);

    // Init runs before config load: it's what writes the config
    if matches!(command, Commands::Init) {
        if let Err(e) = persona_fit::config::run_init_wizard(cli.config.map(PathBuf::from)) {
            eprintln!("Init error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match persona_fit::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Load the questionnaire (custom file or the built-in set)
    let questionnaire = match &config.questionnaire {
        Some(path) => match Questionnaire::load(path) {
            Ok(q) => q,
            Err(e) => {
                eprintln!("Questionnaire error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        },
        None => Questionnaire::builtin(),
    };

    // Validate questionnaire at startup
    if let Err(errors) = persona_fit::scoring::validate_questionnaire(&questionnaire) {
        eprintln!("Questionnaire errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        eprintln!("Loaded {} questions", questionnaire.len());
        for t in persona_fit::scoring::unmeasured_traits(&questionnaire) {
            eprintln!("Warning: no items measure {}; it will score 0", t);
        }
    }

    // Load the roster
    let roster_path = config
        .roster
        .clone()
        .unwrap_or_else(persona_fit::roster::get_roster_path);
    let roster = match persona_fit::roster::load_roster(&roster_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Roster error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!(
            "Roster at {} ({} candidates)",
            roster_path.display(),
            roster.candidates.len()
        );
    }

    let exit_code = match command {
        Commands::Take => run_take(questionnaire, roster, roster_path, config).await,
        Commands::Score { email, answers } => run_score(
            &questionnaire,
            roster,
            &roster_path,
            &config,
            &email,
            &answers,
            cli.verbose,
        ),
        Commands::Results { email } => run_results(&roster, &email, &config),
        Commands::Register {
            email,
            profile_score,
        } => run_register(roster, &roster_path, &email, profile_score),
        Commands::Init => unreachable!("handled above"),
    };

    std::process::exit(exit_code);
}

/// Interactive path: gate on email, then hand over to the TUI.
async fn run_take(
    questionnaire: Questionnaire,
    roster: Roster,
    roster_path: PathBuf,
    config: Config,
) -> i32 {
    let email = match persona_fit::gate::gate_interactive(&roster) {
        Ok(email) => email,
        Err(e) => {
            eprintln!("{}", e);
            return EXIT_AUTH;
        }
    };

    let session = QuizSession::new(questionnaire);
    let app = persona_fit::tui::App::new(session, email, roster, roster_path, config);

    match persona_fit::tui::run_tui(app).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("TUI error: {}", e);
            EXIT_RUNTIME
        }
    }
}

/// Non-interactive path: the caller is the collector. Answers arrive raw
/// (1-5, question order); polarity is applied here, before the transform.
fn run_score(
    questionnaire: &Questionnaire,
    mut roster: Roster,
    roster_path: &std::path::Path,
    config: &Config,
    email: &str,
    answers_arg: &str,
    verbose: bool,
) -> i32 {
    let email = match persona_fit::gate::authorize(&roster, email) {
        Ok(email) => email,
        Err(e) => {
            eprintln!("{}", e);
            return EXIT_AUTH;
        }
    };

    // Parse the raw answer list
    let mut raw_answers = Vec::new();
    for part in answers_arg.split(',') {
        match part.trim().parse::<u8>() {
            Ok(value) => raw_answers.push(value),
            Err(_) => {
                eprintln!("Invalid answer '{}': expected an integer 1-5", part.trim());
                return EXIT_INPUT;
            }
        }
    }

    if raw_answers.len() != questionnaire.len() {
        eprintln!(
            "Answer count mismatch: questionnaire has {} items, got {} answers",
            questionnaire.len(),
            raw_answers.len()
        );
        return EXIT_INPUT;
    }

    for (i, raw) in raw_answers.iter().enumerate() {
        if !(1..=5).contains(raw) {
            eprintln!("Answer {} for question {} is outside 1-5", raw, i + 1);
            return EXIT_INPUT;
        }
    }

    // Apply polarity, then score
    let adjusted: Vec<u8> = questionnaire
        .questions
        .iter()
        .zip(&raw_answers)
        .map(|(q, raw)| adjusted_answer(q.code, *raw))
        .collect();

    let profile = roster.profile_score(&email);
    let report =
        match persona_fit::scoring::score_responses(&questionnaire.questions, &adjusted, profile) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Scoring error: {}", e);
                return EXIT_INPUT;
            }
        };

    let use_colors = persona_fit::output::should_use_colors();
    println!(
        "{}",
        persona_fit::output::format_results_card(
            &email,
            &report,
            config.show_descriptions,
            use_colors
        )
    );

    if verbose {
        eprintln!();
        eprintln!("Breakdown:");
        eprintln!("{}", persona_fit::output::format_breakdown(&report));
    }

    // Persist fire-and-forget: a failed save is a warning, not a failure
    roster.record_report(&email, &report, chrono::Utc::now());
    if let Err(e) = persona_fit::roster::save_roster(roster_path, &roster) {
        eprintln!("Warning: failed to save results: {}", e);
    }

    EXIT_SUCCESS
}

fn run_results(roster: &Roster, email: &str, config: &Config) -> i32 {
    let email = match persona_fit::gate::authorize(roster, email) {
        Ok(email) => email,
        Err(e) => {
            eprintln!("{}", e);
            return EXIT_AUTH;
        }
    };

    // authorize guarantees the record exists
    let record = match roster.get(&email) {
        Some(record) => record,
        None => return EXIT_AUTH,
    };

    let use_colors = persona_fit::output::should_use_colors();
    println!(
        "{}",
        persona_fit::output::format_stored_card(
            &email,
            record,
            config.show_descriptions,
            use_colors
        )
    );

    EXIT_SUCCESS
}

fn run_register(
    mut roster: Roster,
    roster_path: &std::path::Path,
    email: &str,
    profile_score: Option<f64>,
) -> i32 {
    let email = persona_fit::roster::normalize_email(email);
    if email.is_empty() || !email.contains('@') {
        eprintln!("'{}' does not look like an email address", email);
        return EXIT_INPUT;
    }

    if !roster.register(&email, profile_score) {
        eprintln!("{} is already on the roster", email);
        return EXIT_INPUT;
    }

    if let Err(e) = persona_fit::roster::save_roster(roster_path, &roster) {
        eprintln!("Failed to save roster: {}", e);
        return EXIT_CONFIG;
    }

    match profile_score {
        Some(score) => println!("Registered {} (profile score {})", email, score),
        None => println!("Registered {} (no profile score; fitment will be undefined)", email),
    }

    EXIT_SUCCESS
}
