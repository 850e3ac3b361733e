//! # quizcheck
//!
//! Command-line validator for personality quizzes.
//!
//! ```text
//! quizcheck analyze quiz.html --output report.json
//! quizcheck coverage quiz.html --config legacy.toml
//! quizcheck score quiz.html -a 1=B -a 2=D -a 3=A
//! ```

use clap::{ArgAction, Args, Parser, Subcommand};
use quizcheck::cli::{
    cmd_analyze, cmd_balance, cmd_coverage, cmd_profiles, cmd_score, cmd_simulate, cmd_targeted,
    load_config, CliResult, Overrides,
};
use quizcheck_core::TieBreak;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quizcheck", version, about = "Validate personality quizzes against a profile taxonomy")]
struct Cli {
    /// TOML config file (defaults to ./quizcheck.toml when present)
    #[arg(long, global = true, env = "QUIZCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// More logging on stderr (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by every command that reads a quiz.
#[derive(Args)]
struct QuizArgs {
    /// Quiz file (HTML page or JSON document)
    quiz: PathBuf,

    /// Source format: html or json (default: from the file extension)
    #[arg(long)]
    format: Option<String>,

    /// Tie break between equal scores: first-answered or alphabetical
    #[arg(long)]
    tie_break: Option<TieBreak>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the profiles of the active taxonomy
    Profiles,

    /// Compare the quiz's profiles with the taxonomy
    Coverage(QuizArgs),

    /// Check option counts and profile variety per question
    Balance {
        #[command(flatten)]
        quiz: QuizArgs,

        /// Required number of questions
        #[arg(long)]
        expected_questions: Option<usize>,
    },

    /// Simulate random respondents
    Simulate {
        #[command(flatten)]
        quiz: QuizArgs,

        /// Number of respondents
        #[arg(long)]
        runs: Option<u32>,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Check that each profile can win when targeted
    Targeted(QuizArgs),

    /// Run every check and score the quiz out of 100
    Analyze {
        #[command(flatten)]
        quiz: QuizArgs,

        /// Also write the JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Required number of questions
        #[arg(long)]
        expected_questions: Option<usize>,

        /// Number of simulated respondents
        #[arg(long)]
        runs: Option<u32>,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Score one respondent's answers
    Score {
        #[command(flatten)]
        quiz: QuizArgs,

        /// Answer as ID=CHOICE, CHOICE 1-based or a letter (repeatable)
        #[arg(short, long = "answer", required = true)]
        answers: Vec<String>,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> CliResult {
    let base = load_config(cli.config.as_deref())?;
    let json = cli.json;

    match cli.command {
        Commands::Profiles => cmd_profiles(&base, json),
        Commands::Coverage(quiz) => {
            let config = overrides(&quiz).apply(base);
            cmd_coverage(&quiz.quiz, quiz.format.as_deref(), &config, json)
        }
        Commands::Balance {
            quiz,
            expected_questions,
        } => {
            let config = Overrides {
                expected_questions,
                ..overrides(&quiz)
            }
            .apply(base);
            cmd_balance(&quiz.quiz, quiz.format.as_deref(), &config, json)
        }
        Commands::Simulate { quiz, runs, seed } => {
            let config = Overrides {
                runs,
                seed,
                ..overrides(&quiz)
            }
            .apply(base);
            cmd_simulate(&quiz.quiz, quiz.format.as_deref(), &config, json)
        }
        Commands::Targeted(quiz) => {
            let config = overrides(&quiz).apply(base);
            cmd_targeted(&quiz.quiz, quiz.format.as_deref(), &config, json)
        }
        Commands::Analyze {
            quiz,
            output,
            expected_questions,
            runs,
            seed,
        } => {
            let config = Overrides {
                runs,
                seed,
                expected_questions,
                ..overrides(&quiz)
            }
            .apply(base);
            cmd_analyze(
                &quiz.quiz,
                quiz.format.as_deref(),
                &config,
                json,
                output.as_deref(),
            )
            .map(|_| ())
        }
        Commands::Score { quiz, answers } => {
            let config = overrides(&quiz).apply(base);
            cmd_score(&quiz.quiz, quiz.format.as_deref(), &config, &answers, json)
        }
    }
}

fn overrides(quiz: &QuizArgs) -> Overrides {
    Overrides {
        tie_break: quiz.tie_break,
        ..Overrides::default()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Printed directly: RUST_LOG may filter out every level.
            eprintln!("error: {e}");
            debug!(error = ?e, "command failed");
            ExitCode::FAILURE
        }
    }
}
