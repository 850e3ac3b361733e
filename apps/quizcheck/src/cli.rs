//! # CLI Commands
//!
//! One `cmd_*` function per subcommand. `main.rs` parses arguments and
//! dispatches here; the integration tests call these directly.
//!
//! Reports go to stdout (text, or JSON with `json = true`). Logs go to
//! stderr through `tracing`.

use quizcheck_core::analysis::{analyze_balance, analyze_coverage, run_targeted, simulate};
use quizcheck_core::formats::{parse_quiz, QuizFormat};
use quizcheck_core::report::{balance_lines, coverage_lines, simulation_lines, targeted_lines};
use quizcheck_core::{
    score_answers, AnalysisConfig, AnswerSheet, Outcome, QuestionId, Quiz, QuizError, Tally,
    TieBreak, ValidationReport,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "quizcheck.toml";

// =============================================================================
// ERRORS
// =============================================================================

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action: "cannot read",
            path: path.to_path_buf(),
            source,
        }
    }

    fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action: "cannot write",
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type CliResult<T = ()> = Result<T, CliError>;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub runs: Option<u32>,
    pub seed: Option<u64>,
    pub tie_break: Option<TieBreak>,
    pub expected_questions: Option<usize>,
}

impl Overrides {
    /// Layer these values over `config`.
    #[must_use]
    pub fn apply(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(runs) = self.runs {
            config.simulations = runs;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(tie_break) = self.tie_break {
            config.tie_break = tie_break;
        }
        if self.expected_questions.is_some() {
            config.expected_questions = self.expected_questions;
        }
        config
    }
}

/// Load the analysis config.
///
/// An explicit path must exist. Without one, `quizcheck.toml` in the
/// working directory is used if present, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> CliResult<AnalysisConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                debug!("no config file, using defaults");
                return Ok(AnalysisConfig::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|e| CliError::read(&path, e))?;
    let config: AnalysisConfig = toml::from_str(&content).map_err(|source| CliError::Config {
        path: path.clone(),
        source,
    })?;
    // Surface a bad custom taxonomy now rather than mid-analysis.
    config.taxonomy()?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

// =============================================================================
// QUIZ LOADING
// =============================================================================

/// Read and parse a quiz file. `format` overrides extension detection.
pub fn load_quiz(path: &Path, format: Option<&str>) -> CliResult<Quiz> {
    let format = match format {
        Some(f) => f.parse::<QuizFormat>()?,
        None => QuizFormat::from_path(path),
    };
    let source = std::fs::read_to_string(path).map_err(|e| CliError::read(path, e))?;
    let quiz = parse_quiz(&source, format)?;
    info!(
        path = %path.display(),
        %format,
        questions = quiz.len(),
        profiles = quiz.profiles().len(),
        "quiz loaded"
    );
    Ok(quiz)
}

/// Parse `ID=CHOICE`. CHOICE is 1-based (`2` is the second option) or a
/// letter (`B` is the second option).
pub fn parse_answer(raw: &str) -> CliResult<(QuestionId, usize)> {
    let invalid = || CliError::InvalidArgument(format!("answer {raw:?} (expected ID=CHOICE)"));

    let (id, choice) = raw.split_once('=').ok_or_else(invalid)?;
    let id: u32 = id.trim().parse().map_err(|_| invalid())?;
    let choice = choice.trim();

    let index = match choice.chars().collect::<Vec<_>>().as_slice() {
        [c] if c.is_ascii_alphabetic() => (c.to_ascii_uppercase() as usize) - ('A' as usize),
        _ => {
            let n: usize = choice.parse().map_err(|_| invalid())?;
            n.checked_sub(1).ok_or_else(invalid)?
        }
    };
    Ok((QuestionId(id), index))
}

fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// =============================================================================
// COMMANDS
// =============================================================================

/// List the active taxonomy.
pub fn cmd_profiles(config: &AnalysisConfig, json: bool) -> CliResult {
    let taxonomy = config.taxonomy()?;
    if json {
        return print_json(&taxonomy);
    }
    println!("{} profiles:", taxonomy.len());
    for profile in taxonomy.profiles() {
        println!("  {:<16} {}", profile.name, profile.description);
    }
    Ok(())
}

/// Compare the quiz's profile set with the taxonomy.
pub fn cmd_coverage(
    quiz_path: &Path,
    format: Option<&str>,
    config: &AnalysisConfig,
    json: bool,
) -> CliResult {
    let quiz = load_quiz(quiz_path, format)?;
    let taxonomy = config.taxonomy()?;
    let coverage = analyze_coverage(&quiz, &taxonomy, config);

    if !coverage.missing.is_empty() {
        warn!(missing = coverage.missing.len(), "profiles missing from quiz");
    }
    if !coverage.extra.is_empty() {
        warn!(extra = coverage.extra.len(), "profiles outside the taxonomy");
    }

    if json {
        return print_json(&coverage);
    }
    print!("{}", coverage_lines(&coverage));
    Ok(())
}

/// Check every question's options.
pub fn cmd_balance(
    quiz_path: &Path,
    format: Option<&str>,
    config: &AnalysisConfig,
    json: bool,
) -> CliResult {
    let quiz = load_quiz(quiz_path, format)?;
    let balance = analyze_balance(&quiz, config);

    for finding in &balance.findings {
        debug!(%finding, "balance finding");
    }
    if !balance.is_balanced() {
        warn!(findings = balance.findings.len(), "quiz is unbalanced");
    }

    if json {
        return print_json(&balance);
    }
    print!("{}", balance_lines(&balance));
    Ok(())
}

/// Run random respondents through the quiz.
pub fn cmd_simulate(
    quiz_path: &Path,
    format: Option<&str>,
    config: &AnalysisConfig,
    json: bool,
) -> CliResult {
    let quiz = load_quiz(quiz_path, format)?;
    let taxonomy = config.taxonomy()?;
    info!(runs = config.simulations, seed = config.seed, "simulating");
    let simulation = simulate(&quiz, &taxonomy, config);

    if !simulation.unreached.is_empty() {
        warn!(unreached = simulation.unreached.len(), "profiles never dominant");
    }

    if json {
        return print_json(&simulation);
    }
    print!("{}", simulation_lines(&simulation, taxonomy.len()));
    Ok(())
}

/// Aim for each profile in turn.
pub fn cmd_targeted(
    quiz_path: &Path,
    format: Option<&str>,
    config: &AnalysisConfig,
    json: bool,
) -> CliResult {
    let quiz = load_quiz(quiz_path, format)?;
    let taxonomy = config.taxonomy()?;
    let targeted = run_targeted(&quiz, &taxonomy, config);

    for failure in targeted.failures() {
        debug!(profile = %failure.profile, score = failure.score, "target not reached");
    }

    if json {
        return print_json(&targeted);
    }
    print!("{}", targeted_lines(&targeted));
    Ok(())
}

/// Full validation. Writes the JSON report to `output` when given.
pub fn cmd_analyze(
    quiz_path: &Path,
    format: Option<&str>,
    config: &AnalysisConfig,
    json: bool,
    output: Option<&Path>,
) -> CliResult<ValidationReport> {
    let quiz = load_quiz(quiz_path, format)?;
    let taxonomy = config.taxonomy()?;
    let report = ValidationReport::build(&quiz, &taxonomy, config);
    info!(
        score = report.score.total,
        grade = %report.grade,
        "validation complete"
    );

    if let Some(path) = output {
        let data = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, data).map_err(|e| CliError::write(path, e))?;
        info!(path = %path.display(), "report saved");
    }

    if json {
        print_json(&report)?;
    } else {
        print!("{}", report.to_text());
    }
    Ok(report)
}

/// Score one respondent.
pub fn cmd_score(
    quiz_path: &Path,
    format: Option<&str>,
    config: &AnalysisConfig,
    answers: &[String],
    json: bool,
) -> CliResult {
    let quiz = load_quiz(quiz_path, format)?;
    let sheet = answers
        .iter()
        .map(|a| parse_answer(a))
        .collect::<CliResult<AnswerSheet>>()?;
    if sheet.len() < quiz.len() {
        warn!(
            answered = sheet.len(),
            questions = quiz.len(),
            "not every question answered"
        );
    }

    let tally = score_answers(&quiz, &sheet)?;
    let outcome = tally.resolve(config.tie_break);

    if json {
        #[derive(Serialize)]
        struct ScoreOutput<'a> {
            tally: Vec<(&'a str, u32)>,
            outcome: Option<Outcome>,
        }
        let tally = tally.iter().map(|(name, n)| (name.as_str(), n)).collect();
        return print_json(&ScoreOutput { tally, outcome });
    }

    print!("{}", score_lines(&tally, outcome.as_ref(), config.tie_break));
    Ok(())
}

/// Text rendering of a scored answer sheet: one line per profile, then the
/// dominant profile and any profiles tied with it.
pub fn score_lines(tally: &Tally, outcome: Option<&Outcome>, tie_break: TieBreak) -> String {
    let mut output = String::new();
    for (name, count) in tally.iter() {
        output.push_str(&format!("  {:<16} {}\n", name, count));
    }
    match outcome {
        Some(outcome) if outcome.is_tie() => {
            let others: Vec<&str> = outcome.tied.iter().skip(1).map(|n| n.as_str()).collect();
            output.push_str(&format!(
                "dominant: {} ({} points, tied with {}; {} tie break)\n",
                outcome.dominant,
                outcome.score,
                others.join(", "),
                tie_break
            ));
        }
        Some(outcome) => output.push_str(&format!(
            "dominant: {} ({} points)\n",
            outcome.dominant, outcome.score
        )),
        None => output.push_str("dominant: none (no answers)\n"),
    }
    output
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_answer_numeric_is_one_based() {
        assert_eq!(parse_answer("3=1").unwrap(), (QuestionId(3), 0));
        assert_eq!(parse_answer(" 12 = 4 ").unwrap(), (QuestionId(12), 3));
    }

    #[test]
    fn parse_answer_letters() {
        assert_eq!(parse_answer("1=A").unwrap(), (QuestionId(1), 0));
        assert_eq!(parse_answer("1=d").unwrap(), (QuestionId(1), 3));
    }

    #[test]
    fn parse_answer_rejects_garbage() {
        for raw in ["", "1", "x=1", "1=0", "1=", "1=AB", "1=-2"] {
            assert!(
                matches!(parse_answer(raw), Err(CliError::InvalidArgument(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let overrides = Overrides {
            runs: Some(10),
            tie_break: Some(TieBreak::Alphabetical),
            ..Overrides::default()
        };
        let config = overrides.apply(AnalysisConfig::default());
        assert_eq!(config.simulations, 10);
        assert_eq!(config.tie_break, TieBreak::Alphabetical);
        assert_eq!(config.seed, quizcheck_core::config::DEFAULT_SEED);
        assert_eq!(config.expected_questions, None);
    }
}
