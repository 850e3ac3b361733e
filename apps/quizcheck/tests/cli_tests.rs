//! Integration tests for quizcheck CLI commands.
//!
//! Uses tempfile for quiz, config, and report files.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use quizcheck::cli::{
    cmd_analyze, cmd_balance, cmd_coverage, cmd_profiles, cmd_score, cmd_simulate, cmd_targeted,
    load_config, load_quiz, score_lines, CliError,
};
use quizcheck_core::{
    score_answers, AnalysisConfig, AnswerSheet, Grade, QuestionId, QuizError, Tally, TieBreak,
};
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a temporary directory for tests.
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// A page in the shape the quiz front end ships: two questions, four
/// reference profiles.
fn create_quiz_html(dir: &TempDir) -> PathBuf {
    let content = r#"<!DOCTYPE html>
<html lang="fr">
<head><title>Quel est ton profil ?</title></head>
<body>
<div id="quiz"></div>
<script>
const questions = [
    {
        id: 1,
        question: "Face à un nouveau projet, tu commences par...",
        options: [
            { text: "Établir un plan détaillé", personality: "Stratège" },
            { text: "Chercher une idée originale", personality: "Créatif" },
            { text: "Réunir l'équipe", personality: "Leader" },
            { text: "Aider chacun à démarrer", personality: "Mentor" }
        ]
    },
    {
        id: 2,
        question: "Ton week-end idéal ?",
        options: [
            { text: "Un atelier de peinture", personality: "Créatif" },
            { text: "Organiser un tournoi", personality: "Leader" },
            { text: "Un jeu d'échecs", personality: "Stratège" },
            { text: "Donner un coup de main", personality: "Mentor" }
        ]
    }
];
</script>
</body>
</html>"#;
    write_file(dir, "quiz.html", content)
}

/// The same two questions as a JSON document.
fn create_quiz_json(dir: &TempDir) -> PathBuf {
    let content = r#"{
        "questions": [
            {
                "id": 1,
                "question": "Face à un nouveau projet, tu commences par...",
                "options": [
                    { "text": "Établir un plan détaillé", "personality": "Stratège" },
                    { "text": "Chercher une idée originale", "personality": "Créatif" },
                    { "text": "Réunir l'équipe", "personality": "Leader" },
                    { "text": "Aider chacun à démarrer", "personality": "Mentor" }
                ]
            },
            {
                "id": 2,
                "question": "Ton week-end idéal ?",
                "options": [
                    { "text": "Un atelier de peinture", "personality": "Créatif" },
                    { "text": "Organiser un tournoi", "personality": "Leader" },
                    { "text": "Un jeu d'échecs", "personality": "Stratège" },
                    { "text": "Donner un coup de main", "personality": "Mentor" }
                ]
            }
        ]
    }"#;
    write_file(dir, "quiz.json", content)
}

/// Four questions rotating four profiles: every profile gets one option per
/// question.
fn create_rotation_quiz(dir: &TempDir) -> PathBuf {
    let profiles = ["Nord", "Est", "Sud", "Ouest"];
    let questions: Vec<String> = (0..4)
        .map(|i| {
            let options: Vec<String> = (0..4)
                .map(|k| {
                    format!(
                        r#"{{ text: "Choix {k}", personality: "{}" }}"#,
                        profiles[(i + k) % 4]
                    )
                })
                .collect();
            format!(
                r#"{{ id: {}, question: "Question {}", options: [{}] }}"#,
                i + 1,
                i + 1,
                options.join(", ")
            )
        })
        .collect();
    let content = format!("<script>const questions = [{}];</script>", questions.join(",\n"));
    write_file(dir, "rotation.html", &content)
}

/// Config with a four-profile taxonomy matching the rotation quiz.
fn create_compass_config(dir: &TempDir) -> PathBuf {
    let content = r#"
simulations = 500
seed = 7

[[profiles]]
name = "Nord"
description = "Garde le cap"

[[profiles]]
name = "Est"
description = "Voit venir"

[[profiles]]
name = "Sud"
description = "Prend le temps"

[[profiles]]
name = "Ouest"
description = "Part à l'aventure"
"#;
    write_file(dir, "quizcheck.toml", content)
}

// =============================================================================
// CONFIG TESTS
// =============================================================================

#[test]
fn test_load_config_without_path_uses_defaults() {
    let config = load_config(None).unwrap();
    assert_eq!(config, AnalysisConfig::default());
    assert_eq!(config.taxonomy().unwrap().len(), 15);
}

#[test]
fn test_load_config_custom_taxonomy() {
    let temp = create_temp_dir();
    let path = create_compass_config(&temp);

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.simulations, 500);
    assert_eq!(config.seed, 7);
    // Unset keys keep their defaults
    assert_eq!(config.expected_options, 4);

    let taxonomy = config.taxonomy().unwrap();
    assert_eq!(taxonomy.len(), 4);
    assert!(taxonomy.contains(&quizcheck_core::ProfileName::new("Ouest").unwrap()));
}

#[test]
fn test_load_config_tie_break() {
    let temp = create_temp_dir();
    let path = write_file(&temp, "tie.toml", "tie_break = \"alphabetical\"\n");

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.tie_break, TieBreak::Alphabetical);
}

#[test]
fn test_load_config_missing_file() {
    let temp = create_temp_dir();
    let path = temp.path().join("absent.toml");

    let result = load_config(Some(&path));
    assert!(matches!(result, Err(CliError::Io { .. })));
}

#[test]
fn test_load_config_invalid_toml() {
    let temp = create_temp_dir();
    let path = write_file(&temp, "bad.toml", "simulations = [not toml");

    let result = load_config(Some(&path));
    assert!(matches!(result, Err(CliError::Config { .. })));
}

#[test]
fn test_load_config_rejects_unknown_keys() {
    let temp = create_temp_dir();
    let path = write_file(&temp, "typo.toml", "simulation = 10\n");

    let result = load_config(Some(&path));
    assert!(matches!(result, Err(CliError::Config { .. })));
}

#[test]
fn test_load_config_rejects_duplicate_profiles() {
    let temp = create_temp_dir();
    let content = r#"
[[profiles]]
name = "Mentor"

[[profiles]]
name = "Mentor"
"#;
    let path = write_file(&temp, "dup.toml", content);

    let result = load_config(Some(&path));
    assert!(matches!(
        result,
        Err(CliError::Quiz(QuizError::DuplicateProfile(_)))
    ));
}

// =============================================================================
// QUIZ LOADING TESTS
// =============================================================================

#[test]
fn test_load_quiz_html() {
    let temp = create_temp_dir();
    let path = create_quiz_html(&temp);

    let quiz = load_quiz(&path, None).unwrap();
    assert_eq!(quiz.len(), 2);
    assert_eq!(quiz.option_count(), 8);
    assert_eq!(quiz.questions[1].text, "Ton week-end idéal ?");
    assert_eq!(quiz.questions[0].options[2].text, "Réunir l'équipe");
}

#[test]
fn test_load_quiz_json_matches_html() {
    let temp = create_temp_dir();
    let html = load_quiz(&create_quiz_html(&temp), None).unwrap();
    let json = load_quiz(&create_quiz_json(&temp), None).unwrap();
    assert_eq!(html, json);
}

#[test]
fn test_load_quiz_format_override() {
    let temp = create_temp_dir();
    let content = std::fs::read_to_string(create_quiz_json(&temp)).unwrap();
    let path = write_file(&temp, "quiz.data", &content);

    let quiz = load_quiz(&path, Some("json")).unwrap();
    assert_eq!(quiz.len(), 2);

    let truncated = write_file(&temp, "broken.data", r#"{ "questions": [ { "id": 1, "#);
    assert!(matches!(
        load_quiz(&truncated, Some("JSON")),
        Err(CliError::Quiz(QuizError::Json(_)))
    ));
}

#[test]
fn test_load_quiz_unknown_format() {
    let temp = create_temp_dir();
    let path = create_quiz_html(&temp);

    let result = load_quiz(&path, Some("yaml"));
    assert!(matches!(
        result,
        Err(CliError::Quiz(QuizError::UnknownFormat(_)))
    ));
}

#[test]
fn test_load_quiz_missing_file() {
    let temp = create_temp_dir();
    let path = temp.path().join("nowhere.html");

    let result = load_quiz(&path, None);
    assert!(matches!(result, Err(CliError::Io { .. })));
}

#[test]
fn test_load_quiz_without_questions() {
    let temp = create_temp_dir();
    let path = write_file(&temp, "empty.html", "<html><body>Bientôt</body></html>");

    let result = load_quiz(&path, None);
    assert!(matches!(result, Err(CliError::Quiz(QuizError::NoQuestions))));
}

// =============================================================================
// ANALYSIS COMMAND TESTS
// =============================================================================

#[test]
fn test_profiles_command() {
    let config = AnalysisConfig::default();
    assert!(cmd_profiles(&config, false).is_ok());
    assert!(cmd_profiles(&config, true).is_ok());
}

#[test]
fn test_coverage_command() {
    let temp = create_temp_dir();
    let path = create_quiz_html(&temp);
    let config = AnalysisConfig::default();

    assert!(cmd_coverage(&path, None, &config, false).is_ok());
    assert!(cmd_coverage(&path, None, &config, true).is_ok());
}

#[test]
fn test_balance_command() {
    let temp = create_temp_dir();
    let path = create_quiz_html(&temp);
    let config = AnalysisConfig {
        expected_questions: Some(15),
        ..AnalysisConfig::default()
    };

    assert!(cmd_balance(&path, None, &config, false).is_ok());
    assert!(cmd_balance(&path, None, &config, true).is_ok());
}

#[test]
fn test_simulate_command() {
    let temp = create_temp_dir();
    let path = create_quiz_html(&temp);
    let config = AnalysisConfig {
        simulations: 50,
        ..AnalysisConfig::default()
    };

    assert!(cmd_simulate(&path, None, &config, false).is_ok());
    assert!(cmd_simulate(&path, None, &config, true).is_ok());
}

#[test]
fn test_targeted_command() {
    let temp = create_temp_dir();
    let path = create_quiz_html(&temp);
    let config = AnalysisConfig::default();

    assert!(cmd_targeted(&path, None, &config, false).is_ok());
    assert!(cmd_targeted(&path, None, &config, true).is_ok());
}

#[test]
fn test_commands_propagate_load_errors() {
    let temp = create_temp_dir();
    let path = temp.path().join("missing.html");
    let config = AnalysisConfig::default();

    assert!(cmd_coverage(&path, None, &config, false).is_err());
    assert!(cmd_balance(&path, None, &config, false).is_err());
    assert!(cmd_simulate(&path, None, &config, false).is_err());
    assert!(cmd_targeted(&path, None, &config, false).is_err());
    assert!(cmd_analyze(&path, None, &config, false, None).is_err());
}

// =============================================================================
// ANALYZE COMMAND TESTS
// =============================================================================

#[test]
fn test_analyze_partial_quiz_against_reference() {
    let temp = create_temp_dir();
    let path = create_quiz_html(&temp);
    let config = AnalysisConfig {
        simulations: 200,
        ..AnalysisConfig::default()
    };

    let report = cmd_analyze(&path, None, &config, false, None).unwrap();
    assert_eq!(report.questions, 2);
    assert_eq!(report.taxonomy_size, 15);
    assert_eq!(report.coverage.found, 4);
    assert_eq!(report.coverage.missing.len(), 11);
    assert!(report.score.total < 50);
    assert_eq!(report.grade, Grade::Poor);
    assert!(!report.recommendations.is_empty());
}

#[test]
fn test_analyze_writes_report_file() {
    let temp = create_temp_dir();
    let quiz_path = create_rotation_quiz(&temp);
    let config = load_config(Some(&create_compass_config(&temp))).unwrap();
    let report_path = temp.path().join("report.json");

    let report = cmd_analyze(&quiz_path, None, &config, true, Some(&report_path)).unwrap();
    assert!(report_path.exists());

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(saved["score"]["total"], u64::from(report.score.total));
    assert_eq!(saved["score"]["max"], 100);
    assert_eq!(saved["questions"], 4);
    assert_eq!(saved["simulation"]["runs"], 500);
    assert_eq!(saved["simulation"]["seed"], 7);
    assert!(saved["grade"].is_string());
}

#[test]
fn test_analyze_rotation_quiz_with_custom_taxonomy() {
    let temp = create_temp_dir();
    let quiz_path = create_rotation_quiz(&temp);
    let config = load_config(Some(&create_compass_config(&temp))).unwrap();

    let report = cmd_analyze(&quiz_path, None, &config, false, None).unwrap();
    assert!(report.coverage.complete());
    assert!(report.balance.is_balanced());
    assert_eq!(report.coverage.spread, 0);
    assert_eq!(report.targeted.success_count(), 4);
    assert!(report.score.total >= 80);
    assert!(report.grade >= Grade::Good);
}

#[test]
fn test_analyze_is_deterministic_for_a_seed() {
    let temp = create_temp_dir();
    let path = create_quiz_html(&temp);
    let config = AnalysisConfig {
        simulations: 300,
        seed: 1234,
        ..AnalysisConfig::default()
    };

    let first = cmd_analyze(&path, None, &config, false, None).unwrap();
    let second = cmd_analyze(&path, None, &config, false, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_analyze_unwritable_output() {
    let temp = create_temp_dir();
    let path = create_quiz_html(&temp);
    let output = temp.path().join("no-such-dir").join("report.json");
    let config = AnalysisConfig {
        simulations: 10,
        ..AnalysisConfig::default()
    };

    let result = cmd_analyze(&path, None, &config, false, Some(&output));
    assert!(matches!(result, Err(CliError::Io { .. })));
}

// =============================================================================
// SCORE COMMAND TESTS
// =============================================================================

fn answers(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_score_command() {
    let temp = create_temp_dir();
    let path = create_quiz_html(&temp);
    let config = AnalysisConfig::default();

    // Stratège twice
    let picks = answers(&["1=A", "2=3"]);
    assert!(cmd_score(&path, None, &config, &picks, false).is_ok());
    assert!(cmd_score(&path, None, &config, &picks, true).is_ok());
}

#[test]
fn test_score_command_with_tie() {
    let temp = create_temp_dir();
    let path = create_quiz_html(&temp);
    let config = AnalysisConfig {
        tie_break: TieBreak::Alphabetical,
        ..AnalysisConfig::default()
    };

    let picks = answers(&["1=1", "2=1"]);
    assert!(cmd_score(&path, None, &config, &picks, false).is_ok());
}

#[test]
fn test_score_rejects_unknown_question() {
    let temp = create_temp_dir();
    let path = create_quiz_html(&temp);
    let config = AnalysisConfig::default();

    let result = cmd_score(&path, None, &config, &answers(&["9=A"]), false);
    assert!(matches!(
        result,
        Err(CliError::Quiz(QuizError::UnknownQuestion(QuestionId(9))))
    ));
}

#[test]
fn test_score_rejects_out_of_range_choice() {
    let temp = create_temp_dir();
    let path = create_quiz_html(&temp);
    let config = AnalysisConfig::default();

    let result = cmd_score(&path, None, &config, &answers(&["1=E"]), false);
    assert!(matches!(
        result,
        Err(CliError::Quiz(QuizError::OptionOutOfRange {
            index: 4,
            available: 4,
            ..
        }))
    ));
}

#[test]
fn test_score_rejects_malformed_answer() {
    let temp = create_temp_dir();
    let path = create_quiz_html(&temp);
    let config = AnalysisConfig::default();

    let result = cmd_score(&path, None, &config, &answers(&["first=A"]), false);
    assert!(matches!(result, Err(CliError::InvalidArgument(_))));
}

#[test]
fn test_score_lines_clear_winner() {
    let temp = create_temp_dir();
    let quiz = load_quiz(&create_quiz_html(&temp), None).unwrap();
    // Stratège on both questions
    let sheet: AnswerSheet = [(QuestionId(1), 0), (QuestionId(2), 2)].into_iter().collect();
    let tally = score_answers(&quiz, &sheet).unwrap();
    let outcome = tally.resolve(TieBreak::FirstAnswered);

    let text = score_lines(&tally, outcome.as_ref(), TieBreak::FirstAnswered);
    assert!(text.contains("  Stratège         2\n"));
    assert!(text.ends_with("dominant: Stratège (2 points)\n"));
}

#[test]
fn test_score_lines_lists_tied_profiles() {
    let temp = create_temp_dir();
    let quiz = load_quiz(&create_quiz_html(&temp), None).unwrap();
    // Stratège on question 1, Créatif on question 2
    let sheet: AnswerSheet = [(QuestionId(1), 0), (QuestionId(2), 0)].into_iter().collect();
    let tally = score_answers(&quiz, &sheet).unwrap();

    let first = tally.resolve(TieBreak::FirstAnswered);
    let text = score_lines(&tally, first.as_ref(), TieBreak::FirstAnswered);
    assert!(text.contains(
        "dominant: Stratège (1 points, tied with Créatif; first-answered tie break)"
    ));

    let alpha = tally.resolve(TieBreak::Alphabetical);
    let text = score_lines(&tally, alpha.as_ref(), TieBreak::Alphabetical);
    assert!(text.contains(
        "dominant: Créatif (1 points, tied with Stratège; alphabetical tie break)"
    ));
}

#[test]
fn test_score_lines_without_answers() {
    let text = score_lines(&Tally::new(), None, TieBreak::FirstAnswered);
    assert_eq!(text, "dominant: none (no answers)\n");
}

// =============================================================================
// BINARY TESTS
// =============================================================================

#[test]
fn test_binary_reports_errors_with_logging_off() {
    let temp = create_temp_dir();
    let output = Command::new(env!("CARGO_BIN_EXE_quizcheck"))
        .args(["coverage", "missing.html"])
        .current_dir(temp.path())
        .env("RUST_LOG", "off")
        .env_remove("QUIZCHECK_CONFIG")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: cannot read missing.html"), "stderr: {stderr}");
}
