use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("parlo").unwrap();
    cmd.arg("--version").assert().success();
}

#[allow(deprecated)]
#[test]
fn test_cli_help_mentions_practice() {
    let mut cmd = Command::cargo_bin("parlo").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("practice"));
}

#[allow(deprecated)]
#[test]
fn test_headless_correction_turn() {
    let mut cmd = Command::cargo_bin("parlo").unwrap();
    cmd.args([
        "-p",
        "I was in Paris last year",
        "--delay-ms",
        "0",
        "--tip-probability",
        "0",
        "-q",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("I have been to Paris."))
    .stdout(predicate::str::contains("Improved version:"))
    .stdout(predicate::str::contains("accuracy 0%"));
}

#[allow(deprecated)]
#[test]
fn test_headless_praise_turn() {
    let mut cmd = Command::cargo_bin("parlo").unwrap();
    cmd.args(["-p", "Hello there", "--delay-ms", "0", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Great job! Your sentence was grammatically correct. Keep practicing!",
        ))
        .stdout(predicate::str::contains("accuracy 100%"));
}

#[allow(deprecated)]
#[test]
fn test_headless_forced_tip() {
    let mut cmd = Command::cargo_bin("parlo").unwrap();
    cmd.args([
        "-p",
        "can you repeat that",
        "--delay-ms",
        "0",
        "--tip-probability",
        "1",
        "-q",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Language Tip:"));
}

#[allow(deprecated)]
#[test]
fn test_quiet_flag_hides_banner() {
    let mut cmd = Command::cargo_bin("parlo").unwrap();
    cmd.args(["-p", "Hello", "--delay-ms", "0", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("🎓 Parlo").not());
}

#[allow(deprecated)]
#[test]
fn test_headless_banner_shows_language() {
    let mut cmd = Command::cargo_bin("parlo").unwrap();
    cmd.args(["-p", "Hello", "--delay-ms", "0", "--language", "fr-FR"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[fr-FR]"));
}

#[allow(deprecated)]
#[test]
fn test_rules_subcommand_prints_table() {
    let mut cmd = Command::cargo_bin("parlo").unwrap();
    cmd.arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("any of: paris, france"))
        .stdout(predicate::str::contains("all of: if i + would"))
        .stdout(predicate::str::contains("always"));
}

#[allow(deprecated)]
#[test]
fn test_missing_config_exits_with_config_code() {
    let mut cmd = Command::cargo_bin("parlo").unwrap();
    cmd.args(["--config", "/definitely/not/here.toml", "-p", "Hello"])
        .assert()
        .failure()
        .code(2);
}

#[allow(deprecated)]
#[test]
fn test_config_file_drives_the_turn() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parlo.toml");
    std::fs::write(
        &path,
        "[tutor]\nresponse_delay_ms = 0\ntip_probability = 0.0\n\n[voice]\nlanguage = \"es-MX\"\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("parlo").unwrap();
    cmd.args(["--config", path.to_str().unwrap(), "-p", "I love France"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[es-MX]"))
        .stdout(predicate::str::contains("Improved version:"));
}

#[allow(deprecated)]
#[test]
fn test_empty_prompt_is_an_error() {
    let mut cmd = Command::cargo_bin("parlo").unwrap();
    cmd.args(["-p", ""])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("empty practice sentence"));
}
