//! End-to-end CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn countup() -> Command {
    let mut cmd = Command::cargo_bin("countup").expect("binary not found");
    cmd.env_remove("COUNTUP_DURATION")
        .env_remove("COUNTUP_FPS")
        .env_remove("COUNTUP_STATS")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_flag() {
    countup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--duration"))
        .stdout(predicate::str::contains("--simulate"));
}

#[test]
fn version_flag() {
    countup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("countup"));
}

#[test]
fn simulated_quiet_prints_final_values() {
    countup()
        .args(["--simulate", "-q"])
        .assert()
        .success()
        .stdout("150+\n5,000+\n12,000+\n450+\n");
}

#[test]
fn simulated_summary_lists_labels() {
    countup()
        .arg("--simulate")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Statistics ==="))
        .stdout(predicate::str::contains("Happy Families"))
        .stdout(predicate::str::contains("12,000+"))
        .stdout(predicate::str::contains("(done)"));
}

#[test]
fn simulated_frames_start_at_zero_and_end_at_target() {
    let output = countup()
        .args(["--simulate", "--frames", "--duration", "500ms", "--fps", "10"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let frames: Vec<&str> = stdout.lines().filter(|l| l.starts_with('[')).collect();
    assert_eq!(frames.len(), 6, "{stdout}");
    assert!(frames[0].contains("Arcade Games 0+"));
    assert!(frames[5].contains("Prizes Won 12,000+"));
}

#[test]
fn countdown_with_custom_stats() {
    let tmp = tempfile::TempDir::new().unwrap();
    let stats = tmp.path().join("stats.json");
    std::fs::write(&stats, r#"{"stats": [{"label": "Tickets", "value": 0, "suffix": " left"}]}"#).unwrap();

    countup()
        .args(["--simulate", "-q", "--from", "5000", "--stats"])
        .arg(&stats)
        .assert()
        .success()
        .stdout("0 left\n");
}

#[test]
fn output_file_contains_final_strip() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = tmp.path().join("strip.json");

    countup()
        .args(["--simulate", "-q", "-o"])
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let stats = json["stats"].as_array().unwrap();
    assert_eq!(stats.len(), 4);
    assert_eq!(stats[2]["label"], "Prizes Won");
    assert_eq!(stats[2]["value"], 12000.0);
    assert_eq!(stats[2]["display"], "12,000+");
}

#[test]
fn wall_clock_run_completes() {
    countup()
        .args(["-q", "--duration", "100ms", "--fps", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12,000+"));
}

#[test]
fn duration_from_env() {
    countup()
        .env("COUNTUP_DURATION", "nonsense")
        .args(["--simulate", "-q"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("invalid duration"));
}

#[test]
fn zero_duration_is_invalid() {
    countup()
        .args(["--simulate", "--duration", "0s"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn zero_fps_is_invalid() {
    countup()
        .args(["--simulate", "--fps", "0"])
        .assert()
        .code(4);
}

#[test]
fn missing_stats_file() {
    countup()
        .args(["--simulate", "--stats", "/definitely/not/here.json"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("here.json"));
}

#[test]
fn unknown_rounding_fails() {
    countup()
        .args(["--simulate", "--rounding", "sideways"])
        .assert()
        .failure();
}

#[test]
fn completion_bash() {
    countup()
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("countup"));
}

#[test]
fn completion_zsh() {
    countup()
        .args(["--completion", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn completion_fish() {
    countup()
        .args(["--completion", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("duration"));
}
