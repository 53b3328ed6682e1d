use assert_cmd::Command;
use predicates::prelude::*;

fn stepresp() -> Command {
    Command::cargo_bin("stepresp").expect("binary built")
}

const PROMPT: &str =
    "Input the desired float type Kp value (control gain value) for the next sample:";

#[test]
fn target_runs_one_simulated_cycle_and_terminates_on_eof() {
    let assert = stepresp()
        .args(["target", "--tick-ms", "10", "--sample-period-ms", "50"])
        .write_stdin("0.05\n")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], PROMPT);
    // 5 data points then the terminator, then a fresh prompt before EOF
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[6], "End");
    assert_eq!(lines[7], PROMPT);
    for data in &lines[1..6] {
        let mut fields = data.split(',');
        fields.next().expect("time field").parse::<u64>().expect("numeric time");
        fields.next().expect("position field").parse::<i64>().expect("numeric position");
    }
}

#[test]
fn target_rejects_bad_gain_with_exit_code_2() {
    stepresp()
        .args(["target", "--tick-ms", "10", "--sample-period-ms", "20"])
        .write_stdin("bogus\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("bogus"));
}

#[test]
fn target_rejects_negative_gain() {
    stepresp()
        .args(["target", "--tick-ms", "10", "--sample-period-ms", "20"])
        .write_stdin("-0.5\n")
        .assert()
        .code(2);
}

#[test]
fn fetch_fails_with_link_exit_code_when_port_is_missing() {
    stepresp()
        .args(["fetch", "--kp", "0.05", "--port", "/dev/nonexistent-stepresp"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("/dev/nonexistent-stepresp"));
}

#[test]
fn invalid_config_file_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("stepresp.toml");
    std::fs::write(&path, "[control]\ntick_ms = 0\n").expect("write config");

    stepresp()
        .arg("--config")
        .arg(&path)
        .args(["target"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("tick_ms"));
}

#[test]
fn config_file_drives_the_cycle_length() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("stepresp.toml");
    std::fs::write(&path, "[control]\ntick_ms = 10\nsample_period_ms = 30\n")
        .expect("write config");

    let assert = stepresp()
        .arg("--config")
        .arg(&path)
        .args(["target"])
        .write_stdin("1.0\n")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let data_lines = stdout
        .lines()
        .filter(|l| l.split(',').count() == 2 && !l.starts_with("Input"))
        .count();
    assert_eq!(data_lines, 3);
}

#[test]
fn help_lists_both_subcommands() {
    stepresp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("target").and(predicate::str::contains("fetch")));
}
