use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

const FIXED_TIME: &str = "2024-05-01T12:00:00Z";

fn cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sarsat"));
    cmd.env_remove("SARSAT_LOG");
    cmd
}

fn write_ids(temp: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = temp.path().join(name);
    std::fs::write(&path, body).expect("write ids");
    path
}

fn sample_ids(temp: &TempDir) -> std::path::PathBuf {
    write_ids(
        temp,
        "beacons.txt",
        "# sample beacons\nA029C2900D97591\n2024F72524FFBFF\nnot-a-beacon\n",
    )
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn help_supports_analyse_and_analyze() {
    cmd().arg("analyse").arg("--help").assert().success();
    cmd().arg("analyze").arg("--help").assert().success();
}

#[test]
fn decode_prints_beacon_json() {
    let assert = cmd()
        .arg("decode")
        .arg("A029C2900D97591")
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value["country_code"], 257);
    assert_eq!(value["protocol"]["kind"], "maritime_user");
    assert_eq!(value["protocol"]["identity"]["mmsi"], 257_743_921);
}

#[test]
fn decode_failure_exits_with_hint() {
    cmd()
        .arg("decode")
        .arg("A029C2900D9759")
        .assert()
        .code(2)
        .stderr(
            contains("A029C2900D9759:")
                .and(contains("error: 1 of 1"))
                .and(contains("hint:")),
        );
}

#[test]
fn decode_skips_length_hint_for_unhandled_protocols() {
    cmd()
        .arg("decode")
        .arg("001E00000000000")
        .assert()
        .code(2)
        .stderr(
            contains("unhandled location protocol code: 15")
                .and(contains("error: 1 of 1"))
                .and(contains("hint:").not()),
        );
}

#[test]
fn decode_keeps_going_after_a_failure() {
    cmd()
        .arg("decode")
        .arg("ZZZ")
        .arg("20383C480000000")
        .assert()
        .code(2)
        .stdout(contains("ship_security_location"))
        .stderr(contains("1 of 2"));
}

#[test]
fn encode_reverses_decode() {
    let temp = TempDir::new().expect("tempdir");
    let decoded = cmd()
        .arg("decode")
        .arg("A029C2900D97591")
        .assert()
        .success();
    let json = temp.path().join("beacon.json");
    std::fs::write(&json, &decoded.get_output().stdout).expect("write json");

    cmd()
        .arg("encode")
        .arg(&json)
        .assert()
        .success()
        .stdout("A029C2900D97591\n");
}

#[test]
fn encode_reads_stdin() {
    let beacon = r#"{"country_code":257,"protocol":{"kind":"aviation_standard_location","aircraft_address":2748}}"#;
    cmd()
        .arg("encode")
        .arg("-")
        .write_stdin(beacon)
        .assert()
        .success()
        .stdout("202600157800000\n");
}

#[test]
fn encode_rejects_bad_json() {
    cmd()
        .arg("encode")
        .arg("-")
        .write_stdin("{\"country_code\": 257}")
        .assert()
        .code(2)
        .stderr(contains("error: invalid beacon JSON").and(contains("hint:")));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.txt");
    let report = temp.path().join("report.json");

    cmd()
        .arg("analyze")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn stdout_outputs_report_json() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_ids(&temp);
    let assert = cmd()
        .arg("analyse")
        .arg(input)
        .arg("--stdout")
        .arg("--generated-at")
        .arg(FIXED_TIME)
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value["generated_at"], FIXED_TIME);
    assert_eq!(value["summary"]["ids_total"], 3);
    assert_eq!(value["summary"]["decoded"], 2);
    assert_eq!(value["summary"]["failed"], 1);
    assert_eq!(value["failures"][0]["line"], 4);
    assert_eq!(value["beacons"][0]["line"], 2);
    assert_eq!(value["protocols"][0]["protocol"], "maritime_standard_location");
}

#[test]
fn report_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_ids(&temp);
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("analyse")
        .arg(&input)
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let json = std::fs::read_to_string(&report).expect("report");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["report_version"], 1);
    assert_eq!(value["tool"]["name"], "sarsat");
}

#[test]
fn report_path_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_ids(&temp);

    cmd()
        .arg("analyse")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .code(2)
        .stderr(contains("must differ from input"));
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_ids(&temp);
    let report = temp.path().join("report.json");

    cmd()
        .arg("analyse")
        .arg(input)
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure();
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_ids(&temp);

    cmd()
        .arg("analyse")
        .arg(input)
        .arg("--stdout")
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure();
}

#[test]
fn pretty_output_is_indented() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_ids(&temp);

    cmd()
        .arg("analyse")
        .arg(input)
        .arg("--stdout")
        .arg("--pretty")
        .assert()
        .success()
        .stdout(contains("\n  \"report_version\": 1"));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_ids(&temp);
    let report = temp.path().join("report.json");

    cmd()
        .arg("analyse")
        .arg(input)
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr("");
}

#[test]
fn list_failures_outputs_lines() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_ids(&temp);

    cmd()
        .arg("analyse")
        .arg(input)
        .arg("--stdout")
        .arg("--list-failures")
        .assert()
        .success()
        .stderr(contains("Rejected beacon ids:").and(contains("line 4: not-a-beacon")));
}

#[test]
fn strict_fails_when_ids_are_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_ids(&temp);

    cmd()
        .arg("analyse")
        .arg(input)
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .code(2)
        .stderr(contains("1 beacon ids failed to decode").and(contains("--list-failures")));
}

#[test]
fn strict_passes_on_clean_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_ids(&temp, "clean.txt", "A029C2900D97591\n20383C480000000\n");

    cmd()
        .arg("analyse")
        .arg(input)
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .success();
}

#[test]
fn glob_with_single_match_is_resolved() {
    let temp = TempDir::new().expect("tempdir");
    sample_ids(&temp);
    let pattern = temp.path().join("*.txt");

    let assert = cmd()
        .arg("analyse")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value["summary"]["ids_total"], 3);
}

#[test]
fn glob_with_multiple_matches_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    write_ids(&temp, "a.txt", "A029C2900D97591\n");
    write_ids(&temp, "b.txt", "20383C480000000\n");
    let pattern = temp.path().join("*.txt");

    cmd()
        .arg("analyse")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("multiple files match pattern").and(contains("hint:")));
}

#[test]
fn invalid_generated_at_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_ids(&temp);

    cmd()
        .arg("analyse")
        .arg(input)
        .arg("--stdout")
        .arg("--generated-at")
        .arg("tomorrow")
        .assert()
        .failure()
        .stderr(contains("RFC3339"));
}

#[test]
fn verbose_logging_goes_to_stderr() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_ids(&temp);

    let assert = cmd()
        .arg("-vv")
        .arg("analyse")
        .arg(input)
        .arg("--stdout")
        .assert()
        .success()
        .stderr(contains("beacon id rejected"));
    let _ = stdout_json(&assert);
}
