use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const HEADER: &str = "I[mA],Nb[/cm^3],u[cm^2/Vs],NS[/cm^2]";
const REPORT: &str = "\
HMS-3000 Hall Effect Measurement
   I[mA]     B[T]    D[um]
   1.000     0.550   2.000
Nb[/cm^3]  u[cm^2/Vs]  rho[ohm cm]  sigma[1/ohm cm]  Rh[cm^3/C]  Rs[ohm/sq]  NS[/cm^2]
-2.412E+18  3.125E+2  8.287E-3  1.207E+2  -2.589E+0  4.143E+1  -4.824E+14
";

fn halltab() -> Command {
    Command::cargo_bin("halltab").unwrap()
}

#[test]
fn writes_table_for_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("gan07.txt"), REPORT).unwrap();
    fs::write(temp_dir.path().join("readme.md"), "not a report").unwrap();

    halltab()
        .arg(temp_dir.path())
        .arg("--quiet")
        .assert()
        .success();

    let table = fs::read_to_string(temp_dir.path().join("output.csv")).unwrap();
    assert_eq!(
        table,
        format!("{}\n1.000,-2.412E+18,3.125E+2,-4.824E+14\n", HEADER)
    );
}

#[test]
fn custom_output_name() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("gan07.txt"), REPORT).unwrap();

    halltab()
        .arg(temp_dir.path())
        .args(["--output-name", "hall.csv", "--quiet"])
        .assert()
        .success();

    assert!(temp_dir.path().join("hall.csv").exists());
    assert!(!temp_dir.path().join("output.csv").exists());
}

#[test]
fn missing_directory_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope");

    halltab()
        .arg(&missing)
        .arg("--output-format")
        .arg("plain")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Not a directory"));

    assert!(!missing.exists());
}

#[test]
fn malformed_report_exit_codes() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("good.txt"), REPORT).unwrap();
    fs::write(temp_dir.path().join("cut.txt"), "I[mA]\n1.000\nNb[/cm^3]\n").unwrap();

    halltab()
        .arg(temp_dir.path())
        .arg("--quiet")
        .assert()
        .code(6);

    let table = fs::read_to_string(temp_dir.path().join("output.csv")).unwrap();
    assert_eq!(table.lines().count(), 2);

    halltab()
        .arg(temp_dir.path())
        .args(["--on-malformed", "abort", "--quiet"])
        .assert()
        .code(4);
}

#[test]
fn json_report_on_stdout() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("gan07.txt"), REPORT).unwrap();

    let output = halltab()
        .arg(temp_dir.path())
        .args(["--output-format", "json", "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["extraction_summary"]["rows_written"], 1);
    assert_eq!(report["files"][0]["record"]["NS[/cm^2]"], "-4.824E+14");
}

#[test]
fn dry_run_does_not_write() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("gan07.txt"), REPORT).unwrap();

    halltab()
        .arg(temp_dir.path())
        .args(["--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gan07.txt"));

    assert!(!temp_dir.path().join("output.csv").exists());
}

#[test]
fn generate_config_writes_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("halltab.toml");

    halltab()
        .arg("--generate-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("file_name = \"output.csv\""));
}

#[test]
fn json_report_is_only_document_on_stdout() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("gan07.txt"), REPORT).unwrap();
    fs::write(temp_dir.path().join("cut.txt"), "I[mA]\n1.000\nNb[/cm^3]\n").unwrap();

    let output = halltab()
        .arg(temp_dir.path())
        .args(["--output-format", "json", "-v"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["extraction_summary"]["rows_written"], 1);
    assert_eq!(report["extraction_summary"]["malformed"], 1);

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("\"level\":\"success\""));
    assert!(stderr.contains("\"level\":\"warning\""));
}

#[test]
fn usage_error_differs_from_partial_success() {
    halltab().args(["some_dir", "--bogus"]).assert().code(2);
}

#[test]
fn refuses_to_overwrite_report() {
    let temp_dir = TempDir::new().unwrap();
    let report_path = temp_dir.path().join("gan07.txt");
    fs::write(&report_path, REPORT).unwrap();

    halltab()
        .arg(temp_dir.path())
        .args(["--output-name", "gan07.txt", "--output-format", "plain"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Refusing to overwrite"));

    assert_eq!(fs::read_to_string(&report_path).unwrap(), REPORT);
}
