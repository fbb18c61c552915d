use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ORDER_HTML: &str = r#"<html><body>
<table>
  <tr><th>Customer</th><th>PO</th><th>Order date</th><th>Promised</th><th>UNH</th></tr>
  <tr><td>ACME</td><td>PO123</td><td>01-15-2024</td><td>01-20-2024</td><td>UNH1</td></tr>
</table>
<table>
  <tr><th>Code</th><th>Qty</th><th>Price</th><th>Description</th></tr>
  <tr><td>SKU1</td><td>5</td><td>12.5</td><td>Widget</td></tr>
</table>
</body></html>"#;

fn expected_output() -> String {
    [
        "UNH  UNH1  ".to_string(),
        "CLO  ACME   PO123                   20240115 20240120".to_string(),
        "OLD  0001 SKU1            0000000005.0012.500".to_string(),
        format!("OLDA {:<49}", "Widget"),
    ]
    .join("\n")
}

fn pofix(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pofix").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn process_writes_fixed_width_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("order.html");
    let output = dir.path().join("order.txt");
    fs::write(&input, ORDER_HTML).unwrap();

    pofix(&dir)
        .arg("process")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).unwrap(), expected_output());
}

#[test]
fn process_reads_stdin() {
    let dir = TempDir::new().unwrap();

    pofix(&dir)
        .args(["process", "-"])
        .write_stdin(ORDER_HTML)
        .assert()
        .success()
        .stdout(format!("{}\n", expected_output()));
}

#[test]
fn process_json_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("order.html");
    fs::write(&input, ORDER_HTML).unwrap();

    pofix(&dir)
        .arg("process")
        .arg(&input)
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"purchase_order_no\": \"PO123\""))
        .stdout(predicate::str::contains("\"item_number\": \"0001\""));
}

#[test]
fn process_rejects_empty_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.html");
    fs::write(&input, "").unwrap();

    pofix(&dir)
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid request body."));
}

#[test]
fn process_rejects_single_table() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("one-table.html");
    fs::write(&input, "<table><tr><td>only</td></tr></table>").unwrap();

    pofix(&dir)
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected at least 2 tables"));
}

#[test]
fn process_missing_file() {
    let dir = TempDir::new().unwrap();

    pofix(&dir)
        .args(["process", "does-not-exist.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_converts_all_matching_files() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("out");
    fs::write(dir.path().join("a.html"), ORDER_HTML).unwrap();
    fs::write(dir.path().join("b.htm"), ORDER_HTML).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let pattern = format!("{}/*", dir.path().display());
    pofix(&dir)
        .args(["batch", &pattern, "-o"])
        .arg(&out_dir)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(out_dir.join("a.txt")).unwrap(), expected_output());
    assert_eq!(fs::read_to_string(out_dir.join("b.txt")).unwrap(), expected_output());
    assert!(!out_dir.join("notes.txt").exists());
}

#[test]
fn batch_continue_on_error_reports_failures() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.html"), "<p>no tables</p>").unwrap();
    fs::write(dir.path().join("good.html"), ORDER_HTML).unwrap();

    let pattern = format!("{}/*.html", dir.path().display());
    pofix(&dir)
        .args(["batch", &pattern, "--continue-on-error"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 files failed"));

    assert!(dir.path().join("good.txt").exists());
    assert!(!dir.path().join("bad.txt").exists());
}

#[test]
fn config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pofix").join("config.json");

    pofix(&dir)
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    pofix(&dir)
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_file_enables_truncation() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.json");
    fs::write(&config, r#"{ "format": { "truncate_overflow": true } }"#).unwrap();

    let html = ORDER_HTML.replace("<td>ACME</td>", "<td>ACME INDUSTRIES</td>");
    pofix(&dir)
        .arg("--config")
        .arg(&config)
        .args(["process", "-"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("CLO  ACME INPO123"));
}
