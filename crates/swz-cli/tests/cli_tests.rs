use std::io::Write;
use std::process::Command;

fn write_source(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".sw")
        .tempfile()
        .expect("temp file");
    file.write_all(content.as_bytes()).expect("write source");
    file
}

fn run_swz(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_swz"))
        .args(args)
        .output()
        .expect("run swz")
}

#[test]
fn clean_source_exits_zero() {
    let file = write_source("let a : Int[] = [1, 2, 3]\n");
    let out = run_swz(&[file.path().to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn semantic_error_exits_nonzero_and_prints_position() {
    let file = write_source("let x = y\n");
    let out = run_swz(&[file.path().to_str().unwrap()]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unresolved identifier"), "stderr: {stderr}");
    assert!(stderr.contains("1:9"), "stderr: {stderr}");
}

#[test]
fn json_output_is_structured() {
    let file = write_source("let x = y\n");
    let out = run_swz(&["--json", file.path().to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let diags = parsed.as_array().expect("array of diagnostics");
    assert_eq!(diags[0]["code"], 2001);
}

#[test]
fn dump_round_trips_the_source() {
    let file = write_source("let a = 1 + 2 * 3\n");
    let out = run_swz(&["--dump", file.path().to_str().unwrap()]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout, "let a = 1 + 2 * 3\n");
}
