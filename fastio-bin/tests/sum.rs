use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn fastio() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fastio"))
}

#[test]
fn sums_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("output.txt");
    std::fs::write(&input, "5\n10 -3 7\r\n0 100\n").unwrap();

    let status = fastio()
        .arg("sum")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "114\n");
}

#[test]
fn sums_stdin_to_stdout() {
    let mut child = fastio()
        .arg("sum")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"3\n1 2 3\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout, b"6\n");
}

#[test]
fn short_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.txt");
    std::fs::write(&input, "4\n1 2\n").unwrap();

    let output = fastio()
        .args(&["sum", "-i"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("read int #2"), "stderr: {}", stderr);
    assert!(stderr.contains("end of input"), "stderr: {}", stderr);
}

#[test]
fn missing_input_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = fastio()
        .arg("sum")
        .arg("--input")
        .arg(dir.path().join("absent.txt"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("open "));
}
