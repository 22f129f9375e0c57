use std::path::PathBuf;
use std::process::{Command, Output};

const SAMPLE: &str = "\
[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";

/// Writes `contents` to a file in the temp dir that is unique to the test.
fn input_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir()
        .join(format!("lincomb-{}-{name}.txt", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

fn run(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lincomb"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn prints_both_totals() {
    let path = input_file("sample", SAMPLE);
    let out = run(&[path.as_os_str()]);
    std::fs::remove_file(&path).unwrap();

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "7\n33\n");
}

#[test]
fn logs_go_to_stderr() {
    let path = input_file("verbose", SAMPLE);
    let out = run(&[path.as_os_str(), "-v".as_ref()]);
    std::fs::remove_file(&path).unwrap();

    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "7\n33\n");
    assert!(String::from_utf8_lossy(&out.stderr).contains("solved instance"));
}

#[test]
fn missing_file() {
    let path = std::env::temp_dir().join("lincomb-does-not-exist.txt");
    let out = run(&[path.as_os_str()]);

    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to read"));
}

#[test]
fn malformed_line() {
    let path = input_file("malformed", "[#.] (0) {1,0}\n[#.] (0 {1,0}\n");
    let out = run(&[path.as_os_str()]);
    std::fs::remove_file(&path).unwrap();

    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("line 2"));
}

#[cfg(not(feature = "z3"))]
#[test]
fn z3_needs_the_feature() {
    let path = input_file("z3", SAMPLE);
    let out = run(&[path.as_os_str(), "--solver".as_ref(), "z3".as_ref()]);
    std::fs::remove_file(&path).unwrap();

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("z3"));
}

#[cfg(feature = "z3")]
#[test]
fn z3_backend_agrees() {
    let path = input_file("z3", SAMPLE);
    let out = run(&[path.as_os_str(), "--solver".as_ref(), "z3".as_ref()]);
    std::fs::remove_file(&path).unwrap();

    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "7\n33\n");
}
