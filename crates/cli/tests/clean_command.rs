use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[allow(deprecated)]
fn cli(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("debug-sweep").expect("binary");
    cmd.current_dir(workdir).env_remove("RUST_LOG");
    cmd
}

fn setup_repo() -> tempfile::TempDir {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("node_modules/dep")).unwrap();
    fs::write(
        root.join("src/app.js"),
        "export function run(x) {\n  console.log('x', x);\n  debugger;\n  console.error('boom');\n  return x;\n}\n",
    )
    .unwrap();
    fs::write(
        root.join("src/clean.ts"),
        "export const answer: number = 42;\n",
    )
    .unwrap();
    fs::write(root.join("node_modules/dep/index.js"), "console.log(1);\n").unwrap();
    temp
}

#[test]
fn clean_rewrites_files_and_skips_vendor_dirs() {
    let temp = setup_repo();
    let root = temp.path();

    cli(root)
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 2 file(s) changed, 2 statement(s) removed"));

    assert_eq!(
        fs::read_to_string(root.join("src/app.js")).unwrap(),
        "export function run(x) {\n  console.error('boom');\n  return x;\n}\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("node_modules/dep/index.js")).unwrap(),
        "console.log(1);\n"
    );
}

#[test]
fn check_mode_fails_without_writing() {
    let temp = setup_repo();
    let root = temp.path();
    let before = fs::read_to_string(root.join("src/app.js")).unwrap();

    cli(root)
        .args(["clean", "--check", "src"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("would clean"));
    assert_eq!(fs::read_to_string(root.join("src/app.js")).unwrap(), before);

    cli(root)
        .args(["clean", "--check", "src/clean.ts"])
        .assert()
        .success();
}

#[test]
fn stdin_mode_prints_clean_text() {
    let temp = tempdir().unwrap();

    cli(temp.path())
        .args(["clean", "--stdin", "--dialect", "typescriptreact"])
        .write_stdin("const a = 1;\nconsole.warn(a);\n")
        .assert()
        .success()
        .stdout("const a = 1;\n");

    cli(temp.path())
        .args(["clean", "--stdin", "--stdin-path", "script.py", "--keep", "print"])
        .write_stdin("print('kept')\n")
        .assert()
        .success()
        .stdout("print('kept')\n");
}

#[test]
fn removal_flags_and_config_file() {
    let temp = setup_repo();
    let root = temp.path();
    fs::write(
        root.join("debug-sweep.toml"),
        "[removal]\nremoveDebugger = false\n",
    )
    .unwrap();

    cli(root)
        .args(["clean", "--remove", "error", "--json", "src"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(root.join("src/app.js")).unwrap(),
        "export function run(x) {\n  debugger;\n  return x;\n}\n"
    );
}

#[test]
fn invalid_config_is_reported() {
    let temp = setup_repo();
    let root = temp.path();
    fs::write(root.join("broken.toml"), "[removal]\nremoveEverything = true\n").unwrap();

    cli(root)
        .args(["--config", "broken.toml", "clean", "src"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.toml"));
}

#[test]
fn json_summary_is_machine_readable() {
    let temp = setup_repo();
    let root = temp.path();

    let output = cli(root)
        .args(["clean", "--dry-run", "--json"])
        .output()
        .expect("command run");
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["filesScanned"], 2);
    assert_eq!(body["filesChanged"], 1);
    assert_eq!(body["statementsRemoved"], 2);
    assert_eq!(body["files"][0]["written"], false);
}

#[test]
fn include_and_exclude_globs() {
    let temp = setup_repo();
    let root = temp.path();
    fs::write(root.join("src/other.js"), "debugger;\nrun();\n").unwrap();

    cli(root)
        .args(["clean", "--exclude", "**/app.js"])
        .assert()
        .success();

    assert!(fs::read_to_string(root.join("src/app.js"))
        .unwrap()
        .contains("debugger"));
    assert_eq!(
        fs::read_to_string(root.join("src/other.js")).unwrap(),
        "run();\n"
    );
}
