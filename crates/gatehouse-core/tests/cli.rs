use std::fs;
use std::process::{Command, Output};

fn gatehouse(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gatehouse"))
        .args(args)
        .env_remove("GATEHOUSE_COOKIE")
        .env_remove("GITHUB_APP_CLIENT_SECRET")
        .env("GATEHOUSE_LOG", "gatehouse=debug")
        .output()
        .expect("failed to run gatehouse binary")
}

fn flags_for(jar: &str) -> String {
    let output = gatehouse(&["flags", "--cookie", jar]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "gatehouse flags failed:\n{stderr}");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn flags_scenarios() {
    assert_eq!(
        flags_for("github-access-token=abc123"),
        r#"{"githubAccessToken":"abc123"}"#
    );
    assert_eq!(flags_for("other=xyz"), "{}");
    assert_eq!(flags_for("github-access-token="), "{}");
    assert_eq!(
        flags_for(" foo=1; github-access-token=tok%3D2"),
        r#"{"githubAccessToken":"tok=2"}"#
    );
    assert_eq!(flags_for(""), "{}");
}

#[test]
fn flags_reads_cookie_from_env() {
    let output = Command::new(env!("CARGO_BIN_EXE_gatehouse"))
        .args(["flags", "--name", "session"])
        .env("GATEHOUSE_COOKIE", "session=s1; github-access-token=t")
        .output()
        .expect("failed to run gatehouse binary");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"githubAccessToken":"s1"}"#
    );
}

#[test]
fn flags_rejects_invalid_utf8_escape() {
    let output = gatehouse(&["flags", "--cookie", "github-access-token=%FF"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("percent-encoded"));
}

#[test]
fn run_extracts_flags_from_script_cookies() {
    let script_path =
        std::env::temp_dir().join(format!("gatehouse-run-{}.js", std::process::id()));
    let script = r#"
document.cookie = "theme=dark; path=/";
document.cookie = "github-access-token=ghu_from_script; path=/; SameSite=Strict";
"#;
    fs::write(&script_path, script).expect("failed to write script");

    let output = gatehouse(&["run", script_path.to_string_lossy().as_ref()]);
    let _ = fs::remove_file(&script_path);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "gatehouse run failed:\n{stderr}");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"githubAccessToken":"ghu_from_script"}"#
    );
}

#[test]
fn eval_sees_seeded_cookies_and_flags() {
    let output = gatehouse(&[
        "eval",
        "[document.cookie, flags.githubAccessToken]",
        "--cookie",
        "theme=dark",
        "--cookie",
        "github-access-token=ghu_eval; path=/",
    ]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "gatehouse eval failed:\n{stderr}");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"["theme=dark; github-access-token=ghu_eval","ghu_eval"]"#
    );
}

#[test]
fn eval_rejects_async_expressions() {
    let output = gatehouse(&["eval", "Promise.resolve(1)"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("async expressions"));
}

#[test]
fn serve_requires_client_secret() {
    let output = gatehouse(&["serve", "--bind", "127.0.0.1:0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("GITHUB_APP_CLIENT_SECRET"));
}
