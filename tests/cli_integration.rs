//! Integration tests for the `giftdeck` CLI.
//!
//! Each test points the binary at a config file in a temp directory and
//! checks stdout, stderr and the exit code. Nothing here talks to the network.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const UNSET_KEY_VAR: &str = "GIFTDECK_TEST_KEY_THAT_IS_NEVER_SET";

/// Get the path to the built `giftdeck` binary.
fn giftdeck_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("giftdeck");
    path
}

/// Run giftdeck with `--config <path>` and a clean environment for the API key.
/// The working directory is the temp dir so no stray `.env` gets loaded.
fn run(config: &Path, args: &[&str]) -> Output {
    let cwd = config
        .ancestors()
        .find(|p| p.is_dir())
        .unwrap_or(Path::new("."));
    Command::new(giftdeck_bin())
        .current_dir(cwd)
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("GEMINI_API_KEY")
        .env_remove("GIFTDECK_LOG")
        .output()
        .expect("failed to run giftdeck")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn config_in(dir: &TempDir) -> PathBuf {
    dir.path().join("giftdeck").join("config.toml")
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_path_prints_the_override() {
    let dir = TempDir::new().unwrap();
    let path = config_in(&dir);
    let out = run(&path, &["config", "path"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), path.display().to_string());
}

#[test]
fn config_init_writes_template_once() {
    let dir = TempDir::new().unwrap();
    let path = config_in(&dir);

    let out = run(&path, &["config", "init"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[api]"));

    let again = run(&path, &["config", "init"]);
    assert_eq!(again.status.code(), Some(1));
    assert!(stderr(&again).contains("already exists"));

    let forced = run(&path, &["config", "init", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn config_set_then_show() {
    let dir = TempDir::new().unwrap();
    let path = config_in(&dir);
    assert!(run(&path, &["config", "init"]).status.success());

    let out = run(&path, &["config", "set", "api.model", "gemini-2.5-pro"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let out = run(&path, &["config", "set", "api.temperature", "0.3"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    // Comments in the template survive the edit
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains('#'));
    assert!(text.contains("model = \"gemini-2.5-pro\""));

    let shown = run(&path, &["config", "show"]);
    assert!(shown.status.success());
    let shown = stdout(&shown);
    assert!(shown.contains("gemini-2.5-pro"));
    assert!(shown.contains("GEMINI_API_KEY (not set)"));

    let json = run(&path, &["--json", "config", "show"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&json)).unwrap();
    assert_eq!(value["api"]["model"], "gemini-2.5-pro");
    assert_eq!(value["api_key_set"], false);
}

#[test]
fn config_set_rejects_unknown_keys_and_bad_values() {
    let dir = TempDir::new().unwrap();
    let path = config_in(&dir);

    let out = run(&path, &["config", "set", "api.colour", "red"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown config key 'api.colour'"));

    let out = run(&path, &["config", "set", "api.timeout_secs", "soon"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("invalid value for api.timeout_secs"));
    assert!(!path.exists());
}

#[test]
fn config_show_without_a_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let out = run(&config_in(&dir), &["config", "show"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("gemini-2.5-flash"));
}

#[test]
fn broken_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[api\nmodel = ").unwrap();
    let out = run(&path, &["config", "show"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("could not parse config.toml"));
}

// ---------------------------------------------------------------------------
// suggest
// ---------------------------------------------------------------------------

fn config_with_unset_key(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        format!(
            "[api]\napi_key_env = \"{}\"\nbase_url = \"http://127.0.0.1:9\"\n\n[log]\nlevel = \"off\"\n",
            UNSET_KEY_VAR
        ),
    )
    .unwrap();
    path
}

#[test]
fn suggest_reports_every_validation_problem() {
    let dir = TempDir::new().unwrap();
    let path = config_with_unset_key(&dir);
    let out = run(&path, &["suggest", "--born", "1800", "--min", "100", "--max", "50"]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("Please provide at least one detail about them."));
    assert!(err.contains("Please enter a valid year"));
    assert!(err.contains("Please enter their location."));
    assert!(err.contains("Minimum budget cannot be greater than maximum budget."));
}

#[test]
fn suggest_without_api_key_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    let path = config_with_unset_key(&dir);
    let out = run(
        &path,
        &["suggest", "--trait", "loves hiking", "--location", "Leeds"],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains(&format!(
        "API key is not configured. Please set the {} environment variable.",
        UNSET_KEY_VAR
    )));
    assert!(stdout(&out).is_empty());
}

#[test]
fn suggest_rejects_unknown_gender() {
    let dir = TempDir::new().unwrap();
    let path = config_with_unset_key(&dir);
    let out = run(
        &path,
        &["suggest", "--trait", "chess", "--location", "Leeds", "--gender", "robot"],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown gender 'robot'"));
}

// ---------------------------------------------------------------------------
// suggest against a mock model service
// ---------------------------------------------------------------------------

const TEST_KEY_VAR: &str = "GIFTDECK_CLI_TEST_KEY";

fn config_for_server(dir: &TempDir, base_url: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        format!(
            "[api]\napi_key_env = \"{}\"\nbase_url = \"{}\"\nmodel = \"test-model\"\n\n[log]\nlevel = \"off\"\n",
            TEST_KEY_VAR, base_url
        ),
    )
    .unwrap();
    path
}

async fn mock_answer(text: &str, chunks: serde_json::Value) -> wiremock::MockServer {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": text}]},
                "groundingMetadata": {"groundingChunks": chunks}
            }]
        })))
        .mount(&server)
        .await;
    server
}

/// Run `suggest` off the async runtime so the mock server keeps serving
async fn run_suggest(config: PathBuf, extra: &[&str]) -> Output {
    let mut args: Vec<String> = ["suggest", "--trait", "loves maps", "--location", "Leeds"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    args.extend(extra.iter().map(|s| s.to_string()));
    tokio::task::spawn_blocking(move || {
        Command::new(giftdeck_bin())
            .current_dir(config.parent().unwrap())
            .arg("--config")
            .arg(&config)
            .args(&args)
            .env(TEST_KEY_VAR, "test-key")
            .env_remove("GIFTDECK_LOG")
            .output()
            .expect("failed to run giftdeck")
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn suggest_prints_ideas_with_search_links() {
    let server = mock_answer(
        r#"[{"name": "Old atlas", "reason": "Loves maps", "price": "£40"}]"#,
        serde_json::json!([]),
    )
    .await;
    let dir = TempDir::new().unwrap();
    let out = run_suggest(config_for_server(&dir, &server.uri()), &[]).await;
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("1. Old atlas (£40)"));
    assert!(text.contains("Find it: https://www.google.com/search?q=Old%20atlas"));
}

#[tokio::test]
async fn suggest_keeps_sources_when_no_idea_parses() {
    let server = mock_answer(
        "Sorry, nothing concrete.",
        serde_json::json!([{"web": {"uri": "https://shop.example/x", "title": "Shop X"}}]),
    )
    .await;
    let dir = TempDir::new().unwrap();
    let config = config_for_server(&dir, &server.uri());

    let out = run_suggest(config.clone(), &[]).await;
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Shop X <https://shop.example/x>"));
    assert!(!text.contains("No gift ideas found this time"));

    let out = run_suggest(config, &["--json"]).await;
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(value["suggestions"].as_array().unwrap().len(), 0);
    assert_eq!(value["sources"][0]["uri"], "https://shop.example/x");
    assert!(value.get("notice").is_none());
}

#[tokio::test]
async fn suggest_with_nothing_back_prints_the_notice() {
    let server = mock_answer("", serde_json::json!([])).await;
    let dir = TempDir::new().unwrap();
    let out = run_suggest(config_for_server(&dir, &server.uri()), &[]).await;
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("No gift ideas found this time"));
}
