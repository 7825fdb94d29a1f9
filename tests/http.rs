use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Settings {
    goal: u64,
    step: u64,
    #[serde(rename = "confettiEnabled")]
    confetti_enabled: bool,
    #[serde(rename = "confettiInterval")]
    confetti_interval: u64,
}

#[derive(Debug, Deserialize)]
struct BoxView {
    value: u64,
    checked: bool,
}

#[derive(Debug, Deserialize)]
struct TrackerView {
    boxes: Vec<BoxView>,
    checked_count: usize,
    box_count: usize,
    total: u64,
    summary: String,
    settings: Settings,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Effect {
    kind: String,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ActionResponse {
    state: TrackerView,
    effects: Vec<Effect>,
}

struct TestServer {
    base_url: String,
    data_dir: PathBuf,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_dir(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("savings_tracker_http_{name}_{}_{}", std::process::id(), nanos));
    path
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/state")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(data_dir: &Path) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_savings_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_DIR", data_dir)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    let base_url = format!("http://127.0.0.1:{port}");
    let server = TestServer {
        base_url,
        data_dir: data_dir.to_path_buf(),
        child,
    };
    wait_until_ready(&server.base_url).await;
    server
}

fn seed(data_dir: &Path, checked: &str, settings: &str) {
    std::fs::create_dir_all(data_dir).unwrap();
    std::fs::write(data_dir.join("savings-tracker-checked-v1.json"), checked).unwrap();
    std::fs::write(data_dir.join("savings-tracker-settings-v1.json"), settings).unwrap();
}

async fn toggle(client: &Client, server: &TestServer, position: usize, checked: bool) -> ActionResponse {
    let response = client
        .post(format!("{}/api/toggle", server.base_url))
        .json(&serde_json::json!({ "position": position, "checked": checked }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_fresh_server_uses_defaults() {
    let server = spawn_server(&unique_data_dir("fresh")).await;
    let client = Client::new();

    let state: TrackerView = client
        .get(format!("{}/api/state", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(state.settings.goal, 100_000);
    assert_eq!(state.settings.step, 1_000);
    assert!(state.settings.confetti_enabled);
    assert_eq!(state.settings.confetti_interval, 10_000);
    assert_eq!(state.box_count, 100);
    assert_eq!(state.checked_count, 0);
    assert!(state.message.is_none());

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Avkryssede bokser: 0 / 100"));
}

#[tokio::test]
async fn http_toggle_fills_prefix_and_persists() {
    let data_dir = unique_data_dir("toggle");
    seed(
        &data_dir,
        "[]",
        r#"{"goal": 5000, "step": 1000, "confettiEnabled": true, "confettiInterval": 10000}"#,
    );
    let server = spawn_server(&data_dir).await;
    let client = Client::new();

    let res = toggle(&client, &server, 2, true).await;
    assert_eq!(res.state.checked_count, 3);
    assert_eq!(res.state.total, 3_000);
    let checked: Vec<u64> = res
        .state
        .boxes
        .iter()
        .filter(|b| b.checked)
        .map(|b| b.value)
        .collect();
    assert_eq!(checked, vec![1_000, 2_000, 3_000]);
    assert_eq!(res.state.summary, "Avkryssede bokser: 3 / 5  •  Totalt: 3.000,-");

    let saved = std::fs::read_to_string(server.data_dir.join("savings-tracker-checked-v1.json")).unwrap();
    let saved: Vec<u64> = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved, vec![1_000, 2_000, 3_000]);
}

#[tokio::test]
async fn http_goal_crossing_celebrates_and_clears() {
    let data_dir = unique_data_dir("goal");
    seed(
        &data_dir,
        "[1000, 4000]",
        r#"{"goal": 5000, "step": 1000, "confettiEnabled": true, "confettiInterval": 10000}"#,
    );
    let server = spawn_server(&data_dir).await;
    let client = Client::new();

    let res = toggle(&client, &server, 4, true).await;
    let major = res.effects.iter().find(|e| e.kind == "major").expect("major effect");
    assert!(major.message.as_deref().unwrap().starts_with("Gratulerer!"));
    assert!(res.state.message.is_some());

    let res = toggle(&client, &server, 4, false).await;
    assert_eq!(res.state.total, 4_000);
    assert!(res.effects.iter().any(|e| e.kind == "clear_message"));
    assert!(!res.effects.iter().any(|e| e.kind == "major"));
    assert!(res.state.message.is_none());
}

#[tokio::test]
async fn http_toggle_outside_grid_is_rejected() {
    let server = spawn_server(&unique_data_dir("range")).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/toggle", server.base_url))
        .json(&serde_json::json!({ "position": 100, "checked": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/api/toggle", server.base_url))
        .header("content-type", "application/json")
        .body("{\"position\": \"first\"}")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn http_settings_are_clamped_and_survive_restart() {
    let data_dir = unique_data_dir("settings");
    let client = Client::new();

    {
        let server = spawn_server(&data_dir).await;
        toggle(&client, &server, 9, true).await;

        let res: ActionResponse = client
            .post(format!("{}/api/settings", server.base_url))
            .json(&serde_json::json!({
                "goal": "500",
                "step": "",
                "confetti_interval": "-5",
                "confetti_enabled": false
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(res.state.settings.goal, 1_000);
        assert_eq!(res.state.settings.step, 1_000);
        assert_eq!(res.state.settings.confetti_interval, 1);
        assert!(!res.state.settings.confetti_enabled);
        assert_eq!(res.state.box_count, 1);
        assert_eq!(res.state.checked_count, 1);
        assert!(res.effects.iter().all(|e| e.kind != "major" && e.kind != "minor"));
    }

    let server = spawn_server(&data_dir).await;
    let state: TrackerView = client
        .get(format!("{}/api/state", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(state.settings.goal, 1_000);
    assert_eq!(state.settings.confetti_interval, 1);
    assert_eq!(state.checked_count, 1);
}

#[tokio::test]
async fn http_settings_form_redirects_home() {
    let server = spawn_server(&unique_data_dir("form")).await;
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let response = client
        .post(format!("{}/settings", server.base_url))
        .form(&[("goal", "20000"), ("step", "2000"), ("confetti_interval", "abc")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_redirection());

    let state: TrackerView = client
        .get(format!("{}/api/state", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(state.settings.goal, 20_000);
    assert_eq!(state.settings.step, 2_000);
    assert_eq!(state.settings.confetti_interval, 10_000);
    assert!(!state.settings.confetti_enabled);
    assert_eq!(state.box_count, 10);
}

#[tokio::test]
async fn http_corrupt_records_fall_back_to_defaults() {
    let data_dir = unique_data_dir("corrupt");
    seed(&data_dir, "{oops", "\"not settings\"");
    let server = spawn_server(&data_dir).await;
    let client = Client::new();

    let state: TrackerView = client
        .get(format!("{}/api/state", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(state.settings.goal, 100_000);
    assert_eq!(state.checked_count, 0);
}

#[tokio::test]
async fn http_oversized_goal_keeps_the_page_renderable() {
    let data_dir = unique_data_dir("oversized");
    let client = Client::new();

    {
        let server = spawn_server(&data_dir).await;
        let response = client
            .post(format!("{}/api/settings", server.base_url))
            .json(&serde_json::json!({
                "goal": "1e30",
                "step": "1",
                "confetti_interval": "",
                "confetti_enabled": true
            }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        let res: ActionResponse = response.json().await.unwrap();
        assert_eq!(res.state.settings.goal, 10_000);
        assert_eq!(res.state.box_count, 10_000);
    }

    let server = spawn_server(&data_dir).await;
    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(page.status().is_success());
    assert!(page.text().await.unwrap().contains("Avkryssede bokser: 0 / 10000"));
}

#[tokio::test]
async fn http_settings_accept_numbers_and_bad_types() {
    let server = spawn_server(&unique_data_dir("types")).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/settings", server.base_url))
        .json(&serde_json::json!({
            "goal": 5000,
            "step": { "nested": true },
            "confetti_interval": [250],
            "confetti_enabled": "yes"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let res: ActionResponse = response.json().await.unwrap();
    assert_eq!(res.state.settings.goal, 5_000);
    assert_eq!(res.state.settings.step, 1_000);
    assert_eq!(res.state.settings.confetti_interval, 10_000);
    assert!(!res.state.settings.confetti_enabled);
    assert_eq!(res.state.box_count, 5);
}
