//! Integration tests for the executor service API.

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use serde_json::{Value, json};

use bragi_hal::Computer;
use bragi_server::{AppState, ServerConfig, create_router};

// ============================================================================
// Test helpers
// ============================================================================

/// State with a deterministic fleet and no simulated queue wait.
fn test_state() -> Arc<AppState> {
    let config = ServerConfig {
        queue_scale: 0.0,
        ..ServerConfig::default()
    };
    let computers = vec![
        Computer::new("GladOs", 12),
        Computer::new("HAL-9000", 3),
        Computer::new("TARS", 45),
        Computer::new("Quanti", 0),
    ];
    Arc::new(AppState::with_computers(computers, config))
}

fn test_server(state: Arc<AppState>) -> TestServer {
    let router = create_router(state);
    TestServer::new(router).expect("test server")
}

/// Poll a job until it leaves `running`, with a generous deadline.
async fn wait_terminal(server: &TestServer, job_id: &str) -> Value {
    for _ in 0..500 {
        let response = server.get(&format!("/job/{job_id}")).await;
        response.assert_status_ok();
        let body: Value = response.json();
        if body["status"] != "running" {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {job_id} never reached a terminal status");
}

const BELL_QASM: &str = "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[2];\ncreg c[2];\nh q[0];\ncx q[0],q[1];\nmeasure q[0] -> c[0];\nmeasure q[1] -> c[1];";

// ============================================================================
// Computers endpoint
// ============================================================================

#[tokio::test]
async fn test_computers_lists_fleet_in_order() {
    let server = test_server(test_state());
    let response = server.get("/computers").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let computers = body.as_array().unwrap();
    assert_eq!(computers.len(), 4);
    assert_eq!(computers[0]["name"], "GladOs");
    assert_eq!(computers[0]["queue_time"], 12);
    assert_eq!(computers[3]["name"], "Quanti");
}

#[tokio::test]
async fn test_default_fleet_queue_times_in_range() {
    let state = Arc::new(AppState::with_config(ServerConfig {
        queue_scale: 0.0,
        ..ServerConfig::default()
    }));
    let server = test_server(state);

    let body: Value = server.get("/computers").await.json();
    for computer in body.as_array().unwrap() {
        assert!(computer["queue_time"].as_u64().unwrap() <= 60);
    }
}

// ============================================================================
// Job submission
// ============================================================================

#[tokio::test]
async fn test_submit_and_complete_bell_job() {
    let server = test_server(test_state());

    let response = server
        .post("/start_job/GladOs")
        .json(&json!({ "qasm": BELL_QASM, "num_shots": 50 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let job_id = body["job_id"].as_str().unwrap().to_string();
    assert!(!job_id.is_empty());

    let terminal = wait_terminal(&server, &job_id).await;
    assert_eq!(terminal["status"], "done");
    assert!(terminal.get("error").is_none());

    let results = terminal["results"].as_array().unwrap();
    assert_eq!(results.len(), 50);
    for shot in results {
        let bits = shot.as_str().unwrap();
        assert!(bits == "00" || bits == "11", "unexpected outcome {bits}");
    }
}

#[tokio::test]
async fn test_submit_unknown_computer_returns_404() {
    let server = test_server(test_state());

    let response = server
        .post("/start_job/DeepThought")
        .json(&json!({ "qasm": BELL_QASM, "num_shots": 1 }))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_invalid_qasm_fails_the_job() {
    let server = test_server(test_state());

    // Submission always succeeds; the failure shows up on the job.
    let response = server
        .post("/start_job/TARS")
        .json(&json!({ "qasm": "not valid qasm at all", "num_shots": 10 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let job_id = body["job_id"].as_str().unwrap().to_string();

    let terminal = wait_terminal(&server, &job_id).await;
    assert_eq!(terminal["status"], "failed");
    assert!(terminal.get("results").is_none());
    assert!(
        terminal["error"]
            .as_str()
            .unwrap()
            .contains("QASM parse error"),
    );
}

#[tokio::test]
async fn test_oversized_circuit_fails_the_job() {
    let server = test_server(test_state());

    let response = server
        .post("/start_job/Quanti")
        .json(&json!({
            "qasm": "OPENQASM 2.0; qreg q[25]; creg c[1]; h q[0]; measure q[0] -> c[0];",
            "num_shots": 1
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let job_id = body["job_id"].as_str().unwrap().to_string();

    let terminal = wait_terminal(&server, &job_id).await;
    assert_eq!(terminal["status"], "failed");
    assert!(terminal["error"].as_str().unwrap().contains("too large"));
}

// ============================================================================
// Job polling
// ============================================================================

#[tokio::test]
async fn test_poll_unknown_job_returns_404() {
    let server = test_server(test_state());

    let response = server.get("/job/definitely-not-a-job").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_conditional_circuit_round_trip() {
    let server = test_server(test_state());

    let qasm = "OPENQASM 2.0;\nqreg q[2];\ncreg c[2];\nx q[0];\nmeasure q[0] -> c[0];\nif (c == 1) x q[1];\nmeasure q[1] -> c[1];";
    let response = server
        .post("/start_job/HAL-9000")
        .json(&json!({ "qasm": qasm, "num_shots": 8 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let job_id = body["job_id"].as_str().unwrap().to_string();

    let terminal = wait_terminal(&server, &job_id).await;
    assert_eq!(terminal["status"], "done");
    for shot in terminal["results"].as_array().unwrap() {
        assert_eq!(shot.as_str().unwrap(), "11");
    }
}
