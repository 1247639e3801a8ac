//! `--health-check` mode of the server binary.

mod common;

use common::harness::{TestServerConfig, find_available_port, spawn_test_server};
use tokio::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_degree-search");

async fn run_health_check(port: u16) -> Option<i32> {
    Command::new(BIN)
        .arg("--health-check")
        .env("DEGREE_SEARCH_PORT", port.to_string())
        .output()
        .await
        .expect("binary should launch")
        .status
        .code()
}

#[tokio::test]
async fn test_health_check_exits_zero_when_server_is_up() {
    let server = spawn_test_server(TestServerConfig::default()).await.unwrap();

    assert_eq!(run_health_check(server.addr.port()).await, Some(0));

    server.shutdown().await;
}

#[tokio::test]
async fn test_health_check_exits_one_when_nothing_listens() {
    let port = find_available_port().await.unwrap();

    assert_eq!(run_health_check(port).await, Some(1));
}
