use std::io::Write;
use std::net::TcpListener;
use std::process::{Command, Output};

fn omb_remote_write(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_omb-remote-write"))
        .args(args)
        .env_remove("THANOS_RECEIVER_URL")
        .env_remove("THANOS_BEARER_TOKEN")
        .output()
        .unwrap()
}

fn results_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"consumeRate": [1.0, 2.0, 3.0]}"#).unwrap();
    file
}

fn closed_port_url() -> String {
    let addr = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    format!("http://{}", addr)
}

#[test]
fn test_unreachable_endpoint_exits_non_zero() {
    let file = results_file();
    let url = closed_port_url();

    let out = omb_remote_write(&["--thanos", &url, "--results", file.path().to_str().unwrap()]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("remote write request failed"), "{}", stderr);
}

#[test]
fn test_malformed_labels_exit_non_zero() {
    let file = results_file();
    let url = closed_port_url();

    let out = omb_remote_write(&[
        "--thanos",
        &url,
        "--results",
        file.path().to_str().unwrap(),
        "--labels",
        "env",
    ]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid labels 'env'"), "{}", stderr);
    // Never got as far as sending.
    assert!(!stderr.contains("sending remote write request"), "{}", stderr);
}

#[test]
fn test_missing_results_file_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let url = closed_port_url();

    let out = omb_remote_write(&["--thanos", &url, "--results", missing.to_str().unwrap()]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("couldn't open results file"), "{}", stderr);
}

#[test]
fn test_missing_receiver_url_exits_non_zero() {
    let file = results_file();

    let out = omb_remote_write(&["--results", file.path().to_str().unwrap()]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("receiver URL is not set"), "{}", stderr);
}
