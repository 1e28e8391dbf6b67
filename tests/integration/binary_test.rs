//! End-to-end tests of the vtquery binary.
//!
//! These only cover paths that fail before or at the network boundary, so
//! no vtctld is needed.

use super::common::run_vtquery;

#[test]
fn test_malformed_alias_exits_nonzero_without_output() {
    let (code, stdout, stderr) = run_vtquery(&[
        "--config",
        "/nonexistent/vtquery.toml",
        "ExecuteFetchAsApp",
        "not-an-alias",
        "select 1",
    ]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Malformed tablet alias"));
    assert!(stderr.contains("--help"));
}

#[test]
fn test_unreachable_server_reports_rpc_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let server = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let (code, stdout, stderr) = run_vtquery(&[
        "--config",
        "/nonexistent/vtquery.toml",
        "--server",
        server.as_str(),
        "GetUnresolvedTransactions",
        "ks1",
    ]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("rpc error"));
    assert!(!stderr.contains("--help"));
}

#[test]
fn test_missing_positional_is_usage_error() {
    let (code, stdout, _stderr) = run_vtquery(&["ExecuteFetchAsDBA", "zone1-100"]);

    assert_eq!(code, 2);
    assert!(stdout.is_empty());
}
