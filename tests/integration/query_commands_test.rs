//! Query command integration tests.
//!
//! Drives each command through parsing, the executor, and rendering against
//! the in-memory vtctld client.

use clap::Parser;
use pretty_assertions::assert_eq;
use vtquery::cli::{Cli, UsageGuard};
use vtquery::error::VtqueryError;
use vtquery::query::{QueryDefaults, QueryExecutor, DEFAULT_MAX_ROWS};
use vtquery::sqltypes::QueryResult;
use vtquery::vtctld::{
    MockVtctldClient, RecordedCall, Target, TransactionMetadata, TransactionState,
};

/// Parses `args` and runs the command against `client`.
///
/// Returns the command result and everything written to the output.
async fn run(
    client: &MockVtctldClient,
    defaults: QueryDefaults,
    args: &[&str],
) -> (Result<(), VtqueryError>, String) {
    let mut argv = vec!["vtquery"];
    argv.extend_from_slice(args);
    let cli = Cli::parse_from(argv);
    let guard = UsageGuard::new();
    let executor = QueryExecutor::new(client, &guard, defaults);

    let mut out = Vec::new();
    let result = executor.run(&cli.query_command(), &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_fetch_as_app_select_one_table() {
    let client = MockVtctldClient::new();
    let (result, out) = run(
        &client,
        QueryDefaults::default(),
        &["ExecuteFetchAsApp", "zone1-0000000100", "select 1"],
    )
    .await;

    result.unwrap();
    assert_eq!(out, "+---+\n| 1 |\n+---+\n| 1 |\n+---+\n");
}

#[tokio::test]
async fn test_fetch_as_app_json() {
    let client = MockVtctldClient::new();
    let (result, out) = run(
        &client,
        QueryDefaults::default(),
        &["ExecuteFetchAsApp", "--json", "zone1-0000000100", "select 1"],
    )
    .await;

    result.unwrap();
    assert!(out.ends_with('\n'));
    let parsed: QueryResult = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.fields[0].name, "1");
    assert_eq!(parsed.rows.len(), 1);
}

#[tokio::test]
async fn test_malformed_alias_makes_no_call() {
    let client = MockVtctldClient::new();
    let (result, out) = run(
        &client,
        QueryDefaults::default(),
        &["ExecuteFetchAsDBA", "not-an-alias", "select 1"],
    )
    .await;

    assert!(matches!(result, Err(VtqueryError::MalformedAlias(_))));
    assert_eq!(client.call_count(), 0);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_max_rows_defaults_and_overrides() {
    let client = MockVtctldClient::new();
    run(
        &client,
        QueryDefaults::default(),
        &["ExecuteFetchAsApp", "zone1-1", "select 1"],
    )
    .await
    .0
    .unwrap();
    run(
        &client,
        QueryDefaults::default(),
        &["ExecuteFetchAsApp", "--max-rows", "0", "zone1-1", "select 1"],
    )
    .await
    .0
    .unwrap();
    run(
        &client,
        QueryDefaults { max_rows: 42 },
        &["ExecuteFetchAsDBA", "zone1-1", "select 1"],
    )
    .await
    .0
    .unwrap();

    let max_rows: Vec<i64> = client
        .calls()
        .into_iter()
        .map(|call| match call {
            RecordedCall::FetchAsApp(req) => req.max_rows,
            RecordedCall::FetchAsDba(req) => req.max_rows,
            other => panic!("Unexpected call {:?}", other),
        })
        .collect();
    assert_eq!(max_rows, vec![DEFAULT_MAX_ROWS, 0, 42]);
}

#[tokio::test]
async fn test_tier_fields_are_isolated() {
    let client = MockVtctldClient::new();
    run(
        &client,
        QueryDefaults::default(),
        &["ExecuteFetchAsApp", "--use-pool", "zone1-1", "select 1"],
    )
    .await
    .0
    .unwrap();
    run(
        &client,
        QueryDefaults::default(),
        &[
            "ExecuteMultiFetchAsDBA",
            "--disable-binlogs",
            "--reload-schema",
            "zone1-1",
            "select 1",
        ],
    )
    .await
    .0
    .unwrap();

    for call in client.calls() {
        let wire = match call {
            RecordedCall::FetchAsApp(req) => serde_json::to_value(req).unwrap(),
            RecordedCall::MultiFetchAsDba(req) => serde_json::to_value(req).unwrap(),
            other => panic!("Unexpected call {:?}", other),
        };
        let has_pool = wire.get("use_pool").is_some();
        let has_dba = wire.get("disable_binlogs").is_some() || wire.get("reload_schema").is_some();
        assert!(has_pool != has_dba, "mixed tier fields in {wire}");
    }
}

#[tokio::test]
async fn test_multi_fetch_tables_in_statement_order() {
    let client = MockVtctldClient::new();
    let (result, out) = run(
        &client,
        QueryDefaults::default(),
        &["ExecuteMultiFetchAsDBA", "zone1-100", "select 1; select 22; select 3"],
    )
    .await;

    result.unwrap();
    let expected = "\
+---+
| 1 |
+---+
| 1 |
+---+
+----+
| 22 |
+----+
| 22 |
+----+
+---+
| 3 |
+---+
| 3 |
+---+
";
    assert_eq!(out, expected);
}

#[tokio::test]
async fn test_multi_fetch_dml_keeps_one_block_per_statement() {
    let client = MockVtctldClient::new();
    let (result, out) = run(
        &client,
        QueryDefaults::default(),
        &["ExecuteMultiFetchAsDBA", "zone1-100", "update t set x = 1; select 1"],
    )
    .await;

    result.unwrap();
    assert_eq!(out, "+\n+\n+---+\n| 1 |\n+---+\n| 1 |\n+---+\n");
}

#[tokio::test]
async fn test_multi_fetch_only_dml_still_prints() {
    let client = MockVtctldClient::new();
    let (result, out) = run(
        &client,
        QueryDefaults::default(),
        &[
            "ExecuteMultiFetchAsDBA",
            "zone1-100",
            "insert into t values (1); delete from t",
        ],
    )
    .await;

    result.unwrap();
    assert_eq!(out, "+\n+\n+\n+\n");
}

#[tokio::test]
async fn test_multi_fetch_json_array_in_statement_order() {
    let client = MockVtctldClient::new();
    let (result, out) = run(
        &client,
        QueryDefaults::default(),
        &["ExecuteMultiFetchAsDba", "-j", "zone1-100", "select 3; select 1"],
    )
    .await;

    result.unwrap();
    let parsed: Vec<QueryResult> = serde_json::from_str(&out).unwrap();
    let names: Vec<&str> = parsed.iter().map(|r| r.fields[0].name.as_str()).collect();
    assert_eq!(names, vec!["3", "1"]);
}

#[tokio::test]
async fn test_multi_fetch_second_statement_fails() {
    let client = MockVtctldClient::new().with_failing_statement(
        1,
        "rpc error: code = Unknown desc = Unknown table 'missing'",
    );

    for json_flag in [false, true] {
        let mut args = vec!["ExecuteMultiFetchAsDBA"];
        if json_flag {
            args.push("--json");
        }
        args.extend(["zone1-100", "select 1; select * from missing"]);

        let (result, out) = run(&client, QueryDefaults::default(), &args).await;
        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "rpc error: code = Unknown desc = Unknown table 'missing'"
        );
        assert!(out.is_empty());
    }
}

#[tokio::test]
async fn test_unresolved_transactions_always_json() {
    let client = MockVtctldClient::new().with_transactions(vec![TransactionMetadata {
        dtid: "ks1:-80:1".into(),
        state: TransactionState::Prepare,
        time_created: 1_700_000_000,
        participants: vec![Target::new("ks1", "80-")],
    }]);
    let (result, out) = run(
        &client,
        QueryDefaults::default(),
        &["GetUnresolvedTransactions", "ks1"],
    )
    .await;

    result.unwrap();
    let expected = r#"[
  {
    "dtid": "ks1:-80:1",
    "state": "PREPARE",
    "time_created": 1700000000,
    "participants": [
      {
        "keyspace": "ks1",
        "shard": "80-"
      }
    ]
  }
]
"#;
    assert_eq!(out, expected);
    assert_eq!(
        client.calls(),
        vec![RecordedCall::UnresolvedTransactions(
            vtquery::vtctld::GetUnresolvedTransactionsRequest {
                keyspace: "ks1".into()
            }
        )]
    );
}

#[tokio::test]
async fn test_empty_keyspace_passes_through() {
    let client = MockVtctldClient::new();
    let (result, out) = run(
        &client,
        QueryDefaults::default(),
        &["GetUnresolvedTransactions", ""],
    )
    .await;

    result.unwrap();
    assert_eq!(out, "[]\n");
    match &client.calls()[..] {
        [RecordedCall::UnresolvedTransactions(req)] => assert_eq!(req.keyspace, ""),
        other => panic!("Expected one transactions call, got {:?}", other),
    }
}
