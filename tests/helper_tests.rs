use sqlinteraction::db::{Catalog, CatalogMap, ConnectionState, Params, Value};
use sqlinteraction::errors::AppError;

mod common;
use common::{corrupt_catalog, helper, seed_users, settings, setup_test_dir};

fn params(pairs: &[(&str, Value)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn scalar_returns_same_count_on_repeated_calls() {
    let dir = setup_test_dir("scalar_repeat");
    let settings = settings(&dir);
    seed_users(&settings);

    let (mut base, reporter) = helper(&settings, Catalog::Test1);

    let first = base.execute_scalar("GetUserCount", None).unwrap();
    assert_eq!(base.state(), ConnectionState::Closed);
    let second = base.execute_scalar("GetUserCount", None).unwrap();
    assert_eq!(base.state(), ConnectionState::Closed);

    assert_eq!(first, Some(Value::Integer(3)));
    assert_eq!(first, second);
    assert!(reporter.messages().is_empty());
    assert_eq!(base.catalog_name(), Some("TEST1"));
}

#[test]
fn scalar_binds_named_parameters() {
    let dir = setup_test_dir("scalar_params");
    let settings = settings(&dir);
    seed_users(&settings);

    let (mut base, _) = helper(&settings, Catalog::Test1);

    let exact = params(&[("@UserId", Value::Integer(2))]);
    assert_eq!(
        base.execute_scalar("GetUserName", Some(&exact)).unwrap(),
        Some(Value::Text("bob".into()))
    );

    // case and sigil do not matter
    let loose = params(&[("userid", Value::Integer(3))]);
    assert_eq!(
        base.execute_scalar("getusername", Some(&loose)).unwrap(),
        Some(Value::Text("carol".into()))
    );
}

#[test]
fn scalar_without_result_is_none_and_null_is_some_null() {
    let dir = setup_test_dir("scalar_empty");
    let settings = settings(&dir);
    seed_users(&settings);

    let (mut base, _) = helper(&settings, Catalog::Test1);

    assert_eq!(base.execute_scalar("GetNothing", None).unwrap(), None);

    let bob = params(&[("@UserId", Value::Integer(2))]);
    assert_eq!(
        base.execute_scalar("GetUserEmail", Some(&bob)).unwrap(),
        Some(Value::Null)
    );

    // declared parameter left unbound is NULL, which matches no row
    assert_eq!(base.execute_scalar("GetUserName", None).unwrap(), None);
    assert_eq!(base.state(), ConnectionState::Closed);
}

#[test]
fn non_query_writes_and_closes() {
    let dir = setup_test_dir("non_query");
    let settings = settings(&dir);
    seed_users(&settings);

    let (mut base, _) = helper(&settings, Catalog::Test1);

    let dave = params(&[
        ("@Name", Value::Text("dave".into())),
        ("@Email", Value::Null),
    ]);
    assert!(base.execute_non_query("AddUser", Some(&dave)).unwrap());
    assert_eq!(base.state(), ConnectionState::Closed);

    assert_eq!(
        base.execute_scalar("GetUserCount", None).unwrap(),
        Some(Value::Integer(4))
    );

    // rows produced by a non-query are discarded
    assert!(base.execute_non_query("ListUsers", None).unwrap());
}

#[test]
fn fill_data_table_keeps_order_and_columns() {
    let dir = setup_test_dir("fill_rows");
    let settings = settings(&dir);
    seed_users(&settings);

    let (mut base, _) = helper(&settings, Catalog::Test1);
    let table = base.fill_data_table("ListUsers", None).unwrap();

    assert_eq!(base.state(), ConnectionState::Closed);
    assert_eq!(table.columns(), ["id", "name", "email"]);
    assert_eq!(table.row_count(), 3);

    let names: Vec<&Value> = table.rows().filter_map(|r| r.get("name")).collect();
    assert_eq!(
        names,
        [
            &Value::Text("alice".into()),
            &Value::Text("bob".into()),
            &Value::Text("carol".into())
        ]
    );

    let bob = table.row(1).unwrap();
    assert_eq!(bob.get("ID"), Some(&Value::Integer(2)));
    assert_eq!(bob.get("email"), Some(&Value::Null));
    assert_eq!(bob.get("missing"), None);
}

#[test]
fn fill_data_table_with_no_rows_keeps_schema() {
    let dir = setup_test_dir("fill_empty");
    let settings = settings(&dir);
    seed_users(&settings);

    let (mut base, _) = helper(&settings, Catalog::Test1);
    let pattern = params(&[("@Pattern", Value::Text("zzz%".into()))]);
    let table = base.fill_data_table("FindUsers", Some(&pattern)).unwrap();

    assert!(table.is_empty());
    assert_eq!(table.columns(), ["id", "name"]);
    assert_eq!(base.state(), ConnectionState::Closed);
}

#[test]
fn unknown_parameter_is_an_invocation_error_for_every_operation() {
    let dir = setup_test_dir("unknown_param");
    let settings = settings(&dir);
    seed_users(&settings);

    let (mut base, _) = helper(&settings, Catalog::Test1);
    let bogus = params(&[("@Bogus", Value::Integer(1))]);

    let err = base.execute_scalar("GetUserName", Some(&bogus)).unwrap_err();
    assert!(matches!(
        &err,
        AppError::UnknownParameter { procedure, parameter }
            if procedure == "GetUserName" && parameter == "@Bogus"
    ));
    assert_eq!(base.state(), ConnectionState::Closed);

    let err = base.execute_non_query("AddUser", Some(&bogus)).unwrap_err();
    assert!(err.is_invocation_error());
    assert_eq!(base.state(), ConnectionState::Closed);

    let err = base.fill_data_table("FindUsers", Some(&bogus)).unwrap_err();
    assert!(err.is_invocation_error());
    assert_eq!(base.state(), ConnectionState::Closed);

    // nothing was written by the failed non-query
    assert_eq!(
        base.execute_scalar("GetUserCount", None).unwrap(),
        Some(Value::Integer(3))
    );
}

#[test]
fn unknown_procedure_is_an_invocation_error() {
    let dir = setup_test_dir("unknown_proc");
    let settings = settings(&dir);
    seed_users(&settings);

    let (mut base, reporter) = helper(&settings, Catalog::Test1);

    let err = base.execute_scalar("NoSuchProc", None).unwrap_err();
    assert!(matches!(err, AppError::UnknownProcedure(ref n) if n == "NoSuchProc"));
    assert_eq!(base.state(), ConnectionState::Closed);
    assert!(reporter.messages().is_empty());
}

#[test]
fn execution_error_propagates_after_close() {
    let dir = setup_test_dir("exec_error");
    let settings = settings(&dir);
    seed_users(&settings);

    let (mut base, _) = helper(&settings, Catalog::Test1);

    let err = base.execute_non_query("DuplicateUser", None).unwrap_err();
    assert!(matches!(err, AppError::Db(_)));
    assert_eq!(base.state(), ConnectionState::Closed);

    let err = base.execute_scalar("Overflow", None).unwrap_err();
    assert!(matches!(err, AppError::Db(_)));
    assert_eq!(base.state(), ConnectionState::Closed);

    let err = base.fill_data_table("Overflow", None).unwrap_err();
    assert!(matches!(err, AppError::Db(_)));
    assert_eq!(base.state(), ConnectionState::Closed);
    assert!(!err.is_invocation_error());
}

#[test]
fn missing_catalog_is_a_soft_failure() {
    let dir = setup_test_dir("missing_catalog");
    let settings = settings(&dir);
    seed_users(&settings);

    // TEST2 was never provisioned
    let (mut base, reporter) = helper(&settings, Catalog::Test2);

    assert_eq!(base.execute_scalar("GetUserCount", None).unwrap(), None);
    assert!(!base.execute_non_query("GetUserCount", None).unwrap());
    let table = base.fill_data_table("ListUsers", None).unwrap();
    assert!(table.is_empty());
    assert!(table.columns().is_empty());

    assert_eq!(base.state(), ConnectionState::Closed);
    assert_eq!(base.last_open_succeeded(), Some(false));

    let messages = reporter.messages();
    assert_eq!(messages.len(), 3);
    assert!(
        messages[0].starts_with("There was an error connecting to the TEST2 database, error:"),
        "unexpected message: {}",
        messages[0]
    );
}

#[test]
fn file_that_is_not_a_database_does_not_open() {
    let dir = setup_test_dir("not_a_db");
    let settings = settings(&dir);
    corrupt_catalog(&settings, "TEST1");

    let (mut base, reporter) = helper(&settings, Catalog::Test1);

    assert!(!base.open_db().unwrap());
    assert_eq!(base.state(), ConnectionState::Closed);

    let messages = reporter.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("There was an error connecting to the TEST1 database"));
}

#[test]
fn unmapped_catalog_fails_before_any_connection_attempt() {
    let dir = setup_test_dir("unmapped");
    let mut settings = settings(&dir);
    seed_users(&settings);

    let mut catalogs = CatalogMap::default();
    catalogs.remove(Catalog::Test1);
    settings.catalogs = catalogs;

    let (mut base, reporter) = helper(&settings, Catalog::Test1);

    assert!(matches!(base.open_db(), Err(AppError::Config(_))));
    assert!(matches!(
        base.execute_scalar("GetUserCount", None),
        Err(AppError::Config(_))
    ));
    assert!(matches!(
        base.execute_non_query("GetUserCount", None),
        Err(AppError::Config(_))
    ));
    assert!(matches!(
        base.fill_data_table("ListUsers", None),
        Err(AppError::Config(_))
    ));
    assert!(matches!(base.test_db_connection(), Err(AppError::Config(_))));

    assert_eq!(base.state(), ConnectionState::Closed);
    assert!(reporter.messages().is_empty());
}

#[test]
fn test_connection_reports_and_leaves_handle_closed() {
    let dir = setup_test_dir("test_connection");
    let settings = settings(&dir);
    seed_users(&settings);

    let (mut ok, _) = helper(&settings, Catalog::Test1);
    assert!(ok.test_db_connection().unwrap());
    assert_eq!(ok.state(), ConnectionState::Closed);
    assert!(ok.open_db().unwrap());
    ok.close_db();

    let (mut missing, reporter) = helper(&settings, Catalog::Test2);
    assert!(!missing.test_db_connection().unwrap());
    assert_eq!(missing.state(), ConnectionState::Closed);
    assert!(!missing.open_db().unwrap());
    assert_eq!(reporter.messages().len(), 2);
}

#[test]
fn open_twice_reopens_and_close_is_idempotent() {
    let dir = setup_test_dir("open_close");
    let settings = settings(&dir);
    seed_users(&settings);

    let (mut base, _) = helper(&settings, Catalog::Test1);

    assert!(base.close_db());
    assert_eq!(base.state(), ConnectionState::Closed);

    assert!(base.open_db().unwrap());
    assert!(base.open_db().unwrap());
    assert_eq!(base.state(), ConnectionState::Open);

    assert!(base.close_db());
    assert!(base.close_db());
    assert_eq!(base.state(), ConnectionState::Closed);
}

#[test]
fn dispose_is_idempotent_and_final() {
    let dir = setup_test_dir("dispose");
    let settings = settings(&dir);
    seed_users(&settings);

    let (mut base, _) = helper(&settings, Catalog::Test1);
    assert!(base.open_db().unwrap());

    base.dispose();
    assert!(base.is_released());
    assert_eq!(base.state(), ConnectionState::Closed);

    base.dispose();
    assert!(matches!(base.open_db(), Err(AppError::Released)));
    assert!(matches!(
        base.execute_scalar("GetUserCount", None),
        Err(AppError::Released)
    ));
    assert_eq!(base.state(), ConnectionState::Closed);
}

#[test]
fn with_connection_closes_when_the_closure_fails() {
    let dir = setup_test_dir("with_connection");
    let settings = settings(&dir);
    seed_users(&settings);

    let (mut base, _) = helper(&settings, Catalog::Test1);

    let result: Result<Option<()>, AppError> =
        base.with_connection(|_| Err(AppError::Export("boom".into())));
    assert!(result.is_err());
    assert_eq!(base.state(), ConnectionState::Closed);

    let tables = base
        .with_connection(|conn| {
            Ok(conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'users'",
                [],
                |row| row.get::<_, i64>(0),
            )?)
        })
        .unwrap();
    assert_eq!(tables, Some(1));
    assert_eq!(base.state(), ConnectionState::Closed);
}
