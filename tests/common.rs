#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rusqlite::{Connection, params};
use sqlinteraction::db::procedures::{define_procedure, provision_catalog};
use sqlinteraction::db::{Catalog, ConnectionSettings, SqlBase};
use sqlinteraction::ui::ErrorReporter;
use std::cell::RefCell;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Binary under test, with HOME pointed at `home` so no real config is read.
pub fn sqli(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("sqlinteraction");
    cmd.env("HOME", home).env("APPDATA", home).env_remove("RUST_LOG");
    cmd
}

/// Create a fresh, empty directory for one test inside the system temp dir
pub fn setup_test_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push("sqlinteraction_tests");
    path.push(name);
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test dir");
    path
}

pub fn settings(dir: &Path) -> ConnectionSettings {
    ConnectionSettings::new(dir.join("data"))
}

/// Collects everything the helper reports.
#[derive(Clone, Default)]
pub struct CaptureReporter(pub Rc<RefCell<Vec<String>>>);

impl CaptureReporter {
    pub fn messages(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl ErrorReporter for CaptureReporter {
    fn report(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

pub fn helper(settings: &ConnectionSettings, catalog: Catalog) -> (SqlBase, CaptureReporter) {
    let reporter = CaptureReporter::default();
    let base = SqlBase::new(catalog, settings.clone()).with_reporter(reporter.clone());
    (base, reporter)
}

/// Provision TEST1 with a `users` table, three users and the procedures
/// the tests call.
pub fn seed_users(settings: &ConnectionSettings) -> PathBuf {
    let path = provision_catalog(settings, Catalog::Test1).expect("provision TEST1");
    let conn = Connection::open(&path).expect("open TEST1");

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id    INTEGER PRIMARY KEY,
            name  TEXT NOT NULL,
            email TEXT
        );
        "#,
    )
    .expect("create users");

    for (id, name, email) in [
        (1, "alice", Some("alice@example.com")),
        (2, "bob", None),
        (3, "carol", Some("carol@example.com")),
    ] {
        conn.execute(
            "INSERT INTO users (id, name, email) VALUES (?1, ?2, ?3)",
            params![id, name, email],
        )
        .expect("insert user");
    }

    let procedures = [
        ("GetUserCount", "SELECT COUNT(*) FROM users"),
        ("GetUserName", "SELECT name FROM users WHERE id = @UserId"),
        ("GetUserEmail", "SELECT email FROM users WHERE id = @UserId"),
        ("GetNothing", "SELECT name FROM users WHERE id = -1"),
        (
            "AddUser",
            "INSERT INTO users (name, email) VALUES (@Name, @Email)",
        ),
        ("DuplicateUser", "INSERT INTO users (id, name) VALUES (1, 'dup')"),
        ("Overflow", "SELECT abs(-9223372036854775808)"),
        ("ListUsers", "SELECT id, name, email FROM users ORDER BY id"),
        (
            "FindUsers",
            "SELECT id, name FROM users WHERE name LIKE @Pattern ORDER BY id",
        ),
    ];
    for (name, body) in procedures {
        define_procedure(&conn, name, body, false).expect("define procedure");
    }

    path
}

/// Replace a catalog file with bytes SQLite will not accept.
pub fn corrupt_catalog(settings: &ConnectionSettings, name: &str) {
    fs::create_dir_all(&settings.data_source).expect("create data dir");
    let path = settings.data_source.join(format!("{name}.sqlite"));
    fs::write(&path, "this is definitely not an sqlite database file ".repeat(20))
        .expect("write garbage");
}
