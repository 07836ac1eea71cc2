//! Inspector operations against an in-memory database laid out like a Room
//! database.

use room_inspector_core::Quoting;
use room_inspector_sqlite::{Cell, InspectError, Inspector, InspectorOptions, QueryOutcome};

const SCHEMA: &[&str] = &[
    "CREATE TABLE android_metadata (locale TEXT)",
    "CREATE TABLE room_master_table (id INTEGER PRIMARY KEY, identity_hash TEXT)",
    "CREATE TABLE notes (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT NOT NULL, score REAL, body TEXT DEFAULT 'empty', data BLOB)",
    "CREATE TABLE tags (name TEXT, color TEXT)",
    "INSERT INTO android_metadata VALUES ('en_US')",
    "INSERT INTO notes (title, score, body, data) VALUES ('first', 2.5, NULL, x'CAFE')",
    "INSERT INTO notes (title, score, body) VALUES ('second', 1.0, 'text')",
];

async fn create_test_inspector(quoting: Quoting) -> Inspector {
    let options = InspectorOptions::new().max_connections(1).quoting(quoting);
    let inspector = Inspector::connect("sqlite::memory:", &options)
        .await
        .expect("Failed to create in-memory SQLite pool");
    for sql in SCHEMA {
        sqlx::query(sql).execute(inspector.pool()).await.unwrap();
    }
    inspector
}

async fn inspector() -> Inspector {
    create_test_inspector(Quoting::Escaped).await
}

fn text(cells: &[&str]) -> Vec<Cell> {
    cells.iter().map(|c| Cell::from(*c)).collect()
}

// ===================================================================
// Browsing
// ===================================================================

#[tokio::test]
async fn lists_only_user_tables() {
    let inspector = inspector().await;
    let mut tables = inspector.tables().await.unwrap();
    tables.sort();
    assert_eq!(tables, vec!["notes".to_string(), "tags".to_string()]);
}

#[tokio::test]
async fn reads_column_metadata() {
    let inspector = inspector().await;
    let columns = inspector.columns("notes").await.unwrap();

    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "title", "score", "body", "data"]);

    assert!(columns[0].is_primary_key());
    assert_eq!(columns[0].declared_type, "INTEGER");
    assert!(columns[1].not_null);
    assert_eq!(columns[3].default_value.as_deref(), Some("'empty'"));
    assert!(!columns[4].is_primary_key());
}

#[tokio::test]
async fn unknown_table_is_reported() {
    let inspector = inspector().await;
    let err = inspector.columns("missing").await.unwrap_err();
    assert!(matches!(err, InspectError::UnknownTable(ref t) if t == "missing"));

    let err = inspector.rows("missing").await.unwrap_err();
    assert!(matches!(err, InspectError::UnknownTable(_)));
}

#[tokio::test]
async fn renders_cells_by_storage_class() {
    let inspector = inspector().await;
    let set = inspector.rows("notes").await.unwrap();

    assert_eq!(set.columns, vec!["id", "title", "score", "body", "data"]);
    assert_eq!(set.len(), 2);
    assert_eq!(
        set.rows[0],
        vec![
            Cell::from("1"),
            Cell::from("first"),
            Cell::from("2.5"),
            Cell::Null,
            Cell::Blob(vec![0xCA, 0xFE]),
        ]
    );
    assert_eq!(
        set.rows[1],
        vec![
            Cell::from("2"),
            Cell::from("second"),
            Cell::from("1"),
            Cell::from("text"),
            Cell::Null,
        ]
    );
}

#[tokio::test]
async fn empty_table_keeps_column_names() {
    let inspector = inspector().await;
    let set = inspector.rows("tags").await.unwrap();
    assert!(set.is_empty());
    assert_eq!(set.columns, vec!["name", "color"]);
}

#[tokio::test]
async fn row_by_index() {
    let inspector = inspector().await;
    let row = inspector.row("notes", 1).await.unwrap();
    assert_eq!(row[1], Cell::from("second"));

    let err = inspector.row("notes", 2).await.unwrap_err();
    assert!(matches!(err, InspectError::RowOutOfRange { index: 2, len: 2 }));
}

// ===================================================================
// Editing
// ===================================================================

#[tokio::test]
async fn insert_then_list() {
    let inspector = inspector().await;
    let affected = inspector.insert_row("tags", &["work", "red"]).await.unwrap();
    assert_eq!(affected, 1);

    let set = inspector.rows("tags").await.unwrap();
    assert_eq!(set.rows, vec![text(&["work", "red"])]);
}

#[tokio::test]
async fn update_targets_row_by_values() {
    let inspector = inspector().await;
    let columns = ["name", "color"];
    inspector.insert_row("tags", &["work", "red"]).await.unwrap();
    inspector.insert_row("tags", &["home", "blue"]).await.unwrap();

    let affected = inspector
        .update_row("tags", &columns, &["work", "red"], &["work", "green"])
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let set = inspector.rows("tags").await.unwrap();
    assert_eq!(set.rows[0], text(&["work", "green"]));
    assert_eq!(set.rows[1], text(&["home", "blue"]));
}

#[tokio::test]
async fn update_hits_every_duplicate() {
    let inspector = inspector().await;
    for _ in 0..2 {
        inspector.insert_row("tags", &["dup", "red"]).await.unwrap();
    }

    let affected = inspector
        .update_row("tags", &["name", "color"], &["dup", "red"], &["dup", "blue"])
        .await
        .unwrap();
    assert_eq!(affected, 2);
}

#[tokio::test]
async fn delete_targets_row_by_values() {
    let inspector = inspector().await;
    let set = inspector.rows("notes").await.unwrap();
    let second: Vec<String> = set.row(1).unwrap()[..4]
        .iter()
        .map(ToString::to_string)
        .collect();

    let affected = inspector
        .delete_row("notes", &set.columns[..4], &second)
        .await
        .unwrap();
    assert_eq!(affected, 1);
    assert_eq!(inspector.rows("notes").await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_hits_every_duplicate() {
    let inspector = inspector().await;
    for _ in 0..3 {
        inspector.insert_row("tags", &["dup", "red"]).await.unwrap();
    }
    let affected = inspector
        .delete_row("tags", &["name", "color"], &["dup", "red"])
        .await
        .unwrap();
    assert_eq!(affected, 3);
}

#[tokio::test]
async fn mismatched_and_empty_rows_are_rejected() {
    let inspector = inspector().await;

    let err = inspector
        .delete_row("tags", &["name", "color"], &["dup"])
        .await
        .unwrap_err();
    assert!(matches!(err, InspectError::ArityMismatch(_)));

    let none: [&str; 0] = [];
    let err = inspector.delete_row("tags", &none, &none).await.unwrap_err();
    assert!(matches!(err, InspectError::EmptyRow));

    let err = inspector
        .update_row("tags", &none, &none, &none)
        .await
        .unwrap_err();
    assert!(matches!(err, InspectError::EmptyRow));
}

#[tokio::test]
async fn clear_keeps_schema_and_drop_removes_it() {
    let inspector = inspector().await;

    let cleared = inspector.clear_table("notes").await.unwrap();
    assert_eq!(cleared, 2);
    let set = inspector.rows("notes").await.unwrap();
    assert!(set.is_empty());
    assert_eq!(set.columns.len(), 5);

    inspector.drop_table("notes").await.unwrap();
    assert_eq!(inspector.tables().await.unwrap(), vec!["tags".to_string()]);
    assert!(matches!(
        inspector.columns("notes").await,
        Err(InspectError::UnknownTable(_))
    ));
}

#[tokio::test]
async fn edits_by_position_skip_null_and_blob_cells() {
    let inspector = inspector().await;

    // Row 0 holds a NULL body and a BLOB.
    let affected = inspector
        .update_at("notes", 0, &[("title", "changed")])
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let set = inspector.rows("notes").await.unwrap();
    assert_eq!(set.rows[0][1], Cell::from("changed"));
    assert_eq!(set.rows[0][3], Cell::Null);
    assert_eq!(set.rows[0][4], Cell::Blob(vec![0xCA, 0xFE]));

    assert_eq!(inspector.delete_at("notes", 0).await.unwrap(), 1);
    let set = inspector.rows("notes").await.unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.rows[0][1], Cell::from("second"));
}

#[tokio::test]
async fn null_and_text_null_are_distinct() {
    let inspector = inspector().await;
    inspector.insert_row("tags", &["NULL", "red"]).await.unwrap();
    sqlx::query("INSERT INTO tags VALUES (NULL, 'red')")
        .execute(inspector.pool())
        .await
        .unwrap();

    let set = inspector.rows("tags").await.unwrap();
    assert_eq!(set.rows[0][0], Cell::from("NULL"));
    assert_eq!(set.rows[1][0], Cell::Null);

    // Matching row 0 on the text 'NULL' leaves the real NULL alone.
    assert_eq!(inspector.delete_at("tags", 0).await.unwrap(), 1);
    let set = inspector.rows("tags").await.unwrap();
    assert_eq!(set.rows, vec![vec![Cell::Null, Cell::from("red")]]);
}

#[tokio::test]
async fn edits_by_position_report_failures() {
    let inspector = inspector().await;

    let err = inspector
        .update_at("notes", 0, &[("missing", "x")])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InspectError::UnknownColumn { ref column, .. } if column == "missing"
    ));

    let err = inspector.delete_at("notes", 5).await.unwrap_err();
    assert!(matches!(err, InspectError::RowOutOfRange { index: 5, len: 2 }));

    sqlx::query("INSERT INTO tags VALUES (NULL, NULL)")
        .execute(inspector.pool())
        .await
        .unwrap();
    let err = inspector.delete_at("tags", 0).await.unwrap_err();
    assert!(matches!(err, InspectError::EmptyRow));
}

#[tokio::test]
async fn unmatched_edit_is_an_error() {
    let inspector = inspector().await;
    // An untyped column keeps the integer; the text literal '5' never equals it.
    sqlx::query("CREATE TABLE loose (amount)")
        .execute(inspector.pool())
        .await
        .unwrap();
    sqlx::query("INSERT INTO loose VALUES (5)")
        .execute(inspector.pool())
        .await
        .unwrap();

    let err = inspector.delete_at("loose", 0).await.unwrap_err();
    assert!(matches!(
        err,
        InspectError::NoRowAffected { ref table, index: 0 } if table == "loose"
    ));
    assert_eq!(inspector.rows("loose").await.unwrap().len(), 1);
}

#[tokio::test]
async fn query_with_leading_comment_or_returning() {
    let inspector = inspector().await;

    let outcome = inspector
        .run_query("-- newest first\nSELECT title FROM notes ORDER BY id DESC")
        .await
        .unwrap();
    assert!(matches!(outcome, QueryOutcome::Rows(ref set) if set.len() == 2));

    let outcome = inspector
        .run_query("INSERT INTO tags VALUES ('work', 'red') RETURNING name")
        .await
        .unwrap();
    match outcome {
        QueryOutcome::Rows(set) => assert_eq!(set.rows, vec![text(&["work"])]),
        other => panic!("Expected rows, got {other:?}"),
    }
}

// ===================================================================
// Quoting
// ===================================================================

#[tokio::test]
async fn escaped_quotes_round_trip() {
    let inspector = inspector().await;
    inspector.insert_row("tags", &["O'Brien", "red"]).await.unwrap();

    let set = inspector.rows("tags").await.unwrap();
    assert_eq!(set.rows[0][0], Cell::from("O'Brien"));

    let affected = inspector
        .delete_row("tags", &set.columns, &["O'Brien", "red"])
        .await
        .unwrap();
    assert_eq!(affected, 1);
}

#[tokio::test]
async fn verbatim_quotes_fail_in_the_driver() {
    let inspector = create_test_inspector(Quoting::Verbatim).await;
    let err = inspector
        .insert_row("tags", &["O'Brien", "red"])
        .await
        .unwrap_err();
    assert!(matches!(err, InspectError::Database(_)));
}

// ===================================================================
// Free-form queries
// ===================================================================

#[tokio::test]
async fn query_returning_rows() {
    let inspector = inspector().await;
    let outcome = inspector
        .run_query("SELECT title FROM notes ORDER BY id")
        .await
        .unwrap();
    match outcome {
        QueryOutcome::Rows(set) => {
            assert_eq!(set.columns, vec!["title"]);
            assert_eq!(set.rows, vec![text(&["first"]), text(&["second"])]);
        }
        other => panic!("Expected rows, got {other:?}"),
    }
}

#[tokio::test]
async fn query_changing_rows() {
    let inspector = inspector().await;
    let outcome = inspector
        .run_query("UPDATE notes SET score = 0")
        .await
        .unwrap();
    assert_eq!(outcome, QueryOutcome::Affected { rows: 2 });
}

#[tokio::test]
async fn query_errors_pass_through() {
    let inspector = inspector().await;
    let err = inspector.run_query("SELECT * FROM nowhere").await.unwrap_err();
    assert!(matches!(err, InspectError::Database(_)));
}

// ===================================================================
// On-disk databases
// ===================================================================

#[tokio::test]
async fn missing_file_is_not_created_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("absent.db").display());

    let result = Inspector::connect(&url, &InspectorOptions::default()).await;
    assert!(matches!(result, Err(InspectError::Database(_))));
}

#[tokio::test]
async fn file_database_persists_edits() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("app.db").display());
    let options = InspectorOptions::new().create_if_missing(true);

    let inspector = Inspector::connect(&url, &options).await.unwrap();
    sqlx::query("CREATE TABLE users (id INTEGER, name TEXT)")
        .execute(inspector.pool())
        .await
        .unwrap();
    inspector.insert_row("users", &["1", "Alice"]).await.unwrap();
    inspector.pool().close().await;

    let reopened = Inspector::connect(&url, &InspectorOptions::default())
        .await
        .unwrap();
    let set = reopened.rows("users").await.unwrap();
    assert_eq!(set.rows, vec![text(&["1", "Alice"])]);
}
