#![allow(dead_code)]

use super::{dest_pool, dest_url, source_pool, source_url};
use connectors::{
    adapter::Adapter,
    sql::base::{destination::SqlTransferDestination, source::SqlTransferSource},
};
use engine_core::{
    config::TransferConfig, error::TransferError, orchestrator::run_transfer,
    report::TransferOutcome,
};
use mysql_async::prelude::*;

pub const SOURCE_TABLES_DDL: &[&str] = &[
    "DROP TABLE IF EXISTS transactions",
    "DROP TABLE IF EXISTS operation_types",
    r#"CREATE TABLE operation_types (
        id INT PRIMARY KEY,
        name VARCHAR(64) NOT NULL
    )"#,
    r#"CREATE TABLE transactions (
        id BIGINT PRIMARY KEY,
        dt DATETIME NOT NULL,
        idoper INT,
        `move` INT,
        amount DECIMAL(12, 2)
    )"#,
];

pub const DEST_TABLE_DDL: &[&str] = &[
    "DROP TABLE IF EXISTS transactions_denormalized",
    r#"CREATE TABLE transactions_denormalized (
        id BIGINT PRIMARY KEY,
        dt DATETIME NOT NULL,
        idoper INT,
        `move` INT,
        amount DECIMAL(12, 2),
        name_oper VARCHAR(64)
    )"#,
];

/// Rows at 09:00, 09:30 and 10:15 with operation types 1, 1, 2 ("A", "A", "B").
pub const SCENARIO_SEED: &[&str] = &[
    "INSERT INTO operation_types (id, name) VALUES (1, 'A'), (2, 'B')",
    r#"INSERT INTO transactions (id, dt, idoper, `move`, amount) VALUES
        (1, '2024-03-01 09:00:00', 1, 1, 10.50),
        (2, '2024-03-01 09:30:00', 1, -1, 20.00),
        (3, '2024-03-01 10:15:00', 2, 1, 30.25)"#,
];

async fn run_all(pool: &mysql_async::Pool, statements: &[&str]) {
    let mut conn = pool.get_conn().await.expect("connect mysql");
    for sql in statements {
        conn.query_drop(*sql).await.expect("run fixture statement");
    }
}

/// Recreates all three tables, empty.
pub async fn reset_tables() {
    run_all(&source_pool().await, SOURCE_TABLES_DDL).await;
    run_all(&dest_pool().await, DEST_TABLE_DDL).await;
}

pub async fn seed_source(statements: &[&str]) {
    run_all(&source_pool().await, statements).await;
}

pub async fn seed_dest(statements: &[&str]) {
    run_all(&dest_pool().await, statements).await;
}

/// `(id, name_oper)` pairs in the destination, ordered by id.
pub async fn dest_rows() -> Vec<(i64, String)> {
    let pool = dest_pool().await;
    let mut conn = pool.get_conn().await.expect("connect mysql");
    conn.query("SELECT id, name_oper FROM transactions_denormalized ORDER BY id")
        .await
        .expect("read destination")
}

/// Ids of destination rows whose `amount` is NULL.
pub async fn dest_null_amount_ids() -> Vec<i64> {
    let pool = dest_pool().await;
    let mut conn = pool.get_conn().await.expect("connect mysql");
    conn.query("SELECT id FROM transactions_denormalized WHERE amount IS NULL ORDER BY id")
        .await
        .expect("read destination")
}

pub async fn dest_ids() -> Vec<i64> {
    dest_rows().await.into_iter().map(|(id, _)| id).collect()
}

/// One transfer between the test databases through the SQL adapters.
pub async fn transfer(config: &TransferConfig) -> Result<TransferOutcome, TransferError> {
    let source_adapter = Adapter::from_url(&source_url())
        .await
        .expect("connect source");
    let dest_adapter = Adapter::from_url(&dest_url())
        .await
        .expect("connect destination");

    let source = SqlTransferSource::new(source_adapter.clone().into_shared(), config.schema.clone());
    let destination =
        SqlTransferDestination::new(dest_adapter.clone().into_shared(), config.schema.clone())
            .with_max_rows_per_statement(config.insert_chunk_rows);

    let outcome = run_transfer(&source, &destination, config).await;
    source_adapter.close().await.expect("close source");
    dest_adapter.close().await.expect("close destination");
    outcome
}
