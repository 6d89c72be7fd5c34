#[cfg(test)]
mod tests {
    use crate::{
        source_url,
        utils::{
            SCENARIO_SEED, dest_ids, dest_null_amount_ids, dest_rows, reset_tables, seed_dest,
            seed_source, transfer,
        },
    };
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use connectors::{
        adapter::Adapter,
        sql::base::source::{SqlTransferSource, TransferSource},
    };
    use engine_core::{
        config::TransferConfig,
        error::TransferError,
        report::{TransferOutcome, TransferReport},
    };
    use model::transfer::{watermark::TransferMode, window::TimeWindow};
    use std::str::FromStr;
    use tracing_test::traced_test;

    fn completed(outcome: TransferOutcome) -> TransferReport {
        match outcome {
            TransferOutcome::Completed(report) => report,
            other => panic!("expected a completed run, got {other:?}"),
        }
    }

    // Scenario: empty destination, three source rows over two windows.
    // Expected: fresh mode from 09:00, all three rows denormalized, stop after [11:00,12:00).
    #[traced_test]
    #[tokio::test]
    #[ignore = "needs a live MySQL (SYNC_TEST_SOURCE_URL / SYNC_TEST_DEST_URL)"]
    async fn tc01_fresh_scenario() {
        reset_tables().await;
        seed_source(SCENARIO_SEED).await;

        let report = completed(transfer(&TransferConfig::default()).await.unwrap());

        assert_eq!(report.mode, TransferMode::Fresh);
        assert_eq!(report.windows_loaded, 2);
        assert_eq!(report.rows_loaded, 3);
        assert_eq!(
            dest_rows().await,
            vec![(1, "A".to_string()), (2, "A".to_string()), (3, "B".to_string())]
        );
        assert!(logs_contain("No entry found in destination table. Begins a new transfer"));
    }

    // Scenario: the same transfer runs twice with no new source data.
    // Expected: the second run resumes, loads nothing and leaves the destination unchanged.
    #[traced_test]
    #[tokio::test]
    #[ignore = "needs a live MySQL (SYNC_TEST_SOURCE_URL / SYNC_TEST_DEST_URL)"]
    async fn tc02_rerun_is_idempotent() {
        reset_tables().await;
        seed_source(SCENARIO_SEED).await;
        let config = TransferConfig::default();

        transfer(&config).await.unwrap();
        let before = dest_rows().await;
        let report = completed(transfer(&config).await.unwrap());

        assert_eq!(report.mode, TransferMode::Resume);
        assert_eq!(report.rows_loaded, 0);
        assert_eq!(dest_rows().await, before);
        assert!(logs_contain("Last entry found in destination table on 2024-03-01 10:15:00. Resume transfer"));
    }

    // Scenario: new rows arrive after a completed run, one of them on the watermark.
    // Expected: rows after the watermark are loaded, the one on it is not.
    #[tokio::test]
    #[ignore = "needs a live MySQL (SYNC_TEST_SOURCE_URL / SYNC_TEST_DEST_URL)"]
    async fn tc03_resume_loads_new_rows() {
        reset_tables().await;
        seed_source(SCENARIO_SEED).await;
        let config = TransferConfig::default();
        transfer(&config).await.unwrap();

        seed_source(&[r#"INSERT INTO transactions (id, dt, idoper, `move`, amount) VALUES
            (4, '2024-03-01 10:15:00', 1, 1, 1.00),
            (5, '2024-03-01 11:15:00', 2, 1, 2.00),
            (6, '2024-03-01 11:40:00', 1, -1, 3.00)"#])
        .await;

        let report = completed(transfer(&config).await.unwrap());
        assert_eq!(report.rows_loaded, 2);
        assert_eq!(dest_ids().await, vec![1, 2, 3, 5, 6]);
    }

    // Scenario: a source row references an operation type that does not exist.
    // Expected: the row never reaches the destination.
    #[tokio::test]
    #[ignore = "needs a live MySQL (SYNC_TEST_SOURCE_URL / SYNC_TEST_DEST_URL)"]
    async fn tc04_unmatched_operation_is_excluded() {
        reset_tables().await;
        seed_source(SCENARIO_SEED).await;
        seed_source(&[r#"INSERT INTO transactions (id, dt, idoper, `move`, amount)
            VALUES (9, '2024-03-01 09:45:00', 99, 1, 5.00)"#])
        .await;

        transfer(&TransferConfig::default()).await.unwrap();
        assert_eq!(dest_ids().await, vec![1, 2, 3]);
    }

    // Scenario: both tables are empty.
    // Expected: nothing to transfer, no rows written.
    #[traced_test]
    #[tokio::test]
    #[ignore = "needs a live MySQL (SYNC_TEST_SOURCE_URL / SYNC_TEST_DEST_URL)"]
    async fn tc05_empty_source() {
        reset_tables().await;

        let outcome = transfer(&TransferConfig::default()).await.unwrap();
        assert_eq!(outcome, TransferOutcome::NothingToTransfer);
        assert!(dest_ids().await.is_empty());
        assert!(logs_contain("Nothing to transfer. The source table is empty"));
    }

    // Scenario: one INSERT per row, and the second row of a window clashes with
    // an existing primary key.
    // Expected: the run fails and the first row of that window is rolled back too.
    #[tokio::test]
    #[ignore = "needs a live MySQL (SYNC_TEST_SOURCE_URL / SYNC_TEST_DEST_URL)"]
    async fn tc06_failed_batch_is_rolled_back() {
        reset_tables().await;
        seed_source(&[
            "INSERT INTO operation_types (id, name) VALUES (1, 'A')",
            r#"INSERT INTO transactions (id, dt, idoper, `move`, amount) VALUES
                (1, '2024-03-01 09:00:00', 1, 1, 1.00),
                (2, '2024-03-01 09:30:00', 1, 1, 2.00),
                (3, '2024-03-01 09:45:00', 1, 1, 3.00)"#,
        ])
        .await;
        seed_dest(&[r#"INSERT INTO transactions_denormalized
            (id, dt, idoper, `move`, amount, name_oper)
            VALUES (3, '2024-03-01 08:00:00', 1, 1, 3.00, 'A')"#])
        .await;

        let config = TransferConfig {
            insert_chunk_rows: 1,
            ..TransferConfig::default()
        };
        let err = transfer(&config).await.unwrap_err();

        assert!(matches!(err, TransferError::StoreWrite(_)));
        // (08:00,09:00] landed; (09:00,10:00] failed on id 3 and took id 2 with it.
        assert_eq!(dest_ids().await, vec![1, 3]);
    }

    // Scenario: read a window straight through the SQL source.
    // Expected: DECIMAL and DATETIME columns decode exactly.
    #[tokio::test]
    #[ignore = "needs a live MySQL (SYNC_TEST_SOURCE_URL / SYNC_TEST_DEST_URL)"]
    async fn tc07_source_decodes_window_rows() {
        reset_tables().await;
        seed_source(SCENARIO_SEED).await;

        let adapter = Adapter::from_url(&source_url()).await.unwrap();
        let source = SqlTransferSource::new(adapter.clone().into_shared(), Default::default());
        let start = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let window = TimeWindow::starting_at(start, chrono::TimeDelta::hours(1)).unwrap();

        let rows = source.fetch_window(&window, TransferMode::Fresh).await.unwrap();
        adapter.close().await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].timestamp, start);
        assert_eq!(rows[0].amount, Some(BigDecimal::from_str("10.50").unwrap()));
        assert_eq!(rows[1].movement, Some(-1));
        assert_eq!(rows[1].operation_name.as_deref(), Some("A"));
    }

    // Scenario: a source row carries NULL `move` and `amount`.
    // Expected: the row lands with the same NULL cells and the run completes.
    #[tokio::test]
    #[ignore = "needs a live MySQL (SYNC_TEST_SOURCE_URL / SYNC_TEST_DEST_URL)"]
    async fn tc08_null_cells_are_copied() {
        reset_tables().await;
        seed_source(SCENARIO_SEED).await;
        seed_source(&[
            "INSERT INTO transactions (id, dt, idoper, `move`, amount) VALUES (4, '2024-03-01 09:45:00', 2, NULL, NULL)",
        ])
        .await;

        let report = completed(transfer(&TransferConfig::default()).await.unwrap());

        assert_eq!(report.rows_loaded, 4);
        assert_eq!(dest_ids().await, vec![1, 2, 3, 4]);
        assert_eq!(dest_null_amount_ids().await, vec![4]);
    }
}
