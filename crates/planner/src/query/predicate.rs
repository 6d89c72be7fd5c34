//! Window predicates: how a time window turns into a WHERE clause.
//!
//! The two strategies differ only in which bound is inclusive, mirroring
//! `TimeWindow::admits` for the same mode.

use crate::query::{
    ast::{
        common::OrderDir,
        expr::{BinaryOperator, Expr},
    },
    builder::select::{FromState, SelectBuilder},
    ident_q, value,
};
use model::{
    core::value::Value,
    transfer::{watermark::TransferMode, window::TimeWindow},
};

pub trait WindowPredicate: Send + Sync {
    /// Lower and upper comparison operators for the window bounds.
    fn bounds(&self) -> (BinaryOperator, BinaryOperator);

    /// Timestamp column the predicate filters on, with its table alias.
    fn column(&self) -> (&str, &str);

    /// Applies the window filter (WHERE) and a stable ordering (ORDER BY ts, id).
    fn apply_to_builder(
        &self,
        builder: SelectBuilder<FromState>,
        window: &TimeWindow,
        tiebreaker: &str,
    ) -> SelectBuilder<FromState> {
        let (lower, upper) = self.bounds();
        let (qualifier, column) = self.column();

        // ts {>=|>} ? AND ts {<|<=} ?
        let condition = Expr::binary(
            ident_q(qualifier, column),
            lower,
            value(Value::TimestampNaive(window.start)),
        )
        .and(Expr::binary(
            ident_q(qualifier, column),
            upper,
            value(Value::TimestampNaive(window.end)),
        ));

        builder
            .and_where(condition)
            .order_by(ident_q(qualifier, column), Some(OrderDir::Asc))
            .order_by(ident_q(qualifier, tiebreaker), Some(OrderDir::Asc))
    }
}

/// `ts >= start AND ts < end`, used when the destination is empty.
pub struct FreshWindow {
    pub qualifier: String,
    pub ts_col: String,
}

/// `ts > start AND ts <= end`, used when resuming from the destination watermark.
pub struct ResumeWindow {
    pub qualifier: String,
    pub ts_col: String,
}

impl WindowPredicate for FreshWindow {
    fn bounds(&self) -> (BinaryOperator, BinaryOperator) {
        (BinaryOperator::GtEq, BinaryOperator::Lt)
    }

    fn column(&self) -> (&str, &str) {
        (&self.qualifier, &self.ts_col)
    }
}

impl WindowPredicate for ResumeWindow {
    fn bounds(&self) -> (BinaryOperator, BinaryOperator) {
        (BinaryOperator::Gt, BinaryOperator::LtEq)
    }

    fn column(&self) -> (&str, &str) {
        (&self.qualifier, &self.ts_col)
    }
}

pub fn predicate_for_mode(
    mode: TransferMode,
    qualifier: &str,
    ts_col: &str,
) -> Box<dyn WindowPredicate> {
    let qualifier = qualifier.to_string();
    let ts_col = ts_col.to_string();
    match mode {
        TransferMode::Fresh => Box::new(FreshWindow { qualifier, ts_col }),
        TransferMode::Resume => Box::new(ResumeWindow { qualifier, ts_col }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        query::{
            dialect::MySql,
            renderer::{Render, Renderer},
        },
        table_ref,
    };
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    fn window() -> TimeWindow {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        TimeWindow::starting_at(start, TimeDelta::hours(1)).unwrap()
    }

    fn render(mode: TransferMode) -> (String, Vec<Value>) {
        let predicate = predicate_for_mode(mode, "t", "dt");
        let builder = SelectBuilder::new()
            .select(vec![ident_q("t", "id")])
            .from(table_ref!("transactions"), Some("t"));
        let ast = predicate.apply_to_builder(builder, &window(), "id").build();

        let dialect = MySql;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        renderer.finish()
    }

    #[test]
    fn test_fresh_predicate_sql() {
        let (sql, params) = render(TransferMode::Fresh);
        assert_eq!(
            sql,
            concat!(
                "SELECT `t`.`id` FROM `transactions` AS `t` ",
                "WHERE (`t`.`dt` >= ? AND `t`.`dt` < ?) ",
                "ORDER BY `t`.`dt` ASC, `t`.`id` ASC"
            )
        );
        assert_eq!(
            params,
            vec![
                Value::TimestampNaive(window().start),
                Value::TimestampNaive(window().end),
            ]
        );
    }

    #[test]
    fn test_resume_predicate_sql() {
        let (sql, _) = render(TransferMode::Resume);
        assert!(sql.contains("WHERE (`t`.`dt` > ? AND `t`.`dt` <= ?)"));
    }

    fn holds(op: BinaryOperator, left: NaiveDateTime, right: NaiveDateTime) -> bool {
        match op {
            BinaryOperator::Lt => left < right,
            BinaryOperator::LtEq => left <= right,
            BinaryOperator::Gt => left > right,
            BinaryOperator::GtEq => left >= right,
            other => panic!("not a bound operator: {other:?}"),
        }
    }

    #[test]
    fn test_sql_bounds_agree_with_window_admits() {
        let w = window();
        let samples = [
            w.start - TimeDelta::seconds(1),
            w.start,
            w.start + TimeDelta::minutes(30),
            w.end,
            w.end + TimeDelta::seconds(1),
        ];

        for mode in [TransferMode::Fresh, TransferMode::Resume] {
            let (lower, upper) = predicate_for_mode(mode, "t", "dt").bounds();
            for ts in samples {
                let in_sql = holds(lower, ts, w.start) && holds(upper, ts, w.end);
                assert_eq!(in_sql, w.admits(mode, ts), "{mode} at {ts}");
            }
        }
    }
}
