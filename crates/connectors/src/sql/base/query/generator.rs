use crate::sql::base::error::DbError;
use model::{
    core::value::Value,
    records::row::RowData,
    transfer::{
        schema::{LOOKUP_ALIAS, SOURCE_ALIAS, TransferSchema, WATERMARK_ALIAS},
        watermark::TransferMode,
        window::TimeWindow,
    },
};
use planner::query::{
    ast::{
        common::JoinKind,
        expr::{BinaryOperator, Expr},
    },
    builder::{insert::InsertBuilder, select::SelectBuilder},
    dialect::Dialect,
    ident, ident_q,
    predicate::predicate_for_mode,
    renderer::{Render, Renderer},
};
use planner::{table_ref, value};

/// Renders the handful of statements a transfer needs for one dialect.
pub struct QueryGenerator<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> QueryGenerator<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    /// `SELECT MAX(col) AS date FROM table`
    pub fn max_timestamp(&self, table: &str, column: &str) -> (String, Vec<Value>) {
        self.aggregate_timestamp("max", table, column)
    }

    /// `SELECT MIN(col) AS date FROM table`
    pub fn min_timestamp(&self, table: &str, column: &str) -> (String, Vec<Value>) {
        self.aggregate_timestamp("min", table, column)
    }

    fn aggregate_timestamp(&self, func: &str, table: &str, column: &str) -> (String, Vec<Value>) {
        let select = SelectBuilder::new()
            .select(vec![
                Expr::call(func, vec![ident(column)]).alias(WATERMARK_ALIAS),
            ])
            .from(table_ref!(table), None)
            .build();
        self.render_ast(select)
    }

    /// Joined, windowed read of the fact table.
    ///
    /// Only fact rows with a matching lookup row come back; the lookup name
    /// is projected under the configured alias.
    pub fn window_select(
        &self,
        schema: &TransferSchema,
        window: &TimeWindow,
        mode: TransferMode,
    ) -> (String, Vec<Value>) {
        let cols = &schema.columns;
        let mut projection: Vec<Expr> = schema
            .source_columns()
            .iter()
            .map(|c| ident_q(SOURCE_ALIAS, c))
            .collect();
        projection.push(ident_q(LOOKUP_ALIAS, &cols.lookup_name).alias(&cols.name_alias));

        let join_on = Expr::binary(
            ident_q(SOURCE_ALIAS, &cols.operation_ref),
            BinaryOperator::Eq,
            ident_q(LOOKUP_ALIAS, &cols.lookup_id),
        );

        let builder = SelectBuilder::new()
            .select(projection)
            .from(table_ref!(&schema.source_table), Some(SOURCE_ALIAS))
            .join(
                JoinKind::Inner,
                table_ref!(&schema.lookup_table),
                Some(LOOKUP_ALIAS),
                join_on,
            );

        let predicate = predicate_for_mode(mode, SOURCE_ALIAS, &cols.timestamp);
        let select = predicate
            .apply_to_builder(builder, window, &cols.id)
            .build();
        self.render_ast(select)
    }

    /// One multi-row INSERT. Columns come from the first row; every other row
    /// must have the same columns in the same order.
    pub fn insert_batch(&self, table: &str, rows: &[RowData]) -> Result<(String, Vec<Value>), DbError> {
        let Some(first) = rows.first() else {
            return Ok((String::new(), Vec::new()));
        };
        check_shape(rows)?;

        let mut builder = InsertBuilder::new(table_ref!(table)).columns(&first.column_names());
        for row in rows {
            builder = builder.values(row.values().into_iter().map(|v| value!(v)).collect());
        }
        Ok(self.render_ast(builder.build()))
    }

    /// Splits the rows into as many INSERT statements as needed to stay
    /// under both `max_rows` and the dialect's bind-parameter limit.
    pub fn insert_batches(
        &self,
        table: &str,
        rows: &[RowData],
        max_rows: usize,
    ) -> Result<Vec<(String, Vec<Value>)>, DbError> {
        let Some(first) = rows.first() else {
            return Ok(Vec::new());
        };
        check_shape(rows)?;

        let width = first.field_values.len().max(1);
        let chunk = max_rows.min(self.dialect.max_params() / width).max(1);
        rows.chunks(chunk)
            .map(|chunk| self.insert_batch(table, chunk))
            .collect()
    }

    fn render_ast(&self, ast: impl Render) -> (String, Vec<Value>) {
        let mut renderer = Renderer::new(self.dialect);
        ast.render(&mut renderer);
        renderer.finish()
    }
}

fn check_shape(rows: &[RowData]) -> Result<(), DbError> {
    let Some(first) = rows.first() else {
        return Ok(());
    };
    match rows.iter().position(|row| !row.same_shape(first)) {
        Some(idx) => Err(DbError::SchemaShape {
            row: idx,
            expected: to_owned(first.column_names()),
            found: to_owned(rows[idx].column_names()),
        }),
        None => Ok(()),
    }
}

fn to_owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}
