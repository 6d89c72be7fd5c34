//! Type-state builder for SELECT statements.
//!
//! Projection comes first, then the FROM table; joins, filters and ordering
//! are only available once a FROM clause exists.

use crate::query::ast::{
    common::{JoinKind, OrderDir, TableRef},
    expr::Expr,
    select::{FromClause, JoinClause, OrderByExpr, Select},
};
use std::marker::PhantomData;

#[derive(Debug, Clone)]
pub struct InitialState;
#[derive(Debug, Clone)]
pub struct SelectState;
#[derive(Debug, Clone)]
pub struct FromState;

#[derive(Debug, Clone)]
pub struct SelectBuilder<S> {
    pub ast: Select,
    _state: PhantomData<S>,
}

impl SelectBuilder<InitialState> {
    pub fn new() -> Self {
        Self {
            ast: Select::default(),
            _state: PhantomData,
        }
    }

    pub fn select(mut self, columns: Vec<Expr>) -> SelectBuilder<SelectState> {
        self.ast.columns = columns;
        SelectBuilder {
            ast: self.ast,
            _state: PhantomData,
        }
    }
}

impl Default for SelectBuilder<InitialState> {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectBuilder<SelectState> {
    pub fn from(mut self, table: TableRef, alias: Option<&str>) -> SelectBuilder<FromState> {
        self.ast.from = Some(FromClause {
            table,
            alias: alias.map(str::to_string),
        });
        SelectBuilder {
            ast: self.ast,
            _state: PhantomData,
        }
    }
}

impl SelectBuilder<FromState> {
    pub fn join(mut self, kind: JoinKind, table: TableRef, alias: Option<&str>, on: Expr) -> Self {
        self.ast.joins.push(JoinClause {
            kind,
            table,
            alias: alias.map(str::to_string),
            on,
        });
        self
    }

    /// Adds a condition, AND-ing it with any existing WHERE clause.
    pub fn and_where(mut self, condition: Expr) -> Self {
        self.ast.where_clause = Some(match self.ast.where_clause.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }

    pub fn order_by(mut self, expr: Expr, direction: Option<OrderDir>) -> Self {
        self.ast.order_by.push(OrderByExpr { expr, direction });
        self
    }

    pub fn build(self) -> Select {
        self.ast
    }
}
