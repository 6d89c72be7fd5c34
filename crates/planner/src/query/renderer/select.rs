use crate::query::{
    ast::{
        common::{JoinKind, OrderDir},
        select::Select,
    },
    renderer::{Render, Renderer},
};

impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("SELECT ");
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            column.render(r);
        }

        if let Some(from) = &self.from {
            r.sql.push_str(" FROM ");
            r.render_table_ref(&from.table);
            r.render_alias(&from.alias);
        }

        for join in &self.joins {
            r.sql.push_str(match join.kind {
                JoinKind::Inner => " INNER JOIN ",
            });
            r.render_table_ref(&join.table);
            r.render_alias(&join.alias);
            r.sql.push_str(" ON ");
            join.on.render(r);
        }

        if let Some(condition) = &self.where_clause {
            r.sql.push_str(" WHERE ");
            condition.render(r);
        }

        if !self.order_by.is_empty() {
            r.sql.push_str(" ORDER BY ");
            for (i, order) in self.order_by.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                order.expr.render(r);
                match order.direction {
                    Some(OrderDir::Asc) => r.sql.push_str(" ASC"),
                    None => {}
                }
            }
        }
    }
}
