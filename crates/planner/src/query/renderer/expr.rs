use crate::query::{
    ast::expr::{Expr, Ident},
    renderer::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(ident) => ident.render(r),
            Expr::Value(value) => r.add_param(value.clone()),
            Expr::BinaryOp(op) => {
                // Logical operators are parenthesized so nested predicates keep their grouping.
                let grouped = op.op.is_logical();
                if grouped {
                    r.sql.push('(');
                }
                op.left.render(r);
                r.sql.push(' ');
                r.sql.push_str(op.op.as_sql());
                r.sql.push(' ');
                op.right.render(r);
                if grouped {
                    r.sql.push(')');
                }
            }
            Expr::FunctionCall(call) => {
                r.sql.push_str(&call.name.to_uppercase());
                r.sql.push('(');
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        r.sql.push_str(", ");
                    }
                    arg.render(r);
                }
                r.sql.push(')');
            }
            Expr::Alias { expr, alias } => {
                expr.render(r);
                r.sql.push_str(" AS ");
                r.sql.push_str(&r.dialect.quote_identifier(alias));
            }
        }
    }
}

impl Render for Ident {
    fn render(&self, r: &mut Renderer) {
        if let Some(qualifier) = &self.qualifier {
            r.sql.push_str(&r.dialect.quote_identifier(qualifier));
            r.sql.push('.');
        }
        r.sql.push_str(&r.dialect.quote_identifier(&self.name));
    }
}
