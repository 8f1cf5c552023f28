use crate::query::{
    ast::expr::{BinaryOp, BinaryOperator, Expr, FunctionCall, Ident},
    renderer::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(ident) => ident.render(r),
            Expr::Wildcard(qualifier) => {
                if let Some(qualifier) = qualifier {
                    r.sql.push_str(&r.dialect.quote_identifier(qualifier));
                    r.sql.push('.');
                }
                r.sql.push('*');
            }
            Expr::Value(val) => r.add_param(val.clone()),
            Expr::BinaryOp(op) => op.render(r),
            Expr::FunctionCall(func) => func.render(r),
            Expr::Alias { expr, alias } => {
                expr.render(r);
                r.sql.push_str(" AS ");
                r.sql.push_str(&r.dialect.quote_identifier(alias));
            }
            Expr::Cast { expr, target } => {
                r.sql.push_str("CAST(");
                expr.render(r);
                r.sql.push_str(" AS ");
                r.sql.push_str(r.dialect.cast_type(*target));
                r.sql.push(')');
            }
            Expr::InList {
                expr,
                list,
                negated,
            } => {
                expr.render(r);
                r.sql.push_str(if *negated { " NOT IN (" } else { " IN (" });
                r.push_list(list);
                r.sql.push(')');
            }
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                expr.render(r);
                r.sql
                    .push_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                low.render(r);
                r.sql.push_str(" AND ");
                high.render(r);
            }
            Expr::IsNull { expr, negated } => {
                expr.render(r);
                r.sql
                    .push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Expr::DatePart { part, expr } => {
                let (prefix, suffix) = r.dialect.date_part(*part);
                r.sql.push_str(&prefix);
                expr.render(r);
                r.sql.push_str(&suffix);
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

impl Render for BinaryOp {
    fn render(&self, r: &mut Renderer) {
        r.sql.push('(');
        self.left.render(r);

        let op_str = match self.op {
            BinaryOperator::Eq => " = ",
            BinaryOperator::NotEq => " <> ",
            BinaryOperator::Lt => " < ",
            BinaryOperator::LtEq => " <= ",
            BinaryOperator::Gt => " > ",
            BinaryOperator::GtEq => " >= ",
            BinaryOperator::Like => " LIKE ",
            BinaryOperator::And => " AND ",
            BinaryOperator::Or => " OR ",
        };
        r.sql.push_str(op_str);

        self.right.render(r);
        r.sql.push(')');
    }
}

impl Render for FunctionCall {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(&self.name);
        r.sql.push('(');
        if self.wildcard {
            r.sql.push('*');
        } else {
            r.push_list(&self.args);
        }
        r.sql.push(')');
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use model::core::value::Value;

    use crate::{
        ident,
        query::{
            ast::expr::{BinaryOperator, DatePart, Expr},
            dialect::{MySql, Postgres},
            renderer::{render, render_inlined},
        },
        value,
    };

    #[test]
    fn test_like_on_lowered_column() {
        let expr = Expr::binary(
            Expr::function("LOWER", vec![ident!("users", "name")]),
            BinaryOperator::Like,
            value!(Value::String("%acme%".into())),
        );

        let (sql, params) = render(&expr, &Postgres);
        assert_eq!(sql, r#"(LOWER("users"."name") LIKE $1)"#);
        assert_eq!(params, vec![Value::String("%acme%".into())]);
    }

    #[test]
    fn test_cast_text_per_dialect() {
        let expr = Expr::binary(
            ident!("age").cast_text(),
            BinaryOperator::Like,
            value!(Value::String("4%".into())),
        );

        assert_eq!(render(&expr, &Postgres).0, r#"(CAST("age" AS TEXT) LIKE $1)"#);
        assert_eq!(render(&expr, &MySql).0, "(CAST(`age` AS CHAR) LIKE ?)");
    }

    #[test]
    fn test_in_list_and_negation() {
        let list = vec![value!(Value::Int(1)), value!(Value::Int(2))];
        let expr = Expr::InList {
            expr: Box::new(ident!("id")),
            list: list.clone(),
            negated: false,
        };
        assert_eq!(render(&expr, &Postgres).0, r#""id" IN ($1, $2)"#);

        let expr = Expr::InList {
            expr: Box::new(ident!("id")),
            list,
            negated: true,
        };
        assert_eq!(render(&expr, &MySql).0, "`id` NOT IN (?, ?)");
    }

    #[test]
    fn test_between_dates() {
        let low = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let high = NaiveDate::from_ymd_opt(2023, 1, 5)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let expr = Expr::Between {
            expr: Box::new(ident!("created_at")),
            low: Box::new(value!(Value::Date(low))),
            high: Box::new(value!(Value::Timestamp(high))),
            negated: false,
        };

        let (sql, params) = render(&expr, &Postgres);
        assert_eq!(sql, r#""created_at" BETWEEN $1 AND $2"#);
        assert_eq!(params.len(), 2);
        assert_eq!(
            render_inlined(&expr, &Postgres),
            r#""created_at" BETWEEN '2023-01-01' AND '2023-01-05 23:59:59'"#
        );
    }

    #[test]
    fn test_date_part_per_dialect() {
        let expr = Expr::binary(
            ident!("created_at").date_part(DatePart::Year),
            BinaryOperator::Eq,
            value!(Value::Int(2023)),
        );

        assert_eq!(
            render(&expr, &Postgres).0,
            r#"(CAST(EXTRACT(YEAR FROM "created_at") AS INTEGER) = $1)"#
        );
        assert_eq!(render(&expr, &MySql).0, "(YEAR(`created_at`) = ?)");
    }

    #[test]
    fn test_is_null_and_grouping() {
        let expr = ident!("deleted_at")
            .is_null(false)
            .or(ident!("archived").is_null(true));
        assert_eq!(
            render(&expr, &Postgres).0,
            r#"("deleted_at" IS NULL OR "archived" IS NOT NULL)"#
        );
    }
}
