//! Precedence-driven rendering of expression nodes.
//!
//! A child is rendered at a threshold chosen by its parent and wrapped in
//! parentheses only when it binds less tightly than that threshold.
//! Binary operators are left-associative, so the right operand is rendered
//! one level higher than the operator itself.

use crate::precedence;
use crate::writer::{Render, SqlWriter};

use super::ops::UnaryOp;
use super::{Expr, InTarget, Node};

impl Render for Expr {
    fn precedence(&self) -> u8 {
        self.node().precedence()
    }

    fn render(&self, w: &mut SqlWriter) {
        self.node().render(w);
    }
}

impl Render for Node {
    fn precedence(&self) -> u8 {
        match self {
            Self::Literal(literal) => literal.precedence(),
            Self::Unary { op, .. } => op.precedence(),
            Self::Binary { op, .. } => op.precedence(),
            Self::Collate { .. } => precedence::COLLATE,
            Self::Match { .. } | Self::Between { .. } | Self::In { .. } => precedence::EQUALITY,
            Self::Column(_)
            | Self::Case { .. }
            | Self::Cast { .. }
            | Self::Function(_)
            | Self::Row(_)
            | Self::Param(_)
            | Self::Exists { .. }
            | Self::Subquery(_) => precedence::ATOMIC,
        }
    }

    fn render(&self, w: &mut SqlWriter) {
        match self {
            Self::Literal(literal) => literal.render(w),
            Self::Column(column) => column.render(w),
            Self::Param(param) => param.render(w),
            Self::Function(call) => call.render(w),
            Self::Unary { op, operand } => render_unary(w, *op, operand),
            Self::Binary { op, left, right } => {
                let p = op.precedence();
                w.render_at(left, p);
                w.push(' ');
                w.push_str(op.as_str());
                w.push(' ');
                w.render_at(right, p + 1);
            }
            Self::Collate { operand, collation } => {
                w.render_at(operand, precedence::COLLATE);
                w.push_str(" COLLATE ");
                collation.with(|c| w.identifier(c));
            }
            Self::Match {
                op,
                negated,
                subject,
                pattern,
                escape,
            } => {
                w.render_at(subject, precedence::EQUALITY);
                w.push_str(if *negated { " NOT " } else { " " });
                w.push_str(op.as_str());
                w.push(' ');
                w.render_at(pattern, precedence::EQUALITY + 1);
                if let Some(escape) = escape {
                    w.push_str(" ESCAPE ");
                    w.render_at(escape, precedence::EQUALITY + 1);
                }
            }
            Self::Between {
                negated,
                subject,
                low,
                high,
            } => {
                w.render_at(subject, precedence::EQUALITY);
                w.push_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                w.render_at(low, precedence::EQUALITY + 1);
                w.push_str(" AND ");
                w.render_at(high, precedence::EQUALITY + 1);
            }
            Self::In {
                negated,
                subject,
                target,
            } => {
                w.render_at(subject, precedence::EQUALITY);
                w.push_str(if *negated { " NOT IN " } else { " IN " });
                target.render(w);
            }
            Self::Case {
                operand,
                arms,
                otherwise,
            } => {
                w.push_str("CASE");
                if let Some(operand) = operand {
                    w.push(' ');
                    w.render_at(operand, precedence::LOWEST);
                }
                for (condition, result) in arms {
                    w.push_str(" WHEN ");
                    w.render_at(condition, precedence::LOWEST);
                    w.push_str(" THEN ");
                    w.render_at(result, precedence::LOWEST);
                }
                if let Some(otherwise) = otherwise {
                    w.push_str(" ELSE ");
                    w.render_at(otherwise, precedence::LOWEST);
                }
                w.push_str(" END");
            }
            Self::Cast { operand, type_name } => {
                w.push_str("CAST(");
                w.render_at(operand, precedence::LOWEST);
                w.push_str(" AS ");
                type_name.with(|t| w.type_name(t));
                w.push(')');
            }
            Self::Row(items) => {
                w.push('(');
                w.comma_separated(items, precedence::LOWEST);
                w.push(')');
            }
            Self::Exists { negated, query } => {
                w.push_str(if *negated { "NOT EXISTS (" } else { "EXISTS (" });
                query.render(w);
                w.push(')');
            }
            Self::Subquery(query) => {
                w.push('(');
                query.render(w);
                w.push(')');
            }
        }
    }
}

fn render_unary(w: &mut SqlWriter, op: UnaryOp, operand: &Expr) {
    match op {
        UnaryOp::IsNull | UnaryOp::NotNull => {
            w.render_at(operand, precedence::EQUALITY);
            w.push(' ');
            w.push_str(op.as_str());
        }
        UnaryOp::Not => {
            w.push_str("NOT ");
            w.render_at(operand, precedence::NOT);
        }
        UnaryOp::Plus | UnaryOp::Neg | UnaryOp::BitNot => {
            w.push_str(op.as_str());
            let at = w.len();
            w.render_at(operand, precedence::UNARY);
            if op == UnaryOp::Neg {
                w.separate_dash(at);
            }
        }
    }
}

impl Render for InTarget {
    fn render(&self, w: &mut SqlWriter) {
        match self {
            Self::List(items) => {
                w.push('(');
                w.comma_separated(items, precedence::LOWEST);
                w.push(')');
            }
            Self::Query(query) => {
                w.push('(');
                query.render(w);
                w.push(')');
            }
            Self::Table(table) => table.render_name(w),
            Self::Function { name, args } => {
                name.with(|n| w.identifier(n));
                w.push('(');
                w.comma_separated(args, precedence::LOWEST);
                w.push(')');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{col, null, param, row, value, Render};

    #[test]
    fn test_left_associative_binary() {
        assert_eq!(col("a").minus(col("b")).minus(col("c")).to_sql(), "a - b - c");
        assert_eq!(
            col("a").minus(col("b").minus(col("c"))).to_sql(),
            "a - (b - c)"
        );
    }

    #[test]
    fn test_logical_grouping() {
        let or = col("a").or(col("b"));
        assert_eq!(or.clone().and(col("c")).to_sql(), "(a OR b) AND c");
        assert_eq!(col("a").and(col("b")).or(col("c")).to_sql(), "a AND b OR c");
        assert_eq!(or.not().to_sql(), "NOT (a OR b)");
        assert_eq!(col("a").eq(1).not().to_sql(), "NOT a = 1");
    }

    #[test]
    fn test_negation_spacing() {
        assert_eq!(value(-1).neg().to_sql(), "- -1");
        assert_eq!(col("a").neg().neg().to_sql(), "- -a");
        assert_eq!(col("a").neg().to_sql(), "-a");
        assert_eq!(value(-1).pos().to_sql(), "+-1");
        assert_eq!(col("a").plus(1).neg().to_sql(), "-(a + 1)");
    }

    #[test]
    fn test_negative_literal_operand() {
        assert_eq!(value(-1).mult(col("a")).to_sql(), "-1 * a");
        assert_eq!(value(-1).collate("NOCASE").to_sql(), "-1 COLLATE NOCASE");
    }

    #[test]
    fn test_postfix_null_checks() {
        assert_eq!(col("a").is_null().to_sql(), "a ISNULL");
        assert_eq!(col("a").plus(1).not_null().to_sql(), "a + 1 NOTNULL");
        assert_eq!(col("a").eq(1).is_null().to_sql(), "a = 1 ISNULL");
        assert_eq!(col("a").and(col("b")).is_null().to_sql(), "(a AND b) ISNULL");
    }

    #[test]
    fn test_collate() {
        assert_eq!(col("name").collate("NOCASE").to_sql(), "name COLLATE NOCASE");
        assert_eq!(
            col("a").concat(col("b")).collate("binary").to_sql(),
            "(a || b) COLLATE binary"
        );
        assert_eq!(
            col("name").collate("my collation").to_sql(),
            "name COLLATE \"my collation\""
        );
    }

    #[test]
    fn test_pattern_matching() {
        assert_eq!(col("name").like("A%").to_sql(), "name LIKE 'A%'");
        assert_eq!(col("name").not_glob("a*").to_sql(), "name NOT GLOB 'a*'");
        assert_eq!(
            col("name").like_escape("10\\%", "\\").to_sql(),
            "name LIKE '10\\%' ESCAPE '\\'"
        );
        assert_eq!(
            col("a").like(col("b").eq(col("c"))).to_sql(),
            "a LIKE (b = c)"
        );
    }

    #[test]
    fn test_between() {
        assert_eq!(col("a").between(1, 10).to_sql(), "a BETWEEN 1 AND 10");
        assert_eq!(
            col("a").not_between(col("lo").and(col("x")), 10).to_sql(),
            "a NOT BETWEEN (lo AND x) AND 10"
        );
        assert_eq!(
            col("a").between(1, 2).eq(true).to_sql(),
            "a BETWEEN 1 AND 2 = TRUE"
        );
    }

    #[test]
    fn test_in_targets() {
        assert_eq!(
            col("id").in_list([1, 2, 3]).unwrap().to_sql(),
            "id IN (1, 2, 3)"
        );
        assert_eq!(col("id").not_in_table("banned").to_sql(), "id NOT IN banned");
        assert_eq!(
            col("v").in_function("json_each", [param()]).to_sql(),
            "v IN json_each(?)"
        );
        assert_eq!(
            col("a").and(col("b")).in_list([true]).unwrap().to_sql(),
            "(a AND b) IN (TRUE)"
        );
    }

    #[test]
    fn test_cast_and_row() {
        assert_eq!(
            col("a").plus(1).cast("VARCHAR(255)").to_sql(),
            "CAST(a + 1 AS VARCHAR(255))"
        );
        let pair = row([col("a"), col("b").or(col("c"))]).unwrap();
        assert_eq!(pair.to_sql(), "(a, b OR c)");
        let cmp = pair.eq(row([1, 2]).unwrap());
        assert_eq!(cmp.to_sql(), "(a, b OR c) = (1, 2)");
    }

    #[test]
    fn test_json_operators() {
        assert_eq!(
            col("doc").json_get("$.a").json_get_text("$.b").to_sql(),
            "doc -> '$.a' ->> '$.b'"
        );
        assert_eq!(
            col("a").plus(col("b")).concat("x").to_sql(),
            "(a + b) || 'x'"
        );
    }

    #[test]
    fn test_is_operators() {
        assert_eq!(col("a").is(null()).to_sql(), "a IS NULL");
        assert_eq!(col("a").is_not(col("b")).to_sql(), "a IS NOT b");
    }
}
