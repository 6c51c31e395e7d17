//! Snapshots of expression trees.
//!
//! A node is rebuilt only when something below it holds a live buffer;
//! every untouched subtree keeps its `Arc`.

use tracing::trace;

use crate::snapshot::{Freezer, Snapshot};

use super::{Expr, InTarget, Node};

impl Snapshot for Expr {
    fn snapshot(&self) -> Option<Self> {
        let node = self.node().snapshot()?;
        trace!(node = node_kind(&node), "rebuilt expression node");
        Some(Self::new(node))
    }
}

impl Node {
    fn snapshot(&self) -> Option<Self> {
        let mut f = Freezer::new();
        match self {
            Self::Literal(literal) => literal.snapshot().map(Self::Literal),
            Self::Column(column) => column.snapshot().map(Self::Column),
            Self::Function(call) => call.snapshot().map(Self::Function),
            Self::Param(_) => None,
            Self::Unary { op, operand } => {
                let operand = f.take(operand);
                f.finish(|| Self::Unary { op: *op, operand })
            }
            Self::Binary { op, left, right } => {
                let left = f.take(left);
                let right = f.take(right);
                f.finish(|| Self::Binary {
                    op: *op,
                    left,
                    right,
                })
            }
            Self::Collate { operand, collation } => {
                let operand = f.take(operand);
                let collation = f.take(collation);
                f.finish(|| Self::Collate { operand, collation })
            }
            Self::Match {
                op,
                negated,
                subject,
                pattern,
                escape,
            } => {
                let subject = f.take(subject);
                let pattern = f.take(pattern);
                let escape = f.take(escape);
                f.finish(|| Self::Match {
                    op: *op,
                    negated: *negated,
                    subject,
                    pattern,
                    escape,
                })
            }
            Self::Between {
                negated,
                subject,
                low,
                high,
            } => {
                let subject = f.take(subject);
                let low = f.take(low);
                let high = f.take(high);
                f.finish(|| Self::Between {
                    negated: *negated,
                    subject,
                    low,
                    high,
                })
            }
            Self::In {
                negated,
                subject,
                target,
            } => {
                let subject = f.take(subject);
                let target = f.take(target);
                f.finish(|| Self::In {
                    negated: *negated,
                    subject,
                    target,
                })
            }
            Self::Case {
                operand,
                arms,
                otherwise,
            } => {
                let operand = f.take(operand);
                let arms = f.take(arms);
                let otherwise = f.take(otherwise);
                f.finish(|| Self::Case {
                    operand,
                    arms,
                    otherwise,
                })
            }
            Self::Cast { operand, type_name } => {
                let operand = f.take(operand);
                let type_name = f.take(type_name);
                f.finish(|| Self::Cast { operand, type_name })
            }
            Self::Row(items) => items.snapshot().map(Self::Row),
            Self::Exists { negated, query } => {
                let query = f.take(query);
                f.finish(|| Self::Exists {
                    negated: *negated,
                    query,
                })
            }
            Self::Subquery(query) => query.snapshot().map(Self::Subquery),
        }
    }
}

impl Snapshot for InTarget {
    fn snapshot(&self) -> Option<Self> {
        match self {
            Self::List(items) => items.snapshot().map(Self::List),
            Self::Query(query) => query.snapshot().map(Self::Query),
            Self::Table(table) => table.snapshot().map(Self::Table),
            Self::Function { name, args } => {
                let mut f = Freezer::new();
                let name = f.take(name);
                let args = f.take(args);
                f.finish(|| Self::Function { name, args })
            }
        }
    }
}

const fn node_kind(node: &Node) -> &'static str {
    match node {
        Node::Literal(_) => "literal",
        Node::Column(_) => "column",
        Node::Unary { .. } => "unary",
        Node::Binary { .. } => "binary",
        Node::Collate { .. } => "collate",
        Node::Match { .. } => "match",
        Node::Between { .. } => "between",
        Node::In { .. } => "in",
        Node::Case { .. } => "case",
        Node::Cast { .. } => "cast",
        Node::Function(_) => "function",
        Node::Row(_) => "row",
        Node::Param(_) => "param",
        Node::Exists { .. } => "exists",
        Node::Subquery(_) => "subquery",
    }
}

#[cfg(test)]
mod tests {
    use crate::shared::{SharedBytes, SharedText};
    use crate::{col, value, Expr, Render, Snapshot};

    #[test]
    fn test_frozen_tree_copies_to_same_arc() {
        let expr = col("a").plus(1).mult(col("b")).eq("x");
        assert!(Expr::ptr_eq(&expr.copy(), &expr));
    }

    #[test]
    fn test_live_leaf_rebuilds_only_its_path() {
        let name = SharedText::new("a");
        let untouched = col("b").mult(2);
        let expr = col(&name).plus(untouched.clone());
        let frozen = expr.copy();
        assert!(!Expr::ptr_eq(&frozen, &expr));
        match frozen.node() {
            super::Node::Binary { right, .. } => assert!(Expr::ptr_eq(right, &untouched)),
            other => panic!("unexpected node {other:?}"),
        }
        name.replace("z");
        assert_eq!(frozen.to_sql(), "a + b * 2");
        assert_eq!(expr.to_sql(), "z + b * 2");
    }

    #[test]
    fn test_copy_of_copy_is_identity() {
        let text = SharedText::new("draft");
        let expr = col("title").eq(&text);
        let once = expr.copy();
        assert!(Expr::ptr_eq(&once.copy(), &once));
    }

    #[test]
    fn test_live_blob_is_frozen() {
        let bytes = SharedBytes::new(vec![0x01_u8]);
        let expr = col("data").eq(value(&bytes));
        let frozen = expr.copy();
        bytes.extend_from_slice(&[0x02]);
        assert_eq!(frozen.to_sql(), "data = X'01'");
        assert_eq!(expr.to_sql(), "data = X'0102'");
    }

    #[test]
    fn test_nested_forms_are_frozen() {
        let pattern = SharedText::new("a%");
        let expr = Expr::case()
            .when(col("name").like(&pattern), col("x").in_list([&pattern]).unwrap())
            .end();
        let frozen = expr.copy();
        pattern.replace("b%");
        assert_eq!(
            frozen.to_sql(),
            "CASE WHEN name LIKE 'a%' THEN x IN ('a%') END"
        );
    }
}
