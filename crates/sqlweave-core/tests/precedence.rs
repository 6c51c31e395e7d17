//! Tests for parenthesization: the rendered text must read back as the
//! tree that produced it.

mod common;
use common::*;

use rusqlite::types::Value;
use sqlweave_core::{col, value, Expr, Render};

fn v(n: i64) -> Expr {
    value(n)
}

// ===================================================================
// Arithmetic
// ===================================================================

#[test]
fn tighter_child_is_bare() {
    assert_eq!(col("a").plus(col("b").mult(col("c"))).to_sql(), "a + b * c");
}

#[test]
fn looser_child_is_wrapped() {
    assert_eq!(col("a").mult(col("b").plus(col("c"))).to_sql(), "a * (b + c)");
}

#[test]
fn left_nested_subtraction() {
    let expr = v(1).minus(v(2)).minus(v(3));
    assert_eq!(expr.to_sql(), "1 - 2 - 3");
    assert_eq!(eval(&expr), Value::Integer(-4));
}

#[test]
fn right_nested_subtraction() {
    let expr = v(1).minus(v(2).minus(v(3)));
    assert_eq!(expr.to_sql(), "1 - (2 - 3)");
    assert_eq!(eval(&expr), Value::Integer(2));
}

#[test]
fn right_nested_division() {
    let expr = v(100).div(v(10).div(v(5)));
    assert_eq!(expr.to_sql(), "100 / (10 / 5)");
    assert_eq!(eval(&expr), Value::Integer(50));
}

#[test]
fn mixed_arithmetic_evaluates_as_built() {
    let expr = v(2).mult(v(3).plus(v(4))).rem(v(5));
    assert_eq!(expr.to_sql(), "2 * (3 + 4) % 5");
    assert_eq!(eval(&expr), Value::Integer(4));
}

// ===================================================================
// Logical
// ===================================================================

#[test]
fn or_inside_and() {
    let expr = col("a").or(col("b")).and(col("c"));
    assert_eq!(expr.to_sql(), "(a OR b) AND c");
}

#[test]
fn and_inside_or() {
    let expr = col("a").and(col("b")).or(col("c"));
    assert_eq!(expr.to_sql(), "a AND b OR c");
}

#[test]
fn not_over_or_evaluates_as_built() {
    let expr = v(1).or(v(0)).not();
    assert_eq!(expr.to_sql(), "NOT (1 OR 0)");
    assert_eq!(eval(&expr), Value::Integer(0));
}

#[test]
fn comparison_inside_not() {
    let expr = v(1).eq(v(2)).not();
    assert_eq!(expr.to_sql(), "NOT 1 = 2");
    assert_eq!(eval(&expr), Value::Integer(1));
}

// ===================================================================
// Bitwise, comparison and equality levels
// ===================================================================

#[test]
fn bitwise_below_additive() {
    let expr = v(1).plus(v(2)).bit_and(v(3));
    assert_eq!(expr.to_sql(), "1 + 2 & 3");
    assert_eq!(eval(&expr), Value::Integer(3));

    let expr = v(1).plus(v(2).bit_and(v(3)));
    assert_eq!(expr.to_sql(), "1 + (2 & 3)");
    assert_eq!(eval(&expr), Value::Integer(3));
}

#[test]
fn shifts_are_left_associative() {
    let expr = v(1).shl(v(4).shr(v(1)));
    assert_eq!(expr.to_sql(), "1 << (4 >> 1)");
    assert_eq!(eval(&expr), Value::Integer(4));
}

#[test]
fn comparison_inside_equality() {
    let expr = v(1).lt(v(2)).eq(v(1));
    assert_eq!(expr.to_sql(), "1 < 2 = 1");
    assert_eq!(eval(&expr), Value::Integer(1));

    let expr = v(1).lt(v(2).eq(v(1)));
    assert_eq!(expr.to_sql(), "1 < (2 = 1)");
    assert_eq!(eval(&expr), Value::Integer(0));
}

// ===================================================================
// Unary and postfix
// ===================================================================

#[test]
fn double_negation_is_not_a_comment() {
    let expr = v(-1).neg();
    assert_eq!(expr.to_sql(), "- -1");
    assert_eq!(eval(&expr), Value::Integer(1));

    let expr = v(5).neg().neg();
    assert_eq!(expr.to_sql(), "- -5");
    assert_eq!(eval(&expr), Value::Integer(5));
}

#[test]
fn negation_of_sum() {
    let expr = v(1).plus(v(2)).neg();
    assert_eq!(expr.to_sql(), "-(1 + 2)");
    assert_eq!(eval(&expr), Value::Integer(-3));
}

#[test]
fn bit_not_of_negative_literal() {
    let expr = v(-1).inv();
    assert_eq!(expr.to_sql(), "~-1");
    assert_eq!(eval(&expr), Value::Integer(0));
}

#[test]
fn postfix_null_checks() {
    check(&value(None::<i32>).is_null(), "NULL ISNULL");
    check(&v(1).plus(v(1)).not_null(), "1 + 1 NOTNULL");
    assert_eq!(eval(&v(1).or(v(0)).is_null()), Value::Integer(0));
}

// ===================================================================
// Ternary and list forms
// ===================================================================

#[test]
fn between_bounds_are_wrapped_when_looser() {
    let expr = v(2).between(v(0).and(v(1)), v(3));
    assert_eq!(expr.to_sql(), "2 BETWEEN (0 AND 1) AND 3");
    assert_eq!(eval(&expr), Value::Integer(1));
}

#[test]
fn not_between_evaluates() {
    let expr = v(1).not_between(v(2), v(3));
    assert_eq!(eval(&expr), Value::Integer(1));
}

#[test]
fn in_list_items_are_never_wrapped() {
    let expr = v(3).in_list([v(1).plus(v(2)), v(4)]).unwrap();
    assert_eq!(expr.to_sql(), "3 IN (1 + 2, 4)");
    assert_eq!(eval(&expr), Value::Integer(1));
}

#[test]
fn like_subject_and_pattern() {
    let expr = value("abc").like("A%");
    assert_eq!(expr.to_sql(), "'abc' LIKE 'A%'");
    assert_eq!(eval(&expr), Value::Integer(1));

    let expr = value("abc").concat("d").glob("abc*");
    assert_eq!(expr.to_sql(), "'abc' || 'd' GLOB 'abc*'");
    assert_eq!(eval(&expr), Value::Integer(1));
}

#[test]
fn collate_binds_tightest() {
    let expr = value("a").concat("B").collate("NOCASE").eq("ab");
    assert_eq!(expr.to_sql(), "('a' || 'B') COLLATE NOCASE = 'ab'");
    assert_eq!(eval(&expr), Value::Integer(1));
}

#[test]
fn json_arrows_chain_left_to_right() {
    let expr = value(r#"{"a":{"b":7}}"#).json_get("$.a").json_get_text("$.b");
    assert_eq!(expr.to_sql(), r#"'{"a":{"b":7}}' -> '$.a' ->> '$.b'"#);
    assert_eq!(eval(&expr), Value::Integer(7));
}
