//! Operator precedence levels, following SQLite's grammar.
//!
//! Higher values bind tighter. A fragment rendered where at least level `T`
//! is required is wrapped in parentheses when its own level is below `T`.
//!
//! See <https://www.sqlite.org/lang_expr.html#operators_and_parse_affecting_attributes>.

/// Threshold for fragments inside self-delimiting syntax (argument lists,
/// CASE arms, clause bodies). Nothing is ever wrapped at this level.
pub const LOWEST: u8 = 0;
/// `OR`
pub const OR: u8 = 1;
/// `AND`
pub const AND: u8 = 2;
/// Prefix `NOT`
pub const NOT: u8 = 3;
/// `=` `<>` `IS` `IS NOT` `ISNULL` `NOTNULL` `BETWEEN` `IN` `LIKE` `GLOB`
/// `REGEXP` `MATCH`
pub const EQUALITY: u8 = 4;
/// `<` `<=` `>` `>=`
pub const COMPARISON: u8 = 5;
/// `<<` `>>` `&` `|`
pub const BITWISE: u8 = 6;
/// `+` `-`
pub const ADDITIVE: u8 = 7;
/// `*` `/` `%`
pub const MULTIPLICATIVE: u8 = 8;
/// `||` `->` `->>`
pub const CONCAT: u8 = 9;
/// `COLLATE`
pub const COLLATE: u8 = 10;
/// Prefix `+` `-` `~`, and signed numeric literals.
pub const UNARY: u8 = 11;
/// Literals, column references, and every self-delimiting form.
pub const ATOMIC: u8 = 12;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        let levels = [
            LOWEST,
            OR,
            AND,
            NOT,
            EQUALITY,
            COMPARISON,
            BITWISE,
            ADDITIVE,
            MULTIPLICATIVE,
            CONCAT,
            COLLATE,
            UNARY,
            ATOMIC,
        ];
        assert!(levels.windows(2).all(|w| w[0] < w[1]));
    }
}
