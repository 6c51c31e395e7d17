//! Function calls and a catalog of common SQLite functions.

use crate::precedence;
use crate::shared::Text;
use crate::snapshot::{Freezer, Snapshot};
use crate::writer::{Render, SqlWriter};

use super::literal::IntoExpr;
use super::{Expr, Node};

/// Function arguments.
#[derive(Debug, Clone)]
pub enum FunctionArgs {
    /// The `*` marker of `count(*)`.
    Star,
    /// Ordered argument list (may be empty).
    List(Vec<Expr>),
}

/// A function call: `name([DISTINCT] args)`.
#[derive(Debug, Clone)]
pub struct FunctionCall {
    /// Function name.
    pub name: Text,
    /// Whether DISTINCT was specified (single-argument aggregates only).
    pub distinct: bool,
    /// Arguments.
    pub args: FunctionArgs,
}

impl Render for FunctionCall {
    fn render(&self, w: &mut SqlWriter) {
        self.name.with(|name| w.function_name(name));
        w.push('(');
        if self.distinct {
            w.push_str("DISTINCT ");
        }
        match &self.args {
            FunctionArgs::Star => w.push('*'),
            FunctionArgs::List(args) => w.comma_separated(args, precedence::LOWEST),
        }
        w.push(')');
    }
}

impl Snapshot for FunctionArgs {
    fn snapshot(&self) -> Option<Self> {
        match self {
            Self::Star => None,
            Self::List(args) => args.snapshot().map(Self::List),
        }
    }
}

impl Snapshot for FunctionCall {
    fn snapshot(&self) -> Option<Self> {
        let mut freezer = Freezer::new();
        let name = freezer.take(&self.name);
        let args = freezer.take(&self.args);
        freezer.finish(|| Self {
            name,
            distinct: self.distinct,
            args,
        })
    }
}

/// Function call constructors.
pub struct Function;

impl Function {
    /// Creates a call `name(args...)`.
    #[must_use]
    pub fn call<I>(name: impl Into<Text>, args: I) -> Expr
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        Self::build(
            name.into(),
            false,
            FunctionArgs::List(args.into_iter().map(IntoExpr::into_expr).collect()),
        )
    }

    /// Creates a single-argument aggregate call `name(DISTINCT arg)`.
    #[must_use]
    pub fn distinct(name: impl Into<Text>, arg: impl IntoExpr) -> Expr {
        Self::build(name.into(), true, FunctionArgs::List(vec![arg.into_expr()]))
    }

    fn build(name: Text, distinct: bool, args: FunctionArgs) -> Expr {
        Expr::new(Node::Function(FunctionCall {
            name,
            distinct,
            args,
        }))
    }
}

/// `count(*)`
#[must_use]
pub fn count_star() -> Expr {
    Function::build(Text::from("count"), false, FunctionArgs::Star)
}

/// `count(x)`
#[must_use]
pub fn count(x: impl IntoExpr) -> Expr {
    Function::call("count", [x.into_expr()])
}

/// `count(DISTINCT x)`
#[must_use]
pub fn count_distinct(x: impl IntoExpr) -> Expr {
    Function::distinct("count", x)
}

macro_rules! unary_functions {
    ($($(#[$doc:meta])* $fn_name:ident => $sql_name:literal;)+) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $fn_name(x: impl IntoExpr) -> Expr {
                Function::call($sql_name, [x.into_expr()])
            }
        )+
    };
}

unary_functions! {
    /// `sum(x)`
    sum => "sum";
    /// `total(x)`
    total => "total";
    /// `avg(x)`
    avg => "avg";
    /// `min(x)` (aggregate)
    min => "min";
    /// `max(x)` (aggregate)
    max => "max";
    /// `abs(x)`
    abs => "abs";
    /// `length(x)`
    length => "length";
    /// `lower(x)`
    lower => "lower";
    /// `upper(x)`
    upper => "upper";
    /// `trim(x)`
    trim => "trim";
    /// `typeof(x)`
    type_of => "typeof";
    /// `hex(x)`
    hex => "hex";
    /// `quote(x)`
    quote => "quote";
    /// `json(x)`
    json => "json";
    /// `date(x)`
    date => "date";
    /// `datetime(x)`
    datetime => "datetime";
    /// `julianday(x)`
    julianday => "julianday";
}

/// `coalesce(a, b, ...)`
#[must_use]
pub fn coalesce<I>(args: I) -> Expr
where
    I: IntoIterator,
    I::Item: IntoExpr,
{
    Function::call("coalesce", args)
}

/// `ifnull(x, y)`
#[must_use]
pub fn ifnull(x: impl IntoExpr, y: impl IntoExpr) -> Expr {
    Function::call("ifnull", [x.into_expr(), y.into_expr()])
}

/// `nullif(x, y)`
#[must_use]
pub fn nullif(x: impl IntoExpr, y: impl IntoExpr) -> Expr {
    Function::call("nullif", [x.into_expr(), y.into_expr()])
}

/// `round(x, digits)`
#[must_use]
pub fn round(x: impl IntoExpr, digits: impl IntoExpr) -> Expr {
    Function::call("round", [x.into_expr(), digits.into_expr()])
}

/// `substr(x, start, len)`
#[must_use]
pub fn substr(x: impl IntoExpr, start: impl IntoExpr, len: impl IntoExpr) -> Expr {
    Function::call("substr", [x.into_expr(), start.into_expr(), len.into_expr()])
}

/// `replace(x, from, to)`
#[must_use]
pub fn replace(x: impl IntoExpr, from: impl IntoExpr, to: impl IntoExpr) -> Expr {
    Function::call("replace", [x.into_expr(), from.into_expr(), to.into_expr()])
}

/// `group_concat(x, separator)`
#[must_use]
pub fn group_concat(x: impl IntoExpr, separator: impl IntoExpr) -> Expr {
    Function::call("group_concat", [x.into_expr(), separator.into_expr()])
}

/// `strftime(format, time)`
#[must_use]
pub fn strftime(format: impl IntoExpr, time: impl IntoExpr) -> Expr {
    Function::call("strftime", [format.into_expr(), time.into_expr()])
}

/// `json_extract(json, path)`
#[must_use]
pub fn json_extract(json: impl IntoExpr, path: impl IntoExpr) -> Expr {
    Function::call("json_extract", [json.into_expr(), path.into_expr()])
}

/// `random()`
#[must_use]
pub fn random() -> Expr {
    Function::call("random", Vec::<Expr>::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::col;
    use crate::settings::{IdentifierQuoting, Settings};
    use crate::shared::SharedText;

    #[test]
    fn test_count_forms() {
        assert_eq!(count_star().to_sql(), "count(*)");
        assert_eq!(count(col("id")).to_sql(), "count(id)");
        assert_eq!(count_distinct(col("email")).to_sql(), "count(DISTINCT email)");
    }

    #[test]
    fn test_arguments_render_unparenthesized() {
        let expr = coalesce([col("a").plus(1), col("b").or(col("c"))]);
        assert_eq!(expr.to_sql(), "coalesce(a + 1, b OR c)");
    }

    #[test]
    fn test_zero_argument_call() {
        assert_eq!(random().to_sql(), "random()");
    }

    #[test]
    fn test_keyword_named_function_stays_bare() {
        assert_eq!(
            replace(col("name"), "a", "b").to_sql(),
            "replace(name, 'a', 'b')"
        );
    }

    #[test]
    fn test_reserved_function_name_is_quoted() {
        assert_eq!(Function::call("select", [1]).to_sql(), "\"select\"(1)");
        assert_eq!(Function::call("ORDER", [col("a")]).to_sql(), "\"ORDER\"(a)");
    }

    #[test]
    fn test_function_name_follows_quoting_setting() {
        let settings = Settings::new().identifier_quoting(IdentifierQuoting::Always);
        assert_eq!(
            replace(col("name"), "a", "b").to_sql_with(settings),
            "\"replace\"(\"name\", 'a', 'b')"
        );
        assert_eq!(count_star().to_sql_with(settings), "\"count\"(*)");
    }

    #[test]
    fn test_unusual_function_name_is_quoted() {
        assert_eq!(Function::call("my func", [1]).to_sql(), "\"my func\"(1)");
    }

    #[test]
    fn test_function_snapshot() {
        let buffer = SharedText::new("upper");
        let expr = Function::call(&buffer, [col("name")]);
        let frozen = expr.copy();
        buffer.replace("lower");
        assert_eq!(frozen.to_sql(), "upper(name)");
        assert_eq!(expr.to_sql(), "lower(name)");
        assert!(Expr::ptr_eq(&frozen.copy(), &frozen));
    }
}
