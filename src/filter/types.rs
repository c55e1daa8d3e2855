use rust_decimal::Decimal;

/// A single typed filter condition. Predicates are accumulated by
/// `FilterCriteria` and turned into parameterized SQL by the renderer;
/// user input only ever travels through bind values, never through the
/// statement text.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Column equals a URL-safe slug.
    EqualsSlug { column: &'static str, slug: String },
    /// Column is greater than or equal to a numeric bound.
    RangeGte { column: &'static str, bound: Decimal },
    /// Column is less than or equal to a numeric bound.
    RangeLte { column: &'static str, bound: Decimal },
    /// Case-insensitive substring match against any of the given columns,
    /// combined as a single OR group.
    SubstringAnyOf {
        columns: &'static [&'static str],
        term: String,
    },
    /// Boolean column must be true. Renders as a literal, no bind value.
    Flag { column: &'static str },
}

/// Positional bind value paired with a `$n` placeholder in rendered SQL.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Number(Decimal),
    Integer(i64),
}

/// Rendered WHERE fragment plus its bind values, in placeholder order.
#[derive(Debug, Clone)]
pub struct RenderedPredicates {
    pub clause: String,
    pub params: Vec<BindValue>,
}
