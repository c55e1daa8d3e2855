use super::types::{BindValue, Predicate, RenderedPredicates};

/// Turns accumulated predicates into a parameterized SQL conjunction.
///
/// Placeholders are numbered from `starting_param_index + 1` so the rendered
/// fragment can be appended to a statement that already carries bind values.
pub struct PredicateRenderer {
    params: Vec<BindValue>,
    param_index: usize,
}

impl PredicateRenderer {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            params: vec![],
            param_index: starting_param_index,
        }
    }

    /// Render all predicates joined with AND. An empty predicate list yields
    /// an empty clause and no bind values.
    pub fn generate(predicates: &[Predicate], starting_param_index: usize) -> RenderedPredicates {
        let mut renderer = Self::new(starting_param_index);
        let fragments: Vec<String> = predicates
            .iter()
            .map(|p| renderer.render_predicate(p))
            .collect();

        RenderedPredicates {
            clause: fragments.join(" AND "),
            params: renderer.params,
        }
    }

    fn render_predicate(&mut self, predicate: &Predicate) -> String {
        match predicate {
            Predicate::EqualsSlug { column, slug } => {
                format!("{} = {}", column, self.param(BindValue::Text(slug.clone())))
            }
            Predicate::RangeGte { column, bound } => {
                format!("{} >= {}", column, self.param(BindValue::Number(*bound)))
            }
            Predicate::RangeLte { column, bound } => {
                format!("{} <= {}", column, self.param(BindValue::Number(*bound)))
            }
            Predicate::SubstringAnyOf { columns, term } => {
                // One wildcard-wrapped bind per column reference; the term is
                // never spliced into the statement text.
                let pattern = format!("%{}%", term);
                let alternatives: Vec<String> = columns
                    .iter()
                    .map(|column| {
                        format!("{} ILIKE {}", column, self.param(BindValue::Text(pattern.clone())))
                    })
                    .collect();
                format!("({})", alternatives.join(" OR "))
            }
            Predicate::Flag { column } => format!("{} = TRUE", column),
        }
    }

    fn param(&mut self, value: BindValue) -> String {
        self.params.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn no_predicates_renders_empty_clause() {
        let rendered = PredicateRenderer::generate(&[], 0);
        assert!(rendered.clause.is_empty());
        assert!(rendered.params.is_empty());
    }

    #[test]
    fn slug_and_range_predicates_are_conjoined_in_order() {
        let predicates = vec![
            Predicate::EqualsSlug { column: "c.slug", slug: "phones".into() },
            Predicate::RangeGte {
                column: "p.price",
                bound: Decimal::from_str("10.50").unwrap(),
            },
        ];
        let rendered = PredicateRenderer::generate(&predicates, 0);
        assert_eq!(rendered.clause, "c.slug = $1 AND p.price >= $2");
        assert_eq!(
            rendered.params,
            vec![
                BindValue::Text("phones".into()),
                BindValue::Number(Decimal::from_str("10.50").unwrap()),
            ]
        );
    }

    #[test]
    fn substring_search_renders_one_or_group_with_wildcards() {
        let predicates = vec![Predicate::SubstringAnyOf {
            columns: &["p.name", "p.description", "b.name"],
            term: "Pro".into(),
        }];
        let rendered = PredicateRenderer::generate(&predicates, 0);
        assert_eq!(
            rendered.clause,
            "(p.name ILIKE $1 OR p.description ILIKE $2 OR b.name ILIKE $3)"
        );
        assert_eq!(
            rendered.params,
            vec![
                BindValue::Text("%Pro%".into()),
                BindValue::Text("%Pro%".into()),
                BindValue::Text("%Pro%".into()),
            ]
        );
    }

    #[test]
    fn flag_predicate_binds_nothing() {
        let rendered =
            PredicateRenderer::generate(&[Predicate::Flag { column: "p.is_featured" }], 0);
        assert_eq!(rendered.clause, "p.is_featured = TRUE");
        assert!(rendered.params.is_empty());
    }

    #[test]
    fn placeholder_numbering_continues_from_starting_index() {
        let predicates = vec![Predicate::EqualsSlug { column: "b.slug", slug: "acme".into() }];
        let rendered = PredicateRenderer::generate(&predicates, 3);
        assert_eq!(rendered.clause, "b.slug = $4");
    }
}
