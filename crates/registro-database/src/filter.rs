//! Translation of declarative filters into store predicates.

use registro_core::types::{Filter, FilterField, FilterOp, FilterValue, Query};

/// Apply every condition of `filter` to `query`, in insertion order.
///
/// Operands are passed through untouched; the store ANDs the predicates.
pub fn apply_filter(query: Query, filter: &Filter) -> Query {
    filter.fields().iter().fold(query, apply_condition)
}

fn apply_condition(query: Query, condition: &FilterField) -> Query {
    let field = condition.field.as_str();
    let value = condition.value.clone();
    match condition.op {
        FilterOp::Eq if value == FilterValue::Null => query.is_null(field),
        FilterOp::Eq => query.eq(field, value),
        FilterOp::Gt => query.gt(field, value),
        FilterOp::Gte => query.gte(field, value),
        FilterOp::Lt => query.lt(field, value),
        FilterOp::Lte => query.lte(field, value),
        FilterOp::Like => query.like(field, value),
        FilterOp::ILike => query.ilike(field, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registro_core::types::FilterMode;
    use serde_json::json;

    #[test]
    fn test_each_operator_maps_to_its_predicate() {
        let filter = Filter::from_json(
            &json!({
                "estado": "activo",
                "edad": {"$gte": 18},
                "precio": {"$lt": 9.5},
                "nombre": {"$ilike": "%an%"},
                "codigo": {"$like": "A_%"},
            }),
            FilterMode::Strict,
        )
        .expect("filter");

        let query = apply_filter(Query::select("productos"), &filter);
        let rendered: Vec<(&str, FilterOp)> = query
            .predicates
            .iter()
            .map(|p| (p.field.as_str(), p.op))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("estado", FilterOp::Eq),
                ("edad", FilterOp::Gte),
                ("precio", FilterOp::Lt),
                ("nombre", FilterOp::ILike),
                ("codigo", FilterOp::Like),
            ]
        );
        assert_eq!(query.predicates[1].value, FilterValue::Integer(18));
    }

    #[test]
    fn test_null_equality_and_empty_filter() {
        let filter = Filter::new().eq("telefono", FilterValue::Null);
        let query = apply_filter(Query::select("personas"), &filter);
        assert_eq!(query, Query::select("personas").is_null("telefono"));

        let untouched = apply_filter(Query::select("personas"), &Filter::new());
        assert!(untouched.predicates.is_empty());
    }
}
