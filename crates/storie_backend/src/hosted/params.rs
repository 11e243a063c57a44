//! Query-string encoding for the records API.
//!
//! Filters use `column=eq.value`; ordering uses `order=column.asc|desc`.

use storie_interface::{Filter, Query};

/// Encode equality filters as query parameters.
///
/// # Examples
///
/// ```
/// use storie_backend::filter_params;
/// use storie_interface::Filter;
///
/// let params = filter_params(&[Filter::Eq("id".into(), "42".into())]);
/// assert_eq!(params, vec![("id".to_string(), "eq.42".to_string())]);
/// ```
pub fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|filter| match filter {
            Filter::Eq(column, value) => (column.clone(), format!("eq.{}", value)),
        })
        .collect()
}

/// Encode a full select query as query parameters.
pub fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params = filter_params(&query.filters);
    if let Some(order) = &query.order {
        params.push((
            "order".to_string(),
            format!("{}.{}", order.column, order.direction),
        ));
    }
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    params
}
