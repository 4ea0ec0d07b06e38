//! Query description shared by all store implementations

use std::cmp::Ordering;

use serde_json::Value;
use shared::models::Document;

/// Comparison operator of a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// `field <op> value`; dotted fields reach into nested objects
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    /// Documents lacking the field never match, whatever the operator
    pub fn matches(&self, doc: &Document) -> bool {
        let Some(actual) = field_value(doc, &self.field) else {
            return false;
        };
        let ord = || compare_values(actual, &self.value);
        match self.op {
            FilterOp::Eq => values_equal(actual, &self.value),
            FilterOp::Ne => !values_equal(actual, &self.value),
            FilterOp::Lt => ord() == Some(Ordering::Less),
            FilterOp::Le => matches!(ord(), Some(Ordering::Less | Ordering::Equal)),
            FilterOp::Gt => ord() == Some(Ordering::Greater),
            FilterOp::Ge => matches!(ord(), Some(Ordering::Greater | Ordering::Equal)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Filters, ordering and limit for one collection query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Apply the query to an in-memory set of documents
    ///
    /// Ordering excludes documents without the order field and is stable.
    pub fn apply<'a>(&self, docs: impl IntoIterator<Item = &'a Document>) -> Vec<Document> {
        let mut matched: Vec<Document> = docs
            .into_iter()
            .filter(|doc| self.filters.iter().all(|f| f.matches(doc)))
            .filter(|doc| {
                self.order_by
                    .as_ref()
                    .is_none_or(|o| field_value(doc, &o.field).is_some())
            })
            .cloned()
            .collect();

        if let Some(order) = &self.order_by {
            matched.sort_by(|a, b| {
                let ord = match (field_value(a, &order.field), field_value(b, &order.field)) {
                    (Some(x), Some(y)) => compare_values(x, y).unwrap_or(Ordering::Equal),
                    _ => Ordering::Equal,
                };
                match order.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }

        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}

fn field_value<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = doc.fields.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, fields: Value) -> Document {
        Document::new(id, fields.as_object().cloned().unwrap_or_default())
    }

    #[test]
    fn test_filter_missing_field_never_matches() {
        let d = doc("a", json!({ "status": "closed" }));
        assert!(Filter::eq("status", "closed").matches(&d));
        assert!(!Filter::new("closedAt", FilterOp::Ne, "x").matches(&d));
    }

    #[test]
    fn test_filter_nested_and_numeric() {
        let d = doc("a", json!({ "stats": { "cash": 10 } }));
        assert!(Filter::new("stats.cash", FilterOp::Ge, 10.0).matches(&d));
        assert!(Filter::eq("stats.cash", 10.0).matches(&d));
        assert!(!Filter::new("stats.cash", FilterOp::Lt, "10").matches(&d));
    }

    #[test]
    fn test_apply_orders_and_limits() {
        let docs = vec![
            doc("a", json!({ "n": 2 })),
            doc("b", json!({ "n": 3 })),
            doc("c", json!({})),
            doc("d", json!({ "n": 1 })),
        ];
        let out = Query::new().order_by("n", Direction::Desc).limit(2).apply(&docs);
        let ids: Vec<_> = out.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }
}
