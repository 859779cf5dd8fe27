use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// One result row from a cargoquery call, keyed by projected field name.
pub type CargoRow = Map<String, Value>;

/// Filter predicate for a cargoquery `where` clause. Values are escaped
/// when rendered; callers never splice strings into the clause themselves.
#[derive(Debug, Clone)]
pub enum Filter {
    Eq { field: String, value: String },
    AnyOf { field: String, values: Vec<String> },
    Or(Vec<Filter>),
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Membership test over one field. An empty value list renders to a
    /// clause that matches nothing.
    pub fn any_of(field: impl Into<String>, values: &[String]) -> Self {
        Filter::AnyOf {
            field: field.into(),
            values: values.to_vec(),
        }
    }

    pub fn or(parts: Vec<Filter>) -> Self {
        Filter::Or(parts)
    }

    pub fn and(parts: Vec<Filter>) -> Self {
        Filter::And(parts)
    }

    pub fn render(&self) -> String {
        match self {
            Filter::Eq { field, value } => format!("{field}=\"{}\"", escape_value(value)),
            Filter::AnyOf { field, values } => {
                if values.is_empty() {
                    return "1=0".to_string();
                }
                let parts: Vec<String> = values
                    .iter()
                    .map(|value| format!("{field}=\"{}\"", escape_value(value)))
                    .collect();
                format!("({})", parts.join(" OR "))
            }
            Filter::Or(parts) => {
                let rendered: Vec<String> = parts.iter().map(Filter::render).collect();
                format!("({})", rendered.join(" OR "))
            }
            Filter::And(parts) => {
                let rendered: Vec<String> = parts.iter().map(Filter::render).collect();
                rendered.join(" AND ")
            }
        }
    }
}

fn escape_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Builder for an `action=cargoquery` request.
#[derive(Debug, Clone)]
pub struct CargoQuery {
    tables: String,
    fields: String,
    join_on: Option<String>,
    filter: Option<Filter>,
    group_by: Option<String>,
    order_by: Option<String>,
    limit: Option<u32>,
}

impl CargoQuery {
    pub fn new(tables: &str, fields: &str) -> Self {
        Self {
            tables: tables.to_string(),
            fields: fields.to_string(),
            join_on: None,
            filter: None,
            group_by: None,
            order_by: None,
            limit: None,
        }
    }

    pub fn join_on(mut self, join_on: &str) -> Self {
        self.join_on = Some(join_on.to_string());
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn group_by(mut self, group_by: &str) -> Self {
        self.group_by = Some(group_by.to_string());
        self
    }

    pub fn order_by(mut self, order_by: &str) -> Self {
        self.order_by = Some(order_by.to_string());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("action".to_string(), "cargoquery".to_string()),
            ("format".to_string(), "json".to_string()),
            ("tables".to_string(), self.tables.clone()),
            ("fields".to_string(), self.fields.clone()),
        ];
        if let Some(join_on) = &self.join_on {
            params.push(("join_on".to_string(), join_on.clone()));
        }
        if let Some(filter) = &self.filter {
            params.push(("where".to_string(), filter.render()));
        }
        if let Some(group_by) = &self.group_by {
            params.push(("group_by".to_string(), group_by.clone()));
        }
        if let Some(order_by) = &self.order_by {
            params.push(("order_by".to_string(), order_by.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

pub fn parse_cargo_rows(raw: &str) -> Result<Vec<CargoRow>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }

    let root: Value = serde_json::from_str(trimmed).context("invalid cargoquery json")?;
    if let Some(error) = root.get("error") {
        let info = error
            .get("info")
            .and_then(Value::as_str)
            .unwrap_or("unknown cargo error");
        anyhow::bail!("cargoquery error: {info}");
    }

    let mut rows = Vec::new();
    if let Some(items) = root.get("cargoquery").and_then(Value::as_array) {
        for item in items {
            if let Some(Value::Object(title)) = item.get("title") {
                rows.push(title.clone());
            }
        }
    }
    Ok(rows)
}

pub fn row_to<T: DeserializeOwned>(row: &CargoRow) -> Result<T> {
    serde_json::from_value(Value::Object(row.clone())).context("row decode failed")
}
