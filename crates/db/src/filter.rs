//! Dynamic `WHERE` clause builder for listing queries.
//!
//! Conditions are collected with positional placeholders, then the values are
//! bound in the same order on whichever query type runs them.

use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::Postgres;

/// A value waiting to be bound to a placeholder.
#[derive(Debug, Clone)]
pub enum BindValue {
    BigInt(i64),
    Text(String),
    Bool(bool),
}

/// Accumulates `AND`-joined conditions and their bind values.
#[derive(Debug, Default)]
pub struct Filter {
    conditions: Vec<String>,
    values: Vec<BindValue>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next free placeholder index.
    pub fn next_idx(&self) -> usize {
        self.values.len() + 1
    }

    /// Add a condition with one placeholder, written as `{}` in `template`.
    pub fn push(&mut self, template: &str, value: BindValue) {
        let placeholder = format!("${}", self.next_idx());
        self.conditions.push(template.replace("{}", &placeholder));
        self.values.push(value);
    }

    /// `column = $n` when `value` is present.
    pub fn eq_opt(&mut self, column: &str, value: Option<BindValue>) {
        if let Some(value) = value {
            self.push(&format!("{column} = {{}}"), value);
        }
    }

    /// Add a condition that binds nothing.
    pub fn raw(&mut self, condition: impl Into<String>) {
        self.conditions.push(condition.into());
    }

    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn bind_as<'q, O>(
        &'q self,
        mut q: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for val in &self.values {
            q = match val {
                BindValue::BigInt(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
                BindValue::Bool(v) => q.bind(*v),
            };
        }
        q
    }

    pub fn bind_scalar<'q>(
        &'q self,
        mut q: QueryScalar<'q, Postgres, i64, PgArguments>,
    ) -> QueryScalar<'q, Postgres, i64, PgArguments> {
        for val in &self.values {
            q = match val {
                BindValue::BigInt(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
                BindValue::Bool(v) => q.bind(*v),
            };
        }
        q
    }
}
