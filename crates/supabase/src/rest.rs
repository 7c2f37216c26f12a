use crate::{Client, Error, Response};
use futures_util::future::LocalBoxFuture;
use itertools::Itertools;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Table access through PostgREST.
pub trait RowStore {
	/// Rows matching the query, projected to its columns.
	fn select<'a>(&'a self, query: &'a Query) -> LocalBoxFuture<'a, Result<Vec<Value>, Error>>;

	fn insert<'a, T>(&'a self, table: &'a str, rows: &'a [T]) -> LocalBoxFuture<'a, Result<(), Error>>
	where
		T: Serialize + 'a;

	/// Deletes the rows matching the query filters and returns the rows that were removed.
	/// Rows hidden by row-level security are never part of the result.
	fn delete<'a>(&'a self, query: &'a Query) -> LocalBoxFuture<'a, Result<Vec<Value>, Error>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
	pub column: String,
	pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
	pub column: String,
	pub ascending: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
	table: String,
	columns: Vec<String>,
	filters: Vec<Filter>,
	order: Option<Order>,
}

impl Query {
	pub fn from(table: impl Into<String>) -> Self {
		Self {
			table: table.into(),
			columns: Vec::new(),
			filters: Vec::new(),
			order: None,
		}
	}

	/// Comma separated column list. `*` (or never calling this) selects every column.
	pub fn select(mut self, columns: &str) -> Self {
		self.columns = columns
			.split(',')
			.map(str::trim)
			.filter(|column| !column.is_empty() && *column != "*")
			.map(str::to_owned)
			.collect();
		self
	}

	pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
		self.filters.push(Filter {
			column: column.into(),
			value: value.to_string(),
		});
		self
	}

	pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
		self.order = Some(Order {
			column: column.into(),
			ascending,
		});
		self
	}

	pub fn table(&self) -> &str {
		&self.table
	}

	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	pub fn filters(&self) -> &[Filter] {
		&self.filters
	}

	pub fn ordering(&self) -> Option<&Order> {
		self.order.as_ref()
	}

	/// The query string PostgREST expects for this query.
	pub fn params(&self) -> Vec<(String, String)> {
		let mut params = Vec::with_capacity(self.filters.len() + 2);
		let columns = match self.columns.is_empty() {
			true => "*".to_owned(),
			false => self.columns.iter().join(","),
		};
		params.push(("select".to_owned(), columns));
		for filter in &self.filters {
			params.push((filter.column.clone(), format!("eq.{}", filter.value)));
		}
		if let Some(order) = &self.order {
			let direction = if order.ascending { "asc" } else { "desc" };
			params.push(("order".to_owned(), format!("{}.{direction}", order.column)));
		}
		params
	}

	/// Evaluates the equality filters against a row.
	pub fn matches(&self, row: &Value) -> bool {
		self.filters.iter().all(|filter| match row.get(&filter.column) {
			Some(Value::String(value)) => *value == filter.value,
			Some(Value::Null) | None => false,
			Some(value) => value.to_string() == filter.value,
		})
	}

	/// Keeps only the selected columns of a row.
	pub fn project(&self, row: &Value) -> Value {
		if self.columns.is_empty() {
			return row.clone();
		}
		let mut projected = serde_json::Map::new();
		for column in &self.columns {
			projected.insert(column.clone(), row.get(column).cloned().unwrap_or(Value::Null));
		}
		Value::Object(projected)
	}

	fn path(&self) -> String {
		format!("/rest/v1/{}", self.table)
	}
}

impl RowStore for Client {
	fn select<'a>(&'a self, query: &'a Query) -> LocalBoxFuture<'a, Result<Vec<Value>, Error>> {
		Box::pin(async move {
			let request = Response::<Vec<Value>>::from(self.request(Method::GET, &query.path()));
			request.with_query(&query.params()).send().await
		})
	}

	fn insert<'a, T>(&'a self, table: &'a str, rows: &'a [T]) -> LocalBoxFuture<'a, Result<(), Error>>
	where
		T: Serialize + 'a,
	{
		Box::pin(async move {
			let request = Response::<()>::from(self.request(Method::POST, &format!("/rest/v1/{table}")));
			let request = request.with_header("Prefer", "return=minimal").with_json(rows);
			log::debug!(target: "supabase", "insert {} row(s) into {table}", rows.len());
			request.send_empty().await
		})
	}

	fn delete<'a>(&'a self, query: &'a Query) -> LocalBoxFuture<'a, Result<Vec<Value>, Error>> {
		Box::pin(async move {
			let params = query.params().into_iter().filter(|(key, _)| key != "select" && key != "order");
			let request = Response::<Vec<Value>>::from(self.request(Method::DELETE, &query.path()));
			let request = request.with_header("Prefer", "return=representation");
			request.with_query(&params.collect::<Vec<_>>()).send().await
		})
	}
}
