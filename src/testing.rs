//! In-memory stand-in for a Supabase project, for exercising workflows without a network.

use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use serde_json::Value;
use std::{
	cell::{Cell, RefCell},
	collections::{BTreeMap, BTreeSet},
};
use supabase::{
	auth::{AuthUser, Credentials, Session, SignUp},
	AuthApi, BlobStore, Error, Query, RowStore,
};

#[derive(Default)]
pub struct MemoryBackend {
	pub tables: RefCell<BTreeMap<String, Vec<Value>>>,
	pub buckets: RefCell<BTreeMap<String, BTreeSet<String>>>,
	pub accounts: RefCell<BTreeMap<String, String>>,
	pub fail_blob_removal: Cell<bool>,
	/// Auth calls fail as if the network were down.
	pub offline: Cell<bool>,
	pub fail_inserts_with: RefCell<Option<(String, String)>>,
	pub calls: Cell<usize>,
	next_id: Cell<u64>,
}

impl MemoryBackend {
	pub fn with_rows(table: &str, rows: Vec<Value>) -> Self {
		let backend = Self::default();
		backend.tables.borrow_mut().insert(table.to_owned(), rows);
		backend
	}

	pub fn with_blob(self, bucket: &str, name: &str) -> Self {
		self.buckets
			.borrow_mut()
			.entry(bucket.to_owned())
			.or_default()
			.insert(name.to_owned());
		self
	}

	pub fn rows(&self, table: &str) -> Vec<Value> {
		self.tables.borrow().get(table).cloned().unwrap_or_default()
	}

	pub fn blobs(&self, bucket: &str) -> BTreeSet<String> {
		self.buckets.borrow().get(bucket).cloned().unwrap_or_default()
	}

	fn api_error(status: u16, code: &str, message: &str) -> Error {
		Error::Api {
			status,
			code: Some(code.to_owned()),
			message: message.to_owned(),
		}
	}

	fn unreachable() -> Error {
		// a url without a scheme never leaves the builder, which stands in for a dropped connection
		Error::Http(reqwest::Client::new().get("memory.test/offline").build().unwrap_err())
	}

	fn session_for(&self, email: &str) -> Session {
		Session {
			access_token: format!("token:{email}"),
			refresh_token: format!("refresh:{email}"),
			token_type: "bearer".into(),
			expires_in: 3600,
			expires_at: None,
			user: Some(AuthUser {
				id: format!("id:{email}"),
				email: Some(email.to_owned()),
				..Default::default()
			}),
		}
	}

	fn tick(&self) {
		self.calls.set(self.calls.get() + 1);
	}
}

impl RowStore for MemoryBackend {
	fn select<'a>(&'a self, query: &'a Query) -> LocalBoxFuture<'a, Result<Vec<Value>, Error>> {
		self.tick();
		Box::pin(async move {
			let mut rows = self
				.rows(query.table())
				.into_iter()
				.filter(|row| query.matches(row))
				.collect::<Vec<_>>();
			if let Some(order) = query.ordering() {
				rows.sort_by(|a, b| {
					let a = a.get(&order.column).map(Value::to_string).unwrap_or_default();
					let b = b.get(&order.column).map(Value::to_string).unwrap_or_default();
					match order.ascending {
						true => a.cmp(&b),
						false => b.cmp(&a),
					}
				});
			}
			Ok(rows.iter().map(|row| query.project(row)).collect())
		})
	}

	fn insert<'a, T>(&'a self, table: &'a str, rows: &'a [T]) -> LocalBoxFuture<'a, Result<(), Error>>
	where
		T: Serialize + 'a,
	{
		self.tick();
		Box::pin(async move {
			if let Some((code, message)) = self.fail_inserts_with.borrow().clone() {
				return Err(Self::api_error(403, &code, &message));
			}
			let mut tables = self.tables.borrow_mut();
			let stored = tables.entry(table.to_owned()).or_default();
			for row in rows {
				let mut value =
					serde_json::to_value(row).map_err(|err| supabase::InvalidJson(String::new(), err))?;
				if let Value::Object(map) = &mut value {
					let id = self.next_id.get() + 1;
					self.next_id.set(id);
					map.entry("id").or_insert(Value::from(id));
				}
				stored.push(value);
			}
			Ok(())
		})
	}

	fn delete<'a>(&'a self, query: &'a Query) -> LocalBoxFuture<'a, Result<Vec<Value>, Error>> {
		self.tick();
		Box::pin(async move {
			let mut tables = self.tables.borrow_mut();
			let Some(stored) = tables.get_mut(query.table()) else {
				return Ok(Vec::new());
			};
			let (removed, kept): (Vec<Value>, Vec<Value>) = stored.drain(..).partition(|row| query.matches(row));
			*stored = kept;
			Ok(removed)
		})
	}
}

impl BlobStore for MemoryBackend {
	fn upload<'a>(
		&'a self,
		bucket: &'a str,
		name: &'a str,
		_content_type: &'a str,
		_bytes: Vec<u8>,
	) -> LocalBoxFuture<'a, Result<(), Error>> {
		self.tick();
		Box::pin(async move {
			let mut buckets = self.buckets.borrow_mut();
			let objects = buckets.entry(bucket.to_owned()).or_default();
			if !objects.insert(name.to_owned()) {
				return Err(Self::api_error(409, "Duplicate", "The resource already exists"));
			}
			Ok(())
		})
	}

	fn public_url(&self, bucket: &str, name: &str) -> String {
		format!("https://memory.test/storage/v1/object/public/{bucket}/{name}")
	}

	fn remove<'a>(&'a self, bucket: &'a str, names: &'a [String]) -> LocalBoxFuture<'a, Result<Vec<Value>, Error>> {
		self.tick();
		Box::pin(async move {
			if self.fail_blob_removal.get() {
				return Err(Self::api_error(500, "InternalError", "storage is unavailable"));
			}
			let mut buckets = self.buckets.borrow_mut();
			let objects = buckets.entry(bucket.to_owned()).or_default();
			Ok(names
				.iter()
				.filter(|name| objects.remove(name.as_str()))
				.map(|name| serde_json::json!({ "name": name }))
				.collect())
		})
	}
}

impl AuthApi for MemoryBackend {
	fn sign_up<'a>(&'a self, credentials: Credentials<'a>) -> LocalBoxFuture<'a, Result<SignUp, Error>> {
		self.tick();
		Box::pin(async move {
			let mut accounts = self.accounts.borrow_mut();
			if accounts.contains_key(credentials.email) {
				return Err(Self::api_error(422, "user_already_exists", "User already registered"));
			}
			accounts.insert(credentials.email.to_owned(), credentials.password.to_owned());
			Ok(SignUp::PendingConfirmation(AuthUser {
				id: format!("id:{}", credentials.email),
				email: Some(credentials.email.to_owned()),
				..Default::default()
			}))
		})
	}

	fn sign_in_with_password<'a>(&'a self, credentials: Credentials<'a>) -> LocalBoxFuture<'a, Result<Session, Error>> {
		self.tick();
		Box::pin(async move {
			match self.accounts.borrow().get(credentials.email) {
				Some(password) if password == credentials.password => Ok(self.session_for(credentials.email)),
				_ => Err(Self::api_error(400, "invalid_credentials", "Invalid login credentials")),
			}
		})
	}

	fn refresh_session<'a>(&'a self, refresh_token: &'a str) -> LocalBoxFuture<'a, Result<Session, Error>> {
		self.tick();
		Box::pin(async move {
			if self.offline.get() {
				return Err(Self::unreachable());
			}
			match refresh_token.strip_prefix("refresh:") {
				Some(email) if self.accounts.borrow().contains_key(email) => Ok(self.session_for(email)),
				_ => Err(Self::api_error(400, "refresh_token_not_found", "Invalid Refresh Token")),
			}
		})
	}

	fn get_user<'a>(&'a self, access_token: &'a str) -> LocalBoxFuture<'a, Result<AuthUser, Error>> {
		self.tick();
		Box::pin(async move {
			if self.offline.get() {
				return Err(Self::unreachable());
			}
			match access_token.strip_prefix("token:") {
				Some(email) if self.accounts.borrow().contains_key(email) => Ok(AuthUser {
					id: format!("id:{email}"),
					email: Some(email.to_owned()),
					..Default::default()
				}),
				_ => Err(Self::api_error(401, "bad_jwt", "invalid JWT")),
			}
		})
	}

	fn sign_out<'a>(&'a self, _access_token: &'a str) -> LocalBoxFuture<'a, Result<(), Error>> {
		self.tick();
		Box::pin(async move { Ok(()) })
	}

	fn authorize_url(&self, provider: &str, redirect_to: &str, _params: &[(&str, &str)]) -> Result<String, Error> {
		Ok(format!("https://memory.test/auth/v1/authorize?provider={provider}&redirect_to={redirect_to}"))
	}
}
