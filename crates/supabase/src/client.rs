use reqwest::{Method, RequestBuilder};

/// Handle to a single Supabase project.
///
/// Requests are authorized with the project's publishable key unless the client
/// has been bound to a signed-in user via [`Client::with_access_token`].
#[derive(Clone, Debug)]
pub struct Client {
	http: reqwest::Client,
	url: String,
	key: String,
	access_token: Option<String>,
}

impl PartialEq for Client {
	fn eq(&self, other: &Self) -> bool {
		self.url == other.url && self.key == other.key && self.access_token == other.access_token
	}
}

impl Client {
	pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
		let url: String = url.into();
		Self {
			http: reqwest::Client::new(),
			url: url.trim_end_matches('/').to_owned(),
			key: key.into(),
			access_token: None,
		}
	}

	pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(token.into());
		self
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn access_token(&self) -> Option<&str> {
		self.access_token.as_deref()
	}

	pub fn endpoint(&self, path: &str) -> String {
		format!("{}{path}", self.url)
	}

	pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
		let bearer = self.access_token.as_deref().unwrap_or(&self.key);
		self.request_with_token(method, path, bearer)
	}

	pub(crate) fn request_with_token(&self, method: Method, path: &str, bearer: &str) -> RequestBuilder {
		let mut builder = self.http.request(method, self.endpoint(path));
		builder = builder.header("apikey", &self.key);
		builder = builder.bearer_auth(bearer);
		builder
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn trailing_slash_is_trimmed() {
		let client = Client::new("https://example.supabase.co/", "anon");
		assert_eq!(client.url(), "https://example.supabase.co");
		assert_eq!(client.endpoint("/rest/v1/items"), "https://example.supabase.co/rest/v1/items");
	}

	#[test]
	fn access_token_distinguishes_clients() {
		let anon = Client::new("https://example.supabase.co", "anon");
		let user = anon.clone().with_access_token("jwt");
		assert_eq!(user.access_token(), Some("jwt"));
		assert_ne!(anon, user);
	}
}
