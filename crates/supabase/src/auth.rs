use crate::{Client, Error, Response};
use futures_util::future::LocalBoxFuture;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Account management through GoTrue.
pub trait AuthApi {
	fn sign_up<'a>(&'a self, credentials: Credentials<'a>) -> LocalBoxFuture<'a, Result<SignUp, Error>>;

	fn sign_in_with_password<'a>(&'a self, credentials: Credentials<'a>) -> LocalBoxFuture<'a, Result<Session, Error>>;

	fn refresh_session<'a>(&'a self, refresh_token: &'a str) -> LocalBoxFuture<'a, Result<Session, Error>>;

	fn get_user<'a>(&'a self, access_token: &'a str) -> LocalBoxFuture<'a, Result<AuthUser, Error>>;

	fn sign_out<'a>(&'a self, access_token: &'a str) -> LocalBoxFuture<'a, Result<(), Error>>;

	/// Where to send the browser to start an OAuth sign in with `provider`.
	fn authorize_url(&self, provider: &str, redirect_to: &str, params: &[(&str, &str)]) -> Result<String, Error>;
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Credentials<'a> {
	pub email: &'a str,
	pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
	pub access_token: String,
	#[serde(default)]
	pub refresh_token: String,
	#[serde(default = "default_token_type")]
	pub token_type: String,
	#[serde(default)]
	pub expires_in: u64,
	/// Unix timestamp (seconds) the access token stops being valid.
	#[serde(default)]
	pub expires_at: Option<u64>,
	#[serde(default)]
	pub user: Option<AuthUser>,
}

fn default_token_type() -> String {
	"bearer".to_owned()
}

impl Session {
	pub fn is_expired(&self, now_unix: u64) -> bool {
		match self.expires_at {
			Some(expires_at) => expires_at <= now_unix,
			None => false,
		}
	}

	/// Fills in `expires_at` for payloads that only carry `expires_in`.
	pub fn stamp_expiry(mut self, now_unix: u64) -> Self {
		if self.expires_at.is_none() && self.expires_in > 0 {
			self.expires_at = Some(now_unix + self.expires_in);
		}
		self
	}
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthUser {
	pub id: String,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserMetadata {
	#[serde(default)]
	pub full_name: Option<String>,
	#[serde(default)]
	pub avatar_url: Option<String>,
}

/// Result of a sign up. Projects with email confirmation enabled only return the new user.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUp {
	Session(Session),
	PendingConfirmation(AuthUser),
}

impl SignUp {
	pub fn from_json(text: &str) -> Result<Self, Error> {
		let value: serde_json::Value =
			serde_json::from_str(text).map_err(|err| crate::InvalidJson(text.to_owned(), err))?;
		if value.get("access_token").is_some() {
			let session = serde_json::from_value(value).map_err(|err| crate::InvalidJson(text.to_owned(), err))?;
			return Ok(Self::Session(session));
		}
		let user = match value.get("user") {
			Some(user) => serde_json::from_value(user.clone()),
			None => serde_json::from_value(value),
		};
		Ok(Self::PendingConfirmation(user.map_err(|err| crate::InvalidJson(text.to_owned(), err))?))
	}
}

/// Reads the session GoTrue appends to the redirect url after an OAuth sign in,
/// e.g. `#access_token=...&refresh_token=...&expires_in=3600&token_type=bearer`.
pub fn session_from_fragment(fragment: &str) -> Result<Session, Error> {
	let mut pairs = std::collections::HashMap::new();
	for pair in fragment.trim_start_matches('#').split('&') {
		let Some((key, value)) = pair.split_once('=') else {
			continue;
		};
		let value = urlencoding::decode(&value.replace('+', " "))
			.map(|value| value.into_owned())
			.unwrap_or_else(|_| value.to_owned());
		pairs.insert(key.to_owned(), value);
	}
	if let Some(description) = pairs.get("error_description") {
		return Err(Error::Api {
			status: 400,
			code: pairs.get("error_code").or(pairs.get("error")).cloned(),
			message: description.clone(),
		});
	}
	let Some(access_token) = pairs.remove("access_token") else {
		return Err(Error::InvalidSession("access_token"));
	};
	let number = |key: &str| pairs.get(key).and_then(|value| value.parse::<u64>().ok());
	Ok(Session {
		expires_in: number("expires_in").unwrap_or_default(),
		expires_at: number("expires_at"),
		refresh_token: pairs.get("refresh_token").cloned().unwrap_or_default(),
		token_type: pairs.get("token_type").cloned().unwrap_or_else(default_token_type),
		access_token,
		user: None,
	})
}

impl AuthApi for Client {
	fn sign_up<'a>(&'a self, credentials: Credentials<'a>) -> LocalBoxFuture<'a, Result<SignUp, Error>> {
		Box::pin(async move {
			let request = Response::<()>::from(self.request(Method::POST, "/auth/v1/signup"));
			let text = request.with_json(&credentials).send_text().await?;
			SignUp::from_json(&text)
		})
	}

	fn sign_in_with_password<'a>(&'a self, credentials: Credentials<'a>) -> LocalBoxFuture<'a, Result<Session, Error>> {
		Box::pin(async move {
			let request = Response::<Session>::from(self.request(Method::POST, "/auth/v1/token"));
			let request = request.with_query(&[("grant_type", "password")]);
			request.with_json(&credentials).send().await
		})
	}

	fn refresh_session<'a>(&'a self, refresh_token: &'a str) -> LocalBoxFuture<'a, Result<Session, Error>> {
		#[derive(Serialize)]
		struct Body<'a> {
			refresh_token: &'a str,
		}
		Box::pin(async move {
			let request = Response::<Session>::from(self.request(Method::POST, "/auth/v1/token"));
			let request = request.with_query(&[("grant_type", "refresh_token")]);
			request.with_json(&Body { refresh_token }).send().await
		})
	}

	fn get_user<'a>(&'a self, access_token: &'a str) -> LocalBoxFuture<'a, Result<AuthUser, Error>> {
		Box::pin(async move {
			let builder = self.request_with_token(Method::GET, "/auth/v1/user", access_token);
			Response::<AuthUser>::from(builder).send().await
		})
	}

	fn sign_out<'a>(&'a self, access_token: &'a str) -> LocalBoxFuture<'a, Result<(), Error>> {
		Box::pin(async move {
			let builder = self.request_with_token(Method::POST, "/auth/v1/logout", access_token);
			Response::<()>::from(builder).send_empty().await
		})
	}

	fn authorize_url(&self, provider: &str, redirect_to: &str, params: &[(&str, &str)]) -> Result<String, Error> {
		let mut query = vec![("provider", provider), ("redirect_to", redirect_to)];
		query.extend_from_slice(params);
		let url = url::Url::parse_with_params(&self.endpoint("/auth/v1/authorize"), &query)?;
		Ok(url.to_string())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn fragment_with_full_session() {
		let fragment = "#access_token=abc.def&expires_at=1700003600&expires_in=3600&provider_token=g&refresh_token=r1&token_type=bearer&type=signup";
		let session = session_from_fragment(fragment).unwrap();
		assert_eq!(session.access_token, "abc.def");
		assert_eq!(session.refresh_token, "r1");
		assert_eq!(session.expires_in, 3600);
		assert_eq!(session.expires_at, Some(1700003600));
		assert_eq!(session.user, None);
	}

	#[test]
	fn fragment_without_token() {
		let err = session_from_fragment("#type=recovery").unwrap_err();
		assert!(matches!(err, Error::InvalidSession("access_token")));
	}

	#[test]
	fn fragment_with_provider_error() {
		let err = session_from_fragment("#error=access_denied&error_description=User+denied+access").unwrap_err();
		assert_eq!(err.to_string(), "User denied access");
		assert_eq!(err.code(), Some("access_denied"));
	}

	#[test]
	fn expiry_is_stamped_from_expires_in() {
		let session = session_from_fragment("access_token=t&expires_in=60").unwrap().stamp_expiry(1000);
		assert_eq!(session.expires_at, Some(1060));
		assert!(!session.is_expired(1059));
		assert!(session.is_expired(1060));
	}

	#[test]
	fn sign_up_returns_user_when_confirmation_required() {
		let body = r#"{"id":"u1","email":"dev@example.com","user_metadata":{}}"#;
		let SignUp::PendingConfirmation(user) = SignUp::from_json(body).unwrap() else {
			panic!("expected a pending confirmation");
		};
		assert_eq!(user.id, "u1");
		assert_eq!(user.email.as_deref(), Some("dev@example.com"));
	}

	#[test]
	fn sign_up_returns_session_when_autoconfirmed() {
		let body = r#"{"access_token":"t","refresh_token":"r","expires_in":3600,"token_type":"bearer","user":{"id":"u1"}}"#;
		let SignUp::Session(session) = SignUp::from_json(body).unwrap() else {
			panic!("expected a session");
		};
		assert_eq!(session.user.map(|user| user.id), Some("u1".to_owned()));
	}

	#[test]
	fn google_authorize_url() {
		let client = Client::new("https://example.supabase.co", "anon");
		let url = client
			.authorize_url(
				"google",
				"https://mieltecity.dev/auth/callback",
				&[("access_type", "offline"), ("prompt", "consent")],
			)
			.unwrap();
		assert_eq!(
			url,
			"https://example.supabase.co/auth/v1/authorize?provider=google&redirect_to=https%3A%2F%2Fmieltecity.dev%2Fauth%2Fcallback&access_type=offline&prompt=consent"
		);
	}
}
