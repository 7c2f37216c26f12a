use serde::Deserialize;

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error(transparent)]
	Http(#[from] reqwest::Error),
	#[error("{message}")]
	Api {
		status: u16,
		code: Option<String>,
		message: String,
	},
	#[error(transparent)]
	InvalidJson(#[from] InvalidJson),
	#[error(transparent)]
	InvalidUrl(#[from] url::ParseError),
	#[error("Session payload is missing {0:?}")]
	InvalidSession(&'static str),
}

impl Error {
	/// Builds an [`Error::Api`] from a non-success response body.
	///
	/// GoTrue, PostgREST and Storage each shape their error bodies a little
	/// differently, so the first populated message field wins.
	pub fn from_response(status: u16, body: &str) -> Self {
		#[derive(Deserialize, Default)]
		struct Body {
			msg: Option<String>,
			message: Option<String>,
			error_description: Option<String>,
			error: Option<String>,
			error_code: Option<String>,
			code: Option<serde_json::Value>,
		}
		let parsed = serde_json::from_str::<Body>(body).unwrap_or_default();
		let code = parsed.error_code.or(match parsed.code {
			Some(serde_json::Value::String(code)) => Some(code),
			Some(serde_json::Value::Number(code)) => Some(code.to_string()),
			_ => None,
		});
		let message = [parsed.msg, parsed.message, parsed.error_description, parsed.error]
			.into_iter()
			.flatten()
			.find(|msg| !msg.is_empty());
		let message = match message {
			Some(message) => message,
			None if !body.trim().is_empty() => body.trim().to_owned(),
			None => format!("Request failed with status {status}"),
		};
		Self::Api { status, code, message }
	}

	pub fn code(&self) -> Option<&str> {
		match self {
			Self::Api { code, .. } => code.as_deref(),
			_ => None,
		}
	}

	/// True when the service answered and turned the credentials down.
	/// Transport failures and server faults are not rejections; the request may succeed later.
	pub fn is_rejection(&self) -> bool {
		matches!(self, Self::Api { status: 400 | 401 | 403, .. })
	}

	/// True when a row-level security policy rejected the request.
	pub fn is_policy_violation(&self) -> bool {
		match self {
			Self::Api { code, message, .. } => {
				code.as_deref() == Some("42501") || message.to_lowercase().contains("row-level security")
			}
			_ => false,
		}
	}
}

#[derive(thiserror::Error, Debug)]
pub struct InvalidJson(pub String, pub serde_json::Error);
impl std::fmt::Display for InvalidJson {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Invalid json: {:?}\nError: {:?}", self.0, self.1)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn gotrue_error_uses_msg_and_error_code() {
		let body = r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#;
		let err = Error::from_response(422, body);
		assert_eq!(err.to_string(), "User already registered");
		assert_eq!(err.code(), Some("user_already_exists"));
	}

	#[test]
	fn legacy_gotrue_error_uses_description() {
		let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
		let err = Error::from_response(400, body);
		assert_eq!(err.to_string(), "Invalid login credentials");
	}

	#[test]
	fn postgrest_policy_violation() {
		let body = r#"{"code":"42501","details":null,"hint":null,"message":"new row violates row-level security policy for table \"dev_uploads\""}"#;
		let err = Error::from_response(403, body);
		assert_eq!(err.code(), Some("42501"));
		assert!(err.is_policy_violation());
	}

	#[test]
	fn policy_violation_by_message_only() {
		let err = Error::Api {
			status: 400,
			code: None,
			message: "Row-Level Security blocked this".into(),
		};
		assert!(err.is_policy_violation());
	}

	#[test]
	fn storage_error_prefers_message_over_error() {
		let body = r#"{"statusCode":"404","error":"not_found","message":"Object not found"}"#;
		let err = Error::from_response(404, body);
		assert_eq!(err.to_string(), "Object not found");
		assert!(!err.is_policy_violation());
	}

	#[test]
	fn only_answered_auth_failures_are_rejections() {
		let refresh = r#"{"code":400,"error_code":"refresh_token_not_found","msg":"Invalid Refresh Token"}"#;
		assert!(Error::from_response(400, refresh).is_rejection());
		assert!(Error::from_response(401, r#"{"code":401,"msg":"invalid JWT"}"#).is_rejection());
		assert!(!Error::from_response(503, "Service Unavailable").is_rejection());

		let unreachable = reqwest::Client::new().get("no-scheme").build().unwrap_err();
		assert!(!Error::from(unreachable).is_rejection());
	}

	#[test]
	fn non_json_body_is_used_verbatim() {
		assert_eq!(Error::from_response(502, "Bad Gateway\n").to_string(), "Bad Gateway");
		assert_eq!(Error::from_response(500, "").to_string(), "Request failed with status 500");
	}
}
