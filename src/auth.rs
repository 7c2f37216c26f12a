use crate::{
	config::{OAUTH_CALLBACK_PATH, OAUTH_PROVIDER},
	data::User,
	session::SessionValue,
};
use supabase::{
	auth::{Credentials, Session, SignUp},
	AuthApi,
};
use gloo_timers::callback::Timeout;
use yew::prelude::*;
use yewdux::prelude::*;

/// Who is using the app. Views subscribe to this store to react to sign in and sign out.
#[derive(Debug, Clone, PartialEq, Default, Store)]
pub enum Status {
	/// The stored session has not been checked yet.
	#[default]
	Initializing,
	Anonymous,
	Successful { session: Session, user: User },
}

impl Status {
	pub fn is_initializing(&self) -> bool {
		matches!(self, Self::Initializing)
	}

	pub fn user(&self) -> Option<&User> {
		match self {
			Self::Successful { user, .. } => Some(user),
			_ => None,
		}
	}

	pub fn session(&self) -> Option<&Session> {
		match self {
			Self::Successful { session, .. } => Some(session),
			_ => None,
		}
	}

	pub fn establish(session: Session, user: User) {
		log::info!(target: "auth", "signed in as {}", user.email);
		session.save();
		Dispatch::<Self>::new().set(Self::Successful { session, user });
	}

	pub fn clear() {
		Session::delete();
		Dispatch::<Self>::new().set(Self::Anonymous);
	}
}

/// Attaches the user profile to a fresh session, fetching it when the payload didn't include it.
pub async fn complete_session<A>(auth: &A, session: Session, now: u64) -> Result<(Session, User), supabase::Error>
where
	A: AuthApi + ?Sized,
{
	let mut session = session.stamp_expiry(now);
	let auth_user = match session.user.clone() {
		Some(user) => user,
		None => auth.get_user(&session.access_token).await?,
	};
	let user = User::from(&auth_user);
	session.user = Some(auth_user);
	Ok((session, user))
}

/// Seconds before expiry at which the access token is renewed.
pub static REFRESH_MARGIN_SECS: u64 = 60;
/// Wait between attempts while the auth service can't be reached.
pub static REFRESH_RETRY_SECS: u64 = 15;

/// Trades the session's refresh token for a new session.
pub async fn refresh<A>(auth: &A, session: &Session, now: u64) -> Result<(Session, User), supabase::Error>
where
	A: AuthApi + ?Sized,
{
	let session = auth.refresh_session(&session.refresh_token).await?;
	complete_session(auth, session, now).await
}

/// Seconds to wait before renewing `session`, or `None` if it never expires.
/// After a failed attempt the wait is at least [`REFRESH_RETRY_SECS`].
pub fn refresh_delay(session: &Session, now: u64, failures: u32) -> Option<u64> {
	let renew_at = session.expires_at?.saturating_sub(REFRESH_MARGIN_SECS);
	let delay = renew_at.saturating_sub(now);
	Some(match failures {
		0 => delay,
		_ => delay.max(REFRESH_RETRY_SECS),
	})
}

#[derive(Debug, Clone, PartialEq)]
pub enum Restored {
	/// Nothing was stored.
	Missing,
	Valid(Session, User),
	/// The service turned the stored session down. It must be forgotten.
	Rejected,
	/// The service couldn't be reached. Carries the stored session when it has a profile to show.
	Unreachable(Option<(Session, User)>),
}

/// Validates a persisted session, refreshing it if the access token has expired.
pub async fn restore<A>(auth: &A, stored: Option<Session>, now: u64) -> Restored
where
	A: AuthApi + ?Sized,
{
	let Some(stored) = stored else {
		return Restored::Missing;
	};
	let result = match stored.is_expired(now) {
		true => refresh(auth, &stored, now).await,
		false => {
			let mut session = stored.clone();
			// the stored profile may be stale, always re-fetch it
			session.user = None;
			complete_session(auth, session, now).await
		}
	};
	match result {
		Ok((session, user)) => Restored::Valid(session, user),
		Err(err) if err.is_rejection() => {
			log::warn!(target: "auth", "Stored session rejected: {err}");
			Restored::Rejected
		}
		Err(err) => {
			log::warn!(target: "auth", "Failed to validate stored session: {err}");
			let user = stored.user.as_ref().map(User::from);
			Restored::Unreachable(user.map(|user| (stored, user)))
		}
	}
}

#[hook]
pub fn use_session_restore() {
	let backend = crate::backend::use_backend();
	use_effect_with((), move |_| {
		wasm_bindgen_futures::spawn_local(async move {
			let stored = Session::load();
			let restored = restore(&*backend, stored, crate::util::unix_seconds()).await;
			// an OAuth callback may have signed the user in while this was in flight
			if !Dispatch::<Status>::new().get().is_initializing() {
				return;
			}
			match restored {
				Restored::Valid(session, user) | Restored::Unreachable(Some((session, user))) => {
					Status::establish(session, user)
				}
				Restored::Rejected => Status::clear(),
				Restored::Missing | Restored::Unreachable(None) => Dispatch::<Status>::new().set(Status::Anonymous),
			}
		});
	});
}

/// Renews the signed in session shortly before its access token expires.
#[hook]
pub fn use_session_refresh() {
	let backend = crate::backend::use_backend();
	let status = use_store_value::<Status>();
	let failures = use_state_eq(|| 0u32);
	let session = status.session().cloned();
	use_effect_with((session, *failures), move |(session, attempt)| {
		let attempt = *attempt;
		let timeout = session.clone().and_then(|session| {
			let delay = refresh_delay(&session, crate::util::unix_seconds(), attempt)?;
			let millis = u32::try_from(delay.saturating_mul(1_000)).unwrap_or(u32::MAX);
			log::debug!(target: "auth", "refreshing session in {delay}s");
			Some(Timeout::new(millis, move || {
				wasm_bindgen_futures::spawn_local(async move {
					let result = refresh(&*backend, &session, crate::util::unix_seconds()).await;
					// signed out or signed in again while this was in flight
					let current = Dispatch::<Status>::new().get();
					if current.session().map(|current| &current.refresh_token) != Some(&session.refresh_token) {
						return;
					}
					match result {
						Ok((session, user)) => {
							failures.set(0);
							Status::establish(session, user);
						}
						Err(err) if err.is_rejection() => {
							log::warn!(target: "auth", "Session refresh rejected: {err}");
							Status::clear();
						}
						Err(err) => {
							log::warn!(target: "auth", "Session refresh failed, retrying: {err}");
							failures.set(attempt + 1);
						}
					}
				});
			}))
		});
		move || drop(timeout)
	});
}

pub async fn sign_up_with_email<A>(auth: &A, email: &str, password: &str) -> Result<SignUp, supabase::Error>
where
	A: AuthApi + ?Sized,
{
	auth.sign_up(Credentials { email, password }).await
}

pub async fn sign_in_with_email<A>(auth: &A, email: &str, password: &str) -> Result<Session, supabase::Error>
where
	A: AuthApi + ?Sized,
{
	auth.sign_in_with_password(Credentials { email, password }).await
}

/// Where the browser goes to sign in with Google. The provider sends the user back to the callback route.
pub fn sign_in_with_google<A>(auth: &A, origin: &str) -> Result<String, supabase::Error>
where
	A: AuthApi + ?Sized,
{
	let redirect_to = format!("{}{OAUTH_CALLBACK_PATH}", origin.trim_end_matches('/'));
	auth.authorize_url(
		OAUTH_PROVIDER,
		&redirect_to,
		&[("access_type", "offline"), ("prompt", "consent")],
	)
}

pub async fn sign_out<A>(auth: &A, session: Option<&Session>)
where
	A: AuthApi + ?Sized,
{
	let Some(session) = session else {
		return;
	};
	if let Err(err) = auth.sign_out(&session.access_token).await {
		log::warn!(target: "auth", "Sign out request failed: {err}");
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
	#[default]
	SignIn,
	SignUp,
}

/// State of the email/password form on the sign in page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CredentialsForm {
	pub email: String,
	pub password: String,
	pub mode: Mode,
	pub is_loading: bool,
	pub error: Option<String>,
	pub notice: Option<String>,
}

pub static VERIFICATION_SENT: &str = "Check your email! Verification link sent.";

impl CredentialsForm {
	pub fn toggle_mode(&mut self) {
		self.mode = match self.mode {
			Mode::SignIn => Mode::SignUp,
			Mode::SignUp => Mode::SignIn,
		};
		self.error = None;
		self.notice = None;
	}

	pub fn begin(&mut self) {
		self.is_loading = true;
		self.error = None;
		self.notice = None;
	}

	/// Applies the service's answer. Errors are shown exactly as the service worded them.
	/// Returns the session to establish, if any.
	pub fn settle(&mut self, result: Result<Option<Session>, supabase::Error>) -> Option<Session> {
		self.is_loading = false;
		match result {
			Ok(Some(session)) => Some(session),
			Ok(None) => {
				self.notice = Some(VERIFICATION_SENT.to_owned());
				self.email.clear();
				self.password.clear();
				None
			}
			Err(err) => {
				self.error = Some(err.to_string());
				None
			}
		}
	}
}

/// Runs the form's current mode against the auth service.
/// `Ok(None)` means the account was created and is waiting for email confirmation.
pub async fn submit<A>(auth: &A, mode: Mode, email: &str, password: &str) -> Result<Option<Session>, supabase::Error>
where
	A: AuthApi + ?Sized,
{
	match mode {
		Mode::SignIn => Ok(Some(sign_in_with_email(auth, email, password).await?)),
		Mode::SignUp => match sign_up_with_email(auth, email, password).await? {
			SignUp::Session(session) => Ok(Some(session)),
			SignUp::PendingConfirmation(_) => Ok(None),
		},
	}
}
