use crate::{
	auth::Status,
	config::{SUPABASE_KEY, SUPABASE_URL},
};
use std::rc::Rc;
use yew::prelude::*;

/// The client for the current auth status. Signed in users act with their own access token,
/// so row-level security sees who they are.
pub fn get(status: &Status) -> supabase::Client {
	let client = supabase::Client::new(SUPABASE_URL, SUPABASE_KEY);
	match status.session() {
		Some(session) => client.with_access_token(&session.access_token),
		None => client,
	}
}

/// Shared handle to the backend, provided as context at the app root.
#[derive(Clone, PartialEq)]
pub struct Backend(Rc<supabase::Client>);

impl Backend {
	pub fn new(client: supabase::Client) -> Self {
		Self(Rc::new(client))
	}
}

impl std::ops::Deref for Backend {
	type Target = supabase::Client;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

#[hook]
pub fn use_backend() -> Backend {
	match use_context::<Backend>() {
		Some(backend) => backend,
		None => Backend::new(get(&Status::Anonymous)),
	}
}
