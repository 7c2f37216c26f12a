use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

/// A value that survives page reloads, keyed by a fixed id in local storage.
pub trait SessionValue {
	fn id() -> &'static str;

	fn load() -> Option<Self>
	where
		Self: for<'de> Deserialize<'de>,
	{
		LocalStorage::get::<Self>(Self::id()).ok()
	}

	fn save(&self)
	where
		Self: Serialize,
	{
		if let Err(err) = LocalStorage::set(Self::id(), self) {
			log::warn!(target: "session", "Failed to persist {}: {err}", Self::id());
		}
	}

	fn delete() {
		LocalStorage::delete(Self::id());
	}
}

impl SessionValue for supabase::auth::Session {
	fn id() -> &'static str {
		"mieltecity::session"
	}
}
