use time::{format_description::well_known::Rfc3339, OffsetDateTime};

pub mod error;

pub fn spawn_local<F, E>(target: &'static str, future: F)
where
	F: futures_util::Future<Output = Result<(), E>> + 'static,
	E: std::fmt::Debug + 'static,
{
	wasm_bindgen_futures::spawn_local(async move {
		if let Err(err) = future.await {
			log::error!(target: target, "{err:?}");
		}
	});
}

/// Current time as an RFC 3339 string, the format the database columns expect.
pub fn timestamp() -> Result<String, time::error::Format> {
	OffsetDateTime::now_utc().format(&Rfc3339)
}

pub fn unix_seconds() -> u64 {
	OffsetDateTime::now_utc().unix_timestamp().max(0) as u64
}

pub fn unix_millis() -> u128 {
	(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000).max(0) as u128
}

pub fn email_local_part(email: &str) -> &str {
	email.split('@').next().unwrap_or_default()
}

pub fn avatar_url(seed: &str) -> String {
	format!("https://api.dicebear.com/7.x/avataaars/svg?seed={seed}")
}
