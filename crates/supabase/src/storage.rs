use crate::{Client, Error, Response};
use futures_util::future::LocalBoxFuture;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Object access through Supabase Storage.
pub trait BlobStore {
	fn upload<'a>(
		&'a self,
		bucket: &'a str,
		name: &'a str,
		content_type: &'a str,
		bytes: Vec<u8>,
	) -> LocalBoxFuture<'a, Result<(), Error>>;

	fn public_url(&self, bucket: &str, name: &str) -> String;

	/// Removes objects by name. Names that do not exist are skipped by the service.
	fn remove<'a>(&'a self, bucket: &'a str, names: &'a [String]) -> LocalBoxFuture<'a, Result<Vec<Value>, Error>>;
}

impl BlobStore for Client {
	fn upload<'a>(
		&'a self,
		bucket: &'a str,
		name: &'a str,
		content_type: &'a str,
		bytes: Vec<u8>,
	) -> LocalBoxFuture<'a, Result<(), Error>> {
		Box::pin(async move {
			let path = format!("/storage/v1/object/{bucket}/{name}");
			log::debug!(target: "supabase", "upload {} bytes to {path}", bytes.len());
			let builder = self.request(Method::POST, &path).body(bytes);
			let request = Response::<()>::from(builder)
				.with_header("Content-Type", content_type)
				.with_header("cache-control", "max-age=3600")
				.with_header("x-upsert", "false");
			request.send_empty().await
		})
	}

	fn public_url(&self, bucket: &str, name: &str) -> String {
		self.endpoint(&format!("/storage/v1/object/public/{bucket}/{name}"))
	}

	fn remove<'a>(&'a self, bucket: &'a str, names: &'a [String]) -> LocalBoxFuture<'a, Result<Vec<Value>, Error>> {
		#[derive(Serialize)]
		struct Body<'a> {
			prefixes: &'a [String],
		}
		Box::pin(async move {
			let builder = self.request(Method::DELETE, &format!("/storage/v1/object/{bucket}"));
			Response::<Vec<Value>>::from(builder)
				.with_json(&Body { prefixes: names })
				.send()
				.await
		})
	}
}
