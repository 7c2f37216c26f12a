use crate::{Error, InvalidJson};
use reqwest::RequestBuilder;
use serde::{de::DeserializeOwned, Serialize};

pub struct Response<T> {
	builder: RequestBuilder,
	marker: std::marker::PhantomData<T>,
}
impl<T> std::fmt::Debug for Response<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.builder.fmt(f)
	}
}
impl<T> Response<T> {
	pub fn from(builder: RequestBuilder) -> Self {
		Self {
			builder,
			marker: Default::default(),
		}
	}

	pub fn with_query<Q>(mut self, query: &Q) -> Self
	where
		Q: Serialize + ?Sized,
	{
		self.builder = self.builder.query(query);
		self
	}

	pub fn with_json<Q>(mut self, json: &Q) -> Self
	where
		Q: Serialize + ?Sized,
	{
		self.builder = self.builder.json(json);
		self
	}

	pub fn with_header(mut self, key: &'static str, value: &str) -> Self {
		self.builder = self.builder.header(key, value);
		self
	}

	/// Sends the request and returns the raw body, or the service's error if the status is not a success.
	pub async fn send_text(self) -> Result<String, Error> {
		let response: reqwest::Response = self.builder.send().await?;
		let status = response.status();
		let text = response.text().await?;
		if !status.is_success() {
			log::debug!(target: "supabase", "{status} {text}");
			return Err(Error::from_response(status.as_u16(), &text));
		}
		Ok(text)
	}

	pub async fn send_empty(self) -> Result<(), Error> {
		self.send_text().await?;
		Ok(())
	}
}
impl<T> Response<T>
where
	T: DeserializeOwned,
{
	pub async fn send(self) -> Result<T, Error> {
		let text = self.send_text().await?;
		let output = match serde_json::from_str(&text) {
			Ok(data) => data,
			Err(err) => {
				return Err(InvalidJson(text, err))?;
			}
		};
		Ok(output)
	}
}
