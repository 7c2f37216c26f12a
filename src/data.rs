mod category;
pub use category::*;

mod order;
pub use order::*;

mod project;
pub use project::*;

mod seller;
pub use seller::*;

mod user;
pub use user::*;

/// Deserializes a nullable column into the type's default when the value is `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: serde::Deserializer<'de>,
	T: Default + serde::Deserialize<'de>,
{
	use serde::Deserialize;
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
