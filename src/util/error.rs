#[derive(thiserror::Error)]
pub struct InvalidEnumStr<T>(String, std::marker::PhantomData<T>);

impl<T> From<&str> for InvalidEnumStr<T> {
	fn from(value: &str) -> Self {
		Self(value.to_owned(), Default::default())
	}
}

impl<T> std::fmt::Debug for InvalidEnumStr<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("InvalidEnumStr")
			.field(&std::any::type_name::<T>())
			.field(&self.0)
			.finish()
	}
}

impl<T> std::fmt::Display for InvalidEnumStr<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let type_name = std::any::type_name::<T>().rsplit("::").next().unwrap_or_default();
		write!(f, "Invalid {type_name} value {:?}", self.0)
	}
}
