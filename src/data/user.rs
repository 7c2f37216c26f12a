use crate::util::{avatar_url, email_local_part};
use supabase::auth::AuthUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
	#[default]
	Developer,
	User,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct User {
	pub id: String,
	pub name: String,
	pub email: String,
	pub avatar: String,
	pub role: Role,
}

impl From<&AuthUser> for User {
	fn from(user: &AuthUser) -> Self {
		let email = user.email.clone().filter(|email| !email.is_empty()).unwrap_or_else(|| "guest".to_owned());
		let name = match &user.user_metadata.full_name {
			Some(name) if !name.is_empty() => name.clone(),
			_ => match email_local_part(&email) {
				"" => "User".to_owned(),
				local => local.to_owned(),
			},
		};
		let avatar = match &user.user_metadata.avatar_url {
			Some(url) if !url.is_empty() => url.clone(),
			_ => avatar_url(&email),
		};
		Self {
			id: user.id.clone(),
			name,
			email,
			avatar,
			role: Role::Developer,
		}
	}
}
