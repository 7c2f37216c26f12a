use super::{Category, Project, User};
use crate::config::{GUEST_EMAIL, GUEST_NAME};
use serde::Serialize;

/// A download receipt. Every project is free, so `amount` is always zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
	pub project_id: String,
	pub project_title: String,
	pub category: Category,
	pub user_email: String,
	pub user_name: String,
	pub amount: u32,
	pub created_at: String,
}

impl Order {
	pub fn for_download(project: &Project, user: Option<&User>, created_at: String) -> Self {
		let (email, name) = match user {
			Some(user) => (user.email.as_str(), user.name.as_str()),
			None => (GUEST_EMAIL, GUEST_NAME),
		};
		Self {
			project_id: project.id.clone(),
			project_title: project.title.clone(),
			category: project.category,
			user_email: email.to_lowercase(),
			user_name: name.to_owned(),
			amount: 0,
			created_at,
		}
	}
}
