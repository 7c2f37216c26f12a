use super::{null_as_default, Category};
use crate::util::{avatar_url, email_local_part};
use serde::{Deserialize, Deserializer, Serialize};

/// A row of the uploads table, as returned by `select *`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ProjectRow {
	#[serde(deserialize_with = "id_as_string")]
	pub id: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub title: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub description: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub email: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub category: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub image_url: String,
	#[serde(default)]
	pub zip_url: Option<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub downloads: u64,
	#[serde(default, deserialize_with = "null_as_default")]
	pub file_size: String,
	#[serde(default)]
	pub created_at: Option<String>,
}

// Ids are bigint identity columns on some deployments and uuids on others.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match serde_json::Value::deserialize(deserializer)? {
		serde_json::Value::String(id) => id,
		serde_json::Value::Null => String::new(),
		other => other.to_string(),
	})
}

/// The columns written when a project is published.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
	pub title: String,
	pub description: String,
	pub email: String,
	pub category: Category,
	pub image_url: String,
	pub zip_url: String,
	pub downloads: u64,
	pub file_size: String,
	pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Developer {
	pub name: String,
	pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Project {
	pub id: String,
	pub title: String,
	pub description: String,
	pub cover_image: String,
	pub category: Category,
	pub download_count: u64,
	pub developer: Developer,
	pub file_size: String,
	pub tags: Vec<String>,
	pub is_verified: bool,
	pub zip_url: Option<String>,
	pub email: Option<String>,
}

impl Project {
	pub fn is_owned_by(&self, email: &str) -> bool {
		match &self.email {
			Some(owner) => owner.to_lowercase() == email.to_lowercase(),
			None => false,
		}
	}
}

impl From<ProjectRow> for Project {
	fn from(row: ProjectRow) -> Self {
		let category = match row.category.parse::<Category>() {
			Ok(category) => category,
			Err(err) => {
				log::warn!(target: "projects", "project {}: {err}", row.id);
				Category::default()
			}
		};
		let developer = Developer {
			name: email_local_part(&row.email).to_owned(),
			avatar: avatar_url(&row.email),
		};
		Self {
			id: row.id,
			title: row.title,
			description: row.description,
			cover_image: row.image_url,
			category,
			download_count: row.downloads,
			developer,
			file_size: row.file_size,
			tags: vec![category.to_string()],
			is_verified: true,
			zip_url: row.zip_url.filter(|url| !url.is_empty()),
			email: Some(row.email).filter(|email| !email.is_empty()),
		}
	}
}
