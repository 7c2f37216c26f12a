use crate::{
	config::{ARCHIVE_BUCKET, IMAGE_BUCKET, PROJECTS_TABLE},
	data::{NewProject, Project, ProjectRow},
};
use serde::Deserialize;
use supabase::{BlobStore, Query, RowStore};

/// Every published project, newest first.
pub async fn fetch_projects<R>(rows: &R) -> Result<Vec<Project>, supabase::Error>
where
	R: RowStore + ?Sized,
{
	let query = Query::from(PROJECTS_TABLE).select("*").order("created_at", false);
	let values = rows.select(&query).await?;
	let mut projects = Vec::with_capacity(values.len());
	for value in values {
		let row = match serde_json::from_value::<ProjectRow>(value.clone()) {
			Ok(row) => row,
			Err(err) => return Err(supabase::InvalidJson(value.to_string(), err).into()),
		};
		projects.push(Project::from(row));
	}
	log::debug!(target: "projects", "fetched {} projects", projects.len());
	Ok(projects)
}

pub async fn fetch_owned_projects<R>(rows: &R, email: &str) -> Result<Vec<Project>, supabase::Error>
where
	R: RowStore + ?Sized,
{
	let mut projects = fetch_projects(rows).await?;
	projects.retain(|project| project.is_owned_by(email));
	Ok(projects)
}

pub async fn save_project<R>(rows: &R, mut project: NewProject) -> Result<(), supabase::Error>
where
	R: RowStore + ?Sized,
{
	project.email = project.email.to_lowercase();
	rows.insert(PROJECTS_TABLE, &[project]).await
}

#[derive(thiserror::Error, Debug)]
pub enum RemoveError {
	#[error("Database Error: {0}. RLS policy might be blocking you.")]
	Database(#[source] supabase::Error),
	#[error("Database Error: project {0} was not deleted. Only its owner can remove it.")]
	NotDeleted(String),
}

#[derive(Deserialize, Default)]
struct Assets {
	#[serde(default)]
	image_url: Option<String>,
	#[serde(default)]
	zip_url: Option<String>,
}

/// Removes a project owned by `user_email`.
///
/// The row is the source of truth for listings, so failing to delete it is an
/// error. The cover image and archive are removed afterwards on a best-effort
/// basis; failures there are only logged.
pub async fn remove_project<S>(backend: &S, project_id: &str, user_email: &str) -> Result<(), RemoveError>
where
	S: RowStore + BlobStore + ?Sized,
{
	log::info!(target: "projects", "Attempting to remove project {project_id}");

	let lookup = Query::from(PROJECTS_TABLE).select("image_url,zip_url").eq("id", project_id);
	let assets = match backend.select(&lookup).await {
		Ok(rows) => rows
			.into_iter()
			.next()
			.map(|row| serde_json::from_value::<Assets>(row).unwrap_or_default()),
		Err(err) => {
			log::warn!(target: "projects", "Could not look up assets of {project_id}: {err}");
			None
		}
	};

	let delete = Query::from(PROJECTS_TABLE)
		.eq("id", project_id)
		.eq("email", user_email.to_lowercase());
	let deleted = match backend.delete(&delete).await {
		Ok(deleted) => deleted,
		Err(err) => {
			log::error!(target: "projects", "DB delete failed: {err:?}");
			return Err(RemoveError::Database(err));
		}
	};
	if deleted.is_empty() {
		log::error!(target: "projects", "DB delete of {project_id} matched no rows");
		return Err(RemoveError::NotDeleted(project_id.to_owned()));
	}

	if let Some(assets) = assets {
		remove_asset(backend, IMAGE_BUCKET, assets.image_url.as_deref()).await;
		remove_asset(backend, ARCHIVE_BUCKET, assets.zip_url.as_deref()).await;
	}
	Ok(())
}

async fn remove_asset<B>(blobs: &B, bucket: &str, url: Option<&str>)
where
	B: BlobStore + ?Sized,
{
	let Some(name) = url.and_then(file_name_from_url) else {
		return;
	};
	match blobs.remove(bucket, &[name.to_owned()]).await {
		Ok(removed) if removed.is_empty() => {
			log::debug!(target: "projects", "{bucket}/{name} was already gone");
		}
		Ok(_) => log::debug!(target: "projects", "removed {bucket}/{name}"),
		Err(err) => {
			log::warn!(target: "projects", "Storage cleanup of {bucket}/{name} failed (it might already be gone): {err}");
		}
	}
}

/// The object name at the end of a public storage url.
pub fn file_name_from_url(url: &str) -> Option<&str> {
	let last = url.rsplit('/').next()?;
	let name = last.split('?').next()?;
	(!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{data::Category, testing::MemoryBackend};
	use futures::executor::block_on;
	use serde_json::{json, Value};

	fn row(id: u64, email: &str, title: &str, created_at: &str) -> Value {
		json!({
			"id": id,
			"title": title,
			"description": "",
			"email": email,
			"category": "Backend",
			"image_url": format!("https://memory.test/storage/v1/object/public/project-images/img-{id}.png?t=1"),
			"zip_url": format!("https://memory.test/storage/v1/object/public/project-zips/zip-{id}.zip"),
			"downloads": id * 10,
			"file_size": "1.00 KB",
			"created_at": created_at,
		})
	}

	fn seeded() -> MemoryBackend {
		MemoryBackend::with_rows(
			PROJECTS_TABLE,
			vec![
				row(1, "owner@example.com", "First", "2025-01-01T00:00:00Z"),
				row(2, "other@example.com", "Second", "2025-02-01T00:00:00Z"),
			],
		)
		.with_blob(IMAGE_BUCKET, "img-1.png")
		.with_blob(ARCHIVE_BUCKET, "zip-1.zip")
		.with_blob(IMAGE_BUCKET, "img-2.png")
		.with_blob(ARCHIVE_BUCKET, "zip-2.zip")
	}

	#[test]
	fn file_names() {
		assert_eq!(file_name_from_url("https://x/storage/v1/object/public/b/abc-1.zip"), Some("abc-1.zip"));
		assert_eq!(file_name_from_url("https://x/b/abc.png?token=1&t=2"), Some("abc.png"));
		assert_eq!(file_name_from_url("plain.zip"), Some("plain.zip"));
		assert_eq!(file_name_from_url(""), None);
		assert_eq!(file_name_from_url("https://x/b/"), None);
	}

	#[test]
	fn listing_is_newest_first() {
		let backend = seeded();
		let projects = block_on(fetch_projects(&backend)).unwrap();
		let titles = projects.iter().map(|p| p.title.as_str()).collect::<Vec<_>>();
		assert_eq!(titles, ["Second", "First"]);
		assert_eq!(projects[0].category, Category::Backend);
	}

	#[test]
	fn owned_projects_ignore_email_case() {
		let backend = seeded();
		let projects = block_on(fetch_owned_projects(&backend, "Owner@Example.com")).unwrap();
		assert_eq!(projects.len(), 1);
		assert_eq!(projects[0].id, "1");
	}

	#[test]
	fn owner_removes_row_and_blobs() {
		let backend = seeded();
		block_on(remove_project(&backend, "1", "OWNER@example.com")).unwrap();
		let remaining = backend.rows(PROJECTS_TABLE);
		assert_eq!(remaining.len(), 1);
		assert_eq!(remaining[0]["id"], json!(2));
		assert!(!backend.blobs(IMAGE_BUCKET).contains("img-1.png"));
		assert!(!backend.blobs(ARCHIVE_BUCKET).contains("zip-1.zip"));
		assert!(backend.blobs(IMAGE_BUCKET).contains("img-2.png"));
	}

	#[test]
	fn non_owner_deletes_nothing_and_fails() {
		let backend = seeded();
		let err = block_on(remove_project(&backend, "2", "owner@example.com")).unwrap_err();
		assert!(matches!(err, RemoveError::NotDeleted(ref id) if id == "2"));
		assert_eq!(backend.rows(PROJECTS_TABLE).len(), 2);
		assert!(backend.blobs(IMAGE_BUCKET).contains("img-2.png"));
		assert!(backend.blobs(ARCHIVE_BUCKET).contains("zip-2.zip"));
	}

	#[test]
	fn already_missing_blobs_still_succeed() {
		let backend = MemoryBackend::with_rows(
			PROJECTS_TABLE,
			vec![row(1, "owner@example.com", "First", "2025-01-01T00:00:00Z")],
		);
		block_on(remove_project(&backend, "1", "owner@example.com")).unwrap();
		assert!(backend.rows(PROJECTS_TABLE).is_empty());
	}

	#[test]
	fn failing_blob_cleanup_is_swallowed() {
		let backend = seeded();
		backend.fail_blob_removal.set(true);
		block_on(remove_project(&backend, "1", "owner@example.com")).unwrap();
		assert_eq!(backend.rows(PROJECTS_TABLE).len(), 1);
		assert!(backend.blobs(IMAGE_BUCKET).contains("img-1.png"));
	}

	#[test]
	fn lookup_miss_skips_cleanup() {
		let backend = seeded();
		let calls_before = backend.calls.get();
		let err = block_on(remove_project(&backend, "404", "owner@example.com")).unwrap_err();
		assert!(matches!(err, RemoveError::NotDeleted(_)));
		// lookup and delete only
		assert_eq!(backend.calls.get() - calls_before, 2);
	}

	#[test]
	fn saved_projects_use_lowercase_email() {
		let backend = MemoryBackend::default();
		let project = NewProject {
			title: "Kit".into(),
			description: "UI kit".into(),
			email: "Maker@Example.com".into(),
			category: Category::AiMl,
			image_url: "i".into(),
			zip_url: "z".into(),
			downloads: 0,
			file_size: "2.00 KB".into(),
			created_at: "2025-03-01T00:00:00Z".into(),
		};
		block_on(save_project(&backend, project)).unwrap();
		let rows = backend.rows(PROJECTS_TABLE);
		assert_eq!(rows[0]["email"], json!("maker@example.com"));
		assert_eq!(rows[0]["category"], json!("AI/ML"));
	}
}
