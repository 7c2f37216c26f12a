use crate::{
	api::{blobs::upload_to_storage, projects::save_project},
	config::{ARCHIVE_BUCKET, IMAGE_BUCKET},
	data::{Category, NewProject, User},
};
use derivative::Derivative;
use std::rc::Rc;
use supabase::{BlobStore, RowStore};

/// The policies a project owner has to run when uploads are rejected by row-level security.
pub static POLICY_SQL: &str = r#"ALTER TABLE dev_uploads ENABLE ROW LEVEL SECURITY;

CREATE POLICY "Allow All Select" ON dev_uploads FOR SELECT USING (true);
CREATE POLICY "Allow Auth Insert" ON dev_uploads FOR INSERT WITH CHECK (true);
CREATE POLICY "Owners can delete" ON public.dev_uploads FOR DELETE USING ( (select auth.jwt() ->> 'email') = email );"#;

pub static SQL_COPIED: &str = "SQL copied to clipboard!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
	#[default]
	Details,
	Files,
	Published,
}

impl Step {
	pub fn number(&self) -> usize {
		match self {
			Self::Details => 1,
			Self::Files => 2,
			Self::Published => 3,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Details {
	pub title: String,
	pub description: String,
	pub category: Category,
}

/// A file picked in the browser, already read into memory.
#[derive(Clone, PartialEq, Derivative)]
#[derivative(Debug)]
pub struct Attachment {
	pub name: String,
	pub content_type: String,
	#[derivative(Debug = "ignore")]
	pub bytes: Rc<Vec<u8>>,
}

impl Attachment {
	pub fn size(&self) -> usize {
		self.bytes.len()
	}

	pub fn size_kb(&self) -> String {
		format!("{:.2} KB", self.size() as f64 / 1024.0)
	}

	pub fn size_mb(&self) -> String {
		format!("{:.2} MB", self.size() as f64 / (1024.0 * 1024.0))
	}
}

#[derive(thiserror::Error, Debug)]
pub enum UploadError {
	#[error("Missing required files or user session.")]
	MissingFiles,
	#[error(transparent)]
	Service(#[from] supabase::Error),
	#[error(transparent)]
	Clock(#[from] time::error::Format),
}

impl UploadError {
	pub fn is_policy_violation(&self) -> bool {
		match self {
			Self::Service(err) => err.is_policy_violation(),
			_ => false,
		}
	}
}

/// What the form shows after a failed publish.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
	pub message: String,
	pub is_policy_violation: bool,
}

impl Failure {
	/// The SQL the project owner can copy to lift the rejection, if policies caused it.
	pub fn policy_fix(&self) -> Option<&'static str> {
		self.is_policy_violation.then_some(POLICY_SQL)
	}
}

impl From<&UploadError> for Failure {
	fn from(err: &UploadError) -> Self {
		Self {
			message: err.to_string(),
			is_policy_violation: err.is_policy_violation(),
		}
	}
}

/// Everything needed to publish, detached from the form so it can move into a future.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
	pub details: Details,
	pub email: String,
	pub cover: Attachment,
	pub archive: Attachment,
}

/// State of the publish wizard: details first, then files, then the confirmation screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadForm {
	pub step: Step,
	pub details: Details,
	pub cover: Option<Attachment>,
	pub archive: Option<Attachment>,
	pub is_uploading: bool,
	pub error: Option<Failure>,
}

impl UploadForm {
	pub fn can_continue(&self) -> bool {
		!self.details.title.trim().is_empty() && !self.details.description.trim().is_empty()
	}

	pub fn continue_to_files(&mut self) -> bool {
		if self.step != Step::Details || !self.can_continue() {
			return false;
		}
		self.step = Step::Files;
		true
	}

	pub fn back_to_details(&mut self) -> bool {
		if self.step != Step::Files || self.is_uploading {
			return false;
		}
		self.step = Step::Details;
		true
	}

	pub fn can_publish(&self) -> bool {
		self.step == Step::Files && self.cover.is_some() && self.archive.is_some() && !self.is_uploading
	}

	/// Marks the form as uploading and hands back what to publish.
	/// Without a user, a cover and an archive nothing is published and the error is shown instead.
	pub fn begin_publish(&mut self, user: Option<&User>) -> Result<Submission, UploadError> {
		let (Some(user), Some(cover), Some(archive)) = (user, self.cover.clone(), self.archive.clone()) else {
			let err = UploadError::MissingFiles;
			self.error = Some(Failure::from(&err));
			return Err(err);
		};
		let submission = Submission {
			details: self.details.clone(),
			email: user.email.clone(),
			cover,
			archive,
		};
		self.is_uploading = true;
		self.error = None;
		Ok(submission)
	}

	pub fn finish_publish(&mut self, result: &Result<(), UploadError>) {
		self.is_uploading = false;
		match result {
			Ok(()) => self.step = Step::Published,
			Err(err) => {
				log::error!(target: "upload", "Full upload error: {err:?}");
				self.error = Some(Failure::from(err));
			}
		}
	}

	/// "Upload another": keeps the typed details, drops the files.
	pub fn start_over(&mut self) {
		self.step = Step::Details;
		self.cover = None;
		self.archive = None;
		self.error = None;
	}
}

/// Uploads both files, then records the project row that points at them.
pub async fn publish<S>(backend: &S, submission: &Submission) -> Result<(), UploadError>
where
	S: RowStore + BlobStore + ?Sized,
{
	let file_size = submission.archive.size_kb();
	let image_url = upload_to_storage(backend, IMAGE_BUCKET, &submission.cover).await?;
	let zip_url = upload_to_storage(backend, ARCHIVE_BUCKET, &submission.archive).await?;
	let project = NewProject {
		title: submission.details.title.clone(),
		description: submission.details.description.clone(),
		email: submission.email.to_lowercase(),
		category: submission.details.category,
		image_url,
		zip_url,
		downloads: 0,
		file_size,
		created_at: crate::util::timestamp()?,
	};
	save_project(backend, project).await?;
	log::info!(target: "upload", "published {:?}", submission.details.title);
	Ok(())
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{config::PROJECTS_TABLE, testing::MemoryBackend};
	use futures::executor::block_on;
	use serde_json::json;

	fn attachment(name: &str, size: usize) -> Attachment {
		Attachment {
			name: name.into(),
			content_type: "application/octet-stream".into(),
			bytes: Rc::new(vec![7; size]),
		}
	}

	fn user() -> User {
		User {
			email: "Maker@Example.com".into(),
			..Default::default()
		}
	}

	fn filled_form() -> UploadForm {
		let mut form = UploadForm::default();
		form.details.title = "Modern Dashboard UI".into();
		form.details.description = "A dashboard".into();
		form.details.category = Category::Frontend;
		assert!(form.continue_to_files());
		form
	}

	#[test]
	fn details_are_required_to_continue() {
		let mut form = UploadForm::default();
		form.details.title = "Title only".into();
		assert!(!form.continue_to_files());
		assert_eq!(form.step, Step::Details);
		form.details.description = "   ".into();
		assert!(!form.continue_to_files());
		form.details.description = "Now described".into();
		assert!(form.continue_to_files());
		assert_eq!(form.step, Step::Files);
	}

	#[test]
	fn publish_refused_without_both_files() {
		let backend = MemoryBackend::default();
		let mut form = filled_form();
		form.cover = Some(attachment("cover.png", 10));
		assert!(!form.can_publish());
		let err = form.begin_publish(Some(&user())).unwrap_err();
		assert!(matches!(err, UploadError::MissingFiles));
		assert_eq!(form.step, Step::Files);
		assert!(!form.is_uploading);
		assert_eq!(
			form.error.as_ref().map(|failure| failure.message.as_str()),
			Some("Missing required files or user session.")
		);

		form.cover = None;
		form.archive = Some(attachment("code.zip", 10));
		assert!(form.begin_publish(Some(&user())).is_err());
		assert_eq!(backend.calls.get(), 0);
	}

	#[test]
	fn publish_refused_without_user() {
		let mut form = filled_form();
		form.cover = Some(attachment("cover.png", 10));
		form.archive = Some(attachment("code.zip", 10));
		assert!(form.can_publish());
		assert!(matches!(form.begin_publish(None), Err(UploadError::MissingFiles)));
		assert_eq!(form.step, Step::Files);
	}

	#[test]
	fn publishing_uploads_files_then_saves_row() {
		let backend = MemoryBackend::default();
		let mut form = filled_form();
		form.cover = Some(attachment("cover.png", 10));
		form.archive = Some(attachment("code.zip", 3 * 1024 + 512));

		let submission = form.begin_publish(Some(&user())).unwrap();
		assert!(form.is_uploading);
		assert!(!form.back_to_details());
		let result = block_on(publish(&backend, &submission));
		form.finish_publish(&result);
		assert_eq!(form.step, Step::Published);
		assert!(!form.is_uploading);

		assert_eq!(backend.blobs(IMAGE_BUCKET).len(), 1);
		assert_eq!(backend.blobs(ARCHIVE_BUCKET).len(), 1);
		let rows = backend.rows(PROJECTS_TABLE);
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0]["email"], json!("maker@example.com"));
		assert_eq!(rows[0]["file_size"], json!("3.50 KB"));
		assert_eq!(rows[0]["downloads"], json!(0));
		assert_eq!(rows[0]["category"], json!("Frontend"));
		let zip_url = rows[0]["zip_url"].as_str().unwrap();
		assert!(zip_url.starts_with("https://memory.test/storage/v1/object/public/project-zips/"));
		assert!(zip_url.ends_with(".zip"));
	}

	#[test]
	fn policy_rejection_is_classified() {
		let backend = MemoryBackend::default();
		*backend.fail_inserts_with.borrow_mut() =
			Some(("42501".into(), "new row violates row-level security policy".into()));
		let mut form = filled_form();
		form.cover = Some(attachment("cover.png", 10));
		form.archive = Some(attachment("code.zip", 10));
		let submission = form.begin_publish(Some(&user())).unwrap();
		let result = block_on(publish(&backend, &submission));
		form.finish_publish(&result);
		assert_eq!(form.step, Step::Files);
		let failure = form.error.unwrap();
		assert!(failure.is_policy_violation);
		assert_eq!(failure.message, "new row violates row-level security policy");
		let sql = failure.policy_fix().unwrap();
		assert!(sql.contains(r#"CREATE POLICY "Allow Auth Insert""#));
		assert!(sql.contains(r#"CREATE POLICY "Owners can delete""#));
	}

	#[test]
	fn other_failures_offer_no_sql() {
		let failure = Failure::from(&UploadError::MissingFiles);
		assert!(!failure.is_policy_violation);
		assert_eq!(failure.policy_fix(), None);
	}

	#[test]
	fn start_over_keeps_details() {
		let mut form = filled_form();
		form.cover = Some(attachment("cover.png", 10));
		form.archive = Some(attachment("code.zip", 10));
		form.step = Step::Published;
		form.start_over();
		assert_eq!(form.step, Step::Details);
		assert!(form.cover.is_none() && form.archive.is_none());
		assert_eq!(form.details.title, "Modern Dashboard UI");
	}

	#[test]
	fn size_labels() {
		let file = attachment("a.zip", 1536);
		assert_eq!(file.size_kb(), "1.50 KB");
		assert_eq!(attachment("b.zip", 1024 * 1024 * 3).size_mb(), "3.00 MB");
	}
}
