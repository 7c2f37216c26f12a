use crate::{upload::Attachment, util::unix_millis};
use supabase::BlobStore;

/// A collision-resistant object name that keeps the file's extension, e.g. `3f9a1c2b7d4e-1735689600000.zip`.
pub fn generated_name(file_name: &str, millis: u128) -> String {
	let random = uuid::Uuid::new_v4().simple().to_string();
	let stem = format!("{}-{millis}", &random[..12]);
	match file_name.rsplit_once('.') {
		Some((_, extension)) if !extension.is_empty() => format!("{stem}.{}", extension.to_lowercase()),
		_ => stem,
	}
}

/// Uploads a file under a fresh name and returns its public url.
pub async fn upload_to_storage<B>(blobs: &B, bucket: &str, file: &Attachment) -> Result<String, supabase::Error>
where
	B: BlobStore + ?Sized,
{
	let name = generated_name(&file.name, unix_millis());
	log::info!(target: "upload", "uploading {:?} ({}) as {bucket}/{name}", file.name, file.size_kb());
	blobs
		.upload(bucket, &name, &file.content_type, file.bytes.as_ref().clone())
		.await?;
	Ok(blobs.public_url(bucket, &name))
}
