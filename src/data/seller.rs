use super::Project;

/// Downloads per month a developer needs before they can sell.
pub static TARGET_DOWNLOADS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
	Popularity,
	Identity,
	CodeQuality,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Requirement {
	pub kind: RequirementKind,
	pub title: &'static str,
	pub description: String,
	pub status: String,
	pub is_done: bool,
}

/// Progress towards the seller program, derived from the developer's own projects.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Eligibility {
	pub downloads: u64,
}

impl Eligibility {
	pub fn from_projects<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Self {
		Self {
			downloads: projects.into_iter().map(|project| project.download_count).sum(),
		}
	}

	pub fn progress_percent(&self) -> f64 {
		(self.downloads as f64 / TARGET_DOWNLOADS as f64 * 100.0).min(100.0)
	}

	pub fn requirements(&self) -> Vec<Requirement> {
		let popular = self.downloads >= TARGET_DOWNLOADS;
		vec![
			Requirement {
				kind: RequirementKind::Popularity,
				title: "Popularity Requirement",
				description: format!("Min. {TARGET_DOWNLOADS} new downloads per month across your projects."),
				status: match popular {
					true => "Completed".to_owned(),
					false => format!("{}/{TARGET_DOWNLOADS}", self.downloads),
				},
				is_done: popular,
			},
			Requirement {
				kind: RequirementKind::Identity,
				title: "Identity Verification",
				description: "Complete the KYC process with a valid Developer ID.".to_owned(),
				status: "Pending".to_owned(),
				is_done: false,
			},
			Requirement {
				kind: RequirementKind::CodeQuality,
				title: "Code Quality Audit",
				description: "Maintain a zero-security-warning history for at least 3 months.".to_owned(),
				status: "Evaluating".to_owned(),
				is_done: false,
			},
		]
	}

	pub fn is_eligible(&self) -> bool {
		self.requirements().iter().all(|requirement| requirement.is_done)
	}
}
