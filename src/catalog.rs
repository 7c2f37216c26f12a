use crate::data::{CategoryFilter, Project};

/// What the explore page is narrowed down to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
	pub search: String,
	pub category: CategoryFilter,
}

impl Filter {
	pub fn is_empty(&self) -> bool {
		self.search.trim().is_empty() && self.category == CategoryFilter::All
	}

	pub fn clear(&mut self) {
		*self = Self::default();
	}

	pub fn matches(&self, project: &Project) -> bool {
		let term = self.search.trim().to_lowercase();
		let matches_search = term.is_empty()
			|| project.title.to_lowercase().contains(&term)
			|| project.category.as_str().to_lowercase().contains(&term);
		matches_search && self.category.allows(project.category)
	}

	pub fn apply<'a>(&'a self, projects: &'a [Project]) -> impl Iterator<Item = &'a Project> + 'a {
		projects.iter().filter(move |project| self.matches(project))
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::data::Category;

	fn project(id: &str, title: &str, category: Category) -> Project {
		Project {
			id: id.into(),
			title: title.into(),
			category,
			..Default::default()
		}
	}

	fn catalog() -> Vec<Project> {
		vec![
			project("1", "React Admin Dashboard", Category::Frontend),
			project("2", "Rust REST API", Category::Backend),
			project("3", "Chatbot with LLM", Category::AiMl),
			project("4", "NFT Minting dApp", Category::Web3),
			project("5", "Flutter Food Delivery", Category::Mobile),
			project("6", "Next.js SaaS Starter", Category::Fullstack),
			project("7", "Landing page", Category::Frontend),
		]
	}

	fn ids(filter: &Filter, projects: &[Project]) -> Vec<String> {
		filter.apply(projects).map(|project| project.id.clone()).collect()
	}

	#[test]
	fn empty_filter_shows_everything() {
		let projects = catalog();
		let filter = Filter::default();
		assert!(filter.is_empty());
		assert_eq!(ids(&filter, &projects).len(), projects.len());
	}

	#[test]
	fn search_matches_title_case_insensitively() {
		let filter = Filter {
			search: "  rust ".into(),
			..Default::default()
		};
		assert_eq!(ids(&filter, &catalog()), ["2"]);
	}

	#[test]
	fn search_matches_category_name() {
		let filter = Filter {
			search: "ai/".into(),
			..Default::default()
		};
		assert_eq!(ids(&filter, &catalog()), ["3"]);
		let filter = Filter {
			search: "END".into(),
			..Default::default()
		};
		// "Frontend" and "Backend" by category
		assert_eq!(ids(&filter, &catalog()), ["1", "2", "7"]);
	}

	#[test]
	fn category_narrows_search() {
		let filter = Filter {
			search: "a".into(),
			category: CategoryFilter::Only(Category::Frontend),
		};
		assert_eq!(ids(&filter, &catalog()), ["1", "7"]);
	}

	#[test]
	fn every_term_and_category_pair_matches_definition() {
		let projects = catalog();
		let terms = ["", "a", "API", "dash", "zzz", "web", "mobile", " "];
		for term in terms {
			for category in CategoryFilter::options() {
				let filter = Filter {
					search: term.into(),
					category,
				};
				let needle = term.trim().to_lowercase();
				let expected = projects
					.iter()
					.filter(|p| {
						let text = needle.is_empty()
							|| p.title.to_lowercase().contains(&needle)
							|| p.category.to_string().to_lowercase().contains(&needle);
						let cat = match category {
							CategoryFilter::All => true,
							CategoryFilter::Only(c) => p.category == c,
						};
						text && cat
					})
					.map(|p| p.id.clone())
					.collect::<Vec<_>>();
				assert_eq!(ids(&filter, &projects), expected, "term {term:?} category {category}");
			}
		}
	}

	#[test]
	fn clear_resets_everything() {
		let mut filter = Filter {
			search: "rust".into(),
			category: CategoryFilter::Only(Category::Backend),
		};
		filter.clear();
		assert_eq!(filter, Filter::default());
	}
}
