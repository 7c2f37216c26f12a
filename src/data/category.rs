use crate::util::error::InvalidEnumStr;
use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(EnumSetType, Debug, Hash, Serialize, Deserialize)]
pub enum Category {
	Frontend,
	Backend,
	Fullstack,
	#[serde(rename = "AI/ML")]
	AiMl,
	Web3,
	Mobile,
}

impl Default for Category {
	fn default() -> Self {
		Self::Frontend
	}
}

impl Category {
	pub fn all() -> EnumSet<Self> {
		EnumSet::all()
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Frontend => "Frontend",
			Self::Backend => "Backend",
			Self::Fullstack => "Fullstack",
			Self::AiMl => "AI/ML",
			Self::Web3 => "Web3",
			Self::Mobile => "Mobile",
		}
	}
}

impl std::fmt::Display for Category {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Category {
	type Err = InvalidEnumStr<Self>;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::all()
			.iter()
			.find(|category| category.as_str() == s)
			.ok_or_else(|| InvalidEnumStr::from(s))
	}
}

/// The category chips on the explore page: every category, or exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CategoryFilter {
	#[default]
	All,
	Only(Category),
}

impl CategoryFilter {
	pub fn options() -> impl Iterator<Item = Self> {
		std::iter::once(Self::All).chain(Category::all().iter().map(Self::Only))
	}

	pub fn allows(&self, category: Category) -> bool {
		match self {
			Self::All => true,
			Self::Only(only) => *only == category,
		}
	}
}

impl std::fmt::Display for CategoryFilter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::All => f.write_str("All"),
			Self::Only(category) => category.fmt(f),
		}
	}
}
