//! Category targets loader.

use std::collections::BTreeMap;
use std::path::Path;

use setup_core::{Category, CategoryProfile, TargetsOracle};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Category targets keyed by category.
///
/// A table may cover only some categories; requests for the others fail with
/// `SetupError::MissingTargets`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetsTable {
    profiles: BTreeMap<Category, CategoryProfile>,
}

impl TargetsTable {
    pub fn new(profiles: BTreeMap<Category, CategoryProfile>) -> Self {
        Self { profiles }
    }

    /// Parses a targets table from TOML text.
    pub fn from_toml(content: &str) -> LoadResult<Self> {
        let profiles: BTreeMap<Category, CategoryProfile> = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse targets TOML: {}", e))?;
        Ok(Self { profiles })
    }

    /// Loads the embedded `categories.toml`.
    pub fn builtin() -> LoadResult<Self> {
        Self::from_toml(include_str!("../../data/categories.toml"))
    }

    pub fn get(&self, category: Category) -> Option<&CategoryProfile> {
        self.profiles.get(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.profiles.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl TargetsOracle for TargetsTable {
    fn targets(&self, category: Category) -> Option<CategoryProfile> {
        self.profiles.get(&category).copied()
    }
}

/// Loader for category targets from TOML files.
pub struct TargetsLoader;

impl TargetsLoader {
    /// Load category targets from a TOML file.
    ///
    /// Each top-level table is named after a category (`[gt]`, `[street_sport]`, ...).
    pub fn load(path: &Path) -> LoadResult<TargetsTable> {
        let content = read_file(path)?;
        let table = TargetsTable::from_toml(&content)?;
        debug!(path = %path.display(), categories = table.len(), "loaded category targets");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use setup_core::BuiltinTargets;
    use strum::IntoEnumIterator;

    #[test]
    fn embedded_table_matches_builtin_targets() {
        let table = TargetsTable::builtin().expect("embedded targets should parse");
        assert_eq!(table.len(), Category::iter().count());
        for category in Category::iter() {
            assert_eq!(
                table.targets(category),
                Some(BuiltinTargets::profile(category)),
                "{category}"
            );
        }
    }

    #[test]
    fn partial_table_leaves_gaps() {
        let content = include_str!("../../data/categories.toml");
        let start = content.find("[gt]").unwrap();
        let end = content[start..].find("\n\n").map_or(content.len(), |i| start + i);
        let table = TargetsTable::from_toml(&content[start..end]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.targets(Category::Gt), Some(BuiltinTargets::GT));
        assert_eq!(table.targets(Category::Formula), None);
    }

    #[test]
    fn unknown_category_is_a_parse_error() {
        let err = TargetsTable::from_toml("[rally]\ncaster = 4.0\n").unwrap_err();
        assert!(err.to_string().contains("targets TOML"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = TargetsLoader::load(Path::new("/nonexistent/categories.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
