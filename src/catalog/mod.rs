//! Item catalog: records, lookup by name, listing and search.
//!
//! The catalog is the read-only input of every other module. A dataset is a
//! JSON array of item rows:
//!
//! ```json
//! [
//!   { "id": 1, "name": "Rainbow Tree Seed", "splicing": "Diamond Seed + Magic Seed", "image": "rainbow.png" },
//!   { "id": 2, "name": "Diamond Seed", "splicing": "N/A" },
//!   { "id": "magic", "name": "Magic Seed" }
//! ]
//! ```
//!
//! Ids may be numbers or strings; the recipe field may be called `recipe` or
//! `splicing`. [`ItemIndex`] is built once per dataset and answers the exact
//! name lookups the tree builder needs.
//!
//! # Name collisions
//!
//! Ingredients reference items by display name. When two records share a
//! name the first one in dataset order wins, matching how the catalog has
//! always resolved ingredients.

pub mod favorites;
pub mod graph;
pub mod recipe;

use crate::constants::SUGGESTION_MAX_DISTANCE;
use crate::core::GuideError;
use anyhow::{Context, Result};
use recipe::{ParsedRecipe, RecipeExpr};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Opaque item identifier.
///
/// Backed by a string; numeric ids in a dataset are stored in their decimal
/// form, so `42` and `"42"` name the same item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawItemId {
    Unsigned(u64),
    Signed(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawItemId::deserialize(deserializer)? {
            RawItemId::Unsigned(n) => Self(n.to_string()),
            RawItemId::Signed(n) => Self(n.to_string()),
            RawItemId::Text(s) => Self(s),
        })
    }
}

/// One catalog row. Unknown dataset fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Unique item id
    pub id: ItemId,
    /// Display name; ingredients reference items by this exact string
    pub name: String,
    /// Raw recipe expression, see [`RecipeExpr::parse`]
    #[serde(default, alias = "splicing", skip_serializing_if = "Option::is_none")]
    pub recipe: Option<String>,
    /// Image path or URL, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ItemRecord {
    /// Convenience constructor, mostly for fixtures and embedders.
    pub fn new(id: impl Into<String>, name: impl Into<String>, recipe: Option<&str>) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            recipe: recipe.map(str::to_string),
            image: None,
        }
    }

    /// Attach an image path.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// In-memory lookup over a loaded dataset.
#[derive(Debug, Clone, Default)]
pub struct ItemIndex {
    records: Vec<ItemRecord>,
    recipes: Vec<ParsedRecipe>,
    by_id: HashMap<ItemId, usize>,
    by_name: HashMap<String, usize>,
}

impl ItemIndex {
    /// Build an index from records in dataset order.
    pub fn from_records(records: Vec<ItemRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut by_name = HashMap::with_capacity(records.len());
        let mut recipes = Vec::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            if by_id.insert(record.id.clone(), idx).is_some() {
                tracing::debug!("Duplicate item id '{}', later record wins for id lookups", record.id);
            }
            if by_name.contains_key(&record.name) {
                tracing::debug!(
                    "Duplicate item name '{}' (id {}), keeping the first record",
                    record.name,
                    record.id
                );
            } else {
                by_name.insert(record.name.clone(), idx);
            }
            recipes.push(RecipeExpr::parse(record.recipe.as_deref()));
        }

        Self {
            records,
            recipes,
            by_id,
            by_name,
        }
    }

    /// Parse a JSON array of item rows.
    ///
    /// `source` names the origin in error messages.
    pub fn from_json_str(json: &str, source: &str) -> Result<Self, GuideError> {
        let records: Vec<ItemRecord> =
            serde_json::from_str(json).map_err(|e| GuideError::DatasetParseError {
                file: source.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_records(records))
    }

    /// Load a dataset file.
    ///
    /// This is the first suspension point of a session: nothing is built
    /// until it completes.
    pub async fn load_from_path(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

        let index = Self::from_json_str(&content, &path.display().to_string())?;
        tracing::debug!("Loaded {} items from {}", index.len(), path.display());
        Ok(index)
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&ItemRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    /// Exact, case-sensitive lookup by display name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&ItemRecord> {
        self.by_name.get(name).map(|&idx| &self.records[idx])
    }

    /// Resolve user input: an id first, then an exact name.
    #[must_use]
    pub fn resolve(&self, query: &str) -> Option<&ItemRecord> {
        self.get(&ItemId::new(query)).or_else(|| self.find_by_name(query))
    }

    /// Parsed recipe of a record.
    ///
    /// Records borrowed from this index reuse the recipe parsed at load
    /// time; any other record is parsed on the fly.
    pub fn recipe_of(&self, record: &ItemRecord) -> Cow<'_, ParsedRecipe> {
        match self.by_id.get(&record.id) {
            Some(&idx) if std::ptr::eq(&self.records[idx], record) => {
                Cow::Borrowed(&self.recipes[idx])
            }
            _ => Cow::Owned(RecipeExpr::parse(record.recipe.as_deref())),
        }
    }

    /// Records paired with their parsed recipes, in dataset order.
    pub fn entries(&self) -> impl Iterator<Item = (&ItemRecord, &ParsedRecipe)> {
        self.records.iter().zip(self.recipes.iter())
    }

    /// All records in dataset order.
    #[must_use]
    pub fn records(&self) -> &[ItemRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the dataset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Items that have something to splice, in dataset order.
    pub fn craftable(&self) -> Vec<&ItemRecord> {
        self.entries().filter(|(_, parsed)| parsed.expr.is_craftable()).map(|(r, _)| r).collect()
    }

    /// Craftable items whose name or recipe text contains `query`,
    /// ignoring case. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&ItemRecord> {
        let needle = query.trim().to_lowercase();
        self.craftable()
            .into_iter()
            .filter(|record| {
                needle.is_empty()
                    || record.name.to_lowercase().contains(&needle)
                    || record.recipe.as_deref().is_some_and(|r| r.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Closest item name to `name` by edit distance, if any is close enough.
    pub fn suggest(&self, name: &str) -> Option<&ItemRecord> {
        let wanted = name.to_lowercase();
        self.records
            .iter()
            .map(|record| (strsim::levenshtein(&wanted, &record.name.to_lowercase()), record))
            .filter(|(distance, _)| *distance <= SUGGESTION_MAX_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, record)| record)
    }
}
