//! Sample catalogs used across unit and integration tests
//!
//! Each fixture is a small dataset with one interesting shape: a resolvable
//! tree with a missing ingredient, a two-item cycle, a diamond, and so on.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{ItemIndex, ItemRecord};

/// Test fixture holding a dataset as JSON text.
#[derive(Clone, Debug)]
pub struct CatalogFixture {
    pub name: String,
    pub content: String,
}

impl CatalogFixture {
    /// "Rainbow Tree Seed" with two resolvable ingredients and a missing third.
    ///
    /// ```text
    /// 1 Rainbow Tree Seed = Diamond Seed + Magic Seed + Rainbow Essence
    /// 2 Diamond Seed      = Carbon Seed + Pressure Seed
    /// 3 Magic Seed        = N/A
    /// 4 Carbon Seed       (no recipe)
    /// 5 Pressure Seed     = ""
    /// 6 Lava Seed         = Magic Seed + Fire Seed
    /// ```
    pub fn rainbow() -> Self {
        Self {
            name: "rainbow".to_string(),
            content: r#"[
  {"id": 1, "name": "Rainbow Tree Seed", "splicing": "Diamond Seed + Magic Seed + Rainbow Essence", "image": "rainbow.png"},
  {"id": 2, "name": "Diamond Seed", "splicing": "Carbon Seed + Pressure Seed", "image": "diamond.png"},
  {"id": 3, "name": "Magic Seed", "splicing": "N/A"},
  {"id": 4, "name": "Carbon Seed"},
  {"id": 5, "name": "Pressure Seed", "splicing": ""},
  {"id": 6, "name": "Lava Seed", "splicing": "Magic Seed + Fire Seed"}
]"#
            .to_string(),
        }
    }

    /// A = "B", B = "A".
    pub fn two_cycle() -> Self {
        Self {
            name: "two_cycle".to_string(),
            content: r#"[
  {"id": "a", "name": "A", "recipe": "B"},
  {"id": "b", "name": "B", "recipe": "A"}
]"#
            .to_string(),
        }
    }

    /// Top = Left + Right, both made of Base.
    pub fn diamond() -> Self {
        Self {
            name: "diamond".to_string(),
            content: r#"[
  {"id": "top", "name": "Top", "recipe": "Left + Right"},
  {"id": "left", "name": "Left", "recipe": "Base"},
  {"id": "right", "name": "Right", "recipe": "Base"},
  {"id": "base", "name": "Base", "recipe": "N/A"}
]"#
            .to_string(),
        }
    }

    /// Malformed delimiters and a self-referencing item.
    pub fn sloppy() -> Self {
        Self {
            name: "sloppy".to_string(),
            content: r#"[
  {"id": 1, "name": "Loop", "recipe": "Loop + Leaf"},
  {"id": 2, "name": "Leaf", "recipe": "N/A"},
  {"id": 3, "name": "Gappy", "recipe": "Leaf +  + Leaf + "}
]"#
            .to_string(),
        }
    }

    /// Parse the fixture into an index.
    pub fn index(&self) -> ItemIndex {
        match ItemIndex::from_json_str(&self.content, &self.name) {
            Ok(index) => index,
            Err(e) => panic!("fixture '{}' is not a valid dataset: {e}", self.name),
        }
    }

    /// Write the fixture as `<name>.json` inside `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.json", self.name));
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(path)
    }
}

/// Linear chain `n0 = n1`, `n1 = n2`, ... ending in a leaf.
pub fn chain_catalog(len: usize) -> ItemIndex {
    let records = (0..len)
        .map(|i| {
            let recipe = if i + 1 < len {
                Some(format!("N{}", i + 1))
            } else {
                None
            };
            ItemRecord::new(format!("n{i}"), format!("N{i}"), recipe.as_deref())
        })
        .collect();
    ItemIndex::from_records(records)
}
