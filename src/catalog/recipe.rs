//! Typed parsing of splicing recipe expressions.
//!
//! A recipe is stored as free text such as `"Diamond Seed + Magic Seed"`.
//! [`RecipeExpr::parse`] turns that text into one of four shapes so the tree
//! builder never deals with raw strings, and reports malformed delimiters as
//! [`RecipeIssue`]s instead of failing.
//!
//! ```rust
//! use splicetree::catalog::recipe::{RecipeExpr, RecipeIssue};
//!
//! let parsed = RecipeExpr::parse(Some("Diamond Seed + Magic Seed"));
//! assert_eq!(parsed.expr.ingredient_names(), vec!["Diamond Seed", "Magic Seed"]);
//! assert!(parsed.issues.is_empty());
//!
//! let sloppy = RecipeExpr::parse(Some("A +  + B"));
//! assert_eq!(sloppy.expr.ingredient_names(), vec!["A", "B"]);
//! assert_eq!(sloppy.issues, vec![RecipeIssue::EmptyIngredient { position: 1 }]);
//! ```

use crate::constants::{NO_RECIPE_SENTINEL, RECIPE_DELIMITER};
use std::fmt;

/// One ingredient reference inside a recipe, by item name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    name: String,
}

impl Ingredient {
    /// The referenced item name, trimmed.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The shape of a recipe value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeExpr {
    /// The dataset carried no recipe field at all.
    Absent,
    /// The recipe is the `"N/A"` sentinel: the item cannot be spliced.
    NoRecipe,
    /// The recipe field is present but empty.
    Blank,
    /// Ingredient references in left-to-right order.
    Ingredients(Vec<Ingredient>),
}

/// A problem noticed while parsing that did not stop the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeIssue {
    /// The token at `position` (zero-based, counted over raw tokens) was empty
    /// and has been dropped.
    EmptyIngredient {
        /// Raw token position of the empty slot
        position: usize,
    },
}

impl fmt::Display for RecipeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIngredient {
                position,
            } => write!(f, "empty ingredient at position {position}"),
        }
    }
}

/// Result of [`RecipeExpr::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecipe {
    /// The parsed expression
    pub expr: RecipeExpr,
    /// Issues found in the raw text; empty for a well-formed recipe
    pub issues: Vec<RecipeIssue>,
}

impl RecipeExpr {
    /// Parse a raw recipe value. Never fails.
    ///
    /// The value is split on the literal `" + "`. Each token is trimmed and
    /// empty tokens are dropped with a [`RecipeIssue::EmptyIngredient`]. A
    /// `+` without surrounding spaces is part of an item name.
    pub fn parse(raw: Option<&str>) -> ParsedRecipe {
        let Some(raw) = raw else {
            return ParsedRecipe {
                expr: Self::Absent,
                issues: Vec::new(),
            };
        };

        let trimmed = raw.trim();
        if trimmed == NO_RECIPE_SENTINEL {
            return ParsedRecipe {
                expr: Self::NoRecipe,
                issues: Vec::new(),
            };
        }
        if trimmed.is_empty() {
            return ParsedRecipe {
                expr: Self::Blank,
                issues: Vec::new(),
            };
        }

        let mut ingredients = Vec::new();
        let mut issues = Vec::new();
        // Split the untrimmed text so a trailing " + " still yields an empty slot.
        for (position, token) in raw.split(RECIPE_DELIMITER).enumerate() {
            let name = token.trim();
            if name.is_empty() {
                issues.push(RecipeIssue::EmptyIngredient {
                    position,
                });
            } else {
                ingredients.push(Ingredient {
                    name: name.to_string(),
                });
            }
        }

        let expr = if ingredients.is_empty() {
            Self::Blank
        } else {
            Self::Ingredients(ingredients)
        };

        ParsedRecipe {
            expr,
            issues,
        }
    }

    /// Ingredients in order; empty for every non-[`Ingredients`](Self::Ingredients) shape.
    #[must_use]
    pub fn ingredients(&self) -> &[Ingredient] {
        match self {
            Self::Ingredients(list) => list,
            _ => &[],
        }
    }

    /// Convenience view of the ingredient names.
    #[must_use]
    pub fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients().iter().map(Ingredient::name).collect()
    }

    /// True when the item has something to splice.
    #[must_use]
    pub const fn is_craftable(&self) -> bool {
        matches!(self, Self::Ingredients(_))
    }
}
