//! List craftable items and manage favorites.
//!
//! # Examples
//!
//! ```bash
//! splicetree list
//! splicetree list --search diamond
//! splicetree list --favorites --format json
//! splicetree favorite "Rainbow Tree Seed"
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::catalog::ItemRecord;
use crate::catalog::favorites::FavoriteSet;
use crate::cli::common::{CommandContext, resolve_item};

/// Command to list items that have a splicing recipe.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Only items whose name or recipe contains this text (case-insensitive)
    #[arg(short, long)]
    search: Option<String>,

    /// Only favorite items
    #[arg(long)]
    favorites: bool,

    /// Output format (table, json)
    #[arg(short = 'f', long, default_value = "table")]
    format: String,
}

impl ListCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        self.validate_arguments()?;

        let index = ctx.load_index().await?;
        let favorites = FavoriteSet::load(ctx.storage());

        let mut items = index.search(self.search.as_deref().unwrap_or(""));
        if self.favorites {
            items.retain(|record| favorites.contains(&record.id));
        }
        favorites.sort_for_listing(&mut items);

        match self.format.as_str() {
            "json" => Self::output_json(&items, &favorites),
            _ => {
                Self::output_table(&items, &favorites);
                Ok(())
            }
        }
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "table" | "json" => Ok(()),
            other => Err(anyhow::anyhow!("Invalid format '{other}'. Valid formats are: table, json")),
        }
    }

    fn output_table(items: &[&ItemRecord], favorites: &FavoriteSet) {
        if items.is_empty() {
            println!("No items found.");
            return;
        }

        for record in items {
            let star = if favorites.contains(&record.id) {
                "★ ".yellow().to_string()
            } else {
                "  ".to_string()
            };
            println!("{star}{} {}", record.name.cyan().bold(), format!("({})", record.id).bright_black());
            if let Some(recipe) = &record.recipe {
                println!("    {recipe}");
            }
        }

        println!();
        println!("{} item(s)", items.len());
    }

    fn output_json(items: &[&ItemRecord], favorites: &FavoriteSet) -> Result<()> {
        let json: Vec<_> = items
            .iter()
            .map(|record| {
                serde_json::json!({
                    "id": record.id,
                    "name": record.name,
                    "recipe": record.recipe,
                    "image": record.image,
                    "favorite": favorites.contains(&record.id),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
        Ok(())
    }
}

/// Command to toggle an item's favorite flag.
#[derive(Args, Debug)]
pub struct FavoriteCommand {
    /// Item id or exact name
    item: String,
}

impl FavoriteCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let index = ctx.load_index().await?;
        let record = resolve_item(&index, &self.item)?;

        let mut favorites = FavoriteSet::load(ctx.storage());
        if favorites.toggle(&record.id) {
            println!("{} Added '{}' to favorites", "✓".green(), record.name);
        } else {
            println!("Removed '{}' from favorites", record.name);
        }
        Ok(())
    }
}
