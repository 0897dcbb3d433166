//! Dataset check: dangling ingredients, recipe cycles and malformed recipes.
//!
//! None of these stop a tree from being built (they become placeholder
//! nodes), so by default the command only reports. `--strict` turns any
//! finding into a failing exit code for use in CI.

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;

use crate::catalog::graph::{CatalogReport, RecipeGraph};
use crate::cli::common::CommandContext;

/// Check the dataset.
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Exit with an error if anything is found
    #[arg(long)]
    strict: bool,
}

impl CheckCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let index = ctx.load_index().await?;
        let graph = RecipeGraph::from_index(&index);
        let report = graph.report();

        tracing::debug!(
            "Recipe graph has {} node(s) and {} edge(s)",
            graph.node_count(),
            graph.edge_count()
        );

        print_report(&report);

        if self.strict && !report.is_clean() {
            return Err(anyhow!(
                "Dataset check failed: {} missing ingredient(s), {} cycle(s), {} malformed recipe(s)",
                report.unresolved.len(),
                report.cycles.len(),
                report.malformed.len()
            ));
        }
        Ok(())
    }
}

fn print_report(report: &CatalogReport) {
    println!("{} item(s), {} craftable", report.items, report.craftable);

    if report.is_clean() {
        println!("{} No problems found", "✓".green());
        return;
    }

    if !report.unresolved.is_empty() {
        println!("\n{}", "Missing ingredients:".yellow().bold());
        for err in &report.unresolved {
            println!("  {err}");
        }
    }

    if !report.cycles.is_empty() {
        println!("\n{}", "Recipe cycles:".yellow().bold());
        for err in &report.cycles {
            println!("  {err}");
        }
    }

    if !report.malformed.is_empty() {
        println!("\n{}", "Malformed recipes:".yellow().bold());
        for recipe in &report.malformed {
            let issues: Vec<String> = recipe.issues.iter().map(ToString::to_string).collect();
            println!("  {} ({}): {}", recipe.name, recipe.item, issues.join(", "));
        }
    }
}
