//! Progress commands: `toggle`, `status` and `reset`.
//!
//! Progress is stored per root item, so each command takes the root first.
//! Node ids are the ones `splicetree tree <root>` prints.

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;

use crate::cli::common::{CommandContext, format_percent, resolve_item};
use crate::session::{InteractionSession, ToggleOutcome};
use crate::tree::NodeId;

/// Mark a node complete or incomplete.
#[derive(Args, Debug)]
pub struct ToggleCommand {
    /// Root item id or exact name
    root: String,

    /// Node id as shown by `splicetree tree` (e.g. `4@r.0.0`)
    node_id: String,

    /// Complete the node even if its ingredients are not all complete
    #[arg(long)]
    force: bool,
}

impl ToggleCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let index = ctx.load_index().await?;
        let root = resolve_item(&index, &self.root)?.id.clone();
        let mut session =
            InteractionSession::new(index, &root, ctx.storage(), ctx.config.viewport.clone())?;
        let id = NodeId::new(self.node_id.trim());

        let outcome = if self.force {
            match session.force_toggle(&id) {
                Some(true) => ToggleOutcome::Completed,
                Some(false) => ToggleOutcome::Uncompleted,
                None => ToggleOutcome::UnknownNode,
            }
        } else {
            session.toggle(&id)
        };

        match outcome {
            ToggleOutcome::Completed => {
                println!("{} {} completed", "✓".green(), id);
            }
            ToggleOutcome::Uncompleted => {
                println!("{} {} marked incomplete", "○".yellow(), id);
            }
            ToggleOutcome::Blocked {
                pending,
            } => {
                let pending: Vec<String> = pending.iter().map(ToString::to_string).collect();
                return Err(anyhow!(
                    "Cannot complete {id}: {} ingredient(s) still incomplete: {}\n\
                     Complete them first or pass --force",
                    pending.len(),
                    pending.join(", ")
                ));
            }
            ToggleOutcome::UnknownNode => {
                return Err(anyhow!(
                    "No node '{id}' in the tree of {root}\n\
                     Run 'splicetree tree {root}' to see the node ids"
                ));
            }
        }

        println!(
            "Overall progress: {}",
            format_percent(session.overall_progress()).bold()
        );
        Ok(())
    }
}

/// Summarize progress on a root item.
#[derive(Args, Debug)]
pub struct StatusCommand {
    /// Root item id or exact name
    root: String,
}

impl StatusCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let index = ctx.load_index().await?;
        let root = resolve_item(&index, &self.root)?.id.clone();
        let session =
            InteractionSession::new(index, &root, ctx.storage(), ctx.config.viewport.clone())?;

        let tree = session.tree();
        let store = session.completion();

        println!("{}", tree.root().display_name().cyan().bold());
        println!(
            "  {} complete ({}/{} steps)",
            format_percent(session.overall_progress()).bold(),
            store.completed_count(tree),
            tree.len()
        );

        let ready: Vec<_> = tree
            .iter()
            .filter(|node| !store.is_complete(node.id()) && store.can_complete(tree, node))
            .collect();

        if ready.is_empty() {
            println!("  {}", "Nothing left to do".green());
        } else {
            println!("\n{}", "Ready to complete:".bold());
            for node in ready {
                println!("  {} {}", node.display_name(), node.id().as_str().bright_black());
            }
        }

        let stale = store.completed_ids().filter(|id| tree.get(&NodeId::new(*id)).is_none()).count();
        if stale > 0 {
            tracing::debug!("{stale} stored id(s) are not part of the current tree");
        }

        Ok(())
    }
}

/// Forget all progress on a root item.
#[derive(Args, Debug)]
pub struct ResetCommand {
    /// Root item id or exact name
    root: String,
}

impl ResetCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let index = ctx.load_index().await?;
        let root = resolve_item(&index, &self.root)?.id.clone();
        let mut session =
            InteractionSession::new(index, &root, ctx.storage(), ctx.config.viewport.clone())?;

        session.reset_progress();
        println!("{} Progress on '{}' cleared", "✓".green(), session.tree().root().display_name());
        Ok(())
    }
}
