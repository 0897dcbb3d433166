//! Display the recipe tree of an item.
//!
//! The tree shows every ingredient down to the leaves, with completion
//! markers and the shallow progress of each interior node:
//!
//! ```text
//! Rainbow Tree Seed  33% overall
//! [ ] Rainbow Tree Seed 33%  1@r
//! ├── [✓] Diamond Seed 100%  2@r.0
//! │   ├── [✓] Carbon Seed  4@r.0.0
//! │   └── [✓] Pressure Seed  5@r.0.1
//! ├── [ ] Magic Seed  3@r.1
//! └── [ ] Rainbow Essence (missing)  missing@r.2
//! ```
//!
//! The trailing id is what `splicetree toggle` takes.
//!
//! # Markers
//!
//! - `[✓]` complete, `[ ]` ready to complete, `[·]` waiting on ingredients
//! - `(missing)` no item has that name
//! - `(*)` the item is already being expanded higher up this branch
//!
//! # Formats
//!
//! - `tree` (default): box-drawing tree with colors
//! - `text`: indented plain text
//! - `json`: nested objects for tooling

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::collections::HashSet;

use crate::cli::common::{CommandContext, format_percent, resolve_item};
use crate::progress::CompletionStore;
use crate::tree::{NodeId, NodeKind, RecipeNode, RecipeTree, TreeBuilder};

/// Command to display an item's recipe tree.
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Root item id or exact name
    item: String,

    /// Maximum depth to display (the root is depth 0)
    #[arg(short = 'd', long)]
    depth: Option<usize>,

    /// Output format (tree, text, json)
    #[arg(short = 'f', long, default_value = "tree")]
    format: String,

    /// Highlight nodes whose name contains this text
    #[arg(short, long)]
    search: Option<String>,
}

/// Everything needed to render one node.
struct RenderContext<'a> {
    tree: &'a RecipeTree,
    store: &'a CompletionStore,
    highlighted: HashSet<&'a NodeId>,
    max_depth: Option<usize>,
}

impl RenderContext<'_> {
    fn beyond_depth(&self, node: &RecipeNode) -> bool {
        self.max_depth.is_some_and(|max| node.depth() > max)
    }

    fn marker(&self, node: &RecipeNode) -> &'static str {
        if self.store.is_complete(node.id()) {
            "[✓]"
        } else if self.store.can_complete(self.tree, node) {
            "[ ]"
        } else {
            "[·]"
        }
    }

    fn suffix(node: &RecipeNode) -> &'static str {
        match node.kind() {
            NodeKind::Item => "",
            NodeKind::Duplicate => " (*)",
            NodeKind::Missing => " (missing)",
        }
    }

    fn progress(&self, node: &RecipeNode) -> String {
        if node.is_leaf() {
            String::new()
        } else {
            format!(" {}", format_percent(self.store.progress_of(self.tree, node)))
        }
    }
}

impl TreeCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        self.validate_arguments()?;

        let index = ctx.load_index().await?;
        let root = resolve_item(&index, &self.item)?;
        let tree = TreeBuilder::new(&index).build(Some(root))?;
        let store = CompletionStore::load(ctx.storage(), &root.id);

        let render = RenderContext {
            tree: &tree,
            store: &store,
            highlighted: tree.highlighted(self.search.as_deref().unwrap_or("")).into_iter().collect(),
            max_depth: self.depth,
        };

        match self.format.as_str() {
            "json" => Self::output_json(&render)?,
            "text" => Self::output_text(&render),
            _ => Self::output_tree(&render),
        }

        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "tree" | "json" | "text" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid format '{}'. Valid formats are: tree, json, text",
                    self.format
                ));
            }
        }

        if self.depth == Some(0) {
            return Err(anyhow::anyhow!("--depth must be at least 1"));
        }
        Ok(())
    }

    fn output_tree(render: &RenderContext<'_>) {
        let tree = render.tree;
        let root = tree.root();
        println!(
            "{}  {}",
            root.display_name().cyan().bold(),
            format!("{} overall", format_percent(render.store.overall_progress(tree))).bright_black()
        );

        Self::print_line(render, root, "");
        let children: Vec<_> = tree.children(root).collect();
        for (i, child) in children.iter().enumerate() {
            Self::print_node(render, child, "", i == children.len() - 1);
        }

        if tree.iter().any(|n| n.kind() == NodeKind::Duplicate) {
            println!();
            println!("{}", "(*) = already being expanded higher up this branch".bright_black());
        }
    }

    fn print_line(render: &RenderContext<'_>, node: &RecipeNode, lead: &str) {
        let name = node.display_name();
        let name = if render.highlighted.contains(node.id()) {
            name.black().on_yellow().to_string()
        } else {
            match node.kind() {
                NodeKind::Item => name.normal().to_string(),
                NodeKind::Duplicate => name.bright_black().to_string(),
                NodeKind::Missing => name.red().to_string(),
            }
        };
        let marker = render.marker(node);
        let marker = if marker == "[✓]" {
            marker.green().to_string()
        } else {
            marker.to_string()
        };

        println!(
            "{lead}{marker} {name}{}{}  {}",
            RenderContext::suffix(node).bright_black(),
            render.progress(node),
            node.id().as_str().bright_black()
        );
    }

    fn print_node(render: &RenderContext<'_>, node: &RecipeNode, prefix: &str, is_last: bool) {
        if render.beyond_depth(node) {
            return;
        }

        let connector = if is_last { "└── " } else { "├── " };
        Self::print_line(render, node, &format!("{prefix}{connector}"));

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };
        let children: Vec<_> = render.tree.children(node).collect();
        for (i, child) in children.iter().enumerate() {
            Self::print_node(render, child, &child_prefix, i == children.len() - 1);
        }
    }

    fn output_text(render: &RenderContext<'_>) {
        for node in render.tree.iter() {
            if render.beyond_depth(node) {
                continue;
            }
            let highlight = if render.highlighted.contains(node.id()) {
                " <"
            } else {
                ""
            };
            println!(
                "{}{} {}{}{} [{}]{highlight}",
                "  ".repeat(node.depth()),
                render.marker(node),
                node.display_name(),
                RenderContext::suffix(node),
                render.progress(node),
                node.id()
            );
        }
    }

    fn output_json(render: &RenderContext<'_>) -> Result<()> {
        let tree = render.tree;
        let json = serde_json::json!({
            "root_item": tree.root_item(),
            "overall_progress": render.store.overall_progress(tree),
            "completed": render.store.completed_count(tree),
            "nodes": tree.len(),
            "tree": Self::node_to_json(render, tree.root()),
        });

        println!("{}", serde_json::to_string_pretty(&json)?);
        Ok(())
    }

    fn node_to_json(render: &RenderContext<'_>, node: &RecipeNode) -> serde_json::Value {
        let children: Vec<_> = render
            .tree
            .children(node)
            .filter(|child| !render.beyond_depth(child))
            .map(|child| Self::node_to_json(render, child))
            .collect();

        serde_json::json!({
            "id": node.id(),
            "name": node.display_name(),
            "kind": node.kind(),
            "item_id": node.source_item_id(),
            "image": node.image(),
            "complete": render.store.is_complete(node.id()),
            "can_complete": render.store.can_complete(render.tree, node),
            "progress": render.store.progress_of(render.tree, node),
            "highlighted": render.highlighted.contains(node.id()),
            "children": children,
        })
    }
}
