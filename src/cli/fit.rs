//! Compute the fit-to-frame transform for a container and content size.
//!
//! Handy for checking viewport settings without a display: the numbers are
//! exactly what a host would apply on its first layout.
//!
//! ```bash
//! $ splicetree fit --container 800x600 --content 2000x1500
//! scale 0.3400  translate (60.0, 45.0)
//! ```

use anyhow::Result;
use clap::Args;

use crate::cli::common::CommandContext;
use crate::core::GuideError;
use crate::viewport::fit::{Size, fit_transform};

/// Print the fit transform.
#[derive(Args, Debug)]
pub struct FitCommand {
    /// Container size as WIDTHxHEIGHT
    #[arg(long)]
    container: Size,

    /// Content size as WIDTHxHEIGHT
    #[arg(long)]
    content: Size,

    /// Output format (text, json)
    #[arg(short = 'f', long, default_value = "text")]
    format: String,
}

impl FitCommand {
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        if !matches!(self.format.as_str(), "text" | "json") {
            return Err(anyhow::anyhow!(
                "Invalid format '{}'. Valid formats are: text, json",
                self.format
            ));
        }

        let config = &ctx.config.viewport;
        let transform = fit_transform(self.container, self.content, config).ok_or_else(|| {
            GuideError::DegenerateLayout {
                container: self.container.to_string(),
                content: self.content.to_string(),
            }
        })?;

        if self.format == "json" {
            let json = serde_json::json!({
                "container": self.container,
                "content": self.content,
                "fit_ratio": config.fit_ratio,
                "transform": transform,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        } else {
            println!(
                "scale {:.4}  translate ({:.1}, {:.1})",
                transform.scale, transform.translate_x, transform.translate_y
            );
        }
        Ok(())
    }
}
