use anyhow::Result;
use owo_colors::OwoColorize;

use super::Context;

pub fn run(ctx: &Context) -> Result<()> {
    let width = ctx.registry.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);

    for (name, coordinate) in ctx.registry.iter() {
        let padding = " ".repeat(width - name.chars().count());
        println!("  {}{}  {}", name, padding, coordinate.to_string().dimmed());
    }

    Ok(())
}
