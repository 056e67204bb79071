use anyhow::Result;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::render_rows;

pub fn run(ctx: &Context, query: &str) -> Result<()> {
    let mut selection = ctx.selection();
    selection.set_query(query);
    selection.submit_search();

    if !selection.is_search_mode() {
        anyhow::bail!("Search text is empty");
    }

    let rows = selection.rows(&ctx.schedule);

    println!("{}", "Search Results".bold());
    println!();
    println!(
        "{}",
        render_rows(&rows, &ctx.registry, true, ctx.show_unmapped_warning)
    );

    Ok(())
}
