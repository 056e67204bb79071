use anyhow::Result;
use owo_colors::OwoColorize;

use super::{Context, parse_date_arg};
use crate::render::{render_rows, short_date};

pub fn run(ctx: &Context, date: Option<&str>) -> Result<()> {
    let mut selection = ctx.selection();

    if let Some(date) = parse_date_arg(date)? {
        selection.select_date(date);
    }

    let Some(date) = selection.state().date else {
        anyhow::bail!("No festival days to show");
    };

    let header = format!("Events for {}", short_date(date));
    println!("{}", header.bold());
    println!();
    println!(
        "{}",
        render_rows(
            &selection.rows(&ctx.schedule),
            &ctx.registry,
            false,
            ctx.show_unmapped_warning
        )
    );

    Ok(())
}
