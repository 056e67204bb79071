use anyhow::Result;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::{DateStrip, Render, short_date};

pub fn run(ctx: &Context) -> Result<()> {
    let selection = ctx.selection();
    let dates: Vec<_> = ctx.schedule.dates().collect();

    println!(
        "{}",
        DateStrip {
            dates: &dates,
            selected: selection.state().date,
        }
        .render()
    );
    println!();

    for (date, events) in ctx.schedule.iter() {
        let count = format!("{} {}", events.len(), pluralize("event", events.len()));
        println!("  {:<7} {}", short_date(date), count.dimmed());
    }

    Ok(())
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
