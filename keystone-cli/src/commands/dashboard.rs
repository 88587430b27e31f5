//! Dashboard command - show summary counts

use anyhow::Result;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::get_context;

pub async fn run(json: bool) -> Result<()> {
    let mut ctx = get_context().await?;
    let summary = ctx.dashboard();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "Admin Console Summary".bold());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["Users", &summary.user_count.to_string()]);
    table.add_row(vec!["Roles", &summary.role_count.to_string()]);
    table.add_row(vec!["Permissions", &summary.permission_count.to_string()]);
    println!("{}", table);

    Ok(())
}
