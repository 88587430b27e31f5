//! Roles command - manage the role collection

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::{Confirm, Input};

use keystone_core::{DeleteOutcome, Permissions};

use super::{get_context, notify, prompting_enabled, report_submit};
use crate::output;

#[derive(Subcommand)]
pub enum RoleCommands {
    /// List roles
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a role
    Add {
        /// Role name
        #[arg(long)]
        name: Option<String>,
        /// Grant read permission
        #[arg(long)]
        read: bool,
        /// Grant write permission
        #[arg(long)]
        write: bool,
        /// Grant delete permission
        #[arg(long)]
        delete: bool,
    },

    /// Edit a role
    Edit {
        /// Role identifier
        id: String,
        /// New role name
        #[arg(long)]
        name: Option<String>,
        /// Set read permission (true/false)
        #[arg(long)]
        read: Option<bool>,
        /// Set write permission (true/false)
        #[arg(long)]
        write: Option<bool>,
        /// Set delete permission (true/false)
        #[arg(long)]
        delete: Option<bool>,
    },

    /// Remove a role by identifier
    Rm {
        /// Identifier of the role to remove
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

pub async fn run(command: RoleCommands) -> Result<()> {
    match command {
        RoleCommands::List { json } => list(json).await,
        RoleCommands::Add {
            name,
            read,
            write,
            delete,
        } => add(name, read, write, delete).await,
        RoleCommands::Edit {
            id,
            name,
            read,
            write,
            delete,
        } => edit(&id, name, read, write, delete).await,
        RoleCommands::Rm { id, force } => rm(&id, force).await,
    }
}

async fn list(json: bool) -> Result<()> {
    let ctx = get_context().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(ctx.roles.records())?);
        return Ok(());
    }

    if ctx.roles.records().is_empty() {
        output::info("No roles found");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Name", "Read", "Write", "Delete"]);
    for role in ctx.roles.records() {
        table.add_row(vec![
            role.id.as_deref().unwrap_or("-"),
            &role.name,
            output::flag(role.permissions.read),
            output::flag(role.permissions.write),
            output::flag(role.permissions.delete),
        ]);
    }
    println!("{}", table);
    Ok(())
}

async fn add(name: Option<String>, read: bool, write: bool, delete: bool) -> Result<()> {
    let mut ctx = get_context().await?;
    let interactive = prompting_enabled();

    let name = match name {
        Some(value) => value,
        None if interactive => Input::<String>::new().with_prompt("Role name").interact_text()?,
        None => anyhow::bail!("--name is required when not running interactively"),
    };

    // Flags come from the command line, or from prompts when none were
    // passed and a terminal is attached
    let permissions = if interactive && !(read || write || delete) {
        Permissions {
            read: Confirm::new().with_prompt("Grant read?").default(true).interact()?,
            write: Confirm::new().with_prompt("Grant write?").default(false).interact()?,
            delete: Confirm::new().with_prompt("Grant delete?").default(false).interact()?,
        }
    } else {
        Permissions { read, write, delete }
    };

    ctx.roles.open_blank()?;
    if let Some(draft) = ctx.roles.draft_mut() {
        draft.name = name;
        draft.permissions = Some(permissions);
    }
    report_submit(ctx.roles.submit().await);
    Ok(())
}

async fn edit(
    id: &str,
    name: Option<String>,
    read: Option<bool>,
    write: Option<bool>,
    delete: Option<bool>,
) -> Result<()> {
    let mut ctx = get_context().await?;

    let existing = match ctx.roles.find(id).cloned() {
        Some(role) => role,
        None => {
            output::error(&format!("Role '{}' not found", id));
            std::process::exit(1);
        }
    };

    ctx.roles.open_existing(existing)?;
    if let Some(draft) = ctx.roles.draft_mut() {
        if let Some(value) = name {
            draft.name = value;
        }
        let mut permissions = draft.permissions.unwrap_or_default();
        if let Some(value) = read {
            permissions.read = value;
        }
        if let Some(value) = write {
            permissions.write = value;
        }
        if let Some(value) = delete {
            permissions.delete = value;
        }
        draft.permissions = Some(permissions);
    }
    report_submit(ctx.roles.submit().await);
    Ok(())
}

async fn rm(id: &str, force: bool) -> Result<()> {
    let mut ctx = get_context().await?;

    let name = match ctx.roles.find(id) {
        Some(role) => role.name.clone(),
        None => {
            output::error(&format!("Role '{}' not found", id));
            std::process::exit(1);
        }
    };

    if !force && prompting_enabled() {
        if !Confirm::new()
            .with_prompt(format!("Remove role '{}'?", name))
            .default(false)
            .interact()?
        {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let outcome = ctx.roles.delete(id).await;
    notify(outcome.notification());
    if matches!(outcome, DeleteOutcome::Failed { .. }) {
        std::process::exit(1);
    }
    Ok(())
}
