//! Users command - manage the user collection

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

use keystone_core::{DeleteOutcome, KeystoneContext};

use super::{get_context, notify, prompting_enabled, report_submit};
use crate::output;

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a user
    Add {
        /// Full name
        #[arg(long)]
        name: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Role name
        #[arg(long)]
        role: Option<String>,
        /// Create the user as inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Edit a user
    Edit {
        /// User identifier
        id: String,
        /// New full name
        #[arg(long)]
        name: Option<String>,
        /// New email address
        #[arg(long)]
        email: Option<String>,
        /// New role name
        #[arg(long)]
        role: Option<String>,
        /// Set active status (true/false)
        #[arg(long)]
        status: Option<bool>,
    },

    /// Remove a user by email
    Rm {
        /// Email of the user to remove
        email: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

pub async fn run(command: UserCommands) -> Result<()> {
    match command {
        UserCommands::List { json } => list(json).await,
        UserCommands::Add {
            name,
            email,
            role,
            inactive,
        } => add(name, email, role, inactive).await,
        UserCommands::Edit {
            id,
            name,
            email,
            role,
            status,
        } => edit(&id, name, email, role, status).await,
        UserCommands::Rm { email, force } => rm(&email, force).await,
    }
}

async fn list(json: bool) -> Result<()> {
    let ctx = get_context().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(ctx.users.records())?);
        return Ok(());
    }

    if ctx.users.records().is_empty() {
        output::info("No users found");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Name", "Email", "Role", "Status"]);
    for user in ctx.users.records() {
        table.add_row(vec![
            user.id.as_deref().unwrap_or("-"),
            &user.name,
            &user.email,
            &user.role,
            if user.status { "active" } else { "inactive" },
        ]);
    }
    println!("{}", table);
    Ok(())
}

async fn add(
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
    inactive: bool,
) -> Result<()> {
    let mut ctx = get_context().await?;
    let interactive = prompting_enabled();

    let name = match name {
        Some(value) => value,
        None if interactive => Input::<String>::new().with_prompt("Name").interact_text()?,
        None => anyhow::bail!("--name is required when not running interactively"),
    };
    let email = match email {
        Some(value) => value,
        None if interactive => Input::<String>::new().with_prompt("Email").interact_text()?,
        None => anyhow::bail!("--email is required when not running interactively"),
    };
    let role = match role {
        Some(value) => value,
        None if interactive => prompt_role(&ctx)?,
        None => anyhow::bail!("--role is required when not running interactively"),
    };

    ctx.users.open_blank()?;
    if let Some(draft) = ctx.users.draft_mut() {
        draft.name = name;
        draft.email = email;
        draft.role = role;
        draft.status = !inactive;
    }
    report_submit(ctx.users.submit().await);
    Ok(())
}

/// Pick a role from the loaded collection, falling back to free text when
/// no roles exist yet
fn prompt_role(ctx: &KeystoneContext) -> Result<String> {
    let names: Vec<&str> = ctx
        .roles
        .records()
        .iter()
        .map(|role| role.name.as_str())
        .collect();
    if names.is_empty() {
        return Ok(Input::<String>::new().with_prompt("Role").interact_text()?);
    }
    let index = Select::new()
        .with_prompt("Role")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(names[index].to_string())
}

async fn edit(
    id: &str,
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
    status: Option<bool>,
) -> Result<()> {
    let mut ctx = get_context().await?;

    let existing = match ctx.users.find(id).cloned() {
        Some(user) => user,
        None => {
            output::error(&format!("User '{}' not found", id));
            std::process::exit(1);
        }
    };

    ctx.users.open_existing(existing)?;
    if let Some(draft) = ctx.users.draft_mut() {
        if let Some(value) = name {
            draft.name = value;
        }
        if let Some(value) = email {
            draft.email = value;
        }
        if let Some(value) = role {
            draft.role = value;
        }
        if let Some(value) = status {
            draft.status = value;
        }
    }
    report_submit(ctx.users.submit().await);
    Ok(())
}

async fn rm(email: &str, force: bool) -> Result<()> {
    let mut ctx = get_context().await?;

    if !ctx.users.records().iter().any(|user| user.email == email) {
        output::error(&format!("User '{}' not found", email));
        std::process::exit(1);
    }

    if !force && prompting_enabled() {
        if !Confirm::new()
            .with_prompt(format!("Remove user '{}'?", email))
            .default(false)
            .interact()?
        {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let outcome = ctx.users.delete(email).await;
    notify(outcome.notification());
    if matches!(outcome, DeleteOutcome::Failed { .. }) {
        std::process::exit(1);
    }
    Ok(())
}
