//! Account CLI commands: create, list.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{ContentArrangement, Table, presets};
use console::style;
use dialoguer::Password;

use taskling_core::service::account::CreateAccountRequest;

use crate::state::AppState;

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Create an account.
    Create {
        /// Unique login name.
        username: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        /// Password (prompted interactively when omitted).
        #[arg(long)]
        password: Option<String>,
    },

    /// List accounts.
    #[command(alias = "ls")]
    List,
}

/// Create a new account, prompting for a password when none was given.
pub async fn create_account(
    state: &AppState,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "passwords do not match")
            .interact()?,
    };

    let account = state
        .account_service
        .create_account(CreateAccountRequest {
            username,
            password,
            email,
            first_name,
            last_name,
        })
        .await?;

    if json {
        let out = serde_json::json!({
            "id": account.id,
            "username": account.username,
            "email": account.email,
            "date_joined": account.date_joined.to_rfc3339(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {} Account created", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("Username:").bold(), style(&account.username).cyan());
    println!("  {}  {}", style("Id:").bold(), account.id);
    println!();
    println!(
        "  {}",
        style("Obtain an API key with POST /api/token using these credentials.").dim()
    );
    println!();

    Ok(())
}

/// List all accounts as a table (or JSON).
pub async fn list_accounts(state: &AppState, json: bool) -> Result<()> {
    let accounts = state.account_service.list_accounts().await?;

    if json {
        let out: Vec<serde_json::Value> = accounts
            .iter()
            .map(|a| {
                serde_json::json!({
                    "id": a.id,
                    "username": a.username,
                    "email": a.email,
                    "first_name": a.first_name,
                    "last_name": a.last_name,
                    "date_joined": a.date_joined.to_rfc3339(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if accounts.is_empty() {
        println!();
        println!(
            "  No accounts yet. Create one with {}",
            style("taskling account create <username>").cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Username", "Email", "Name", "Joined"]);

    for account in &accounts {
        let name = format!("{} {}", account.first_name, account.last_name)
            .trim()
            .to_string();
        table.add_row(vec![
            account.id.to_string(),
            account.username.clone(),
            account.email.clone(),
            name,
            account.date_joined.format("%Y-%m-%d").to_string(),
        ]);
    }

    println!("{table}");

    Ok(())
}
