//! Servers command - show and edit the credentials the settings file provides

use console::style;
use std::path::PathBuf;

use nexmove_repo::{Server, Settings};

use crate::commands::relocate::load_settings;
use crate::display;
use crate::error::{CliError, Result};

pub fn run(settings: Option<&PathBuf>, output_json: bool) -> Result<()> {
    let settings = load_settings(settings)?;

    if output_json {
        let entries: Vec<_> = settings
            .servers
            .iter()
            .map(|s| serde_json::json!({ "id": s.id, "username": s.username }))
            .collect();
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| CliError::internal(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    display::servers(&settings.servers);
    Ok(())
}

/// Add a server entry, replacing an existing one with the same id
pub fn add(settings: Option<&PathBuf>, id: &str, username: &str, password: &str) -> Result<()> {
    let path = match settings {
        Some(path) => path.clone(),
        None => Settings::default_path()?,
    };
    let mut settings = Settings::load_or_default(&path)?;

    let replaced = settings.server(id).is_some();
    settings.servers.retain(|s| s.id != id);
    settings.servers.push(Server::new(id, username, password));
    settings.save_to(&path)?;

    let verb = if replaced { "Updated" } else { "Added" };
    println!(
        "{} server {} in {}",
        style(verb).green().bold(),
        style(id).cyan(),
        path.display()
    );
    Ok(())
}
