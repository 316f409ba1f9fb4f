use std::io::{self, Write};

use url::Url;

use crate::config::{Config, DEFAULT_API_URL};
use crate::error::{Result, UserSyncError};
use crate::prompt::{self, Confirm, StdinConfirm};

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let question = format!(
            "Config file already exists at {}. Overwrite?",
            config_path.display()
        );
        if !StdinConfirm.confirm(&question) {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("usersync Configuration");
    println!("======================\n");

    print!("User service address [{DEFAULT_API_URL}]: ");
    io::stdout().flush()?;

    let answer = prompt::read_line(&mut io::stdin().lock())?.unwrap_or_default();
    let api_url = match answer.trim() {
        "" => DEFAULT_API_URL,
        other => other,
    };

    let url = Url::parse(api_url).map_err(|e| UserSyncError::InvalidUrl {
        url: api_url.to_string(),
        source: e,
    })?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| UserSyncError::ConfigWrite {
            path: config_path.clone(),
            source: e,
        })?;
    }

    std::fs::write(&config_path, render(&url)).map_err(|e| UserSyncError::ConfigWrite {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'users' commands!");

    Ok(())
}

// Serialized URLs are percent-encoded, so they never contain a quote.
fn render(url: &Url) -> String {
    format!("api_url = \"{url}\"\n")
}
