use std::io::{self, Write};

use url::Url;

use crate::config::{Config, DEFAULT_BASE_URL};
use crate::error::{DirectoryError, Result};

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        print!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        );
        io::stdout().flush().unwrap();

        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("User Directory CLI Configuration");
    println!("================================\n");

    print!("Enter the directory API base URL [{DEFAULT_BASE_URL}]: ");
    io::stdout().flush().unwrap();

    let mut base_url = String::new();
    io::stdin().read_line(&mut base_url).unwrap();
    let base_url = base_url.trim();

    let base_url = if base_url.is_empty() {
        DEFAULT_BASE_URL
    } else {
        base_url
    };

    if Url::parse(base_url).is_err() {
        return Err(DirectoryError::InvalidBaseUrl(base_url.to_string()));
    }

    // Create config directory if it doesn't exist
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DirectoryError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let config_content = format!("base_url = \"{base_url}\"\n");

    std::fs::write(&config_path, config_content).map_err(|e| DirectoryError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'userdir' commands!");

    Ok(())
}
