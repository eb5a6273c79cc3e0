use std::io::{self, Write};
use std::path::Path;

use url::Url;

use crate::config::{Config, DEFAULT_BASE_URL};
use crate::error::{Result, UsersError};

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Users CLI Configuration");
    println!("=======================\n");

    let base_url = prompt(&format!("API base URL [{DEFAULT_BASE_URL}]: "))?;
    if !base_url.is_empty() {
        Url::parse(&base_url).map_err(|_| UsersError::InvalidUrl(base_url.clone()))?;
    }

    let timeout = prompt("Request timeout in seconds [10]: ")?;
    let timeout_secs = if timeout.is_empty() {
        None
    } else {
        Some(
            timeout
                .parse::<u64>()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
        )
    };

    save(&config_path, &render(&base_url, timeout_secs))?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'users' commands!");

    Ok(())
}

fn save(config_path: &Path, content: &str) -> Result<()> {
    let write_error = |source| UsersError::ConfigWrite {
        path: config_path.to_path_buf(),
        source,
    };

    // Create config directory if it doesn't exist
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    std::fs::write(config_path, content).map_err(write_error)
}

fn render(base_url: &str, timeout_secs: Option<u64>) -> String {
    let mut content = String::new();
    if !base_url.is_empty() {
        content.push_str(&format!("base_url = \"{base_url}\"\n"));
    }
    if let Some(secs) = timeout_secs {
        content.push_str(&format!("timeout_secs = {secs}\n"));
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_config_parses() {
        let content = render("https://api.example.com", Some(5));
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn test_save_failure_reports_write() {
        // a regular file where the config directory should be
        let blocker = std::env::temp_dir().join(format!("users-init-{}", std::process::id()));
        std::fs::write(&blocker, "").unwrap();

        let err = save(&blocker.join("config.toml"), "timeout_secs = 5\n").unwrap_err();
        std::fs::remove_file(&blocker).unwrap();

        assert!(matches!(err, UsersError::ConfigWrite { .. }));
        assert!(err.to_string().starts_with("Failed to write config file"));
    }

    #[test]
    fn test_empty_answers_render_nothing() {
        assert_eq!(render("", None), "");
    }
}
