//! Command-line front end over the Avendro client core

use avendro_core::{Avendro, Config, LoginRequest};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "avendro", version, about = "Avendro lending platform client", long_about = None)]
struct Cli {
    /// Directory holding the local session store
    #[arg(long, env = "AVENDRO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// REST API root, e.g. http://localhost:8000/api
    #[arg(long, env = "AVENDRO_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the stored session and the view it routes to
    Status,
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "AVENDRO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Invalidate the session on the server and clear it locally
    Logout,
    /// Exchange the refresh token for a new access token
    Refresh,
    /// Fetch the authenticated user's profile
    Profile,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::new(self.data_dir.clone().unwrap_or_else(Config::data_dir));
        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    avendro_core::init_logging();

    let app = Avendro::new(cli.config())?;
    let view = app.initialize()?;

    match cli.command {
        Command::Status => {
            match app.current_user()? {
                Some(user) => println!("{} ({})", user.display_name(), user.user_type),
                None => println!("Not logged in"),
            }
            println!("view: {view}");
        }
        Command::Login { email, password } => {
            let view = app.login(&LoginRequest::new(email, password)).await?;
            println!("Logged in, view: {view}");
        }
        Command::Logout => {
            app.logout().await?;
            println!("Logged out");
        }
        Command::Refresh => {
            app.api().refresh_token().await?;
            println!("Access token refreshed");
        }
        Command::Profile => {
            let profile = app.api().get_profile().await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login() {
        let cli = Cli::try_parse_from([
            "avendro",
            "--data-dir",
            "/tmp/avendro",
            "--api-url",
            "http://127.0.0.1:8000/api",
            "login",
            "--email",
            "ben@example.com",
            "--password",
            "s3cret",
        ])
        .unwrap();

        let config = cli.config();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000/api");
        assert_eq!(config.database_path, PathBuf::from("/tmp/avendro/avendro.db"));
        assert!(matches!(
            cli.command,
            Command::Login { ref email, .. } if email == "ben@example.com"
        ));
    }

    #[test]
    fn test_requires_a_command() {
        assert!(Cli::try_parse_from(["avendro"]).is_err());
    }
}
