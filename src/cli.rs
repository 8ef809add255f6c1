use crate::config::{Config, Environment};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vendorhub", version, about = "Vendor management portal")]
pub struct Cli {
    /// Config file (default: <config dir>/vendorhub/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides config and VENDORHUB_API_URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Deployment environment: development or production
    #[arg(long)]
    pub env: Option<Environment>,

    /// Location to open on start
    #[arg(long, default_value = "/")]
    pub route: String,

    /// Log file (default: <cache dir>/vendorhub/vendorhub.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags win over the config file and the environment.
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(env) = self.env {
            config.api.environment = env;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "vendorhub",
            "--api-url",
            "https://api.example.com",
            "--env",
            "production",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.environment, Environment::Production);
    }

    #[test]
    fn defaults_leave_config_alone() {
        let cli = Cli::parse_from(["vendorhub"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config, Config::default());
        assert_eq!(cli.route, "/");
    }

    #[test]
    fn rejects_unknown_environment() {
        assert!(Cli::try_parse_from(["vendorhub", "--env", "staging"]).is_err());
    }
}
