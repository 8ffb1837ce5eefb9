//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(name = "combined-data")]
#[command(version, about = "Serves comments joined with their posts and authors as JSON")]
pub struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted
    #[arg(short, long, env = "COMBINED_DATA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reload the configuration file when it changes
    #[arg(long, requires = "config")]
    pub watch: bool,

    /// Port to listen on
    #[arg(long, env = "COMBINED_DATA_LISTEN_PORT")]
    pub listen_port: Option<u16>,

    /// Comments collection endpoint
    #[arg(long, env = "COMBINED_DATA_COMMENTS_URL")]
    pub comments_url: Option<String>,

    /// Posts collection endpoint
    #[arg(long, env = "COMBINED_DATA_POSTS_URL")]
    pub posts_url: Option<String>,

    /// Users collection endpoint
    #[arg(long, env = "COMBINED_DATA_USERS_URL")]
    pub users_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "COMBINED_DATA_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            listen_port: self.listen_port,
            comments_url: self.comments_url.clone(),
            posts_url: self.posts_url.clone(),
            users_url: self.users_url.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "combined-data",
            "--listen-port",
            "9000",
            "--posts-url",
            "http://127.0.0.1:1234/posts",
        ])
        .unwrap();

        assert_eq!(
            cli.overrides(),
            ConfigOverrides {
                listen_port: Some(9000),
                posts_url: Some("http://127.0.0.1:1234/posts".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_watch_requires_config() {
        assert!(Cli::try_parse_from(["combined-data", "--watch"]).is_err());
        let cli = Cli::try_parse_from(["combined-data", "-c", "svc.toml", "--watch"]).unwrap();
        assert!(cli.watch);
        assert_eq!(cli.config, Some(PathBuf::from("svc.toml")));
    }
}
