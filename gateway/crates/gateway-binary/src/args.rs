use std::{fs, io::ErrorKind, net::SocketAddr, path::PathBuf};

use anyhow::anyhow;
use clap::Parser;
use gateway_config::{Config, Environment};
use letterboxd_server::ServerConfig;
use secrecy::SecretString;
use tracing::Subscriber;
use tracing_subscriber::{registry::LookupSpan, Layer};

mod log;

pub(crate) use log::LogLevel;

use self::log::LogStyle;

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug, Parser)]
#[command(name = "The Letterboxd Gateway", version)]
/// A GraphQL gateway to the Letterboxd API
pub struct Args {
    /// IP address on which the server will listen for incomming connections. Defaults to 127.0.0.1:4000.
    #[arg(short, long)]
    pub listen_address: Option<SocketAddr>,
    /// Path to the TOML configuration file. Defaults apply if the file does not exist.
    #[arg(long, short, env = "LETTERBOXD_CONFIG_PATH", default_value = "./letterboxd.toml")]
    pub config: PathBuf,
    /// The API key issued by Letterboxd.
    #[arg(long, env = "LETTERBOXD_API_KEY", hide_env_values = true)]
    api_key: SecretString,
    /// The API secret issued by Letterboxd.
    #[arg(long, env = "LETTERBOXD_API_SECRET", hide_env_values = true)]
    api_secret: SecretString,
    /// The Letterboxd deployment to use, over `upstream.environment` of the configuration.
    #[arg(long, env = "LETTERBOXD_ENV")]
    pub environment: Option<Environment>,
    /// Set the logging level
    #[arg(long = "log", env = "LETTERBOXD_LOG")]
    pub log_level: Option<LogLevel>,
    /// Set the style of log output
    #[arg(long, env = "LETTERBOXD_LOG_STYLE", default_value_t = LogStyle::Text)]
    log_style: LogStyle,
}

pub(crate) fn parse() -> Args {
    Args::parse()
}

impl Args {
    /// Reads the configuration file. A missing file means the defaults.
    pub fn config(&self) -> anyhow::Result<Config> {
        let config = match fs::read_to_string(&self.config) {
            Ok(config) => config,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(error) => return Err(anyhow!("error loading config file:\n{error}")),
        };

        toml::from_str(&config).map_err(|e| anyhow!("error parsing config file:\n{e}"))
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }

    pub fn log_format<S>(&self) -> BoxedLayer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync,
    {
        let layer = tracing_subscriber::fmt::layer();

        match self.log_style {
            // for interactive terminals we provide colored output
            LogStyle::Text if atty::is(atty::Stream::Stdout) => layer.with_ansi(true).boxed(),
            // for server logs, colors are off
            LogStyle::Text => layer.with_ansi(false).boxed(),
            LogStyle::Json => layer.json().boxed(),
        }
    }

    pub fn into_server_config(self, config: Config) -> ServerConfig {
        ServerConfig {
            listen_addr: self.listen_address,
            config,
            environment: self.environment,
            api_key: self.api_key,
            api_secret: self.api_secret,
        }
    }
}
