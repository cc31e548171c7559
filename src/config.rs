use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_FROM_EMAIL: &str = "webmaster@localhost";
const DEFAULT_SENDMAIL: &str = "/usr/sbin/sendmail";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    server: RawServerConfig,

    #[serde(default)]
    database: RawDatabaseConfig,

    #[serde(default)]
    mail: RawMailConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServerConfig {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDatabaseConfig {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMailConfig {
    from: Option<String>,
    contact: Option<String>,
    #[serde(default)]
    transport: Transport,
    sendmail: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Console,
    Sendmail,
}

#[derive(Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MailConfig {
    /// Sender address of every outgoing email
    pub from: String,
    /// Address that receives contact form notifications
    pub contact: String,
    pub transport: Transport,
    pub sendmail: PathBuf,
}

#[derive(Debug)]
pub struct Config {
    pub server: ServerConfig,
    /// Location of the SQLite database, or `None` to use the platform data directory
    pub database_path: Option<PathBuf>,
    pub mail: MailConfig,
}

impl Config {
    fn from_raw(raw: RawConfig) -> Self {
        let from = raw
            .mail
            .from
            .unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_owned());
        Self {
            server: ServerConfig {
                host: raw.server.host.unwrap_or_else(|| DEFAULT_HOST.to_owned()),
                port: raw.server.port.unwrap_or(DEFAULT_PORT),
            },
            database_path: raw.database.path,
            mail: MailConfig {
                contact: raw.mail.contact.unwrap_or_else(|| from.clone()),
                from,
                transport: raw.mail.transport,
                sendmail: raw
                    .mail
                    .sendmail
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_SENDMAIL)),
            },
        }
    }

    /// Load the config file, falling back to the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::from_raw(RawConfig::default()));
        };

        let toml_str = read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&toml_str)
            .with_context(|| format!("Failed to deserialize TOML config {}", path.display()))?;
        Ok(Self::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_config(toml: &str) -> Result<Config> {
        Ok(Config::from_raw(toml::from_str(toml)?))
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let config = load_config("")?;
        assert_eq!(
            config.server,
            ServerConfig {
                host: "127.0.0.1".to_owned(),
                port: 8000,
            }
        );
        assert_eq!(config.database_path, None);
        assert_eq!(config.mail.from, "webmaster@localhost");
        assert_eq!(config.mail.contact, "webmaster@localhost");
        assert_eq!(config.mail.transport, Transport::Console);
        assert_eq!(config.mail.sendmail, PathBuf::from("/usr/sbin/sendmail"));
        Ok(())
    }

    #[test]
    fn test_no_path() -> Result<()> {
        let config = Config::load(None)?;
        assert_eq!(config.server.port, 8000);
        Ok(())
    }

    #[test]
    fn test_full() -> Result<()> {
        let config = load_config(
            "[server]
host = '0.0.0.0'
port = 3000

[database]
path = '/var/lib/portfolio.sqlite'

[mail]
from = 'noreply@example.com'
contact = 'owner@example.com'
transport = 'sendmail'
sendmail = '/usr/bin/sendmail'",
        )?;
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(
            config.database_path,
            Some(PathBuf::from("/var/lib/portfolio.sqlite"))
        );
        assert_eq!(
            config.mail,
            MailConfig {
                from: "noreply@example.com".to_owned(),
                contact: "owner@example.com".to_owned(),
                transport: Transport::Sendmail,
                sendmail: PathBuf::from("/usr/bin/sendmail"),
            }
        );
        Ok(())
    }

    #[test]
    fn test_contact_defaults_to_from() -> Result<()> {
        let config = load_config("[mail]\nfrom = 'site@example.com'")?;
        assert_eq!(config.mail.contact, "site@example.com");
        Ok(())
    }

    #[test]
    fn test_extra_fields() {
        assert!(load_config("foo = 'bar'").is_err());
        assert!(load_config("[server]\nfoo = 'bar'").is_err());
        assert!(load_config("[mail]\ntransport = 'pigeon'").is_err());
    }
}
