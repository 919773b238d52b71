//! [`Config`]-related definitions.

use std::time;

use common::datetime::UtcOffset;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::{Display, Error};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Postgres configuration.
    pub postgres: Postgres,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// Offset from UTC (in minutes) the calendar days of the agency are
    /// observed in.
    ///
    /// Decides what "today", "this month" and "overdue" mean.
    pub utc_offset_minutes: i16,

    /// Capacity of the invalidations channel.
    #[default(64)]
    pub invalidations_capacity: usize,

    /// Service tasks configuration.
    pub tasks: Tasks,
}

impl TryFrom<Service> for service::Config {
    type Error = InvalidUtcOffset;

    fn try_from(value: Service) -> Result<Self, Self::Error> {
        let Service {
            utc_offset_minutes,
            invalidations_capacity,
            tasks:
                Tasks {
                    schedule_contract_renewals,
                },
        } = value;
        Ok(Self {
            utc_offset: UtcOffset::from_whole_seconds(
                i32::from(utc_offset_minutes) * 60,
            )
            .map_err(|_| InvalidUtcOffset(utc_offset_minutes))?,
            invalidations_capacity,
            schedule_contract_renewals:
                service::task::schedule_contract_renewals::Config {
                    interval: schedule_contract_renewals.interval,
                },
        })
    }
}

/// Error of an out of range [`Service::utc_offset_minutes`].
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("UTC offset of {_0} minutes is out of range")]
pub struct InvalidUtcOffset(#[error(not(source))] i16);

/// Service tasks configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Tasks {
    /// `ScheduleContractRenewals` task configuration.
    pub schedule_contract_renewals: Task,
}

/// Service task configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Task {
    /// Task execution interval.
    #[default(time::Duration::from_secs(60 * 60))]
    #[serde(with = "humantime_serde")]
    pub interval: time::Duration,
}

/// Postgres configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host to connect to.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port to connect to.
    #[default(5432)]
    pub port: u16,

    /// User to connect as.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password to connect with.
    #[default("postgres".to_owned())]
    pub password: String,

    /// Database name to connect to.
    #[default("postgres".to_owned())]
    pub dbname: String,
}

impl From<Postgres> for service::infra::postgres::Config {
    fn from(value: Postgres) -> Self {
        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
        } = value;

        Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password),
            dbname: Some(dbname),
            ..Self::default()
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Service, Tasks};

    #[test]
    fn converts_utc_offset() {
        let conf = service::Config::try_from(Service {
            utc_offset_minutes: -300,
            invalidations_capacity: 8,
            tasks: Tasks::default(),
        })
        .unwrap();

        assert_eq!(conf.utc_offset.whole_hours(), -5);
        assert_eq!(conf.invalidations_capacity, 8);
    }

    #[test]
    fn rejects_out_of_range_utc_offset() {
        let err = service::Config::try_from(Service {
            utc_offset_minutes: 26 * 60,
            ..Service::default()
        })
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "UTC offset of 1560 minutes is out of range",
        );
    }

    #[test]
    fn defaults_hourly_renewals_check() {
        let conf = Service::default();

        assert_eq!(conf.utc_offset_minutes, 0);
        assert_eq!(
            conf.tasks.schedule_contract_renewals.interval.as_secs(),
            60 * 60,
        );
    }
}
