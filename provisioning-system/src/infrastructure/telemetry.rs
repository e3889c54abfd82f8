use serde::Deserialize;
use tracing::metadata::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    filter::Directive, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Logging output settings.
#[derive(Deserialize, Clone, Debug)]
pub struct TelemetryConfig {
    #[serde(default = "enabled")]
    pub enable: bool,
    /// Level applied to every layer before its own filter.
    #[serde(default)]
    pub max_level: LoggingLevel,
    /// `EnvFilter` directives, e.g. `sqlx=warn,service_cluster=debug`.
    #[serde(default)]
    pub directives: String,
    /// Environment variable to read extra directives from.
    #[serde(default)]
    pub directives_env: String,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub file: FileConfig,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enable: enabled(),
            max_level: Default::default(),
            directives: Default::default(),
            directives_env: Default::default(),
            console: Default::default(),
            file: Default::default(),
        }
    }
}

#[derive(Default, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
    Off,
}

impl From<LoggingLevel> for LevelFilter {
    fn from(val: LoggingLevel) -> Self {
        match val {
            LoggingLevel::Error => LevelFilter::ERROR,
            LoggingLevel::Warn => LevelFilter::WARN,
            LoggingLevel::Info => LevelFilter::INFO,
            LoggingLevel::Debug => LevelFilter::DEBUG,
            LoggingLevel::Trace => LevelFilter::TRACE,
            LoggingLevel::Off => LevelFilter::OFF,
        }
    }
}

impl From<LoggingLevel> for Directive {
    fn from(val: LoggingLevel) -> Self {
        LevelFilter::from(val).into()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ConsoleConfig {
    #[serde(default = "enabled")]
    pub enable: bool,
    /// Print source file, line, thread and target with each event.
    #[serde(default)]
    pub enable_debug_logging: bool,
    #[serde(default)]
    pub max_level: LoggingLevel,
    #[serde(default)]
    pub directives: String,
    #[serde(default)]
    pub directives_env: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enable: enabled(),
            enable_debug_logging: Default::default(),
            max_level: Default::default(),
            directives: Default::default(),
            directives_env: Default::default(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct FileConfig {
    #[serde(default)]
    pub enable: bool,
    #[serde(default)]
    pub enable_debug_logging: bool,
    #[serde(default)]
    pub max_level: LoggingLevel,
    #[serde(default)]
    pub directives: String,
    #[serde(default)]
    pub directives_env: String,
    /// Log directory.
    #[serde(default = "default_path")]
    pub path: String,
    /// File name, or the file name prefix when rolling.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub rolling_time: RotationLevel,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enable: Default::default(),
            enable_debug_logging: Default::default(),
            max_level: Default::default(),
            directives: Default::default(),
            directives_env: Default::default(),
            path: default_path(),
            prefix: default_prefix(),
            rolling_time: Default::default(),
        }
    }
}

#[derive(Default, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationLevel {
    Daily,
    Hourly,
    Minutely,
    #[default]
    Never,
}

impl From<RotationLevel> for Rotation {
    fn from(val: RotationLevel) -> Self {
        match val {
            RotationLevel::Daily => Rotation::DAILY,
            RotationLevel::Hourly => Rotation::HOURLY,
            RotationLevel::Minutely => Rotation::MINUTELY,
            RotationLevel::Never => Rotation::NEVER,
        }
    }
}

fn enabled() -> bool {
    true
}

fn default_path() -> String {
    "./logs".to_string()
}

fn default_prefix() -> String {
    "provisioning.log".to_string()
}

fn env_filter(max_level: LoggingLevel, directives: &str, directives_env: &str) -> EnvFilter {
    let mut builder = EnvFilter::builder();
    if !directives_env.is_empty() {
        builder = builder.with_env_var(directives_env);
    }
    builder
        .with_default_directive(max_level.into())
        .parse_lossy(directives)
}

/// Install the global subscriber. Must be called once, before anything is logged.
pub fn initialize_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    if !config.enable {
        return Ok(());
    }
    let filter = env_filter(config.max_level, &config.directives, &config.directives_env);

    let console = config.console.enable.then(|| {
        let console = &config.console;
        let debug = console.enable_debug_logging;
        tracing_subscriber::fmt::layer()
            .with_file(debug)
            .with_line_number(debug)
            .with_thread_ids(debug)
            .with_target(debug)
            .with_filter(env_filter(
                console.max_level,
                &console.directives,
                &console.directives_env,
            ))
    });

    let file = config.file.enable.then(|| {
        let file = &config.file;
        let debug = file.enable_debug_logging;
        let appender =
            RollingFileAppender::new(file.rolling_time.into(), &file.path, &file.prefix);
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(appender)
            .with_file(debug)
            .with_line_number(debug)
            .with_thread_ids(debug)
            .with_target(debug)
            .with_filter(env_filter(
                file.max_level,
                &file.directives,
                &file.directives_env,
            ))
    });

    Registry::default()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()?;
    Ok(())
}
