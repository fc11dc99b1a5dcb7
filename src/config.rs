use std::net::SocketAddr;

use clap::{Parser, ValueEnum};

use crate::http::BodyLimit;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "multiproto",
    about = "Single-endpoint message service with header-negotiated wire formats",
    version
)]
pub struct Config {
    /// Address to listen on
    #[arg(short = 'l', long, env = "MULTIPROTO_LISTEN", default_value = "0.0.0.0:8081")]
    pub listen: SocketAddr,

    /// Number of HTTP workers (default: one per core)
    #[arg(long, env = "MULTIPROTO_WORKERS")]
    pub workers: Option<usize>,

    /// Reject request bodies larger than this many bytes (default: unlimited)
    #[arg(long, env = "MULTIPROTO_MAX_BODY_BYTES")]
    pub max_body_bytes: Option<usize>,

    #[arg(long, value_enum, env = "MULTIPROTO_LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    #[arg(long, value_enum, env = "MULTIPROTO_LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,
}

impl Config {
    pub fn body_limit(&self) -> BodyLimit {
        BodyLimit {
            max_bytes: self.max_body_bytes,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> tracing::level_filters::LevelFilter {
        match self {
            LogLevel::Error => tracing::level_filters::LevelFilter::ERROR,
            LogLevel::Warn => tracing::level_filters::LevelFilter::WARN,
            LogLevel::Info => tracing::level_filters::LevelFilter::INFO,
            LogLevel::Debug => tracing::level_filters::LevelFilter::DEBUG,
            LogLevel::Trace => tracing::level_filters::LevelFilter::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["multiproto"]).unwrap();
        assert_eq!(config.listen, "0.0.0.0:8081".parse().unwrap());
        assert_eq!(config.body_limit(), BodyLimit::default());
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn flags() {
        let config = Config::try_parse_from([
            "multiproto",
            "--listen",
            "127.0.0.1:9000",
            "--max-body-bytes",
            "1024",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(config.listen.port(), 9000);
        assert_eq!(config.body_limit().max_bytes, Some(1024));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level.as_filter(), tracing::level_filters::LevelFilter::DEBUG);
    }

    #[test]
    fn bad_listen_address() {
        assert!(Config::try_parse_from(["multiproto", "--listen", "nowhere"]).is_err());
    }
}
