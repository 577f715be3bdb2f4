use crate::storage::default_data_path;
use chrono::{FixedOffset, Local};
use std::{env, net::SocketAddr, path::PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub utc_offset: FixedOffset,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_path = env::var("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_path());

        let utc_offset = match env::var("APP_UTC_OFFSET") {
            Ok(value) => parse_utc_offset(&value).unwrap_or_else(|| {
                warn!("ignoring unparsable APP_UTC_OFFSET={value:?}");
                host_offset()
            }),
            Err(_) => host_offset(),
        };

        Self {
            port,
            data_path,
            utc_offset,
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn host_offset() -> FixedOffset {
    *Local::now().offset()
}

/// Accepts `Z`, `+09:00`, `-0530` or `+9`.
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match value.as_bytes().first().copied()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };

    if !rest.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours = digits(hours)?;
    let minutes = digits(minutes)?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn digits(part: &str) -> Option<i32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Tracing filter from a `RUST_LOG` value; unset, blank or invalid means `info`.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
