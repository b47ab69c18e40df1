use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors_permissive: bool,
    /// Upper bound applied to the `limit` query parameter
    pub max_page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_permissive: true,
            max_page_size: 100,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("NOTES_API_HOST").unwrap_or(defaults.host),
            port: parse_or("NOTES_API_PORT", lookup("NOTES_API_PORT"), defaults.port),
            cors_permissive: parse_or(
                "NOTES_API_CORS_PERMISSIVE",
                lookup("NOTES_API_CORS_PERMISSIVE"),
                defaults.cors_permissive,
            ),
            max_page_size: match parse_or(
                "NOTES_API_MAX_PAGE_SIZE",
                lookup("NOTES_API_MAX_PAGE_SIZE"),
                defaults.max_page_size,
            ) {
                0 => {
                    log::warn!(
                        "NOTES_API_MAX_PAGE_SIZE must be at least 1, using default {}",
                        defaults.max_page_size
                    );
                    defaults.max_page_size
                }
                n => n,
            },
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(s) => match s.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("{}={:?} is not valid, using default {}", key, s, default);
                default
            }
        },
    }
}
