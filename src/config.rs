use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Largest candidate list accepted by the batch and compare endpoints.
    pub max_batch_size: usize,
    pub score_cache_ttl_secs: u64,
    pub score_cache_capacity: u64,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            max_batch_size: 500,
            score_cache_ttl_secs: 3600,
            score_cache_capacity: 100_000,
            rate_limit_per_second: 10,
            rate_limit_burst: 20,
        }
    }
}

/// Reads an optional numeric variable, keeping `default` when it is unset or blank.
fn parse_var<T: std::str::FromStr>(name: &str, default: T, rule: &str) -> anyhow::Result<T> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be {}", name, rule)),
        _ => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let config = Self {
            port: parse_var("PORT", defaults.port, "a valid number between 1-65535")
                .and_then(|port| {
                    if port == 0 {
                        anyhow::bail!("PORT must be a valid number between 1-65535");
                    }
                    Ok(port)
                })?,
            max_batch_size: parse_var(
                "MAX_BATCH_SIZE",
                defaults.max_batch_size,
                "a positive integer",
            )
            .and_then(|size| {
                if size == 0 {
                    anyhow::bail!("MAX_BATCH_SIZE must be greater than zero");
                }
                Ok(size)
            })?,
            score_cache_ttl_secs: parse_var(
                "SCORE_CACHE_TTL_SECS",
                defaults.score_cache_ttl_secs,
                "a number of seconds",
            )?,
            score_cache_capacity: parse_var(
                "SCORE_CACHE_CAPACITY",
                defaults.score_cache_capacity,
                "a non-negative integer",
            )?,
            rate_limit_per_second: parse_var(
                "RATE_LIMIT_PER_SECOND",
                defaults.rate_limit_per_second,
                "a positive integer",
            )
            .and_then(|rate| {
                if rate == 0 {
                    anyhow::bail!("RATE_LIMIT_PER_SECOND must be greater than zero");
                }
                Ok(rate)
            })?,
            rate_limit_burst: parse_var(
                "RATE_LIMIT_BURST",
                defaults.rate_limit_burst,
                "a positive integer",
            )
            .and_then(|burst| {
                if burst == 0 {
                    anyhow::bail!("RATE_LIMIT_BURST must be greater than zero");
                }
                Ok(burst)
            })?,
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!("Max batch size: {}", config.max_batch_size);
        tracing::debug!(
            "Score cache: {}s TTL, {} entries",
            config.score_cache_ttl_secs,
            config.score_cache_capacity
        );
        tracing::debug!(
            "Rate limit: {}/s, burst {}",
            config.rate_limit_per_second,
            config.rate_limit_burst
        );

        Ok(config)
    }
}
