use anyhow::Context;
use time::Duration;

pub const DEFAULT_JWT_EXPIRES_IN: &str = "7d";
pub const DEFAULT_BCRYPT_COST: u32 = 10;
/// Upper bound for token and cookie lifetimes.
pub const MAX_JWT_EXPIRES_IN: Duration = Duration::days(10 * 365);

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of issued tokens; the session cookie uses the same value.
    pub expires_in: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt: JwtConfig,
    pub bcrypt_cost: u32,
    /// Gates the Secure / SameSite=None cookie attributes.
    pub production: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let raw_expiry =
            lookup("JWT_EXPIRES_IN").unwrap_or_else(|| DEFAULT_JWT_EXPIRES_IN.to_string());
        let jwt = JwtConfig {
            secret: lookup("JWT_SECRET").context("JWT_SECRET must be set")?,
            expires_in: parse_expiry(&raw_expiry)
                .with_context(|| format!("invalid JWT_EXPIRES_IN {raw_expiry:?}"))?,
        };

        let bcrypt_cost = lookup("BCRYPT_COST")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_BCRYPT_COST);

        let production = lookup("NODE_ENV")
            .or_else(|| lookup("APP_ENV"))
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            database_max_connections,
            jwt,
            bcrypt_cost,
            production,
        })
    }
}

/// Parses a lifetime such as `7d`, `12h`, `90m`, `45s`, `500ms` or a bare
/// number of seconds.
pub fn parse_expiry(raw: &str) -> anyhow::Result<Duration> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);
    anyhow::ensure!(!digits.is_empty(), "expiry must start with a number");

    let amount: i64 = digits.parse().context("expiry amount out of range")?;
    let duration = match unit.trim() {
        "ms" => Duration::milliseconds(amount),
        unit => {
            let per_unit: i64 = match unit {
                "" | "s" => 1,
                "m" => 60,
                "h" => 60 * 60,
                "d" => 24 * 60 * 60,
                "w" => 7 * 24 * 60 * 60,
                other => anyhow::bail!("unknown expiry unit {other:?}"),
            };
            let secs = amount
                .checked_mul(per_unit)
                .context("expiry amount out of range")?;
            Duration::seconds(secs)
        }
    };
    anyhow::ensure!(duration.is_positive(), "expiry must be positive");
    anyhow::ensure!(
        duration <= MAX_JWT_EXPIRES_IN,
        "expiry must not exceed {} days",
        MAX_JWT_EXPIRES_IN.whole_days()
    );
    Ok(duration)
}
