use anyhow::{Context as _, anyhow};
use chrono_tz::Tz;

use hrdesk_domain::team::TeamDirectory;

/// HR service configuration loaded from environment variables.
#[derive(Debug)]
pub struct HrConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3120). Env var: `HR_PORT`.
    pub hr_port: u16,
    /// Zone whose calendar decides "today" and the current week. Env var:
    /// `WORK_TIMEZONE` (IANA name, default `UTC`).
    pub work_timezone: Tz,
    /// Lead title → visible member titles. Env var: `TEAM_TITLES` (JSON object).
    pub team_titles: TeamDirectory,
}

impl HrConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL is not set")?;
        let hr_port = match lookup("HR_PORT") {
            Some(raw) => raw.parse().context("HR_PORT is not a port number")?,
            None => 3120,
        };
        let work_timezone = match lookup("WORK_TIMEZONE") {
            Some(raw) => raw
                .parse::<Tz>()
                .map_err(|e| anyhow!("WORK_TIMEZONE: {e}"))?,
            None => Tz::UTC,
        };
        let team_titles = match lookup("TEAM_TITLES") {
            Some(raw) => serde_json::from_str(&raw).context("TEAM_TITLES is not valid JSON")?,
            None => TeamDirectory::default(),
        };
        Ok(Self {
            database_url,
            hr_port,
            work_timezone,
            team_titles,
        })
    }
}
