//! Environment-driven application configuration.
//!
//! Environment variables must be set by the runtime environment (compose
//! env_file, `--env-file`, or a sourced `.env`):
//! - `BACKEND_HOST` (default `0.0.0.0`)
//! - `BACKEND_PORT` (default `3001`)
//! - `BRIDGE_VULNERABILITY_RULE` — `board` (standard duplicate rotation,
//!   the default) or `dealer` (simplified per-dealer scheme)
//! - `BRIDGE_HANDS_PER_SESSION` (default 4)

use std::env;

use crate::domain::dealing::VulnerabilityRule;
use crate::domain::session::HANDS_PER_SESSION;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub vulnerability_rule: VulnerabilityRule,
    pub hands_per_session: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got {raw:?}"))
            })?,
            Err(_) => 3001,
        };

        let vulnerability_rule = match env::var("BRIDGE_VULNERABILITY_RULE") {
            Ok(raw) => parse_vulnerability_rule(&raw)?,
            Err(_) => VulnerabilityRule::Board,
        };

        let hands_per_session = match env::var("BRIDGE_HANDS_PER_SESSION") {
            Ok(raw) => raw.parse::<u32>().ok().filter(|&n| n > 0).ok_or_else(|| {
                AppError::config(format!(
                    "BRIDGE_HANDS_PER_SESSION must be a positive integer, got {raw:?}"
                ))
            })?,
            Err(_) => HANDS_PER_SESSION,
        };

        Ok(Self {
            host,
            port,
            vulnerability_rule,
            hands_per_session,
        })
    }
}

pub fn parse_vulnerability_rule(raw: &str) -> Result<VulnerabilityRule, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "board" => Ok(VulnerabilityRule::Board),
        "dealer" => Ok(VulnerabilityRule::Dealer),
        other => Err(AppError::config(format!(
            "BRIDGE_VULNERABILITY_RULE must be \"board\" or \"dealer\", got {other:?}"
        ))),
    }
}
