use crate::app_config::AppConfig;
use crate::geo::DEFAULT_RADIUS_KM;
use crate::ConfigError;

/// Geoapify API root used when `NEARBY_PROVIDER_BASE_URL` is unset.
pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.geoapify.com/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let provider_api_key = require("GEOAPIFY_API_KEY")?;

    let log_level = or_default("NEARBY_LOG_LEVEL", "info");
    let provider_base_url = or_default("NEARBY_PROVIDER_BASE_URL", DEFAULT_PROVIDER_BASE_URL);

    let search_radius_km = parse_f64("NEARBY_SEARCH_RADIUS_KM", &DEFAULT_RADIUS_KM.to_string())?;
    if !search_radius_km.is_finite() || search_radius_km <= 0.0 {
        return Err(invalid(
            "NEARBY_SEARCH_RADIUS_KM",
            format!("radius must be a positive number of kilometres, got {search_radius_km}"),
        ));
    }

    let result_limit = parse_u32("NEARBY_RESULT_LIMIT", "20")?;
    if result_limit == 0 {
        return Err(invalid(
            "NEARBY_RESULT_LIMIT",
            "limit must be at least 1".to_string(),
        ));
    }

    let request_timeout_secs = parse_u64("NEARBY_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("NEARBY_USER_AGENT", "nearby/0.1 (place-discovery)");

    Ok(AppConfig {
        log_level,
        provider_api_key,
        provider_base_url,
        search_radius_km,
        result_limit,
        request_timeout_secs,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
