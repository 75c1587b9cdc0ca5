#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub provider_api_key: String,
    pub provider_base_url: String,
    pub search_radius_km: f64,
    pub result_limit: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("provider_api_key", &"[redacted]")
            .field("provider_base_url", &self.provider_base_url)
            .field("search_radius_km", &self.search_radius_km)
            .field("result_limit", &self.result_limit)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
