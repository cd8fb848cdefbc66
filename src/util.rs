const MONITOR_URL: &str = "MONITOR_URL";

const DEFAULT_MONITOR_URL: &str = "http://127.0.0.1:9090";

pub fn get_monitor_url() -> String {
    let url_from_env = std::env::var(MONITOR_URL);
    url_from_env.unwrap_or_else(|_| DEFAULT_MONITOR_URL.to_string())
}

const POOL_URL: &str = "POOL_URL";

const DEFAULT_POOL_URL: &str = "http://127.0.0.1:9091";

pub fn get_pool_url() -> String {
    let url_from_env = std::env::var(POOL_URL);
    url_from_env.unwrap_or_else(|_| DEFAULT_POOL_URL.to_string())
}

const MONITOR_SECRET: &str = "MONITOR_SECRET";

pub fn get_monitor_secret() -> Option<String> {
    let secret_from_env = std::env::var(MONITOR_SECRET);
    secret_from_env.ok()
}
