//! 运行时配置

/// 生产环境后端地址
pub const PRODUCTION_API_URL: &str = "https://geotrack-pro.vercel.app/api";

/// 本地开发后端地址
pub const LOCAL_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// 选择后端地址
    ///
    /// 优先级：显式覆盖 > 发布构建或非 localhost 访问 > 本地开发地址
    pub fn resolve(url_override: Option<&str>, hostname: &str, release: bool) -> Self {
        let base_url = match url_override.map(str::trim).filter(|s| !s.is_empty()) {
            Some(url) => url.to_string(),
            None if release || hostname != "localhost" => PRODUCTION_API_URL.to_string(),
            None => LOCAL_API_URL.to_string(),
        };
        Self { base_url }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: LOCAL_API_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let cfg = ApiConfig::resolve(Some("http://10.0.0.5:9000"), "fleet.example.com", true);
        assert_eq!(cfg.base_url, "http://10.0.0.5:9000");
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let cfg = ApiConfig::resolve(Some("  "), "localhost", false);
        assert_eq!(cfg.base_url, LOCAL_API_URL);
    }

    #[test]
    fn test_remote_host_uses_production() {
        assert_eq!(
            ApiConfig::resolve(None, "geotrack-pro.vercel.app", false).base_url,
            PRODUCTION_API_URL
        );
        assert_eq!(ApiConfig::resolve(None, "localhost", true).base_url, PRODUCTION_API_URL);
    }

    #[test]
    fn test_local_development() {
        assert_eq!(ApiConfig::resolve(None, "localhost", false), ApiConfig::default());
    }
}
