use geotrack_shared::{ApiConfig, FleetApi, Session};

use crate::web::{BrowserHttpClient, LocalStorage};

/// 浏览器中使用的 API 客户端
pub type GeoTrackApi = FleetApi<BrowserHttpClient, LocalStorage>;

fn current_hostname() -> String {
    web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default()
}

/// 根据编译期覆盖、构建类型与当前域名创建客户端
pub fn build_api() -> GeoTrackApi {
    let config = ApiConfig::resolve(
        option_env!("GEOTRACK_API_URL"),
        &current_hostname(),
        !cfg!(debug_assertions),
    );
    tracing::info!(base_url = %config.base_url, "API base URL resolved");
    FleetApi::new(
        &config.base_url,
        BrowserHttpClient,
        Session::new(LocalStorage),
    )
}
