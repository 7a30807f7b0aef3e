//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 三个标签页各自对应一个路由，刷新页面后停留在原标签。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 车队标签页
    Fleet,
    /// 统计标签页
    Stats,
    /// 更多（账户与设置）
    More,
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" | "/login" => Self::Login,
            "/fleet" => Self::Fleet,
            "/stats" => Self::Stats,
            "/more" => Self::More,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Fleet => "/fleet",
            Self::Stats => "/stats",
            Self::More => "/more",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Fleet | Self::Stats | Self::More)
    }

    /// 已认证用户访问登录页时应离开
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Fleet
    }

    /// 标签栏上的名称
    pub fn tab_label(&self) -> &'static str {
        match self {
            Self::Fleet => "Fleet",
            Self::Stats => "Stats",
            Self::More => "More",
            Self::Login | Self::NotFound => "",
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in [AppRoute::Login, AppRoute::Fleet, AppRoute::Stats, AppRoute::More] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/fleet/"), AppRoute::Fleet);
        assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::NotFound);
    }

    #[test]
    fn test_guard_flags() {
        assert!(!AppRoute::Login.requires_auth());
        assert!(AppRoute::Stats.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
        assert!(AppRoute::Login.should_redirect_when_authenticated());
    }
}
