//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。
//! 令牌本身由 `Session` 保存在 LocalStorage 中，这里只保存派生状态。

use geotrack_shared::{ApiResult, Credentials, UserProfile};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{GeoTrackApi, build_api};

/// 认证状态
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub is_authenticated: bool,
    /// 当前用户资料（`/auth/me` 返回后才有）
    pub profile: Option<UserProfile>,
}

/// 认证上下文
///
/// 通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    api: StoredValue<GeoTrackApi>,
    pub state: RwSignal<AuthState>,
}

impl AuthContext {
    pub fn new(api: GeoTrackApi) -> Self {
        Self {
            api: StoredValue::new(api),
            state: RwSignal::new(AuthState::default()),
        }
    }

    /// API 客户端的副本，可移入异步任务
    pub fn api(&self) -> GeoTrackApi {
        self.api.get_value()
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }

    /// 当前用户邮箱，资料未加载时为空
    pub fn user_email(&self) -> String {
        self.state
            .with(|s| s.profile.as_ref().map(|p| p.email.clone()))
            .unwrap_or_default()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 创建并初始化认证上下文
///
/// 本地已有令牌时直接视为已登录，随后异步拉取用户资料。
pub fn init_auth() -> AuthContext {
    let ctx = AuthContext::new(build_api());
    if ctx.api().session().is_authenticated() {
        ctx.state.update(|s| s.is_authenticated = true);
        refresh_profile(ctx);
    }
    ctx
}

/// 拉取 `/auth/me`
///
/// 令牌失效时清除会话，其它失败只记录日志。
pub fn refresh_profile(ctx: AuthContext) {
    let api = ctx.api();
    spawn_local(async move {
        match api.profile().await {
            Ok(profile) => ctx.state.update(|s| s.profile = Some(profile)),
            Err(e) if e.is_unauthorized() => {
                tracing::warn!(error = %e, "stored token rejected, signing out");
                logout(&ctx);
            }
            Err(e) => tracing::warn!(error = %e, "failed to fetch user profile"),
        }
    });
}

/// 登录：令牌写入会话后更新状态
pub async fn login(ctx: &AuthContext, email: String, password: String) -> ApiResult<()> {
    let api = ctx.api();
    api.login(&Credentials { email, password }).await?;
    ctx.state.update(|s| {
        s.is_authenticated = true;
        s.profile = None;
    });
    refresh_profile(*ctx);
    Ok(())
}

/// 注销并清除状态
///
/// 导航由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext) {
    ctx.api().logout();
    ctx.state.set(AuthState::default());
}
