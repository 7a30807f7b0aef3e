//! GeoTrack 车队维护前端
//!
//! 采用 Context-Driven 的架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层
//!
//! 所有业务计算（保养状态、统计、输入解析）都在 `geotrack_shared` 中。

mod api;
mod auth;
mod components {
    pub mod dashboard;
    mod fleet;
    mod icons;
    mod line_chart;
    pub mod login;
    mod more;
    pub mod notice;
    mod sheet;
    mod stats;

    mod config_sheet;
    mod enrollment_sheet;
    mod history_sheet;
    mod log_sheet;
    mod login_logs_sheet;
    mod notifications_sheet;
    pub mod preferences_sheet;
    mod profile_sheet;
    mod schedules_sheet;
    mod security_sheet;
    mod support_sheet;
    mod vehicle_card;
}
pub(crate) mod web;

use crate::auth::init_auth;
use crate::components::dashboard::{DashboardPage, FleetData};
use crate::components::login::LoginPage;
use crate::components::notice::{NoticeContext, NoticeToast};
use crate::components::preferences_sheet::apply_stored_theme;

use leptos::prelude::*;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 三个标签页共用同一个面板外壳。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Fleet | AppRoute::Stats | AppRoute::More => {
            view! { <DashboardPage tab=route /> }.into_any()
        }
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <a href="/" class="btn btn-link mt-2">"Back to GeoTrack"</a>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文（读取本地令牌）
    let auth_ctx = init_auth();
    provide_context(auth_ctx);

    // 2. 全局提示与车辆缓存
    provide_context(NoticeContext::new());
    let fleet = FleetData::new();
    provide_context(fleet);

    apply_stored_theme();

    // 3. 认证信号注入路由服务与车辆缓存
    let is_authenticated = auth_ctx.is_authenticated_signal();
    fleet.follow_auth(is_authenticated);

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <NoticeToast />
    }
}
