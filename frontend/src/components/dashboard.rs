use crate::auth::{AuthContext, use_auth};
use crate::components::fleet::FleetTab;
use crate::components::icons::*;
use crate::components::more::MoreTab;
use crate::components::notice::{NoticeContext, use_notice};
use crate::components::stats::StatsTab;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use geotrack_shared::Vehicle;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 车辆列表
///
/// 车队页与统计页共用，切换标签时不重复请求。
#[derive(Clone, Copy)]
pub struct FleetData {
    pub vehicles: RwSignal<Vec<Vehicle>>,
    pub loading: RwSignal<bool>,
    loaded: RwSignal<bool>,
}

impl FleetData {
    pub fn new() -> Self {
        Self {
            vehicles: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            loaded: RwSignal::new(false),
        }
    }

    pub fn reload(&self, auth: AuthContext, notice: NoticeContext) {
        let data = *self;
        let api = auth.api();
        data.loading.set(true);
        spawn_local(async move {
            match api.list_vehicles().await {
                Ok(list) => {
                    data.vehicles.set(list);
                    data.loaded.set(true);
                }
                Err(e) => notice.error("Failed to load vehicles", &e),
            }
            data.loading.set(false);
        });
    }

    pub fn ensure_loaded(&self, auth: AuthContext, notice: NoticeContext) {
        if !self.loaded.get_untracked() && !self.loading.get_untracked() {
            self.reload(auth, notice);
        }
    }

    pub fn remove(&self, id: i64) {
        self.vehicles.update(|list| list.retain(|v| v.id != id));
    }

    /// 注销时丢弃缓存
    pub fn clear(&self) {
        self.vehicles.set(Vec::new());
        self.loaded.set(false);
    }

    /// 认证状态变化时调用，任何途径的注销都会清空缓存
    pub fn on_auth_changed(&self, is_authenticated: bool) {
        if !is_authenticated {
            self.clear();
        }
    }

    /// 跟随认证信号
    pub fn follow_auth(&self, is_authenticated: Signal<bool>) {
        let data = *self;
        Effect::new(move |_| data.on_auth_changed(is_authenticated.get()));
    }
}

pub fn use_fleet() -> FleetData {
    use_context::<FleetData>().expect("FleetData should be provided")
}

#[component]
fn TabButton(tab: AppRoute, current: AppRoute, children: Children) -> impl IntoView {
    let router = use_router();
    let class = if tab == current {
        "flex flex-col items-center gap-1 text-primary"
    } else {
        "flex flex-col items-center gap-1 text-base-content/50"
    };
    view! {
        <button class=class on:click=move |_| router.navigate_to_route(tab)>
            {children()}
            <span class="text-[10px] font-bold uppercase">{tab.tab_label()}</span>
        </button>
    }
}

#[component]
pub fn DashboardPage(tab: AppRoute) -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();
    let fleet = use_fleet();

    fleet.ensure_loaded(auth, notice);

    let title = move || match tab {
        AppRoute::Stats => "Analytics",
        AppRoute::More => "Account",
        _ => "Fleet",
    };

    let content = match tab {
        AppRoute::Stats => view! { <StatsTab /> }.into_any(),
        AppRoute::More => view! { <MoreTab /> }.into_any(),
        _ => view! { <FleetTab /> }.into_any(),
    };

    view! {
        <div class="min-h-screen bg-base-200 pb-24 font-sans">
            <div class="navbar bg-base-100 shadow sticky top-0 z-40">
                <div class="flex-1 gap-2 px-2">
                    <Gauge attr:class="text-primary h-6 w-6" />
                    <span class="text-xl font-black tracking-tight">{title}</span>
                </div>
                <div class="flex-none px-2 text-sm text-base-content/60 hidden md:block">
                    {move || auth.state.with(|s| s.profile.as_ref().map(|p| p.display_name().to_string()))}
                </div>
            </div>

            <main class="max-w-3xl mx-auto p-4 space-y-6">{content}</main>

            <nav class="btm-nav fixed bottom-0 inset-x-0 bg-base-100 border-t border-base-300 flex justify-around py-3 z-40">
                <TabButton tab=AppRoute::Fleet current=tab>
                    <Truck attr:class="h-6 w-6" />
                </TabButton>
                <TabButton tab=AppRoute::Stats current=tab>
                    <BarChart attr:class="h-6 w-6" />
                </TabButton>
                <TabButton tab=AppRoute::More current=tab>
                    <Sliders attr:class="h-6 w-6" />
                </TabButton>
            </nav>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrack_shared::date::Timestamp;

    fn vehicle(id: i64) -> Vehicle {
        Vehicle {
            id,
            geotab_id: format!("b{id}"),
            name: format!("Truck {id}"),
            vin: None,
            current_mileage: 1200.0,
            current_hours: 10.0,
            last_sync: Timestamp::parse("2024-01-01").unwrap(),
        }
    }

    #[test]
    fn test_sign_out_drops_cached_vehicles() {
        let fleet = FleetData::new();
        fleet.vehicles.set(vec![vehicle(1), vehicle(2)]);
        fleet.loaded.set(true);

        fleet.on_auth_changed(false);

        assert!(fleet.vehicles.get_untracked().is_empty());
        assert!(!fleet.loaded.get_untracked());
    }

    #[test]
    fn test_staying_signed_in_keeps_cache() {
        let fleet = FleetData::new();
        fleet.vehicles.set(vec![vehicle(1)]);
        fleet.loaded.set(true);

        fleet.on_auth_changed(true);

        assert_eq!(fleet.vehicles.get_untracked().len(), 1);
        assert!(fleet.loaded.get_untracked());
    }
}
