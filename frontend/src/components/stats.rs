use crate::auth::use_auth;
use crate::components::dashboard::use_fleet;
use crate::components::history_sheet::GlobalHistorySheet;
use crate::components::icons::{Activity, ChevronRight, Clock};
use crate::components::line_chart::LineChart;
use crate::components::notice::use_notice;
use geotrack_shared::analytics::{fleet_health_index, monthly_cost_trend, trend_start_label};
use geotrack_shared::format::format_currency;
use geotrack_shared::{CostSummary, LogRecord, ServiceInterval};
use leptos::prelude::*;
use leptos::task::spawn_local;

const TREND_MONTHS: usize = 6;

/// 统计标签页
///
/// 费用汇总优先取 `/analytics/cost`，失败时用本地记录汇总。
#[component]
pub fn StatsTab() -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();
    let fleet = use_fleet();

    let (records, set_records) = signal(Vec::<LogRecord>::new());
    let (summary, set_summary) = signal(Option::<CostSummary>::None);
    let (loading, set_loading) = signal(true);
    let history_open = RwSignal::new(false);

    let api = auth.api();
    spawn_local(async move {
        let (logs, cost) = (api.log_records().await, api.cost_summary().await);
        match logs {
            Ok(list) => set_records.set(list),
            Err(e) => notice.error("Failed to load records", &e),
        }
        match cost {
            Ok(s) => set_summary.set(Some(s)),
            Err(e) => tracing::warn!(error = %e, "cost summary unavailable, using local totals"),
        }
        set_loading.set(false);
    });

    let totals = Memo::new(move |_| {
        summary
            .get()
            .unwrap_or_else(|| records.with(|r| CostSummary::from_records(r)))
    });
    let trend = Signal::derive(move || records.with(|r| monthly_cost_trend(r, TREND_MONTHS)));
    let health = move || {
        fleet
            .vehicles
            .with(|v| fleet_health_index(v, ServiceInterval::default()))
            .map(|h| format!("{h}%"))
            .unwrap_or_else(|| "--".to_string())
    };
    let since = move || {
        trend.with(|t| trend_start_label(t))
            .map(|s| format!("Since {s}"))
            .unwrap_or_else(|| "No spend yet".to_string())
    };

    view! {
        <div class="grid grid-cols-2 gap-4">
            <div class="card bg-primary text-primary-content shadow">
                <div class="card-body p-5">
                    <Activity attr:class="h-5 w-5 opacity-70" />
                    <p class="text-[10px] font-black uppercase tracking-widest opacity-70">"Fleet Health"</p>
                    <p class="text-3xl font-black">{health}</p>
                </div>
            </div>
            <div class="card bg-base-100 shadow">
                <div class="card-body p-5">
                    <Clock attr:class="h-5 w-5 opacity-50" />
                    <p class="text-[10px] font-black uppercase tracking-widest opacity-50">"Services Logged"</p>
                    <p class="text-3xl font-black">{move || totals.get().count}</p>
                </div>
            </div>
        </div>

        <div class="card bg-base-100 shadow">
            <div class="card-body p-5 space-y-3">
                <div class="flex justify-between items-end">
                    <div>
                        <p class="text-[10px] font-black uppercase tracking-widest opacity-50">"Maintenance Spend"</p>
                        <p class="text-3xl font-black font-mono">
                            {move || format_currency(totals.get().total_maintenance_cost)}
                        </p>
                    </div>
                    <span class="text-xs opacity-50">{since}</span>
                </div>
                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <div class="skeleton h-36 w-full"></div> }
                >
                    <Show
                        when=move || trend.with(|t| !t.is_empty())
                        fallback=|| view! {
                            <div class="h-36 flex items-center justify-center text-sm opacity-50">
                                "No maintenance costs recorded."
                            </div>
                        }
                    >
                        <LineChart data=trend />
                    </Show>
                </Show>
            </div>
        </div>

        <button class="btn btn-block bg-base-100 justify-between" on:click=move |_| history_open.set(true)>
            "View all service records"
            <ChevronRight attr:class="h-4 w-4" />
        </button>

        <GlobalHistorySheet open=history_open />
    }
}
