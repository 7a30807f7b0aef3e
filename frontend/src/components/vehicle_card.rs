use crate::components::icons::{Activity, Trash2};
use geotrack_shared::format::{format_hours, format_mileage};
use geotrack_shared::{Vehicle, evaluate_default};
use leptos::prelude::*;

/// 车辆卡片
///
/// 健康状态与周期进度全部来自 `evaluate_default`。
#[component]
pub fn VehicleCard(
    vehicle: Vehicle,
    #[prop(into)] on_log: Callback<()>,
    #[prop(into)] on_history: Callback<()>,
    #[prop(into)] on_schedules: Callback<()>,
    #[prop(into)] on_delete: Callback<()>,
) -> impl IntoView {
    let status = evaluate_default(&vehicle.snapshot());
    if let Err(e) = &status {
        tracing::warn!(vehicle = vehicle.id, error = %e, "vehicle reading rejected");
    }

    let (badge, bar) = match &status {
        Ok(s) if s.classification.is_critical() => (
            "badge badge-error gap-1 font-black uppercase animate-pulse",
            "progress progress-error w-full",
        ),
        Ok(_) => (
            "badge badge-success gap-1 font-black uppercase",
            "progress progress-primary w-full",
        ),
        Err(_) => (
            "badge badge-ghost gap-1 font-black uppercase",
            "progress w-full",
        ),
    };
    let label = status
        .as_ref()
        .map(|s| s.classification.label())
        .unwrap_or("Invalid reading");
    let cycle = status
        .as_ref()
        .map(|s| {
            format!(
                "{} / {} MI",
                format_mileage(s.progress_within_cycle),
                format_mileage(s.interval.value())
            )
        })
        .unwrap_or_default();
    let percent = status.as_ref().map(|s| s.progress_percent()).unwrap_or(0.0);

    view! {
        <div class="card bg-base-100 shadow-xl overflow-hidden">
            <div class="card-body p-5 space-y-3">
                <div class="flex justify-between items-start">
                    <div class="space-y-1">
                        <h3 class="font-black text-xl tracking-tight">{vehicle.name.clone()}</h3>
                        <span class="badge badge-neutral badge-sm font-mono uppercase">
                            {vehicle.vin_label().to_string()}
                        </span>
                    </div>
                    <div class="flex gap-2 items-center">
                        <div class=badge>
                            <Activity attr:class="h-3 w-3" />
                            {label}
                        </div>
                        <button
                            class="btn btn-ghost btn-sm btn-circle text-error"
                            on:click=move |_| on_delete.run(())
                        >
                            <Trash2 attr:class="h-4 w-4" />
                        </button>
                    </div>
                </div>

                <div class="stats stats-horizontal bg-base-200 w-full">
                    <div class="stat p-3">
                        <div class="stat-title text-[10px] font-black uppercase">"Mileage"</div>
                        <div class="stat-value text-xl">
                            {format_mileage(vehicle.current_mileage)}
                            <span class="text-xs opacity-60">" MI"</span>
                        </div>
                    </div>
                    <div class="stat p-3">
                        <div class="stat-title text-[10px] font-black uppercase">"Runtime"</div>
                        <div class="stat-value text-xl">
                            {format_hours(vehicle.current_hours)}
                            <span class="text-xs opacity-60">" HR"</span>
                        </div>
                    </div>
                </div>

                <div class="space-y-2">
                    <div class="flex justify-between text-[10px] font-black uppercase tracking-wider opacity-70">
                        <span>"Next Service Cycle"</span>
                        <span>{cycle}</span>
                    </div>
                    <progress class=bar value=format!("{percent:.1}") max="100"></progress>
                </div>
            </div>

            <div class="grid grid-cols-3 border-t border-base-300">
                <button class="btn btn-ghost rounded-none text-primary" on:click=move |_| on_log.run(())>
                    "Log Entry"
                </button>
                <button class="btn btn-ghost rounded-none" on:click=move |_| on_history.run(())>
                    "History"
                </button>
                <button class="btn btn-ghost rounded-none" on:click=move |_| on_schedules.run(())>
                    "Schedules"
                </button>
            </div>
        </div>
    }
}

/// 加载占位卡片
#[component]
pub fn VehicleSkeleton() -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl p-5 space-y-4">
            <div class="flex justify-between">
                <div class="space-y-2">
                    <div class="skeleton h-6 w-32"></div>
                    <div class="skeleton h-4 w-20"></div>
                </div>
                <div class="skeleton h-6 w-20 rounded-xl"></div>
            </div>
            <div class="flex gap-3">
                <div class="skeleton h-16 flex-1"></div>
                <div class="skeleton h-16 flex-1"></div>
            </div>
            <div class="skeleton h-3 w-full"></div>
        </div>
    }
}
