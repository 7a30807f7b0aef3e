use crate::auth::use_auth;
use crate::components::icons::Clock;
use crate::components::notice::use_notice;
use crate::components::sheet::{Sheet, is_current_vehicle};
use geotrack_shared::format::{format_currency, format_mileage};
use geotrack_shared::{LogRecord, Vehicle};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
fn HistoryList(
    records: ReadSignal<Vec<LogRecord>>,
    loading: ReadSignal<bool>,
    #[prop(default = false)] show_vehicle: bool,
) -> impl IntoView {
    view! {
        <Show when=move || loading.get()>
            <div class="flex justify-center py-8">
                <span class="loading loading-spinner loading-md"></span>
            </div>
        </Show>
        <Show when=move || !loading.get() && records.with(|r| r.is_empty())>
            <div class="text-center py-8 text-base-content/50">"No maintenance recorded yet."</div>
        </Show>
        <ul class="space-y-3">
            <For
                each=move || records.get()
                key=|r| r.id
                children=move |record| {
                    let subtitle = if show_vehicle {
                        format!("{} · {}", record.vehicle_name, record.performed_date.short_date())
                    } else {
                        record.performed_date.short_date()
                    };
                    view! {
                        <li class="flex items-center gap-3 bg-base-200 rounded-box p-3">
                            <div class="p-2 rounded-full bg-primary/10 text-primary">
                                <Clock attr:class="h-4 w-4" />
                            </div>
                            <div class="flex-1 min-w-0">
                                <p class="font-bold truncate">{record.task_name.clone()}</p>
                                <p class="text-xs opacity-60">{subtitle}</p>
                                {record.notes.clone().map(|n| view! { <p class="text-xs opacity-50 italic truncate">{n}</p> })}
                            </div>
                            <div class="text-right">
                                <p class="font-mono font-bold">{format_currency(record.cost)}</p>
                                <p class="text-[10px] opacity-60 uppercase">
                                    {format_mileage(record.performed_at_mileage)} " MI"
                                </p>
                            </div>
                        </li>
                    }
                }
            />
        </ul>
    }
}

/// 单车维护历史
///
/// 数据来自全局记录按车辆过滤，不生成示例条目。
#[component]
pub fn HistorySheet(open: RwSignal<bool>, vehicle: RwSignal<Option<Vehicle>>) -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();
    let (records, set_records) = signal(Vec::<LogRecord>::new());
    let (loading, set_loading) = signal(false);

    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        let Some(target) = vehicle.get_untracked() else {
            return;
        };
        set_records.set(Vec::new());
        set_loading.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.vehicle_history(&target).await {
                Ok(list)
                    if is_current_vehicle(
                        open.get_untracked(),
                        vehicle.with_untracked(|v| v.as_ref().map(|v| v.id)),
                        target.id,
                    ) =>
                {
                    set_records.set(list)
                }
                Ok(_) => {}
                Err(e) => notice.error("Failed to load history", &e),
            }
            set_loading.set(false);
        });
    });

    let title = Signal::derive(move || {
        vehicle
            .get()
            .map(|v| format!("History · {}", v.name))
            .unwrap_or_else(|| "History".to_string())
    });

    view! {
        <Sheet open=open title=title>
            <HistoryList records=records loading=loading />
        </Sheet>
    }
}

/// 全车队维护历史
#[component]
pub fn GlobalHistorySheet(open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();
    let (records, set_records) = signal(Vec::<LogRecord>::new());
    let (loading, set_loading) = signal(false);

    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        set_loading.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.log_records().await {
                Ok(mut list) => {
                    list.sort_by(|a, b| b.performed_date.cmp(&a.performed_date));
                    set_records.set(list);
                }
                Err(e) => notice.error("Failed to load records", &e),
            }
            set_loading.set(false);
        });
    });

    view! {
        <Sheet open=open title="Service Records".to_string()>
            <HistoryList records=records loading=loading show_vehicle=true />
        </Sheet>
    }
}
