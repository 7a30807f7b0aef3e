use crate::auth::use_auth;
use crate::components::icons::{Calendar, Plus, Wrench};
use crate::components::notice::use_notice;
use crate::components::sheet::{Sheet, is_current_vehicle};
use geotrack_shared::format::format_mileage;
use geotrack_shared::input::{parse_positive, require_non_empty};
use geotrack_shared::maintenance::parse_thresholds;
use geotrack_shared::{
    ApiResult, MaintenanceSchedule, NewSchedule, ScheduleDue, ScheduleUpdate, TrackingType,
    Vehicle,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

mod edit_dialog;

use edit_dialog::EditScheduleDialog;

fn tracking_type_from_value(value: &str) -> TrackingType {
    match value {
        "hours" => TrackingType::Hours,
        "time" => TrackingType::Time,
        _ => TrackingType::Miles,
    }
}

#[derive(Clone, Copy)]
struct NewScheduleForm {
    task_name: RwSignal<String>,
    tracking_type: RwSignal<TrackingType>,
    interval: RwSignal<String>,
    thresholds: RwSignal<String>,
}

impl NewScheduleForm {
    fn new() -> Self {
        Self {
            task_name: RwSignal::new(String::new()),
            tracking_type: RwSignal::new(TrackingType::Miles),
            interval: RwSignal::new(String::new()),
            thresholds: RwSignal::new("500,100".to_string()),
        }
    }

    fn reset(&self) {
        self.task_name.set(String::new());
        self.tracking_type.set(TrackingType::Miles);
        self.interval.set(String::new());
        self.thresholds.set("500,100".to_string());
    }

    fn to_request(&self, vehicle_id: i64) -> ApiResult<NewSchedule> {
        let alert_thresholds = self.thresholds.get_untracked().trim().to_string();
        // 提前校验格式，后端只按字符串保存
        parse_thresholds(&alert_thresholds)?;
        Ok(NewSchedule {
            vehicle_id,
            task_name: require_non_empty("Task", &self.task_name.get_untracked())?,
            tracking_type: self.tracking_type.get_untracked(),
            interval_value: parse_positive("Interval", &self.interval.get_untracked())?,
            alert_thresholds,
        })
    }
}

fn due_summary(schedule: &MaintenanceSchedule, vehicle: &Vehicle) -> (String, &'static str) {
    match ScheduleDue::compute(schedule, &vehicle.snapshot()) {
        Ok(Some(due)) => {
            let unit = due.tracking_type.unit_label();
            if due.is_overdue() {
                (
                    format!("Overdue by {} {unit}", format_mileage(-due.remaining)),
                    "badge badge-error",
                )
            } else if let Some(t) = due.crossed_threshold {
                (
                    format!(
                        "{} {unit} left (alert {})",
                        format_mileage(due.remaining),
                        format_mileage(t)
                    ),
                    "badge badge-warning",
                )
            } else {
                (
                    format!("{} {unit} left", format_mileage(due.remaining)),
                    "badge badge-success",
                )
            }
        }
        Ok(None) => (
            schedule
                .last_performed_date
                .map(|d| format!("Last done {}", d.short_date()))
                .unwrap_or_else(|| "Time based".to_string()),
            "badge badge-ghost",
        ),
        Err(e) => (e.user_message(), "badge badge-ghost"),
    }
}

/// 单车保养计划
#[component]
pub fn SchedulesSheet(open: RwSignal<bool>, vehicle: RwSignal<Option<Vehicle>>) -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();

    let (schedules, set_schedules) = signal(Vec::<MaintenanceSchedule>::new());
    let (loading, set_loading) = signal(false);
    let (submitting, set_submitting) = signal(false);
    let editing = RwSignal::new(Option::<MaintenanceSchedule>::None);
    let show_form = RwSignal::new(false);
    let form = NewScheduleForm::new();

    let load = move || {
        let Some(target) = vehicle.get_untracked() else {
            return;
        };
        set_loading.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.schedules(target.id).await {
                Ok(list)
                    if is_current_vehicle(
                        open.get_untracked(),
                        vehicle.with_untracked(|v| v.as_ref().map(|v| v.id)),
                        target.id,
                    ) =>
                {
                    set_schedules.set(list)
                }
                Ok(_) => {}
                Err(e) => notice.error("Failed to load schedules", &e),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if open.get() {
            set_schedules.set(Vec::new());
            show_form.set(false);
            load();
        }
    });

    let on_save = move |(id, update): (i64, ScheduleUpdate)| {
        set_submitting.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.update_schedule(id, update).await {
                Ok(()) => {
                    editing.set(None);
                    notice.success("Schedule updated");
                    load();
                }
                Err(e) => notice.alert("Failed to update schedule", &e),
            }
            set_submitting.set(false);
        });
    };

    let on_add = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(target) = vehicle.get_untracked() else {
            return;
        };
        let request = match form.to_request(target.id) {
            Ok(req) => req,
            Err(e) => {
                notice.alert("Failed to add schedule", &e);
                return;
            }
        };
        set_submitting.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.add_schedule(&request).await {
                Ok(()) => {
                    form.reset();
                    show_form.set(false);
                    notice.success("Schedule added");
                    load();
                }
                Err(e) => notice.alert("Failed to add schedule", &e),
            }
            set_submitting.set(false);
        });
    };

    let title = Signal::derive(move || {
        vehicle
            .get()
            .map(|v| format!("Schedules · {}", v.name))
            .unwrap_or_else(|| "Schedules".to_string())
    });

    view! {
        <Sheet open=open title=title>
            <Show when=move || loading.get()>
                <div class="flex justify-center py-6">
                    <span class="loading loading-spinner loading-md"></span>
                </div>
            </Show>
            <Show when=move || !loading.get() && schedules.with(|s| s.is_empty())>
                <div class="text-center py-6 text-base-content/50">"No schedules configured."</div>
            </Show>
            <ul class="space-y-3">
                <For
                    each=move || schedules.get()
                    key=|s| (s.id, s.interval_value.to_bits(), s.last_performed_value.to_bits())
                    children=move |schedule| {
                        let (summary, badge) = vehicle
                            .get_untracked()
                            .map(|v| due_summary(&schedule, &v))
                            .unwrap_or_default();
                        let interval = format!(
                            "Every {} {}",
                            format_mileage(schedule.interval_value),
                            schedule.tracking_type.unit_label()
                        );
                        let inactive = !schedule.is_active;
                        let to_edit = schedule.clone();
                        view! {
                            <li class="flex items-center gap-3 bg-base-200 rounded-box p-3" class:opacity-50=inactive>
                                <div class="p-2 rounded-full bg-primary/10 text-primary">
                                    {if schedule.tracking_type == TrackingType::Time {
                                        view! { <Calendar attr:class="h-4 w-4" /> }.into_any()
                                    } else {
                                        view! { <Wrench attr:class="h-4 w-4" /> }.into_any()
                                    }}
                                </div>
                                <div class="flex-1 min-w-0">
                                    <p class="font-bold truncate">{schedule.task_name.clone()}</p>
                                    <p class="text-xs opacity-60">{interval}</p>
                                    <span class=badge>{summary}</span>
                                </div>
                                <button
                                    class="btn btn-ghost btn-sm"
                                    on:click=move |_| editing.set(Some(to_edit.clone()))
                                >
                                    "Edit"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>

            <Show
                when=move || show_form.get()
                fallback=move || view! {
                    <button class="btn btn-outline w-full gap-2" on:click=move |_| show_form.set(true)>
                        <Plus attr:class="h-4 w-4" /> "Add Schedule"
                    </button>
                }
            >
                <form on:submit=on_add class="space-y-3 bg-base-200 rounded-box p-4">
                    <input type="text" placeholder="Task (e.g. Oil Change)"
                        class="input input-bordered w-full"
                        prop:value=move || form.task_name.get()
                        on:input=move |ev| form.task_name.set(event_target_value(&ev))
                    />
                    <div class="grid grid-cols-2 gap-3">
                        <select class="select select-bordered w-full"
                            on:change=move |ev| form.tracking_type.set(tracking_type_from_value(&event_target_value(&ev)))
                        >
                            <option value="miles" selected=move || form.tracking_type.get() == TrackingType::Miles>"Miles"</option>
                            <option value="hours" selected=move || form.tracking_type.get() == TrackingType::Hours>"Engine Hours"</option>
                            <option value="time" selected=move || form.tracking_type.get() == TrackingType::Time>"Days"</option>
                        </select>
                        <input type="number" step="any" placeholder="Interval"
                            class="input input-bordered w-full"
                            prop:value=move || form.interval.get()
                            on:input=move |ev| form.interval.set(event_target_value(&ev))
                        />
                    </div>
                    <input type="text" placeholder="Alert thresholds (e.g. 500,100)"
                        class="input input-bordered w-full font-mono"
                        prop:value=move || form.thresholds.get()
                        on:input=move |ev| form.thresholds.set(event_target_value(&ev))
                    />
                    <div class="flex gap-2">
                        <button type="button" class="btn btn-ghost flex-1" on:click=move |_| show_form.set(false)>"Cancel"</button>
                        <button type="submit" class="btn btn-primary flex-1" disabled=move || submitting.get()>"Add"</button>
                    </div>
                </form>
            </Show>

            <EditScheduleDialog schedule=editing submitting=submitting on_save=on_save />
        </Sheet>
    }
}
