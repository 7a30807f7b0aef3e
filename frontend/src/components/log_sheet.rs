use crate::auth::use_auth;
use crate::components::dashboard::use_fleet;
use crate::components::notice::use_notice;
use crate::components::sheet::Sheet;
use geotrack_shared::input::{optional_text, parse_non_negative, require_non_empty};
use geotrack_shared::{ApiResult, DEFAULT_TASK_NAME, NewMaintenanceLog, Vehicle};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
struct LogForm {
    task_name: RwSignal<String>,
    mileage: RwSignal<String>,
    hours: RwSignal<String>,
    cost: RwSignal<String>,
    notes: RwSignal<String>,
}

impl LogForm {
    fn new() -> Self {
        Self {
            task_name: RwSignal::new(DEFAULT_TASK_NAME.to_string()),
            mileage: RwSignal::new(String::new()),
            hours: RwSignal::new(String::new()),
            cost: RwSignal::new("0".to_string()),
            notes: RwSignal::new(String::new()),
        }
    }

    /// 以车辆当前读数预填
    fn prefill(&self, vehicle: &Vehicle) {
        let defaults = NewMaintenanceLog::for_vehicle(vehicle);
        self.task_name.set(defaults.task_name);
        self.mileage.set(defaults.performed_at_mileage.to_string());
        self.hours.set(defaults.performed_at_hours.to_string());
        self.cost.set(defaults.cost.to_string());
        self.notes.set(String::new());
    }

    fn to_request(&self, vehicle_id: i64) -> ApiResult<NewMaintenanceLog> {
        Ok(NewMaintenanceLog {
            vehicle_id,
            task_name: require_non_empty("Task", &self.task_name.get_untracked())?,
            performed_at_mileage: parse_non_negative("Mileage", &self.mileage.get_untracked())?,
            performed_at_hours: parse_non_negative("Engine hours", &self.hours.get_untracked())?,
            cost: parse_non_negative("Cost", &self.cost.get_untracked())?,
            notes: optional_text(&self.notes.get_untracked()),
        })
    }
}

#[component]
fn Field(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] kind: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text text-[10px] font-black uppercase tracking-widest">{label}</span>
            </label>
            <input
                type=kind
                step="any"
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=move || value.get()
                class="input input-bordered w-full"
            />
        </div>
    }
}

/// 维护记录录入
#[component]
pub fn LogSheet(open: RwSignal<bool>, vehicle: RwSignal<Option<Vehicle>>) -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();
    let fleet = use_fleet();

    let form = LogForm::new();
    let (submitting, set_submitting) = signal(false);

    Effect::new(move |_| {
        if open.get() {
            if let Some(v) = vehicle.get_untracked() {
                form.prefill(&v);
            }
        }
    });

    let title = Signal::derive(move || {
        vehicle
            .get()
            .map(|v| format!("Log Entry · {}", v.name))
            .unwrap_or_else(|| "Log Entry".to_string())
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(target) = vehicle.get_untracked() else {
            return;
        };
        let request = match form.to_request(target.id) {
            Ok(req) => req,
            Err(e) => {
                notice.alert("Failed to save log", &e);
                return;
            }
        };

        set_submitting.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.log_maintenance(&request).await {
                Ok(()) => {
                    open.set(false);
                    notice.success(format!("Maintenance logged for {}", target.name));
                    fleet.reload(auth, notice);
                }
                Err(e) => notice.alert("Failed to save log", &e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Sheet open=open title=title>
            <form on:submit=on_submit class="space-y-3">
                <Field label="Task" value=form.task_name />
                <div class="grid grid-cols-2 gap-3">
                    <Field label="Mileage" value=form.mileage kind="number" />
                    <Field label="Engine Hours" value=form.hours kind="number" />
                </div>
                <Field label="Cost ($)" value=form.cost kind="number" />
                <div class="form-control">
                    <label class="label">
                        <span class="label-text text-[10px] font-black uppercase tracking-widest">"Notes"</span>
                    </label>
                    <textarea
                        class="textarea textarea-bordered w-full"
                        rows="3"
                        on:input=move |ev| form.notes.set(event_target_value(&ev))
                        prop:value=move || form.notes.get()
                    ></textarea>
                </div>
                <button type="submit" disabled=move || submitting.get() class="btn btn-primary w-full">
                    {move || if submitting.get() {
                        view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                    } else {
                        "Complete Service".into_any()
                    }}
                </button>
            </form>
        </Sheet>
    }
}
