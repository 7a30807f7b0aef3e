//! 保养周期编辑对话框

use geotrack_shared::input::{parse_non_negative, parse_positive};
use geotrack_shared::{ApiResult, MaintenanceSchedule, ScheduleUpdate};
use leptos::prelude::*;

fn parse_update(interval: &str, last_performed: &str) -> ApiResult<ScheduleUpdate> {
    Ok(ScheduleUpdate {
        interval_value: parse_positive("Interval", interval)?,
        last_performed_value: parse_non_negative("Last performed", last_performed)?,
    })
}

#[component]
pub fn EditScheduleDialog(
    schedule: RwSignal<Option<MaintenanceSchedule>>,
    submitting: ReadSignal<bool>,
    #[prop(into)] on_save: Callback<(i64, ScheduleUpdate)>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    let interval = RwSignal::new(String::new());
    let last_performed = RwSignal::new(String::new());
    let (error, set_error) = signal(Option::<String>::None);

    Effect::new(move |_| {
        let current = schedule.get();
        if let Some(s) = &current {
            interval.set(s.interval_value.to_string());
            last_performed.set(s.last_performed_value.to_string());
            set_error.set(None);
        }
        if let Some(dialog) = dialog_ref.get() {
            if current.is_some() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = schedule.with_untracked(|s| s.as_ref().map(|s| s.id)) else {
            return;
        };
        match parse_update(&interval.get_untracked(), &last_performed.get_untracked()) {
            Ok(update) => on_save.run((id, update)),
            Err(e) => set_error.set(Some(e.user_message())),
        }
    };

    let unit = move || {
        schedule
            .get()
            .map(|s| s.tracking_type.unit_label())
            .unwrap_or_default()
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| schedule.set(None)>
            <div class="modal-box max-w-sm">
                <h3 class="font-black text-lg">"Edit Cycle"</h3>
                <p class="text-xs uppercase tracking-wider opacity-60">
                    {move || schedule.get().map(|s| s.task_name).unwrap_or_default()}
                </p>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    {move || error.get().map(|msg| view! {
                        <div role="alert" class="alert alert-error text-sm py-2"><span>{msg}</span></div>
                    })}
                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Interval (" {unit} ")"</span>
                        </label>
                        <input type="number" step="any"
                            class="input input-bordered w-full"
                            prop:value=move || interval.get()
                            on:input=move |ev| interval.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Last Performed At (" {unit} ")"</span>
                        </label>
                        <input type="number" step="any"
                            class="input input-bordered w-full"
                            prop:value=move || last_performed.get()
                            on:input=move |ev| last_performed.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| schedule.set(None)>"Cancel"</button>
                        <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                            {move || if submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else {
                                "Save Changes".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
