use crate::auth::use_auth;
use crate::components::dashboard::use_fleet;
use crate::components::notice::use_notice;
use crate::components::sheet::Sheet;
use leptos::prelude::*;
use leptos::task::spawn_local;

mod form_state;

use form_state::EnrollmentForm;

/// 车辆登记
#[component]
pub fn EnrollmentSheet(open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();
    let fleet = use_fleet();

    let form = EnrollmentForm::new();
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match form.to_request() {
            Ok(req) => req,
            Err(e) => {
                notice.alert("Registration failed", &e);
                return;
            }
        };

        set_submitting.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.add_vehicle(&request).await {
                Ok(vehicle) => {
                    tracing::info!(id = vehicle.id, "vehicle enrolled");
                    form.reset();
                    open.set(false);
                    notice.success(format!("{} enrolled", vehicle.name));
                    fleet.reload(auth, notice);
                }
                Err(e) => notice.alert("Registration failed", &e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Sheet open=open title="Enrollment".to_string()>
            <form on:submit=on_submit class="space-y-4">
                <div class="form-control">
                    <label for="vehicle_name" class="label">
                        <span class="label-text">"Vehicle Name"</span>
                    </label>
                    <input id="vehicle_name" required
                        type="text"
                        placeholder="Truck 12"
                        on:input=move |ev| form.name.set(event_target_value(&ev))
                        prop:value=move || form.name.get()
                        class="input input-bordered w-full"
                    />
                </div>
                <div class="form-control">
                    <label for="geotab_id" class="label">
                        <span class="label-text">"Geotab Device ID"</span>
                    </label>
                    <input id="geotab_id" required
                        type="text"
                        placeholder="b12"
                        on:input=move |ev| form.geotab_id.set(event_target_value(&ev))
                        prop:value=move || form.geotab_id.get()
                        class="input input-bordered w-full font-mono"
                    />
                </div>
                <div class="form-control">
                    <label for="vin" class="label">
                        <span class="label-text">"VIN (optional)"</span>
                    </label>
                    <input id="vin"
                        type="text"
                        placeholder="1FTFW1EF..."
                        on:input=move |ev| form.vin.set(event_target_value(&ev))
                        prop:value=move || form.vin.get()
                        class="input input-bordered w-full font-mono uppercase"
                    />
                </div>
                <button type="submit" disabled=move || submitting.get() class="btn btn-primary w-full">
                    {move || if submitting.get() {
                        view! { <span class="loading loading-spinner"></span> "Registering..." }.into_any()
                    } else {
                        "Register Vehicle".into_any()
                    }}
                </button>
            </form>
        </Sheet>
    }
}
