use crate::auth::use_auth;
use crate::components::dashboard::use_fleet;
use crate::components::enrollment_sheet::EnrollmentSheet;
use crate::components::history_sheet::HistorySheet;
use crate::components::icons::{Plus, RefreshCw, Truck};
use crate::components::log_sheet::LogSheet;
use crate::components::notice::use_notice;
use crate::components::schedules_sheet::SchedulesSheet;
use crate::components::vehicle_card::{VehicleCard, VehicleSkeleton};
use geotrack_shared::Vehicle;
use leptos::prelude::*;
use leptos::task::spawn_local;

const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this vehicle? This will also remove all logs.";

fn confirm_delete() -> bool {
    window()
        .confirm_with_message(DELETE_CONFIRMATION)
        .unwrap_or(false)
}

/// 车队标签页
#[component]
pub fn FleetTab() -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();
    let fleet = use_fleet();

    let selected = RwSignal::new(Option::<Vehicle>::None);
    let enroll_open = RwSignal::new(false);
    let log_open = RwSignal::new(false);
    let history_open = RwSignal::new(false);
    let schedules_open = RwSignal::new(false);

    let open_for = move |vehicle: Vehicle, sheet: RwSignal<bool>| {
        selected.set(Some(vehicle));
        sheet.set(true);
    };

    let delete = move |vehicle: Vehicle| {
        if !confirm_delete() {
            return;
        }
        let api = auth.api();
        spawn_local(async move {
            match api.delete_vehicle(vehicle.id).await {
                Ok(()) => {
                    fleet.remove(vehicle.id);
                    notice.success(format!("{} removed", vehicle.name));
                }
                Err(e) => notice.alert("Delete failed", &e),
            }
        });
    };

    let count = move || fleet.vehicles.with(|v| v.len());

    view! {
        <div class="flex items-center justify-between">
            <div>
                <h2 class="text-2xl font-black">"Vehicles"</h2>
                <p class="text-xs uppercase tracking-widest text-base-content/50">
                    {move || format!("{} active units", count())}
                </p>
            </div>
            <div class="flex gap-2">
                <button
                    class="btn btn-ghost btn-circle"
                    title="Refresh"
                    disabled=move || fleet.loading.get()
                    on:click=move |_| fleet.reload(auth, notice)
                >
                    <RefreshCw attr:class=move || {
                        if fleet.loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" }
                    } />
                </button>
                <button class="btn btn-primary btn-circle" title="Enroll vehicle" on:click=move |_| enroll_open.set(true)>
                    <Plus attr:class="h-5 w-5" />
                </button>
            </div>
        </div>

        <Show
            when=move || !(fleet.loading.get() && count() == 0)
            fallback=|| view! {
                <div class="space-y-4">
                    <VehicleSkeleton />
                    <VehicleSkeleton />
                </div>
            }
        >
            <Show
                when=move || { count() > 0 }
                fallback=move || view! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body items-center text-center">
                            <Truck attr:class="h-12 w-12 opacity-30" />
                            <p class="font-bold">"No vehicles enrolled"</p>
                            <button class="btn btn-primary btn-sm" on:click=move |_| enroll_open.set(true)>
                                "Enroll your first vehicle"
                            </button>
                        </div>
                    </div>
                }
            >
                <div class="space-y-4">
                    <For
                        each=move || fleet.vehicles.get()
                        key=|v| (v.id, v.current_mileage.to_bits(), v.current_hours.to_bits())
                        children=move |vehicle| {
                            let (v1, v2, v3, v4) =
                                (vehicle.clone(), vehicle.clone(), vehicle.clone(), vehicle.clone());
                            view! {
                                <VehicleCard
                                    vehicle=vehicle
                                    on_log=move |_| open_for(v1.clone(), log_open)
                                    on_history=move |_| open_for(v2.clone(), history_open)
                                    on_schedules=move |_| open_for(v3.clone(), schedules_open)
                                    on_delete=move |_| delete(v4.clone())
                                />
                            }
                        }
                    />
                </div>
            </Show>
        </Show>

        <EnrollmentSheet open=enroll_open />
        <LogSheet open=log_open vehicle=selected />
        <HistorySheet open=history_open vehicle=selected />
        <SchedulesSheet open=schedules_open vehicle=selected />
    }
}
