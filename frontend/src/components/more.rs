use crate::auth::{logout, use_auth};
use crate::components::config_sheet::ConfigSheet;
use crate::components::icons::*;
use crate::components::login_logs_sheet::LoginLogsSheet;
use crate::components::notifications_sheet::NotificationsSheet;
use crate::components::preferences_sheet::PreferencesSheet;
use crate::components::profile_sheet::ProfileSheet;
use crate::components::security_sheet::SecuritySheet;
use crate::components::support_sheet::SupportSheet;
use leptos::prelude::*;

#[component]
fn MenuRow(label: &'static str, open: RwSignal<bool>, children: Children) -> impl IntoView {
    view! {
        <li>
            <button class="flex items-center gap-3 py-3" on:click=move |_| open.set(true)>
                <span class="p-2 rounded-lg bg-base-200">{children()}</span>
                <span class="flex-1 text-left font-semibold">{label}</span>
                <ChevronRight attr:class="h-4 w-4 opacity-40" />
            </button>
        </li>
    }
}

/// 账户标签页
#[component]
pub fn MoreTab() -> impl IntoView {
    let auth = use_auth();

    let profile_open = RwSignal::new(false);
    let notifications_open = RwSignal::new(false);
    let config_open = RwSignal::new(false);
    let support_open = RwSignal::new(false);
    let logins_open = RwSignal::new(false);
    let preferences_open = RwSignal::new(false);
    let security_open = RwSignal::new(false);

    let name = move || {
        auth.state.with(|s| {
            s.profile
                .as_ref()
                .map(|p| p.display_name().to_string())
                .unwrap_or_else(|| "Fleet Manager".to_string())
        })
    };

    let on_logout = move |_| logout(&auth);

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body flex-row items-center gap-4 p-5">
                <div class="avatar placeholder">
                    <div class="bg-primary text-primary-content rounded-full w-14">
                        <User attr:class="h-7 w-7" />
                    </div>
                </div>
                <div class="min-w-0">
                    <p class="font-black text-lg truncate">{name}</p>
                    <p class="text-sm opacity-60 truncate">{move || auth.user_email()}</p>
                </div>
            </div>
        </div>

        <ul class="menu bg-base-100 rounded-box shadow w-full">
            <li class="menu-title">"Account"</li>
            <MenuRow label="Profile" open=profile_open><User attr:class="h-4 w-4" /></MenuRow>
            <MenuRow label="Notifications" open=notifications_open><Bell attr:class="h-4 w-4" /></MenuRow>
            <MenuRow label="Login Activity" open=logins_open><Clock attr:class="h-4 w-4" /></MenuRow>
            <MenuRow label="Security" open=security_open><Shield attr:class="h-4 w-4" /></MenuRow>
        </ul>

        <ul class="menu bg-base-100 rounded-box shadow w-full">
            <li class="menu-title">"System"</li>
            <MenuRow label="Geotab Connection" open=config_open><Server attr:class="h-4 w-4" /></MenuRow>
            <MenuRow label="Preferences" open=preferences_open><Sliders attr:class="h-4 w-4" /></MenuRow>
            <MenuRow label="Support" open=support_open><MessageSquare attr:class="h-4 w-4" /></MenuRow>
        </ul>

        <button class="btn btn-error btn-outline w-full gap-2" on:click=on_logout>
            <LogOut attr:class="h-4 w-4" /> "Sign Out"
        </button>

        <ProfileSheet open=profile_open />
        <NotificationsSheet open=notifications_open />
        <LoginLogsSheet open=logins_open />
        <SecuritySheet open=security_open />
        <ConfigSheet open=config_open />
        <PreferencesSheet open=preferences_open />
        <SupportSheet open=support_open />
    }
}
