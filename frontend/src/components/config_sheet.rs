use crate::auth::use_auth;
use crate::components::icons::{Bell, Server};
use crate::components::notice::use_notice;
use crate::components::sheet::Sheet;
use geotrack_shared::{
    SETTING_ADMIN_EMAIL, SETTING_GEOTAB_DB, SETTING_GEOTAB_PASS, SETTING_GEOTAB_SERVER,
    SETTING_GEOTAB_USER, Settings,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// (键, 标签, 占位符, 输入类型)
const GEOTAB_FIELDS: [(&str, &str, &str, &str); 4] = [
    (SETTING_GEOTAB_SERVER, "Server URL", "my3.geotab.com", "text"),
    (SETTING_GEOTAB_DB, "Database Name", "corp_fleet_db", "text"),
    (SETTING_GEOTAB_USER, "Username", "admin@company.com", "text"),
    (SETTING_GEOTAB_PASS, "Password", "••••••••", "password"),
];

#[component]
fn SettingInput(
    settings: RwSignal<Settings>,
    field: &'static str,
    label: &'static str,
    placeholder: &'static str,
    #[prop(default = "text")] kind: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text text-[10px] font-bold uppercase">{label}</span>
            </label>
            <input
                type=kind
                placeholder=placeholder
                class="input input-bordered w-full"
                prop:value=move || settings.with(|s| s.get(field).to_string())
                on:input=move |ev| settings.update(|s| s.set(field, event_target_value(&ev)))
            />
        </div>
    }
}

/// Geotab 集成与告警邮箱配置
///
/// 保存时提交整张表，后端未识别的键原样带回。
#[component]
pub fn ConfigSheet(open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();
    let settings = RwSignal::new(Settings::new());
    let (loading, set_loading) = signal(false);
    let (submitting, set_submitting) = signal(false);

    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        set_loading.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.settings().await {
                Ok(remote) if open.get_untracked() => settings.update(|s| s.merge(remote)),
                Ok(_) => {}
                Err(e) => notice.error("Failed to load settings", &e),
            }
            set_loading.set(false);
        });
    });

    let on_save = move |_| {
        let current = settings.get_untracked();
        set_submitting.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.save_settings(&current).await {
                Ok(()) => {
                    open.set(false);
                    notice.success("Configuration saved");
                }
                Err(e) => notice.alert("Failed to save settings", &e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Sheet open=open title="Settings".to_string()>
            <Show when=move || loading.get()>
                <progress class="progress progress-primary w-full"></progress>
            </Show>
            <div class="space-y-3">
                <div class="flex items-center gap-2 text-primary">
                    <Server attr:class="h-4 w-4" />
                    <p class="text-[10px] font-black uppercase tracking-widest">"Geotab Integration"</p>
                </div>
                {GEOTAB_FIELDS
                    .into_iter()
                    .map(|(key, label, placeholder, kind)| view! {
                        <SettingInput settings=settings field=key label=label placeholder=placeholder kind=kind />
                    })
                    .collect_view()}
            </div>
            <div class="space-y-3 pt-4 border-t border-base-300">
                <div class="flex items-center gap-2 text-warning">
                    <Bell attr:class="h-4 w-4" />
                    <p class="text-[10px] font-black uppercase tracking-widest">"Maintenance Alerts"</p>
                </div>
                <SettingInput
                    settings=settings
                    field=SETTING_ADMIN_EMAIL
                    label="Admin Email Address"
                    placeholder="fleet-admin@company.com"
                />
            </div>
            <button class="btn btn-primary w-full" disabled=move || submitting.get() on:click=on_save>
                {move || if submitting.get() { "Updating..." } else { "Save Configuration" }}
            </button>
        </Sheet>
    }
}
