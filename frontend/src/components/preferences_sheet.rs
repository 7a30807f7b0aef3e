use crate::components::sheet::Sheet;
use crate::web::LocalStorage;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

const PREFERENCES_KEY: &str = "preferences";

/// 本地偏好，只保存在浏览器中
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Preferences {
    dark_mode: bool,
    notifications: bool,
    sound: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            notifications: true,
            sound: true,
        }
    }
}

impl Preferences {
    fn load() -> Self {
        LocalStorage::get_json(PREFERENCES_KEY).unwrap_or_default()
    }

    fn theme(&self) -> &'static str {
        if self.dark_mode { "dark" } else { "light" }
    }
}

/// 启动时应用已保存的主题
pub fn apply_stored_theme() {
    apply_theme(Preferences::load().theme());
}

fn apply_theme(theme: &str) {
    if let Some(root) = document().document_element() {
        if let Err(e) = root.set_attribute("data-theme", theme) {
            tracing::warn!(error = ?e, "failed to apply theme");
        }
    }
}

#[component]
fn Toggle(
    title: &'static str,
    subtitle: &'static str,
    checked: Signal<bool>,
    #[prop(into)] on_toggle: Callback<()>,
) -> impl IntoView {
    view! {
        <label class="flex items-center justify-between bg-base-200 rounded-box p-4 cursor-pointer">
            <div>
                <p class="text-xs font-black uppercase tracking-wider">{title}</p>
                <p class="text-[10px] opacity-60 font-bold">{subtitle}</p>
            </div>
            <input
                type="checkbox"
                class="toggle toggle-primary"
                prop:checked=move || checked.get()
                on:change=move |_| on_toggle.run(())
            />
        </label>
    }
}

#[component]
pub fn PreferencesSheet(open: RwSignal<bool>) -> impl IntoView {
    let prefs = RwSignal::new(Preferences::load());

    Effect::new(move |_| {
        let current = prefs.get();
        apply_theme(current.theme());
        if !LocalStorage::set_json(PREFERENCES_KEY, &current) {
            tracing::warn!("preferences not persisted");
        }
    });

    let flag = move |pick: fn(&Preferences) -> bool| Signal::derive(move || prefs.with(pick));

    view! {
        <Sheet open=open title="Preferences".to_string()>
            <Toggle
                title="Dark Theme"
                subtitle="Interface colours"
                checked=flag(|p| p.dark_mode)
                on_toggle=move |_| prefs.update(|p| p.dark_mode = !p.dark_mode)
            />
            <Toggle
                title="Notifications"
                subtitle="Push Alerts"
                checked=flag(|p| p.notifications)
                on_toggle=move |_| prefs.update(|p| p.notifications = !p.notifications)
            />
            <Toggle
                title="Sound Effects"
                subtitle="In-App Audio"
                checked=flag(|p| p.sound)
                on_toggle=move |_| prefs.update(|p| p.sound = !p.sound)
            />
            <p class="text-[10px] opacity-40 text-center">"Preferences are stored on this device only."</p>
        </Sheet>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"sound":false}"#).unwrap();
        assert!(prefs.dark_mode);
        assert!(prefs.notifications);
        assert!(!prefs.sound);
    }

    #[test]
    fn test_theme_follows_dark_mode() {
        let mut prefs = Preferences::default();
        assert_eq!(prefs.theme(), "dark");
        prefs.dark_mode = false;
        assert_eq!(prefs.theme(), "light");
    }
}
