use crate::components::icons::ShieldCheck;
use crate::components::sheet::Sheet;
use geotrack_shared::input::require_non_empty;
use geotrack_shared::{ApiError, ApiResult};
use leptos::prelude::*;

const UNSUPPORTED: &str =
    "Password changes are not available yet: the GeoTrack backend has no endpoint for it. \
     Contact your administrator to reset your password.";

/// 表单校验，返回新密码
fn check_passwords(current: &str, new: &str, confirm: &str) -> ApiResult<String> {
    require_non_empty("Current password", current)?;
    let new = require_non_empty("New password", new)?;
    if new != confirm.trim() {
        return Err(ApiError::invalid_input("New passwords do not match"));
    }
    if new == current.trim() {
        return Err(ApiError::invalid_input(
            "New password must differ from the current one",
        ));
    }
    Ok(new)
}

/// 修改密码
///
/// 校验通过后不会假装成功，而是明确提示后端缺少接口。
#[component]
pub fn SecuritySheet(open: RwSignal<bool>) -> impl IntoView {
    let current = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let (message, set_message) = signal(Option::<(bool, String)>::None);

    Effect::new(move |_| {
        if !open.get() {
            current.set(String::new());
            new_password.set(String::new());
            confirm.set(String::new());
            set_message.set(None);
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let result = check_passwords(
            &current.get_untracked(),
            &new_password.get_untracked(),
            &confirm.get_untracked(),
        );
        match result {
            Ok(_) => {
                tracing::info!("password change requested but not supported by backend");
                set_message.set(Some((false, UNSUPPORTED.to_string())));
            }
            Err(e) => set_message.set(Some((true, e.user_message()))),
        }
    };

    let field = move |label: &'static str, value: RwSignal<String>| {
        view! {
            <div class="form-control">
                <label class="label">
                    <span class="label-text text-[10px] font-black uppercase tracking-widest">{label}</span>
                </label>
                <input
                    type="password"
                    autocomplete="off"
                    class="input input-bordered w-full"
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </div>
        }
    };

    view! {
        <Sheet open=open title="Security".to_string()>
            <div class="flex items-center gap-3 text-success">
                <ShieldCheck attr:class="h-5 w-5" />
                <p class="text-sm font-semibold">"Sessions are protected with bearer tokens."</p>
            </div>
            <form on:submit=on_submit class="space-y-3">
                {move || message.get().map(|(is_error, text)| {
                    let class = if is_error { "alert alert-error text-sm py-2" } else { "alert alert-info text-sm py-2" };
                    view! { <div role="alert" class=class><span>{text}</span></div> }
                })}
                {field("Current Password", current)}
                {field("New Password", new_password)}
                {field("Confirm New Password", confirm)}
                <button type="submit" class="btn btn-primary w-full">"Update Password"</button>
            </form>
        </Sheet>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_confirmation_is_rejected() {
        let err = check_passwords("old", "secret1", "secret2").unwrap_err();
        assert_eq!(err.user_message(), "New passwords do not match");
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let err = check_passwords("", "secret", "secret").unwrap_err();
        assert_eq!(err.user_message(), "Current password is required.");
    }

    #[test]
    fn test_reusing_current_password_is_rejected() {
        assert!(check_passwords("same", "same", "same").is_err());
    }

    #[test]
    fn test_matching_passwords_pass() {
        assert_eq!(check_passwords("old", "new-one", "new-one").unwrap(), "new-one");
    }
}
