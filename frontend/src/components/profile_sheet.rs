use crate::auth::{refresh_profile, use_auth};
use crate::components::sheet::Sheet;
use leptos::prelude::*;

#[component]
pub fn ProfileSheet(open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();

    Effect::new(move |_| {
        if open.get() && auth.state.with_untracked(|s| s.profile.is_none()) {
            refresh_profile(auth);
        }
    });

    let field = move |pick: fn(&geotrack_shared::UserProfile) -> String| {
        move || {
            auth.state
                .with(|s| s.profile.as_ref().map(pick))
                .unwrap_or_else(|| "Not loaded".to_string())
        }
    };

    view! {
        <Sheet open=open title="Profile".to_string()>
            <dl class="space-y-4">
                <div>
                    <dt class="text-[10px] font-black uppercase tracking-widest opacity-50">"Name"</dt>
                    <dd class="font-semibold">{field(|p| p.display_name().to_string())}</dd>
                </div>
                <div>
                    <dt class="text-[10px] font-black uppercase tracking-widest opacity-50">"Email"</dt>
                    <dd class="font-mono">{field(|p| p.email.clone())}</dd>
                </div>
            </dl>
        </Sheet>
    }
}
