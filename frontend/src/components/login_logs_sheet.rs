use crate::auth::use_auth;
use crate::components::icons::Key;
use crate::components::notice::use_notice;
use crate::components::sheet::Sheet;
use geotrack_shared::LoginRecord;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginLogsSheet(open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();
    let (records, set_records) = signal(Vec::<LoginRecord>::new());
    let (loading, set_loading) = signal(false);

    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        set_loading.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.login_records().await {
                Ok(mut list) => {
                    list.sort_by(|a, b| b.login_time.cmp(&a.login_time));
                    set_records.set(list);
                }
                Err(e) => notice.error("Failed to load login activity", &e),
            }
            set_loading.set(false);
        });
    });

    view! {
        <Sheet open=open title="Login Activity".to_string()>
            <Show when=move || loading.get()>
                <div class="flex justify-center py-6">
                    <span class="loading loading-spinner loading-md"></span>
                </div>
            </Show>
            <Show when=move || !loading.get() && records.with(|r| r.is_empty())>
                <div class="text-center py-6 text-base-content/50">"No sign-ins recorded."</div>
            </Show>
            <ul class="space-y-2">
                <For
                    each=move || records.get()
                    key=|r| r.id
                    children=|record| view! {
                        <li class="flex items-center gap-3 bg-base-200 rounded-box p-3">
                            <Key attr:class="h-4 w-4 opacity-60" />
                            <div class="flex-1 min-w-0">
                                <p class="font-semibold truncate">{record.email.clone()}</p>
                                <p class="text-xs opacity-60 font-mono">{record.login_time.short_date_time()}</p>
                            </div>
                        </li>
                    }
                />
            </ul>
        </Sheet>
    }
}
