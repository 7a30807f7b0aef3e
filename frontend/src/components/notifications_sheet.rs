use crate::auth::use_auth;
use crate::components::icons::{Bell, CheckCheck};
use crate::components::notice::use_notice;
use crate::components::sheet::Sheet;
use geotrack_shared::{Notification, NotificationKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn kind_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "bg-info/10 text-info",
        NotificationKind::Warning => "bg-warning/10 text-warning",
        NotificationKind::Error => "bg-error/10 text-error",
    }
}

/// 通知中心
///
/// 标记已读成功后只改本地状态，不重新拉取。
#[component]
pub fn NotificationsSheet(open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();
    let items = RwSignal::new(Vec::<Notification>::new());
    let (loading, set_loading) = signal(false);

    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        set_loading.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.notifications().await {
                Ok(list) if open.get_untracked() => items.set(list),
                Ok(_) => {}
                Err(e) => notice.error("Failed to load notifications", &e),
            }
            set_loading.set(false);
        });
    });

    let mark_read = move |id: i64| {
        let api = auth.api();
        spawn_local(async move {
            match api.mark_notification_read(id).await {
                Ok(()) => items.update(|list| {
                    if let Some(n) = list.iter_mut().find(|n| n.id == id) {
                        n.is_read = true;
                    }
                }),
                Err(e) => notice.error("Failed to update notification", &e),
            }
        });
    };

    let mark_all = move |_| {
        let api = auth.api();
        spawn_local(async move {
            match api.mark_all_notifications_read().await {
                Ok(()) => items.update(|list| list.iter_mut().for_each(|n| n.is_read = true)),
                Err(e) => notice.error("Failed to update notifications", &e),
            }
        });
    };

    let unread = move || items.with(|list| list.iter().filter(|n| !n.is_read).count());

    view! {
        <Sheet open=open title="Notifications".to_string()>
            <div class="flex justify-between items-center">
                <span class="text-sm opacity-60">{move || format!("{} unread", unread())}</span>
                <button class="btn btn-ghost btn-xs gap-1" disabled=move || unread() == 0 on:click=mark_all>
                    <CheckCheck attr:class="h-3 w-3" /> "Mark all read"
                </button>
            </div>
            <Show when=move || loading.get()>
                <div class="flex justify-center py-6">
                    <span class="loading loading-spinner loading-md"></span>
                </div>
            </Show>
            <Show when=move || !loading.get() && items.with(|i| i.is_empty())>
                <div class="text-center py-6 text-base-content/50">"You're all caught up."</div>
            </Show>
            <ul class="space-y-3">
                <For
                    each=move || items.get()
                    key=|n| (n.id, n.is_read)
                    children=move |n| {
                        let id = n.id;
                        let read = n.is_read;
                        view! {
                            <li
                                class="flex gap-3 rounded-box p-3 bg-base-200 cursor-pointer"
                                class:opacity-60=read
                                on:click=move |_| if !read { mark_read(id) }
                            >
                                <div class=format!("p-2 rounded-full h-fit {}", kind_class(n.kind))>
                                    <Bell attr:class="h-4 w-4" />
                                </div>
                                <div class="flex-1 min-w-0">
                                    <div class="flex justify-between gap-2">
                                        <p class="font-bold truncate">{n.title.clone()}</p>
                                        <span class="text-[10px] opacity-50 shrink-0">{n.created_at.short_date_time()}</span>
                                    </div>
                                    <p class="text-sm opacity-70">{n.message.clone()}</p>
                                </div>
                                {(!read).then(|| view! { <span class="badge badge-primary badge-xs mt-1"></span> })}
                            </li>
                        }
                    }
                />
            </ul>
        </Sheet>
    }
}
