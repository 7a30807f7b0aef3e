//! 全局提示
//!
//! 错误在发起请求的位置处理，这里只负责展示。

use std::time::Duration;

use geotrack_shared::ApiError;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

#[derive(Clone, Copy)]
pub struct NoticeContext {
    current: RwSignal<Option<Notice>>,
}

impl NoticeContext {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.current.set(Some(Notice {
            message: message.into(),
            is_error: false,
        }));
    }

    /// 非阻塞失败：只弹出提示
    pub fn error(&self, context: &str, err: &ApiError) {
        tracing::warn!(context, error = %err, "request failed");
        self.current.set(Some(Notice {
            message: format!("{context}: {}", err.user_message()),
            is_error: true,
        }));
    }

    /// 表单提交失败：弹窗显示完整的后端 detail
    pub fn alert(&self, context: &str, err: &ApiError) {
        self.error(context, err);
        if let Err(e) = window().alert_with_message(&err.user_message()) {
            tracing::warn!(error = ?e, "window.alert failed");
        }
    }

    pub fn clear(&self) {
        self.current.set(None);
    }
}

pub fn use_notice() -> NoticeContext {
    use_context::<NoticeContext>().expect("NoticeContext should be provided")
}

/// 右上角提示框，3 秒后自动消失
#[component]
pub fn NoticeToast() -> impl IntoView {
    let notice = use_notice();

    Effect::new(move |_| {
        if let Some(shown) = notice.current.get() {
            set_timeout(
                move || {
                    if notice.current.get_untracked().as_ref() == Some(&shown) {
                        notice.clear();
                    }
                },
                Duration::from_secs(3),
            );
        }
    });

    move || {
        notice.current.get().map(|n| {
            let class = if n.is_error {
                "alert alert-error shadow-lg"
            } else {
                "alert alert-success shadow-lg"
            };
            view! {
                <div class="toast toast-top toast-end z-[100]">
                    <div class=class on:click=move |_| notice.clear()>
                        <span class="whitespace-pre-wrap">{n.message}</span>
                    </div>
                </div>
            }
        })
    }
}
