use leptos::prelude::*;

use crate::components::icons::X;

/// 异步结果到达时面板是否仍属于发起请求的车辆
///
/// 面板已关闭或已切换到别的车辆时结果应丢弃。
pub fn is_current_vehicle(open: bool, selected: Option<i64>, requested: i64) -> bool {
    open && selected == Some(requested)
}

/// 底部弹出面板
///
/// 基于 `<dialog>`，`open` 信号与 DOM 状态双向同步。
#[component]
pub fn Sheet(
    open: RwSignal<bool>,
    #[prop(into)] title: Signal<String>,
    children: Children,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    view! {
        <dialog
            class="modal modal-bottom sm:modal-middle"
            node_ref=dialog_ref
            on:close=move |_| open.set(false)
        >
            <div class="modal-box max-h-[85vh] p-0 flex flex-col">
                <div class="flex items-center justify-between px-6 py-4 border-b border-base-300 shrink-0">
                    <h3 class="font-bold text-lg">{move || title.get()}</h3>
                    <button
                        type="button"
                        class="btn btn-ghost btn-sm btn-circle"
                        on:click=move |_| open.set(false)
                    >
                        <X attr:class="h-5 w-5" />
                    </button>
                </div>
                <div class="flex-1 overflow-y-auto p-6 space-y-4">{children()}</div>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_for_selected_vehicle_is_kept() {
        assert!(is_current_vehicle(true, Some(7), 7));
    }

    #[test]
    fn test_result_after_switching_vehicle_is_discarded() {
        // 为 A 发起的请求在切换到 B 后才返回
        assert!(!is_current_vehicle(true, Some(2), 1));
    }

    #[test]
    fn test_result_after_close_is_discarded() {
        assert!(!is_current_vehicle(false, Some(1), 1));
        assert!(!is_current_vehicle(true, None, 1));
    }
}
