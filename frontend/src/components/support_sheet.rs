use crate::auth::use_auth;
use crate::components::icons::{MessageSquare, Paperclip};
use crate::components::notice::use_notice;
use crate::components::sheet::Sheet;
use geotrack_shared::input::{parse_count, require_non_empty};
use geotrack_shared::{ApiError, ApiResult, Attachment, SupportTicket};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

/// 读取选中的文件
async fn read_attachment(input: &web_sys::HtmlInputElement) -> ApiResult<Option<Attachment>> {
    let Some(file) = input.files().and_then(|list| list.get(0)) else {
        return Ok(None);
    };
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::invalid_input(format!("Could not read attachment: {e:?}")))?;
    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    Ok(Some(Attachment {
        file_name: file.name(),
        content_type,
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    }))
}

fn validate(issue: &str, impact: &str, description: &str) -> ApiResult<(String, u32, String)> {
    Ok((
        require_non_empty("Issue", issue)?,
        parse_count("Impact count", impact)?,
        require_non_empty("Description", description)?,
    ))
}

/// 技术支持工单
///
/// 以 multipart 提交，附件可选。
#[component]
pub fn SupportSheet(open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();

    let issue_type = RwSignal::new(String::new());
    let impact_count = RwSignal::new("1".to_string());
    let description = RwSignal::new(String::new());
    let file_name = RwSignal::new(Option::<String>::None);
    let file_input = NodeRef::<leptos::html::Input>::new();
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    let reset = move || {
        issue_type.set(String::new());
        impact_count.set("1".to_string());
        description.set(String::new());
        file_name.set(None);
        set_error.set(None);
        if let Some(input) = file_input.get_untracked() {
            input.set_value("");
        }
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        let fields = validate(
            &issue_type.get_untracked(),
            &impact_count.get_untracked(),
            &description.get_untracked(),
        );
        let (issue, impact, details) = match fields {
            Ok(f) => f,
            Err(e) => {
                set_error.set(Some(e.user_message()));
                return;
            }
        };

        set_submitting.set(true);
        let api = auth.api();
        let input = file_input.get_untracked();
        spawn_local(async move {
            let result = async {
                let attachment = match &input {
                    Some(el) => read_attachment(el).await?,
                    None => None,
                };
                let ticket = SupportTicket {
                    issue_type: issue,
                    impact_count: impact,
                    description: details,
                    user_email: auth.user_email(),
                    attachment,
                };
                api.submit_support_ticket(&ticket).await
            }
            .await;

            match result {
                Ok(()) => {
                    reset();
                    open.set(false);
                    notice.success("Ticket submitted. Our team will get back to you shortly.");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "support ticket rejected");
                    set_error.set(Some(e.user_message()));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Sheet open=open title="Support".to_string()>
            <form on:submit=on_submit class="space-y-4">
                {move || error.get().map(|msg| view! {
                    <div role="alert" class="alert alert-error text-sm py-2"><span>{msg}</span></div>
                })}
                <div class="form-control">
                    <label class="label"><span class="label-text">"Current Issue"</span></label>
                    <input type="text" required
                        placeholder="e.g. Map not loading..."
                        class="input input-bordered w-full"
                        prop:value=move || issue_type.get()
                        on:input=move |ev| issue_type.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">"How many people are affected?"</span></label>
                    <input type="number" min="1" step="1"
                        class="input input-bordered w-full"
                        prop:value=move || impact_count.get()
                        on:input=move |ev| impact_count.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">"Description"</span></label>
                    <textarea required rows="5"
                        placeholder="Please describe the issue in detail..."
                        class="textarea textarea-bordered w-full"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <label class="flex items-center gap-3 border border-dashed border-base-300 rounded-box p-4 cursor-pointer">
                    <Paperclip attr:class="h-4 w-4 opacity-60" />
                    <span class="text-sm opacity-70 truncate">
                        {move || file_name.get().unwrap_or_else(|| "Attach a file (optional)".to_string())}
                    </span>
                    <input type="file" class="hidden" node_ref=file_input
                        on:change=move |_| {
                            let name = file_input
                                .get_untracked()
                                .and_then(|el| el.files())
                                .and_then(|list| list.get(0))
                                .map(|f| f.name());
                            file_name.set(name);
                        }
                    />
                </label>
                <button type="submit" class="btn btn-primary w-full gap-2" disabled=move || submitting.get()>
                    <MessageSquare attr:class="h-4 w-4" />
                    {move || if submitting.get() { "Sending..." } else { "Submit Ticket" }}
                </button>
            </form>
        </Sheet>
    }
}
