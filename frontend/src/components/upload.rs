//! PDF upload component with drag & drop support.
//!
//! Handles file selection, validation feedback and submission. The
//! request runs in `spawn_local`; its outcome goes back to the controller
//! tagged with the episode token, so a late reply after a reset is dropped.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, File, HtmlInputElement};

use crate::components::toasts::{flush_notifications, push_toast};
use crate::config::FileConstraints;
use crate::format::{format_byte_size, truncate_text};
use crate::services::ApiClient;
use crate::workflow::WorkflowController;
use crate::{Notification, Toast, UploadCandidate, ACCEPT_ATTRIBUTE};

const FILE_INPUT_ID: &str = "statementFileInput";

#[component]
pub fn UploadSection(
    workflow: RwSignal<WorkflowController<File>>,
    client: ApiClient,
    issuers: ReadSignal<Vec<String>>,
    set_toasts: WriteSignal<Vec<Toast>>,
) -> impl IntoView {
    let (drag_active, set_drag_active) = create_signal(false);
    let client = store_value(client);

    let select = move |file: Option<File>| {
        workflow.update(|controller| apply_pick(controller, file.map(UploadCandidate::from_file)));
    };

    let max_size_hint = move || workflow.with(|controller| size_hint(controller.constraints()));

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        select(input.files().and_then(|files| files.get(0)));
        // Allow picking the same file again after a removal
        input.set_value("");
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_active.set(true);
    };

    let on_drag_leave = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_active.set(false);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_active.set(false);
        select(ev.data_transfer().and_then(|dt| dt.files()).and_then(|files| files.get(0)));
    };

    let trigger_file_input = move |_| {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(input) = document.get_element_by_id(FILE_INPUT_ID) {
                if let Some(html_input) = input.dyn_ref::<HtmlInputElement>() {
                    html_input.click();
                }
            }
        }
    };

    let on_remove = move |_| workflow.update(|controller| controller.clear_selection());

    let on_submit = move |_| {
        let Some(submission) = workflow.try_update(|controller| controller.begin_submit()).flatten() else {
            return;
        };
        let client = client.get_value();

        spawn_local(async move {
            let outcome = client.submit(&submission.candidate.blob).await;
            workflow.update(|controller| {
                controller.complete(submission.episode, outcome);
            });
            flush_notifications(workflow, set_toasts);
        });
    };

    let on_debug = move |_| {
        let Some(file) = workflow.with(|c| c.candidate().map(|c| c.blob.clone())) else {
            return;
        };
        let client = client.get_value();

        spawn_local(async move {
            match client.debug(&file).await {
                Ok(text) => {
                    log::info!("🔍 Debug output for {}:\n{}", file.name(), text);
                    push_toast(set_toasts, Notification::info("Diagnostics written to the console"));
                }
                Err(e) => {
                    log::error!("Debug request failed: {}", e);
                    push_toast(set_toasts, Notification::error(e.user_message()));
                }
            }
        });
    };

    let selected = move || workflow.with(|c| c.candidate().map(|c| (c.name.clone(), c.size_bytes)));
    let violations = move || workflow.with(|c| c.violations().to_vec());

    view! {
        <div class="upload-card">
            <div
                class="upload-section"
                class:drag-active=move || drag_active.get()
                class:has-file=move || selected().is_some()
                on:dragenter=on_drag_over
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
                on:drop=on_drop
            >
                <input
                    type="file"
                    id=FILE_INPUT_ID
                    accept=ACCEPT_ATTRIBUTE
                    style="display:none"
                    on:change=on_file_change
                />

                {move || match selected() {
                    None => view! {
                        <div class="upload-empty">
                            <div class="upload-icon">"📤"</div>
                            <div class="upload-text">"Drop your PDF here or click to browse"</div>
                            <div class="upload-hint">
                                {move || {
                                    let names = issuers.get();
                                    if names.is_empty() {
                                        "Supports credit card statements".to_string()
                                    } else {
                                        format!("Supports credit card statements from {}", names.join(", "))
                                    }
                                }}
                            </div>
                            <button class="btn btn-primary" on:click=trigger_file_input>
                                "Select PDF File"
                            </button>
                            <div class="upload-hint mt-20">{max_size_hint}</div>
                        </div>
                    }.into_view(),
                    Some((name, size)) => view! {
                        <div class="upload-selected">
                            <div class="selected-file">
                                <span class="file-icon">"📄"</span>
                                <div class="file-info">
                                    <div class="file-name" title=name.clone()>{truncate_text(&name, 50)}</div>
                                    <div class="file-size">{format_byte_size(size)}</div>
                                </div>
                                <button class="file-remove" title="Remove file" on:click=on_remove>"✕"</button>
                            </div>
                            <button
                                class="btn btn-primary btn-wide"
                                on:click=on_submit
                                disabled=move || !workflow.with(|c| c.can_submit())
                            >
                                "Parse Statement"
                            </button>
                            <button class="btn btn-link" on:click=on_debug>"Inspect raw text"</button>
                        </div>
                    }.into_view(),
                }}
            </div>

            <Show when=move || !violations().is_empty()>
                <div class="error-message">
                    <div class="error-title">"Upload Error"</div>
                    <ul class="error-list">
                        {move || violations()
                            .into_iter()
                            .map(|violation| view! { <li>"• " {violation}</li> })
                            .collect_view()}
                    </ul>
                </div>
            </Show>
        </div>
    }
}

/// Hand a picked file to the controller. A dismissed picker or an empty
/// drop yields nothing and leaves the current selection alone.
fn apply_pick<B: Clone>(controller: &mut WorkflowController<B>, picked: Option<UploadCandidate<B>>) {
    if let Some(candidate) = picked {
        controller.select_file(Some(candidate));
    }
}

fn size_hint(constraints: &FileConstraints) -> String {
    format!("Maximum file size: {} MB", constraints.max_size_mb())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> UploadCandidate<()> {
        UploadCandidate::new(name, 2048, "application/pdf", ())
    }

    #[test]
    fn test_dismissed_picker_keeps_selection() {
        let mut controller = WorkflowController::<()>::default();
        apply_pick(&mut controller, Some(pdf("hdfc.pdf")));
        assert_eq!(controller.candidate().map(|c| c.name.as_str()), Some("hdfc.pdf"));

        apply_pick(&mut controller, None);
        assert_eq!(controller.candidate().map(|c| c.name.as_str()), Some("hdfc.pdf"));
        assert!(controller.violations().is_empty());
    }

    #[test]
    fn test_dismissed_picker_raises_no_violation() {
        let mut controller = WorkflowController::<()>::default();
        apply_pick(&mut controller, None);
        assert!(controller.candidate().is_none());
        assert!(controller.violations().is_empty());
    }

    #[test]
    fn test_picked_file_is_validated() {
        let mut controller = WorkflowController::<()>::default();
        apply_pick(&mut controller, Some(UploadCandidate::new("notes.txt", 10, "text/plain", ())));
        assert_eq!(controller.violations(), &["Only PDF files are supported".to_string()]);
    }

    #[test]
    fn test_size_hint_follows_constraints() {
        assert_eq!(size_hint(&FileConstraints::default()), "Maximum file size: 10 MB");

        let constraints = FileConstraints {
            max_size_bytes: 5 * 1024 * 1024,
            ..FileConstraints::default()
        };
        assert_eq!(size_hint(&constraints), "Maximum file size: 5 MB");
    }
}
