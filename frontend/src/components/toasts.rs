//! Toast notifications.
//!
//! The workflow controller queues [`Notification`]s; components flush them
//! here after each transition. Toasts dismiss themselves after
//! [`TOAST_DURATION_MS`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use leptos::*;
use web_sys::File;

use crate::workflow::WorkflowController;
use crate::{Notification, Toast, MAX_TOASTS, TOAST_DURATION_MS};

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(1);

/// Show a notification.
pub fn push_toast(set_toasts: WriteSignal<Vec<Toast>>, notification: Notification) {
    let id = NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed);
    log::info!("{} {}", notification.level.emoji(), notification.message);

    set_toasts.update(|toasts| {
        toasts.push(Toast { id, notification });
        if toasts.len() > MAX_TOASTS {
            toasts.remove(0);
        }
    });

    set_timeout(
        move || set_toasts.update(|toasts| toasts.retain(|t| t.id != id)),
        Duration::from_millis(TOAST_DURATION_MS as u64),
    );
}

/// Move every queued controller notification onto the screen.
pub fn flush_notifications(workflow: RwSignal<WorkflowController<File>>, set_toasts: WriteSignal<Vec<Toast>>) {
    let pending = workflow
        .try_update(|controller| controller.drain_notifications())
        .unwrap_or_default();
    for notification in pending {
        push_toast(set_toasts, notification);
    }
}

#[component]
pub fn ToastTray(toasts: ReadSignal<Vec<Toast>>, set_toasts: WriteSignal<Vec<Toast>>) -> impl IntoView {
    view! {
        <div class="toast-tray">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let level = toast.notification.level;
                    view! {
                        <div
                            class=format!("toast {}", level.css_class())
                            on:click=move |_| set_toasts.update(|t| t.retain(|t| t.id != id))
                        >
                            <span class="toast-icon">{level.emoji()}</span>
                            <span class="toast-message">{toast.notification.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
