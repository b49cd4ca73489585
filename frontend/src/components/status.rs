//! Submission progress and failure panels.

use leptos::*;

use crate::{FailureKind, FailureReason};

/// Shown while a submission is in flight.
#[component]
pub fn LoadingPanel(file_name: String) -> impl IntoView {
    view! {
        <div class="status-card loading">
            <div class="spinner"></div>
            <div class="status-title">"Processing your statement..."</div>
            <div class="status-detail">{file_name}</div>
            <p class="upload-hint">"This may take a few seconds depending on file size"</p>
        </div>
    }
}

/// Shown after a failed submission.
#[component]
pub fn ErrorPanel(failure: FailureReason, #[prop(into)] on_retry: Callback<()>) -> impl IntoView {
    let hint = match failure.kind {
        FailureKind::Timeout | FailureKind::NoResponse => Some("Check that the parser service is running."),
        FailureKind::ServerRejected | FailureKind::ClientError => None,
    };

    view! {
        <div class="status-card error">
            <div class="status-icon">"⚠️"</div>
            <div>
                <div class="status-title">"Parsing Failed"</div>
                <p class="error-text">{failure.message}</p>
                {hint.map(|h| view! { <p class="upload-hint">{h}</p> })}
                <button class="btn btn-link" on:click=move |_| on_retry.call(())>
                    "Try another file"
                </button>
            </div>
        </div>
    }
}
