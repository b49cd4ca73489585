//! Statement Lens - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading credit card statement PDFs to the
//! parser service and reviewing the extracted data.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent  (owns the WorkflowController signal)           │
//! │  ├── UploadSection      (Idle)                               │
//! │  ├── LoadingPanel       (Submitting)                         │
//! │  ├── StatementResults   (Succeeded)                          │
//! │  ├── ErrorPanel         (Failed)                             │
//! │  └── ToastTray                                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (UploadCandidate, StatementData, ApiError, etc.)
//! - [`validation`] - Pre-submission file checks
//! - [`format`] - Amount, date and size formatting
//! - [`projector`] - Display model and exports for a parsed statement
//! - [`workflow`] - Upload-submit-result state machine
//! - [`components`] - UI components
//! - [`services`] - Parser API client and browser helpers

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;
use web_sys::File;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod validation;
pub mod format;
pub mod projector;
pub mod workflow;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Upload
    UploadCandidate, ValidationResult,
    // Statement
    Amount, StatementData, Transaction, ParseResult,
    // Workflow
    WorkflowStatus, FailureKind, FailureReason,
    // Notifications
    Notification, NotificationLevel, Toast,
    // Errors
    ApiError, ApiResult, AppError, AppResult,
};

// Core workflow
pub use validation::validate;
pub use projector::{project, DisplayModel, StatementExport};
pub use workflow::{EpisodeToken, Submission, WorkflowController, WorkflowState};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Statement Lens - Starting Leptos App ({})", API_BASE_URL);

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Credit Card Statement Parser"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // Global state for the application
    let workflow = create_rw_signal(WorkflowController::<File>::new(FileConstraints::default()));
    let (toasts, set_toasts) = create_signal(Vec::<Toast>::new());
    let (issuers, set_issuers) =
        create_signal(DEFAULT_SUPPORTED_ISSUERS.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    let client = ApiClient::new(ApiConfig::default());

    // Check the parser once at startup
    {
        let client = client.clone();
        spawn_local(async move {
            match client.health().await {
                Ok(health) => log::info!("📡 Parser is {}", health.status),
                Err(e) => log::warn!("⚠️ Parser health check failed: {}", e),
            }
            match client.supported_issuers().await {
                Ok(list) if !list.is_empty() => set_issuers.set(list),
                Ok(_) => {}
                Err(e) => log::debug!("Supported issuers unavailable: {}", e),
            }
        });
    }

    let status = create_memo(move |_| workflow.with(|c| c.status()));

    let on_new_upload = Callback::new(move |_: ()| {
        workflow.update(|c| c.reset());
        log::info!("🔄 Ready for a new upload");
    });

    view! {
        <div class="container">
            <div class="hero">
                <h1>"Credit Card Statement Parser"</h1>
                <p>"Upload your credit card statement PDF and extract key information instantly"</p>
            </div>

            {move || match status.get() {
                WorkflowStatus::Idle => view! {
                    <UploadSection
                        workflow=workflow
                        client=client.clone()
                        issuers=issuers
                        set_toasts=set_toasts
                    />
                }.into_view(),
                WorkflowStatus::Submitting => {
                    let file_name = workflow.with_untracked(|c| match c.state() {
                        WorkflowState::Submitting { file_name, .. } => file_name.clone(),
                        _ => String::new(),
                    });
                    view! { <LoadingPanel file_name=file_name/> }.into_view()
                }
                WorkflowStatus::Succeeded => workflow
                    .with_untracked(|c| c.result().cloned())
                    .map(|result| view! {
                        <StatementResults
                            result=result
                            on_new_upload=on_new_upload
                            set_toasts=set_toasts
                        />
                    }.into_view())
                    .unwrap_or_else(|| ().into_view()),
                WorkflowStatus::Failed => workflow
                    .with_untracked(|c| c.failure().cloned())
                    .map(|failure| view! {
                        <ErrorPanel failure=failure on_retry=on_new_upload/>
                    }.into_view())
                    .unwrap_or_else(|| ().into_view()),
            }}

            <ToastTray toasts=toasts set_toasts=set_toasts/>
        </div>
    }
}
