//! Parsed statement view: key data points, additional information,
//! transactions and export actions.

use leptos::*;

use crate::components::toasts::push_toast;
use crate::projector::{project, DataPoint};
use crate::services::{copy_to_clipboard, download_file, now_millis};
use crate::{Notification, ParseResult, Toast};

#[component]
pub fn StatementResults(
    result: ParseResult,
    #[prop(into)] on_new_upload: Callback<()>,
    set_toasts: WriteSignal<Vec<Toast>>,
) -> impl IntoView {
    let model = project(&result);
    let export = store_value(model.export.clone());

    let on_download = move |_| {
        let export = export.get_value();
        let file = export.to_downloadable_file(export.default_file_name(now_millis()));
        match download_file(&file) {
            Ok(()) => push_toast(set_toasts, Notification::success("Statement data downloaded!")),
            Err(e) => {
                log::error!("{}", e);
                push_toast(set_toasts, Notification::error("Download failed"));
            }
        }
    };

    let on_copy = move |_| {
        let text = export.with_value(|e| e.to_clipboard_text());
        spawn_local(async move {
            match copy_to_clipboard(&text).await {
                Ok(()) => push_toast(set_toasts, Notification::success("Copied to clipboard!")),
                Err(e) => {
                    log::error!("{}", e);
                    push_toast(set_toasts, Notification::error("Failed to copy"));
                }
            }
        });
    };

    let overflow = model.overflow_label();
    let total = model.total_transactions;
    let rows = model.transactions;

    view! {
        <div class="results">
            <div class="results-header">
                <span class="results-icon">"✅"</span>
                <div>
                    <h2>"Successfully Parsed!"</h2>
                    <p>"Extracted data from " {model.headline.clone()} " credit card statement"</p>
                </div>
            </div>

            <div class="data-points">
                {model.key_data_points.into_iter().map(data_point_card).collect_view()}
            </div>

            {model.additional_info.map(|info| view! {
                <div class="card additional-info">
                    <h3>"Additional Information"</h3>
                    <div class="info-grid">
                        {info.into_iter().map(|item| view! {
                            <div class="info-item">
                                <div class="info-label">{item.label}</div>
                                <div class="info-value">{item.value}</div>
                            </div>
                        }).collect_view()}
                    </div>
                </div>
            })}

            {(total > 0).then(|| view! {
                <div class="card transactions">
                    <h3>"Recent Transactions (" {total} ")"</h3>
                    <table class="transactions-table">
                        <thead>
                            <tr>
                                <th>"Date"</th>
                                <th>"Description"</th>
                                <th class="amount">"Amount"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {rows.into_iter().map(|row| view! {
                                <tr>
                                    <td>{row.date}</td>
                                    <td>{row.description}</td>
                                    <td class="amount">{row.amount}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                    {overflow.map(|label| view! { <p class="table-footnote">{label}</p> })}
                </div>
            })}

            <div class="results-actions">
                <button class="btn btn-primary" on:click=move |_| on_new_upload.call(())>
                    "Parse Another Statement"
                </button>
                <button class="btn btn-outline" on:click=on_download>"⬇️ Download JSON"</button>
                <button class="btn btn-secondary" on:click=on_copy>"📋 Copy Data"</button>
            </div>
        </div>
    }
}

fn data_point_card(point: DataPoint) -> impl IntoView {
    view! {
        <div class=format!("card data-point {}", point.accent.css_class()) class:highlight=point.highlight>
            <div class="data-point-label">
                <span class="data-point-icon">{point.accent.icon()}</span>
                {point.label}
            </div>
            <div class="data-point-value">{point.value}</div>
        </div>
    }
}
