//! Toast stack in the corner of the screen

use crate::state::use_dashboard_context;
use leptos::*;
use std::collections::HashSet;

/// Renders queued toasts and dismisses each one after the configured delay.
#[component]
pub fn ToastStack() -> impl IntoView {
    let ctx = use_dashboard_context();
    let toasts = create_memo(move |_| ctx.read(|s| s.notifier.toasts().to_vec()));
    let scheduled = store_value(HashSet::<u64>::new());
    let duration = ctx.controller().config().toast_duration;

    create_effect(move |_| {
        for toast in toasts.get() {
            let fresh = scheduled.try_update_value(|ids| ids.insert(toast.id)).unwrap_or(false);
            if fresh {
                let id = toast.id;
                set_timeout(move || ctx.act(|c| c.dismiss_toast(id)), duration);
            }
        }
    });

    view! {
        <div class="toast-stack">
            {move || toasts.get().into_iter().map(|toast| {
                let id = toast.id;
                view! {
                    <div class=toast.kind.css_class() on:click=move |_| ctx.act(|c| c.dismiss_toast(id))>
                        {toast.message}
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
