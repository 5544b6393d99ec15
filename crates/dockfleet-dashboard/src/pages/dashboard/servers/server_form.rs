//! Add/edit server modal

use crate::controller::{FormField, TestOutcome};
use crate::state::use_dashboard_context;
use leptos::*;

#[component]
pub fn ServerFormModal() -> impl IntoView {
    let ctx = use_dashboard_context();
    let form = create_memo(move |_| ctx.read(|s| s.form.clone()));
    let editing = create_memo(move |_| ctx.read(|s| s.is_editing()));

    let close_modal = move |_| ctx.act(|c| c.close_form());
    let set_field = move |field: FormField, value: String| ctx.act(|c| c.set_form_field(field, value));

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        ctx.spawn(|c| async move {
            c.save_server().await;
        });
    };

    let run_test = move |_| {
        ctx.spawn(|c| async move {
            c.test_form_connection().await;
        })
    };

    let field = move |f: fn(&crate::controller::ServerForm) -> String| {
        move || form.get().map(|s| f(&s)).unwrap_or_default()
    };
    let saving = move || form.get().map(|f| f.saving).unwrap_or(false);

    view! {
        <Show when=move || form.get().is_some()>
            <div class="modal-overlay" on:click=close_modal>
                <div class="modal-content server-form-modal" on:click=|e| e.stop_propagation()>
                    <div class="modal-header">
                        <h2>{move || if editing.get() { "Edit server" } else { "Add server" }}</h2>
                        <button class="modal-close" on:click=close_modal>"×"</button>
                    </div>

                    <form class="modal-body" on:submit=on_submit>
                        <div class="form-group">
                            <label>"Server ID"</label>
                            <input
                                type="text"
                                placeholder="edge-01"
                                readonly=move || editing.get()
                                prop:value=field(|f| f.id.clone())
                                on:input=move |e| set_field(FormField::Id, event_target_value(&e))
                            />
                        </div>
                        <div class="form-group">
                            <label>"Label"</label>
                            <input
                                type="text"
                                placeholder="Edge server"
                                prop:value=field(|f| f.label.clone())
                                on:input=move |e| set_field(FormField::Label, event_target_value(&e))
                            />
                        </div>
                        <div class="form-group">
                            <label>"Docker endpoint"</label>
                            <input
                                type="text"
                                placeholder="tcp://10.0.0.2:2375"
                                prop:value=field(|f| f.base_url.clone())
                                on:input=move |e| set_field(FormField::BaseUrl, event_target_value(&e))
                            />
                        </div>
                        <div class="form-group checkbox">
                            <label>
                                <input
                                    type="checkbox"
                                    prop:checked=move || form.get().map(|f| f.tls).unwrap_or(false)
                                    on:change=move |e| {
                                        let tls = event_target_checked(&e);
                                        ctx.act(|c| c.set_form_tls(tls));
                                    }
                                />
                                " Use TLS"
                            </label>
                        </div>

                        {move || form.get().and_then(|f| f.test).map(|test| match test {
                            None => view! {
                                <div class="test-result testing">
                                    <i class="fas fa-spinner fa-spin"></i>
                                    " Testing connection..."
                                </div>
                            }.into_view(),
                            Some(outcome) => view! { <TestResultBox outcome=outcome /> }.into_view(),
                        })}

                        <div class="modal-footer">
                            <button type="button" class="btn btn-secondary" on:click=run_test>
                                <i class="fas fa-plug"></i>
                                <span>"Test connection"</span>
                            </button>
                            <button type="button" class="btn btn-secondary" on:click=close_modal>
                                "Cancel"
                            </button>
                            <button type="submit" class="btn btn-primary" disabled=saving>
                                {move || if saving() { "Saving..." } else { "Save" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn TestResultBox(outcome: TestOutcome) -> impl IntoView {
    let (class, icon) = if outcome.is_success() {
        ("test-result success", "fa-check-circle")
    } else {
        ("test-result error", "fa-times-circle")
    };
    let api_version = match &outcome {
        TestOutcome::Connected { api_version, .. } => Some(api_version.clone()),
        _ => None,
    };

    view! {
        <div class=class>
            <i class=format!("fas {}", icon)></i>
            " "
            {outcome.summary()}
            {api_version.map(|v| view! { <span class="test-detail">" (API "{v}")"</span> })}
        </div>
    }
}
