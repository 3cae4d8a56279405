use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;

use api::TriageApi;

use crate::core::platform;
use crate::core::session::{OverrideOutcome, OverrideSession};

/// Clinician override form. The server is the source of truth for whether the
/// new classification is acceptable, so the risk label is sent as entered; on
/// completion the view is reloaded unconditionally so it never shows a stale
/// override.
#[component]
pub fn Doctor() -> Element {
    let case_id = use_signal(String::new);
    let new_risk = use_signal(String::new);
    let prompt = use_signal(|| Option::<String>::None);
    let pending = use_signal(|| false);

    let submit = {
        let case_id = case_id.clone();
        let new_risk = new_risk.clone();
        let prompt = prompt.clone();
        let pending = pending.clone();

        move || {
            let id = case_id();
            let risk = new_risk();
            let mut prompt = prompt.clone();
            let mut pending = pending.clone();

            prompt.set(None);
            pending.set(true);
            spawn(async move {
                let session = OverrideSession::new(TriageApi::same_origin());
                match session.submit(&id, &risk, platform::reload_view).await {
                    OverrideOutcome::Abandoned => {
                        prompt.set(Some(
                            "Enter a case id and an override risk level first.".to_string(),
                        ));
                        pending.set(false);
                    }
                    OverrideOutcome::Recorded(status) => info!("override recorded: {status}"),
                    OverrideOutcome::Failed(err) => warn!("override failed: {err}"),
                }
            });
        }
    };

    let is_pending = pending();
    let prompt_message = prompt();

    rsx! {
        section { class: "page page-doctor",
            h1 { "Clinician review" }
            p {
                "Correct a case's risk classification. The override is recorded on the "
                "server and this page reloads to reflect its current state."
            }

            div { class: "card doctor-override",
                h2 { "Override a case" }
                input {
                    id: "case-id",
                    class: "doctor-override__case",
                    placeholder: "Case id",
                    value: "{case_id}",
                    oninput: {
                        let mut case_id = case_id.clone();
                        move |evt: Event<FormData>| case_id.set(evt.value())
                    },
                }
                input {
                    id: "override-risk",
                    class: "doctor-override__risk",
                    placeholder: "LOW RISK / MODERATE RISK / HIGH RISK",
                    value: "{new_risk}",
                    oninput: {
                        let mut new_risk = new_risk.clone();
                        move |evt: Event<FormData>| new_risk.set(evt.value())
                    },
                }
                button {
                    r#type: "button",
                    class: "doctor-override__submit",
                    disabled: is_pending,
                    onclick: move |_| submit(),
                    if is_pending { "Recording…" } else { "Record override" }
                }

                if let Some(message) = prompt_message {
                    p { class: "doctor-override__prompt", "{message}" }
                }
            }
        }
    }
}
