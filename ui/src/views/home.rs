use dioxus::prelude::*;

use crate::triage::AnalyzeView;

#[component]
pub fn Home() -> Element {
    rsx! {
        section { class: "page page-home",
            h1 { "Symptom triage" }
            p {
                "Describe what the patient is feeling in plain language. The analysis "
                "service scores the description and the result is kept on this device."
            }
            AnalyzeView {}
        }
    }
}
