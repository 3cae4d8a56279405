use dioxus::prelude::*;

use api::CaseRecord;

use crate::core::chart::risk_class;
use crate::core::format;
use crate::core::storage::HistoryStore;

/// Snapshot of the persisted case log for the history panel. A corrupt log
/// surfaces as an error here instead of masquerading as an empty one.
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    pub records: Vec<CaseRecord>,
    pub error: Option<String>,
}

impl HistoryState {
    pub fn load(store: &HistoryStore) -> Self {
        match store.load_all() {
            Ok(records) => Self {
                records,
                error: None,
            },
            Err(err) => Self {
                records: Vec::new(),
                error: Some(format!("Couldn't read case history: {err}")),
            },
        }
    }
}

#[component]
pub fn HistoryPanel(history: Signal<HistoryState>) -> Element {
    let state = history();

    rsx! {
        section { class: "card history-panel",
            div { class: "card__header",
                h2 { "Past assessments" }
                if !state.records.is_empty() {
                    span { class: "card__meta", "{state.records.len()} recorded" }
                }
            }

            if let Some(error) = state.error.as_ref() {
                p { class: "history-panel__error", "{error}" }
            } else if state.records.is_empty() {
                p { class: "card__placeholder",
                    "Assessments you run on this device will appear here, newest first."
                }
            } else {
                ul { class: "history-panel__items",
                    for record in state.records.iter() {
                        {history_entry(record)}
                    }
                }
            }
        }
    }
}

fn history_entry(record: &CaseRecord) -> Element {
    let badge_class = format!("history-panel__badge {}", risk_class(record.risk_level));
    let label = record.risk_level.label();
    let score = format::format_score(record.risk_score);
    let timestamp = format::format_timestamp(record.timestamp.as_deref());
    let village = record.village.clone();
    let symptoms = format::join_or_none(&record.explanation.detected_symptoms);

    rsx! {
        li { class: "history-panel__item",
            span { class: badge_class, "{label}" }
            span { class: "history-panel__score", "Score {score}" }
            span { class: "history-panel__village", "{village}" }
            span { class: "history-panel__timestamp", "{timestamp}" }
            span { class: "history-panel__symptoms", "{symptoms}" }
        }
    }
}
