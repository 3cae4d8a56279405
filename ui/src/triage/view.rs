use dioxus::logger::tracing::warn;
use dioxus::prelude::*;
use futures_util::StreamExt;

use api::{CaseRecord, TriageApi};

use crate::core::chart::{risk_class, ChartController, CHART_CANVAS_ID};
use crate::core::format;
use crate::core::session::AnalysisSession;
use crate::core::storage::HistoryStore;

use super::history::{HistoryPanel, HistoryState};

#[derive(Debug, Clone)]
enum TriageEvent {
    Submit { text: String, village: String },
}

/// Symptom entry form plus result card, chart, and history panel. The
/// coroutine owns the chart controller and history store, so every mutation of
/// shared state funnels through one place.
#[component]
pub fn AnalyzeView() -> Element {
    let symptoms = use_signal(String::new);
    let village = use_signal(String::new);
    let result = use_signal(|| Option::<CaseRecord>::None);
    let error_line = use_signal(|| Option::<String>::None);
    let notice = use_signal(|| Option::<String>::None);
    let busy = use_signal(|| false);
    let history = use_signal(|| HistoryState::load(&HistoryStore::new()));

    let coroutine = {
        let result_ref = result.clone();
        let error_ref = error_line.clone();
        let notice_ref = notice.clone();
        let busy_ref = busy.clone();
        let history_ref = history.clone();

        use_coroutine(move |mut rx: UnboundedReceiver<TriageEvent>| {
            let mut result_signal = result_ref.clone();
            let mut error_signal = error_ref.clone();
            let mut notice_signal = notice_ref.clone();
            let mut busy_signal = busy_ref.clone();
            let mut history_signal = history_ref.clone();

            async move {
                let session = AnalysisSession::new(TriageApi::same_origin());
                let mut chart = ChartController::new();
                let store = HistoryStore::new();

                while let Some(event) = rx.next().await {
                    match event {
                        TriageEvent::Submit { text, village } => {
                            busy_signal.set(true);
                            error_signal.set(None);

                            match session.analyze(&text, &village).await {
                                Ok(record) => {
                                    // Render first; chart and history are
                                    // secondary and never roll it back.
                                    result_signal.set(Some(record.clone()));
                                    chart.update(record.risk_score);

                                    if let Err(err) = store.append(&record) {
                                        warn!("history append failed: {err}");
                                        notice_signal.set(Some(format!(
                                            "Result shown, but it couldn't be saved locally: {err}"
                                        )));
                                    } else {
                                        notice_signal.set(None);
                                    }
                                    history_signal.set(HistoryState::load(&store));
                                }
                                Err(err) => {
                                    warn!("analysis failed: {err}");
                                    error_signal.set(Some(err.to_string()));
                                }
                            }

                            busy_signal.set(false);
                        }
                    }
                }
            }
        })
    };

    let submit = {
        let coroutine = coroutine.clone();
        let symptoms = symptoms.clone();
        let village = village.clone();
        move || {
            coroutine.send(TriageEvent::Submit {
                text: symptoms(),
                village: village(),
            });
        }
    };

    let is_busy = busy();
    let current_result = result();
    let error_message = error_line();
    let notice_message = notice();

    rsx! {
        article { class: "triage",
            div { class: "card triage__form",
                h2 { "Describe the symptoms" }
                textarea {
                    id: "symptoms",
                    class: "triage__symptoms",
                    placeholder: "e.g. high fever and persistent cough for 3 days",
                    value: "{symptoms}",
                    oninput: {
                        let mut symptoms = symptoms.clone();
                        move |evt: Event<FormData>| symptoms.set(evt.value())
                    },
                }
                input {
                    id: "village",
                    class: "triage__village",
                    placeholder: "Village (optional)",
                    value: "{village}",
                    oninput: {
                        let mut village = village.clone();
                        move |evt: Event<FormData>| village.set(evt.value())
                    },
                }
                button {
                    r#type: "button",
                    class: "triage__submit",
                    disabled: is_busy,
                    onclick: move |_| submit(),
                    if is_busy { "Analyzing…" } else { "Analyze symptoms" }
                }

                if let Some(message) = error_message {
                    p { class: "triage__error", "{message}" }
                }
                if let Some(message) = notice_message {
                    p { class: "triage__notice", "{message}" }
                }
            }

            if let Some(record) = current_result.as_ref() {
                {result_card(record)}
            }

            div { class: "card triage__chart-card",
                h2 { "Risk score" }
                canvas {
                    id: CHART_CANVAS_ID,
                    class: "triage__chart",
                    width: "360",
                    height: "200",
                }
            }

            HistoryPanel { history }
        }
    }
}

fn result_card(record: &CaseRecord) -> Element {
    let heading_class = format!("triage-result__level {}", risk_class(record.risk_level));
    let level = record.risk_level.label();
    let score = format::format_score(record.risk_score);
    let detected = format::join_or_none(&record.explanation.detected_symptoms);
    let severity = format::join_or_none(&record.explanation.severity_words);
    let duration = record.explanation.duration.clone();
    let village = record.village.clone();
    let reasoning = record.explanation.risk_reasoning.clone();

    rsx! {
        div { class: "card triage-result",
            h3 { class: heading_class, "Risk Level: {level}" }
            if record.explanation.emergency_flag {
                p { class: "triage-result__emergency",
                    "Emergency indicators detected. Seek care immediately."
                }
            }
            ul { class: "triage-result__facts",
                li { "Score: {score}" }
                li { "Detected symptoms: {detected}" }
                li { "Severity words: {severity}" }
                li { "Duration: {duration}" }
                li { "Village: {village}" }
            }
            p { class: "triage-result__reasoning", "{reasoning}" }
            p { class: "triage-result__disclaimer",
                em { "This is not a medical diagnosis. Please consult a healthcare professional." }
            }
        }
    }
}
