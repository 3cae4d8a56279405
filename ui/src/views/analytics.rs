use std::collections::BTreeMap;

use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use api::{AnalyticsSummary, TriageApi};

/// Aggregate statistics, fetched once when the view mounts. Analytics is
/// supplementary: a failed load is logged and swallowed, never surfaced as an
/// error to the user.
#[component]
pub fn Analytics() -> Element {
    let summary = use_resource(|| async {
        match TriageApi::same_origin().fetch_analytics().await {
            Ok(summary) => Some(summary),
            Err(err) => {
                warn!("analytics load failed: {err}");
                None
            }
        }
    });

    rsx! {
        section { class: "page page-analytics",
            h1 { "Analytics" }
            p { "Aggregate counts across all cases recorded by the analysis service." }

            match &*summary.read_unchecked() {
                None => rsx! {
                    p { class: "card__placeholder", "Loading analytics…" }
                },
                Some(None) => rsx! {
                    p { class: "card__placeholder", "Analytics are unavailable right now." }
                },
                Some(Some(summary)) => render_summary(summary),
            }
        }
    }
}

fn render_summary(summary: &AnalyticsSummary) -> Element {
    let risk_rows = distribution_rows(&summary.risk_distribution);
    let village_rows = distribution_rows(&summary.village_distribution);
    let total = summary.total_cases;

    rsx! {
        div { class: "card analytics-summary",
            h3 { "Total cases: {total}" }
            div { class: "analytics-summary__columns",
                div {
                    h4 { "Risk distribution" }
                    ul {
                        for (label, count) in risk_rows.into_iter() {
                            li { "{label}: {count}" }
                        }
                    }
                }
                div {
                    h4 { "Village distribution" }
                    ul {
                        for (label, count) in village_rows.into_iter() {
                            li { "{label}: {count}" }
                        }
                    }
                }
            }
        }
    }
}

/// Stable label/count rows. The ordered map guarantees two renders of the
/// same summary produce identical output.
fn distribution_rows(distribution: &BTreeMap<String, u64>) -> Vec<(String, u64)> {
    distribution
        .iter()
        .map(|(label, count)| (label.clone(), *count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_ordered_and_idempotent() {
        let mut distribution = BTreeMap::new();
        distribution.insert("MODERATE RISK".to_string(), 4);
        distribution.insert("HIGH RISK".to_string(), 1);
        distribution.insert("LOW RISK".to_string(), 7);

        let first = distribution_rows(&distribution);
        let second = distribution_rows(&distribution);
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|(label, _)| label.as_str()).collect::<Vec<_>>(),
            vec!["HIGH RISK", "LOW RISK", "MODERATE RISK"]
        );
    }
}
