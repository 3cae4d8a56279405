use dioxus::prelude::*;

use ui::views::{Analytics, Doctor, Home};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/doctor")]
    Doctor {},
    #[route("/analytics")]
    Analytics {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// Web navbar wrapping every routed page.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        header { class: "navbar",
            span { class: "navbar__brand", "RuralCare" }
            nav { class: "navbar__links",
                Link { class: "navbar__link", to: Route::Home {}, "Triage" }
                Link { class: "navbar__link", to: Route::Doctor {}, "Clinician" }
                Link { class: "navbar__link", to: Route::Analytics {}, "Analytics" }
            }
        }
        Outlet::<Route> {}
    }
}
