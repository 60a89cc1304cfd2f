use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

mod api;
mod components;
mod composition;
mod config;
mod db;
mod diagnostics;
mod error;
mod preview;
mod workflow;

use api::Session;
use components::Route;
use config::AppConfig;
use db::load_session;
use diagnostics::log_failure;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("failed to initialize logger: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(AppConfig::load);
    use_context_provider(|| config.clone());
    let mut session = use_context_provider(|| Signal::new(Session::default()));

    // Tokens are written by the login service before this app is opened.
    use_effect(move || {
        spawn(async move {
            match load_session().await {
                Ok(stored) => session.set(stored),
                Err(err) => log_failure("session.load", &err),
            }
        });
    });

    rsx! {
        document::Meta { name: "theme-color", content: "#53298c" }
        document::Title { "RetroBeat" }
        document::Stylesheet { href: APP_CSS }

        Router::<Route> {}
    }
}
