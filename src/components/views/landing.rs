use crate::api::Session;
use crate::db::save_session;
use crate::diagnostics::log_failure;
use dioxus::prelude::*;

/// Signed-out entry point. Tokens normally arrive from the login service;
/// the form stores tokens issued out of band (desktop builds have no shared
/// browser storage to inherit them from).
#[component]
pub fn Landing() -> Element {
    let mut session = use_context::<Signal<Session>>();
    let mut access_token = use_signal(String::new);
    let mut refresh_token = use_signal(String::new);

    let on_save = move |_: MouseEvent| {
        let access = access_token().trim().to_string();
        let refresh = refresh_token().trim().to_string();
        if access.is_empty() {
            return;
        }
        let next = Session::new(access, refresh);
        spawn(async move {
            if let Err(err) = save_session(&next).await {
                log_failure("session.save", &err);
                return;
            }
            session.set(next);
            access_token.set(String::new());
            refresh_token.set(String::new());
        });
    };

    let signed_in = session.read().is_signed_in();

    rsx! {
        div { class: "landing",
            h1 { "RetroBeat" }
            if signed_in {
                p { "You are signed in. Open a stitch from your profile to start adding songs." }
            } else {
                p { "Sign in with your music account to start stitching." }
                div { class: "token-form",
                    input {
                        r#type: "password",
                        placeholder: "Access token",
                        value: "{access_token}",
                        oninput: move |e| access_token.set(e.value()),
                    }
                    input {
                        r#type: "password",
                        placeholder: "Refresh token",
                        value: "{refresh_token}",
                        oninput: move |e| refresh_token.set(e.value()),
                    }
                    button { onclick: on_save, "Save session" }
                }
            }
        }
    }
}
