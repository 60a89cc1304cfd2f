use crate::api::{BackendClient, Session};
use crate::components::{route_label, Glyph, Icon, Route};
use crate::config::AppConfig;
use crate::db::clear_session;
use crate::diagnostics::{alert_user, log_failure};
use crate::workflow::logout;
use dioxus::prelude::*;

#[component]
pub fn Navbar(username: String) -> Element {
    let config = use_context::<AppConfig>();
    let mut session = use_context::<Signal<Session>>();
    let route = use_route::<Route>();
    let navigator = navigator();
    let mut menu_open = use_signal(|| false);
    let mut logging_out = use_signal(|| false);

    let on_home = {
        let username = username.clone();
        move |_: MouseEvent| {
            menu_open.set(false);
            navigator.push(Route::Profile {
                username: username.clone(),
            });
        }
    };

    // Local credentials go regardless of what the backend says.
    let on_logout = move |_: MouseEvent| {
        if logging_out() {
            return;
        }
        logging_out.set(true);
        menu_open.set(false);
        let backend = BackendClient::new(&config);
        spawn(async move {
            let current = session.peek().clone();
            let result = logout(&backend, &current).await;
            if let Err(err) = clear_session().await {
                log_failure("session.clear", &err);
            }
            session.set(Session::default());
            logging_out.set(false);
            if result.is_err() {
                alert_user("Failed to logout");
            }
            navigator.push(Route::Landing {});
        });
    };

    let page = route_label(&route);

    rsx! {
        nav { class: "nav",
            button { class: "nav-profile", onclick: on_home.clone(), "{username}" }
            div { class: "nav-title",
                h1 { "RetroBeat" }
                span { class: "nav-page", "{page}" }
            }
            div {
                class: "nav-menu",
                onmouseenter: move |_| menu_open.set(true),
                onmouseleave: move |_| menu_open.set(false),
                button {
                    class: "nav-menu-button",
                    aria_label: "Open menu",
                    onclick: move |_| menu_open.set(!menu_open()),
                    Icon { glyph: Glyph::Menu, class: "icon".to_string() }
                }
                if menu_open() {
                    ul { class: "nav-dropdown",
                        li { onclick: on_home.clone(),
                            Icon { glyph: Glyph::Home, class: "icon".to_string() }
                            "Home"
                        }
                        li { onclick: on_logout,
                            if logging_out() {
                                Icon { glyph: Glyph::Loader, class: "icon".to_string() }
                            } else {
                                Icon { glyph: Glyph::LogOut, class: "icon".to_string() }
                            }
                            "Logout"
                        }
                    }
                }
            }
        }
    }
}
