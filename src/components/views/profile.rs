use crate::components::Navbar;
use dioxus::prelude::*;

/// Landing spot after a stitch is finalized. Stitch listings belong to the
/// profile service; this page only hosts the navigation.
#[component]
pub fn Profile(username: String) -> Element {
    rsx! {
        div { class: "profile",
            header {
                Navbar { username: username.clone() }
            }
            main { class: "profile-body",
                h2 { "{username}'s stitches" }
                p { class: "empty-hint", "Start a new stitch from your library to add songs." }
            }
        }
    }
}
