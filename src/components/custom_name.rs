use crate::api::BackendClient;
use crate::components::{Glyph, Icon};
use crate::composition::Composition;
use crate::config::AppConfig;
use crate::workflow::rename;
use dioxus::prelude::*;

/// Stitch title with an inline rename field.
#[component]
pub fn CustomName(composition: Signal<Composition>) -> Element {
    let mut composition = composition;
    let config = use_context::<AppConfig>();
    let mut draft = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let current_name = {
        let name = composition.read().stitch().name.clone();
        if name.trim().is_empty() {
            "Untitled stitch".to_string()
        } else {
            name
        }
    };

    let save = move || {
        if saving() || composition.peek().is_finalized() {
            return;
        }
        let name = draft();
        if name.trim().is_empty() {
            return;
        }
        let stitch_id = composition.peek().stitch().id.clone();
        let backend = BackendClient::new(&config);
        saving.set(true);
        spawn(async move {
            if let Some(saved) = rename(&backend, &stitch_id, &name).await {
                composition.write().apply_rename(&saved);
                draft.set(String::new());
            }
            saving.set(false);
        });
    };

    rsx! {
        div { class: "custom-name",
            h2 { class: "custom-name-title", "{current_name}" }
            div { class: "custom-name-form",
                input {
                    r#type: "text",
                    placeholder: "Name your stitch...",
                    value: "{draft}",
                    oninput: move |e| draft.set(e.value()),
                    onkeydown: {
                        let mut save = save.clone();
                        move |e: KeyboardEvent| {
                            if e.key() == Key::Enter {
                                save();
                            }
                        }
                    },
                }
                button {
                    class: "custom-name-save",
                    disabled: saving(),
                    onclick: {
                        let mut save = save.clone();
                        move |_| save()
                    },
                    if saving() {
                        Icon { glyph: Glyph::Loader, class: "icon".to_string() }
                    } else {
                        Icon { glyph: Glyph::Check, class: "icon".to_string() }
                    }
                    "Rename"
                }
            }
        }
    }
}
