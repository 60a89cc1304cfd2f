use crate::api::Track;
use crate::components::{Glyph, Icon};
use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Add,
    Remove,
}

/// One track with its preview player and an add/remove button.
#[component]
pub fn SongRow(
    track: Track,
    audio_id: String,
    action: RowAction,
    #[props(default)] busy: bool,
    on_play: EventHandler<String>,
    on_action: EventHandler<()>,
) -> Element {
    let title = track.name.clone();
    let album_name = track.album.name.clone();
    let byline = format!("{} · {}", track.artist_line(), track.duration_label());
    let cover = track.album.thumbnail_url(64).map(str::to_string);
    let preview_url = track.preview_url.clone();
    let (glyph, label) = match action {
        RowAction::Add => (Glyph::Plus, "Add to stitch"),
        RowAction::Remove => (Glyph::Trash, "Remove from stitch"),
    };

    rsx! {
        div { class: "song-row",
            if let Some(url) = cover {
                img { class: "song-cover", src: "{url}", alt: "{album_name}" }
            } else {
                div { class: "song-cover song-cover-empty",
                    Icon { glyph: Glyph::Music, class: "icon".to_string() }
                }
            }
            div { class: "song-body",
                p { class: "song-title", "{title}" }
                p { class: "song-byline", "{byline}" }
                if let Some(src) = preview_url {
                    audio {
                        id: "{audio_id}",
                        class: "song-preview",
                        src: "{src}",
                        controls: true,
                        preload: "none",
                        onplay: {
                            let audio_id = audio_id.clone();
                            move |_| on_play.call(audio_id.clone())
                        },
                    }
                } else {
                    p { class: "song-no-preview", "No preview available" }
                }
            }
            button {
                class: "song-action",
                aria_label: "{label}",
                title: "{label}",
                disabled: busy,
                onclick: move |_| on_action.call(()),
                Icon { glyph, class: "icon".to_string() }
            }
        }
    }
}
