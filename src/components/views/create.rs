use crate::api::{BackendClient, CatalogClient, Session, Track};
use crate::components::{CustomName, Glyph, Icon, Navbar, Route, RowAction, SongRow};
use crate::composition::{Composition, SearchStep};
use crate::config::AppConfig;
use crate::preview::{preview_element_id, DomPreviewSink, PreviewController};
use crate::workflow::{add_track, run_refresh, run_search};
use dioxus::prelude::*;

/// Issues the composition's next refresh step and applies the result under
/// the ticket it was issued with.
fn spawn_refresh(mut composition: Signal<Composition>, backend: BackendClient) {
    let ticket = composition.write().begin_refresh();
    spawn(async move {
        let outcome = run_refresh(&backend, &ticket.stitch_id, ticket.step).await;
        composition.write().finish_refresh(ticket.seq, outcome);
    });
}

fn spawn_add(mut composition: Signal<Composition>, backend: BackendClient, track: Track) {
    if !composition.write().begin_add() {
        return;
    }
    let stitch_id = composition.peek().stitch().id.clone();
    spawn(async move {
        let added = add_track(&backend, &stitch_id, &track).await.is_ok();
        composition.write().finish_add();
        if added && composition.peek().stitch().id == stitch_id {
            spawn_refresh(composition, backend);
        }
    });
}

fn request_remove(
    mut composition: Signal<Composition>,
    mut preview: Signal<PreviewController<String>>,
    backend: BackendClient,
    song_id: String,
) {
    if !composition.write().request_remove(song_id.clone()) {
        return;
    }
    preview
        .write()
        .stop_if(&preview_element_id("member", &song_id), &DomPreviewSink);
    spawn_refresh(composition, backend);
}

#[component]
pub fn Create(username: String, stitch_id: String) -> Element {
    let config = use_context::<AppConfig>();
    let session = use_context::<Signal<Session>>();
    let navigator = navigator();
    let backend = use_hook(|| BackendClient::new(&config));
    let catalog = use_hook(|| CatalogClient::new(&config));
    let mut composition = use_signal(|| Composition::new(stitch_id.clone()));
    let mut preview = use_signal(PreviewController::<String>::new);
    let mut search_query = use_signal(String::new);

    // Membership load, again whenever the route points at another stitch.
    {
        let backend = backend.clone();
        use_effect(use_reactive((&stitch_id,), move |(stitch_id,)| {
            if composition.write().retarget(&stitch_id) {
                preview.write().stop_all(&DomPreviewSink);
                search_query.set(String::new());
            }
            spawn_refresh(composition, backend.clone());
        }));
    }

    let on_search = {
        let catalog = catalog.clone();
        move |evt: FormEvent| {
            let value = evt.value();
            search_query.set(value.clone());
            let step = composition.write().begin_search(&value);
            if let SearchStep::Issue { seq, query } = step {
                let catalog = catalog.clone();
                let session = session.peek().clone();
                spawn(async move {
                    let result = run_search(&catalog, &session, &query).await;
                    composition.write().finish_search(seq, result);
                });
            }
        }
    };

    let on_finalize = {
        let username = username.clone();
        move |_: MouseEvent| {
            preview.write().stop_all(&DomPreviewSink);
            composition.write().finalize();
            navigator.push(Route::Profile {
                username: username.clone(),
            });
        }
    };

    let (candidates, members, can_add, can_remove, cover) = {
        let current = composition.read();
        let candidates: Vec<(String, Track)> = current
            .candidates()
            .iter()
            .map(|track| (preview_element_id("candidate", &track.id), track.clone()))
            .collect();
        let members: Vec<(String, String, Track)> = current
            .members()
            .iter()
            .map(|record| {
                (
                    preview_element_id("member", &record.id),
                    record.id.clone(),
                    record.to_track(),
                )
            })
            .collect();
        (
            candidates,
            members,
            current.can_add(),
            current.can_remove(),
            current.stitch().image_url.clone(),
        )
    };
    let has_query = !search_query().is_empty();

    rsx! {
        div { class: "create",
            header {
                Navbar { username: username.clone() }
            }
            main {
                div { class: "create-name",
                    CustomName { composition }
                }
                div { class: "create-columns",
                    section { class: "search-section",
                        h3 { "Add Songs" }
                        div { class: "search-box",
                            Icon { glyph: Glyph::Search, class: "icon".to_string() }
                            input {
                                r#type: "text",
                                placeholder: "Search for songs...",
                                value: "{search_query}",
                                oninput: on_search,
                            }
                        }
                        div { class: "song-list",
                            for (audio_id, track) in candidates {
                                SongRow {
                                    key: "{audio_id}",
                                    track: track.clone(),
                                    audio_id: audio_id.clone(),
                                    action: RowAction::Add,
                                    busy: !can_add,
                                    on_play: move |id: String| {
                                        preview.write().play(id, &DomPreviewSink);
                                    },
                                    on_action: {
                                        let backend = backend.clone();
                                        let track = track.clone();
                                        move |_| spawn_add(composition, backend.clone(), track.clone())
                                    },
                                }
                            }
                            if has_query && composition.read().candidates().is_empty() {
                                p { class: "empty-hint", "No matching tracks" }
                            }
                        }
                    }
                    div { class: "finalize",
                        button { class: "finalize-button", onclick: on_finalize, "Finalize Stitch" }
                    }
                    section { class: "stitch-section",
                        h3 { "Current Stitch" }
                        if let Some(url) = cover {
                            img { class: "stitch-cover", src: "{url}", alt: "Stitch cover" }
                        }
                        div { class: "song-list",
                            for (audio_id, record_id, track) in members {
                                SongRow {
                                    key: "{audio_id}",
                                    track,
                                    audio_id: audio_id.clone(),
                                    action: RowAction::Remove,
                                    busy: !can_remove,
                                    on_play: move |id: String| {
                                        preview.write().play(id, &DomPreviewSink);
                                    },
                                    on_action: {
                                        let backend = backend.clone();
                                        move |_| {
                                            request_remove(
                                                composition,
                                                preview,
                                                backend.clone(),
                                                record_id.clone(),
                                            )
                                        }
                                    },
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
