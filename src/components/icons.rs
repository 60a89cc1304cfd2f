use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Home,
    Search,
    Plus,
    Trash,
    Check,
    Menu,
    Music,
    Loader,
    LogOut,
}

#[component]
pub fn Icon(glyph: Glyph, class: String) -> Element {
    let body = match glyph {
        Glyph::Home => rsx! {
            path { d: "M3 9l9-7 9 7v11a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z" }
            polyline { points: "9 22 9 12 15 12 15 22" }
        },
        Glyph::Search => rsx! {
            circle { cx: "11", cy: "11", r: "8" }
            path { d: "M21 21l-4.35-4.35" }
        },
        Glyph::Plus => rsx! {
            line {
                x1: "12",
                y1: "5",
                x2: "12",
                y2: "19",
            }
            line {
                x1: "5",
                y1: "12",
                x2: "19",
                y2: "12",
            }
        },
        Glyph::Trash => rsx! {
            polyline { points: "3 6 5 6 21 6" }
            path { d: "M19 6v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6m3 0V4a2 2 0 0 1 2-2h4a2 2 0 0 1 2 2v2" }
        },
        Glyph::Check => rsx! {
            polyline { points: "20 6 9 17 4 12" }
        },
        Glyph::Menu => rsx! {
            path { d: "M4 6h16" }
            path { d: "M4 12h16" }
            path { d: "M4 18h16" }
        },
        Glyph::Music => rsx! {
            path { d: "M9 18V5l12-2v13" }
            circle { cx: "6", cy: "18", r: "3" }
            circle { cx: "18", cy: "16", r: "3" }
        },
        Glyph::Loader => rsx! {
            circle {
                cx: "12",
                cy: "12",
                r: "10",
                opacity: "0.25",
            }
            path { d: "M12 2a10 10 0 0 1 10 10", opacity: "0.75" }
        },
        Glyph::LogOut => rsx! {
            path { d: "M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4" }
            polyline { points: "16 17 21 12 16 7" }
            line {
                x1: "21",
                y1: "12",
                x2: "9",
                y2: "12",
            }
        },
    };

    let spin = if glyph == Glyph::Loader { " animate-spin" } else { "" };

    rsx! {
        svg {
            class: "{class}{spin}",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "2",
            {body}
        }
    }
}
