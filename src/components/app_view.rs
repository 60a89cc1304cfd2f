//! Defines the application routes.

use crate::components::views::{Create, Landing, Profile};
use dioxus::prelude::*;

#[derive(Debug, Clone, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Landing {},
    #[route("/:username")]
    Profile { username: String },
    #[route("/:username/create/:stitch_id")]
    Create { username: String, stitch_id: String },
}

pub fn route_label(route: &Route) -> &'static str {
    match route {
        Route::Landing {} => "Welcome",
        Route::Profile { .. } => "Home",
        Route::Create { .. } => "Create",
    }
}
