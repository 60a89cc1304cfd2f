//! The components module contains all shared components for our app.

mod app_view;
mod custom_name;
mod icons;
mod navbar;
mod song_row;
pub mod views;

pub use app_view::*;
pub use custom_name::*;
pub use icons::*;
pub use navbar::*;
pub use song_row::*;
// Views are accessed via views::ViewName
