mod create;
mod landing;
mod profile;

pub use create::*;
pub use landing::*;
pub use profile::*;
