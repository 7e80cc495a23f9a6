//! Application module: the browsing model used by the TUI and runtime.
//!
//! `App` lives in `app::model` and holds the album carousel, the listing of
//! the album in front and the song number being typed.

mod model;

pub use model::*;
