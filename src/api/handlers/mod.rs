//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod list;
pub mod redirect;
pub mod shorten;

pub use list::list_handler;
pub use redirect::{missing_id_handler, redirect_handler};
pub use shorten::{shorten_handler, shorten_text_handler};
