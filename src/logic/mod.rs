//! Core non-UI logic: ordering, pagination, and cover derivation.

pub mod cover;
pub mod pages;
pub mod sort;

pub use cover::{CoverSize, cover_image_url, cover_image_url_from, favorite_cover_url};
pub use pages::page_count;
pub use sort::sort_books;
