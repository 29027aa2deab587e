pub mod embeds;
pub mod favourites;
pub mod list;
pub mod render;
pub mod search;
