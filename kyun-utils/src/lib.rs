/// Per-user command rate limiting.
pub mod cooldown;
/// Generic embed builders shared across commands.
pub mod embed;
/// Interactive browsers, their sessions and Discord glue.
pub mod pagination;
/// Pure parser helpers.
pub mod parse;
