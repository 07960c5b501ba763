pub mod cache;
pub mod event;
pub mod place;
