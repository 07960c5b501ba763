pub mod google_places;
pub mod runtime;
pub mod secrets;
