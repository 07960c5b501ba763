pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used items
pub use config::{Config, CONFIG};
pub use error::LookupError;
pub use models::event::InvocationEvent;
pub use services::place_service::PlaceService;
pub use utils::response::HttpResponse;
