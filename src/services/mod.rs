pub mod place_service;
