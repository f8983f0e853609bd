pub mod tour_handlers;
pub mod upload;
