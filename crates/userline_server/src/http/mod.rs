pub mod response;
pub mod users_handler;
