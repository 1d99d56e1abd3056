pub mod notification;
pub mod status;
pub mod user;
pub mod vehicle;
