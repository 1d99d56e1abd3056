pub mod bus;
pub mod config;
pub mod push;
pub mod receiver;
pub mod server;
pub mod tracker;
pub mod users;
pub mod vehicles;
