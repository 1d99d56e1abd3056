pub mod bus;
pub mod config;
pub mod dispatcher;
pub mod pipeline;
pub mod push;
pub mod receiver;
pub mod sanitizer;
pub mod tracker;
pub mod users;
pub mod vehicles;

pub mod services;
