pub mod cache;
pub mod http;
pub mod notification;
pub mod rendering;
pub mod services;
