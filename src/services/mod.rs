pub mod prize_wheel_service;

pub use prize_wheel_service::*;
