pub mod common;
pub mod coupon;
pub mod prize;

pub use common::*;
pub use coupon::*;
pub use prize::*;
