pub mod code_generator;
pub mod weighted;

pub use code_generator::{generate_coupon_code, generate_coupon_suffix};
pub use weighted::select_weighted;
