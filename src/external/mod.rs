pub mod woocommerce;

pub use woocommerce::*;
