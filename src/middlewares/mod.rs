pub mod cors;
pub mod origin;

pub use cors::create_cors;
pub use origin::OriginGuard;
