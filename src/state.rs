pub mod identity;
pub mod registry;
pub mod session;
