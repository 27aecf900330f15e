pub mod profile;
pub mod types;
