//! Business services over the repository layer

pub mod directory;
pub mod profile;
pub mod registration;
pub mod validation;
