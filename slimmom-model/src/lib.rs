pub mod field;
pub mod intake;
pub mod layout;
pub mod measurement;
pub mod profile;
