//! API endpoint groups.

pub mod properties;

pub use properties::PropertiesApi;
