//! Wire formats of the backend. Field names follow the backend's Portuguese schema.

pub mod applications;
pub mod auth;
pub mod ngos;
pub mod opportunities;
pub mod volunteers;
