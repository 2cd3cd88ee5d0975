//! Authenticated pass-through to the marketplace API.

pub mod controller;
pub mod router;
