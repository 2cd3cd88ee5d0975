//! The session's permission directory: inspection and in-session refresh.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
