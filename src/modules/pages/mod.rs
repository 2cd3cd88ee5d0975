//! Guarded console pages, one route per entry of the page catalogue.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
