pub(crate) mod components;
pub(crate) mod routes;

pub mod app;
