pub mod api;
pub mod app;
pub mod state;
pub mod view;
