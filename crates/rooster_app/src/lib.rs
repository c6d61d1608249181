pub mod app;
pub mod rows;
pub mod sink;
