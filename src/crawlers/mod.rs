pub mod catalog;
pub mod renderer;
pub mod walker;
pub mod web;
