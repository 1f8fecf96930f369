//! Arcanum - class and ability resolution core for the wizarding game mod

pub mod abilities;
pub mod agent;
pub mod classes;
pub mod content;
pub mod core;
