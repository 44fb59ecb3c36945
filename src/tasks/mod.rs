//! Background tasks module
//!
//! This module contains the tasks that run alongside the console.

pub mod countdown;

// Re-export main functions
pub use countdown::countdown_task;
