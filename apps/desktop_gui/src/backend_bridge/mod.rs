//! Backend worker: command definitions and the thread that serves them.

pub mod commands;
pub mod runtime;
