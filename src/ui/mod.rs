//! Terminal front-end.

pub mod console;

pub use console::Console;
