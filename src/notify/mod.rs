//! Console presentation for scan output.

pub mod console;

pub use console::ConsoleOutput;
