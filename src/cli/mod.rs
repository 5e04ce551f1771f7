pub mod args;

pub use args::{parse_size, Args};
