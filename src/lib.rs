#![doc = include_str!("../README.md")]

mod ast;
mod dump;
mod engine;
mod error;
mod eval;
mod lexer;
mod parser;
mod token;
mod vars;

pub use dump::TreeDisplay;
pub use engine::{Arbor, DataType};
pub use error::ArborError;
pub use lexer::{VAR_END, VAR_FLAG, VAR_START};
