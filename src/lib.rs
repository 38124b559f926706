//! # BrainLeaf - A visitor based Brainfuck interpreter, printer and transpiler
//!
//! Source is parsed into a small tree (with runs of the same command folded
//! and `[-]` turned into a set), which is then handed to one of the backends:
//! the interpreter, the source printer or the C generator.
//!
//! **NOTE! This is a command line program. This library does NOT provide a
//! stable API.**

// Re-export some symbols.
pub use codegen::generate_c;
pub use interpreter::execute;
pub use interpreter::ExecuteCallbackData;
pub use interpreter::ExecuteCallbackResult;
pub use interpreter::ExecutionError;
pub use parser::parse_source;
pub use parser::parse_source_with;
pub use parser::ParseError;
pub use printer::print_source;
pub use types::BfNum;
pub use types::TapeAddr;
pub use types::TapeAddrError;

pub mod ast;
mod codegen;
mod interpreter;
mod parser;
mod printer;
pub mod settings;
pub mod tape;
#[doc(hidden)]
pub mod test_utils;
pub mod types;
