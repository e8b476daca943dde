//! The Assembler module is in charge of taking CG-16-1
//! source and producing a Vec<Instruction> from the
//! AST submodule.
//!
//! It does this by implementing a line tokenizer and a
//! non-lookahead recursive descent parser over its tokens.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
