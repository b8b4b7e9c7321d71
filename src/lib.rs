//! An interpreter for System F, the explicitly-typed polymorphic
//! lambda calculus.
//!
//! Terms carry full type annotations and type abstraction/application
//! are explicit syntax, so type checking is decidable by structural,
//! syntax-directed rules with no inference. Checked terms are reduced
//! under one of three selectable evaluation strategies (eager,
//! call-by-name, call-by-need), or rendered as JavaScript source text
//! by the transpiler.
//!
//! The pipeline: [`lexer`] tokenizes a line, [`parser`] builds the
//! [`ast`], [`types`] checks it, [`interpreter`] reduces it.
//! [`session`] wires the stages together and owns the persistent
//! top-level environments.

pub mod ast;
pub mod emit;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod session;
pub mod types;
