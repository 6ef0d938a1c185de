//! Canonical S-expression parser and navigator
//!
//! Parses the nested byte-string format cryptographic libraries use for
//! keys and parameters, e.g. `(rsa (n #00b1#) (e #010001#))`, into an
//! immutable tree, and exposes read-only views with indexing, iteration,
//! `car`/`cdr` and named field lookup. Operates on in-memory buffers only.

pub mod builder;
pub mod error;
pub mod expression;
pub mod lexer;
pub mod navigator;
pub mod node;
pub mod parser;

pub use builder::SexpBuilder;
pub use error::{ErrorKind, GcrError, Result, SexpError};
pub use expression::SymbolicExpression;
pub use navigator::{Element, Iter, Navigator};
pub use node::{Node, Shape, NODE_OVERHEAD};
pub use parser::{parse, parse_with_options, ParseOptions, Parser};
