//! Tree-sitter parsing support for the pruner refactoring engine.
//!
//! This crate wraps the raw Tree-sitter parser for the TypeScript family
//! of grammars and exposes structured access to parse results. The
//! refactoring engine in `pruner-engine` operates on the trees produced
//! here; it never owns or mutates them.
//!
//! # Example
//!
//! ```
//! use pruner_syntax::{Parser, SupportedLanguage};
//!
//! let mut parser = Parser::new(SupportedLanguage::TypeScript)?;
//! let parsed = parser.parse("const some = a && true;")?;
//! assert!(!parsed.has_errors());
//! # Ok::<(), pruner_syntax::SyntaxError>(())
//! ```

mod error;
mod language;
mod parser;
mod position;

pub use error::SyntaxError;
pub use language::{LanguageParseError, SupportedLanguage};
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
pub use position::point_to_one_based;
