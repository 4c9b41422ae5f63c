//! Parser façade over `oxc_parser`
//!
//! Every module is parsed through [`parse`] so the transformer and its tests
//! agree on source types and on what counts as a parse failure.

use crate::error::{GenError, Result};
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

/// Parse options for reading module source
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Source type (CommonJS script by default)
    pub source_type: SourceType,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_type: SourceType::cjs(),
        }
    }
}

/// Parse source code into a program.
///
/// Any diagnostic reported by the parser fails the parse; partial ASTs are
/// never handed back.
pub fn parse<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    options: ParseOptions,
) -> Result<Program<'a>> {
    let result = Parser::new(allocator, source, options.source_type).parse();

    if result.panicked || !result.errors.is_empty() {
        let mut diagnostics: Vec<String> =
            result.errors.iter().map(|err| err.to_string()).collect();
        if diagnostics.is_empty() {
            diagnostics.push("parser aborted".to_string());
        }
        return Err(GenError::parse_failed(diagnostics));
    }

    Ok(result.program)
}
