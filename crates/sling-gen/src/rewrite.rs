//! Dependency discovery and `require` rewriting.
//!
//! [`ModuleTransformer::transform`] parses one module, rewrites every static
//! `require("<literal>")` call so it targets the bundle runtime with a
//! canonical module id, and regenerates the source text.

use crate::error::Result;
use crate::parser::{ParseOptions, parse};
use crate::specifier::{DEFAULT_EXTENSION, canonicalize_request};
use oxc_allocator::Allocator;
use oxc_ast::AstBuilder;
use oxc_ast::ast::{Argument, CallExpression, Expression};
use oxc_ast_visit::{VisitMut, walk_mut};
use oxc_codegen::Codegen;

/// Name of the host loader whose calls are treated as dependency references.
pub const DEPENDENCY_IMPORT_NAME: &str = "require";

/// Name the bundle runtime exposes its internal loader under.
pub const RUNTIME_REQUIRE_NAME: &str = "__sling_require__";

/// Options controlling how dependency references are recognized and rewritten
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Callee identifier recognized as a dependency reference
    pub import_name: String,
    /// Callee identifier written in place of `import_name`
    pub runtime_require_name: String,
    /// Extension appended to extensionless requests (without the dot)
    pub default_extension: String,
    /// Parser configuration
    pub parse: ParseOptions,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            import_name: DEPENDENCY_IMPORT_NAME.to_string(),
            runtime_require_name: RUNTIME_REQUIRE_NAME.to_string(),
            default_extension: DEFAULT_EXTENSION.to_string(),
            parse: ParseOptions::default(),
        }
    }
}

/// Regenerated source plus the canonical ids it depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// Source text with dependency references rewritten
    pub code: String,
    /// Canonical ids in source order, duplicates kept
    pub dependencies: Vec<String>,
}

/// Rewrites dependency references in a single module.
///
/// The transformer is a pure function of its inputs: it never touches the
/// filesystem and knows nothing about the module graph.
#[derive(Debug, Clone, Default)]
pub struct ModuleTransformer {
    options: TransformOptions,
}

impl ModuleTransformer {
    /// Create a transformer with custom options
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Transform `source`, resolving requests against `parent_dir`.
    ///
    /// `parent_dir` is the directory part of the module's canonical id
    /// (`./src` for `./src/index.js`).
    pub fn transform(&self, source: &str, parent_dir: &str) -> Result<TransformOutput> {
        let allocator = Allocator::default();
        let mut program = parse(&allocator, source, self.options.parse)?;

        let mut rewriter = RequireRewriter {
            ast: AstBuilder::new(&allocator),
            options: &self.options,
            parent_dir,
            dependencies: Vec::new(),
        };
        rewriter.visit_program(&mut program);
        let dependencies = rewriter.dependencies;

        // A `#!` line is only legal at the very start of a file, never inside
        // the function the bundle wraps each module in.
        program.hashbang = None;

        let code = Codegen::new().build(&program).code;

        Ok(TransformOutput { code, dependencies })
    }
}

struct RequireRewriter<'a, 'o> {
    ast: AstBuilder<'a>,
    options: &'o TransformOptions,
    parent_dir: &'o str,
    dependencies: Vec<String>,
}

impl<'a> VisitMut<'a> for RequireRewriter<'a, '_> {
    fn visit_call_expression(&mut self, call: &mut CallExpression<'a>) {
        self.rewrite_dependency_call(call);
        walk_mut::walk_call_expression(self, call);
    }
}

impl<'a> RequireRewriter<'a, '_> {
    /// Only `<import_name>("<literal>")` with exactly one argument qualifies.
    fn rewrite_dependency_call(&mut self, call: &mut CallExpression<'a>) {
        if call.arguments.len() != 1 {
            return;
        }
        let Expression::Identifier(callee) = &mut call.callee else {
            return;
        };
        if callee.name.as_str() != self.options.import_name.as_str() {
            return;
        }
        let Some(Argument::StringLiteral(request)) = call.arguments.first_mut() else {
            return;
        };

        let id = canonicalize_request(
            request.value.as_str(),
            self.parent_dir,
            &self.options.default_extension,
        );

        callee.name = self.ast.atom(&self.options.runtime_require_name);
        request.value = self.ast.atom(&id);
        request.raw = None;

        self.dependencies.push(id);
    }
}
