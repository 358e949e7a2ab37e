use log::{debug, trace, warn};
use oxc_ast::ast::{
    Declaration, Statement, StringLiteral, TSModuleDeclaration, TSModuleDeclarationBody,
};
use oxc_span::Span;
use std::path::PathBuf;

use oxiresolve_core::{ProbeCache, Resolution, ResolvePolicy, SourceTree, resolve};

use crate::printer;

/// Declarations that carry a module specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// `import x from "m"`, `import "m"`
    Import,
    /// `export * from "m"`, `export * as ns from "m"`
    ExportAll,
    /// `export { a } from "m"`
    ExportNamed,
}

/// One specifier literal and what the resolver made of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralEdit {
    pub kind: DeclKind,
    /// Span of the literal, quotes included
    pub span: Span,
    pub original: String,
    pub resolution: Resolution,
}

impl LiteralEdit {
    /// Text to append inside the literal, if the specifier changes
    pub fn appended(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Resolved(new) => {
                new.strip_prefix(self.original.as_str()).filter(|s| !s.is_empty())
            }
            Resolution::Unresolved(_) | Resolution::Untouched(_) => None,
        }
    }
}

/// A source file with its specifier literals resolved, ready to print.
#[derive(Debug, Clone)]
pub struct RewrittenSource<'t> {
    pub path: PathBuf,
    pub source: &'t str,
    /// Every specifier literal in source order, resolved or not
    pub edits: Vec<LiteralEdit>,
}

impl RewrittenSource<'_> {
    pub fn print(&self) -> String {
        printer::print(self.source, &self.edits)
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &LiteralEdit> {
        self.edits.iter().filter(|e| matches!(e.resolution, Resolution::Unresolved(_)))
    }

    /// Number of literals whose text changes
    pub fn rewritten_count(&self) -> usize {
        self.edits.iter().filter(|e| e.appended().is_some()).count()
    }
}

/// Resolves the specifier of every import and re-export declaration in `tree`.
///
/// Only the specifier literal of those declarations is considered; other
/// string literals, `import()` expressions and `require()` calls are never
/// touched.
pub fn rewrite<'t>(
    tree: &'t SourceTree<'_>,
    policy: &ResolvePolicy,
    cache: &ProbeCache,
) -> RewrittenSource<'t> {
    let from_dir = tree.dir();
    let mut edits = Vec::new();

    walk_declarations(&tree.program.body[..], &specifier_site, &mut |kind, literal| {
        let original = literal.value.as_str();
        trace!("Found {:?} specifier '{}' in {}", kind, original, tree.path.display());
        let resolution = resolve(policy, from_dir, original, cache);
        if let Resolution::Unresolved(_) = resolution {
            warn!(
                "Module not resolved: '{}' (from {})",
                resolution.specifier(),
                tree.path.display()
            );
        }
        edits.push(LiteralEdit {
            kind,
            span: literal.span,
            original: original.to_string(),
            resolution,
        });
    });
    edits.sort_by_key(|e| e.span.start);

    debug!("Found {} specifiers in {}", edits.len(), tree.path.display());
    RewrittenSource { path: tree.path.clone(), source: tree.source, edits }
}

/// Calls `on_literal` for every statement accepted by `site`, descending into
/// namespace and `declare module` bodies. Recursion depth is bounded by the
/// nesting depth of the parsed program.
pub fn walk_declarations<'s, 'a, P, F>(
    statements: &'s [Statement<'a>],
    site: &P,
    on_literal: &mut F,
) where
    P: Fn(&'s Statement<'a>) -> Option<(DeclKind, &'s StringLiteral<'a>)>,
    F: FnMut(DeclKind, &'s StringLiteral<'a>),
{
    for stmt in statements {
        if let Some((kind, literal)) = site(stmt) {
            on_literal(kind, literal);
        }
        if let Some(nested) = nested_statements(stmt) {
            walk_declarations(nested, site, on_literal);
        }
    }
}

/// The module specifier literal of an import or re-export declaration
pub fn specifier_site<'s, 'a>(
    stmt: &'s Statement<'a>,
) -> Option<(DeclKind, &'s StringLiteral<'a>)> {
    match stmt {
        Statement::ImportDeclaration(decl) => Some((DeclKind::Import, &decl.source)),
        Statement::ExportAllDeclaration(decl) => Some((DeclKind::ExportAll, &decl.source)),
        Statement::ExportNamedDeclaration(decl) => {
            decl.source.as_ref().map(|source| (DeclKind::ExportNamed, source))
        }
        _ => None,
    }
}

fn nested_statements<'s, 'a>(stmt: &'s Statement<'a>) -> Option<&'s [Statement<'a>]> {
    match stmt {
        Statement::TSModuleDeclaration(decl) => module_body(decl),
        Statement::ExportNamedDeclaration(decl) => match &decl.declaration {
            Some(Declaration::TSModuleDeclaration(module)) => module_body(module),
            _ => None,
        },
        _ => None,
    }
}

/// Statements of a module block; `namespace a.b.c {}` nests one declaration per segment
fn module_body<'s, 'a>(decl: &'s TSModuleDeclaration<'a>) -> Option<&'s [Statement<'a>]> {
    let mut body = decl.body.as_ref()?;
    loop {
        match body {
            TSModuleDeclarationBody::TSModuleBlock(block) => return Some(&block.body[..]),
            TSModuleDeclarationBody::TSModuleDeclaration(inner) => body = inner.body.as_ref()?,
        }
    }
}
