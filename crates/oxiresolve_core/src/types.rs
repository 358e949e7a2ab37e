use std::path::Path;

/// How a module specifier relates to the file system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierClass {
    /// `./x`, `../x`, or anything else starting with `.`
    LocalRelative,
    /// An absolute file-system path
    LocalAbsolute,
    /// Package names and other bare specifiers
    External,
}

impl SpecifierClass {
    pub fn of(specifier: &str) -> Self {
        if Path::new(specifier).is_absolute() {
            SpecifierClass::LocalAbsolute
        } else if specifier.starts_with('.') {
            SpecifierClass::LocalRelative
        } else {
            SpecifierClass::External
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A file was found; holds the rewritten specifier
    Resolved(String),
    /// A local specifier with no matching file; holds the original text
    Unresolved(String),
    /// An external specifier, passed through as is
    Untouched(String),
}

impl Resolution {
    pub fn specifier(&self) -> &str {
        match self {
            Resolution::Resolved(s) | Resolution::Unresolved(s) | Resolution::Untouched(s) => s,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}
