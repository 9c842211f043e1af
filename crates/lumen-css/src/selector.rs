//! Selectors.
//!
//! A selector is a small tree of variants. Specificity is a single integer:
//!
//! | Variant      | Specificity            |
//! |--------------|------------------------|
//! | `Tag`        | 1                      |
//! | `Class`      | 2                      |
//! | `Sequence`   | sum of its parts       |
//! | `Descendant` | sum of both sides      |
//!
//! A descendant chain `a b c` is built left to right as
//! `Descendant(Descendant(a, b), c)`: the rightmost part is matched against
//! the node itself and the accumulated left part against its ancestors.

use std::fmt;

use lumen_dom::{DomTree, NodeId};

/// Specificity of a tag selector.
pub const TAG_SPECIFICITY: u32 = 1;

/// Specificity of a class selector.
pub const CLASS_SPECIFICITY: u32 = 2;

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Matches elements with this (lowercase) tag name.
    Tag(String),
    /// Matches elements whose `class` list contains this name.
    Class(String),
    /// Matches when every part matches the same element (`div.note`).
    Sequence(Vec<Selector>),
    /// `Descendant(ancestor, descendant)`: the node matches `descendant` and
    /// some proper ancestor matches `ancestor`.
    Descendant(Box<Selector>, Box<Selector>),
}

impl Selector {
    /// Classify one selector token.
    ///
    /// - `.name` is a class selector
    /// - `tag.a.b` is a sequence of the tag and its classes
    /// - anything else is a tag selector
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if let Some(class) = token.strip_prefix('.') {
            return Self::Class(class.to_string());
        }
        if token.contains('.') {
            let mut names = token.split('.');
            let tag = names.next().unwrap_or_default();
            let parts = std::iter::once(Self::Tag(tag.to_string()))
                .chain(names.map(|class| Self::Class(class.to_string())))
                .collect();
            return Self::Sequence(parts);
        }
        Self::Tag(token.to_string())
    }

    /// The integer weight used to order rules.
    #[must_use]
    pub fn specificity(&self) -> u32 {
        match self {
            Self::Tag(_) => TAG_SPECIFICITY,
            Self::Class(_) => CLASS_SPECIFICITY,
            Self::Sequence(parts) => parts.iter().map(Self::specificity).sum(),
            Self::Descendant(ancestor, descendant) => {
                ancestor.specificity() + descendant.specificity()
            }
        }
    }

    /// Test whether node `id` of `tree` matches. Text nodes never match.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        match self {
            Self::Tag(name) => tree.tag_name(id) == Some(name.as_str()),
            Self::Class(name) => tree
                .as_element(id)
                .is_some_and(|element| element.classes().contains(name.as_str())),
            Self::Sequence(parts) => parts.iter().all(|part| part.matches(tree, id)),
            Self::Descendant(ancestor, descendant) => {
                descendant.matches(tree, id)
                    && tree
                        .ancestors(id)
                        .any(|candidate| ancestor.matches(tree, candidate))
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(name) => write!(f, "{name}"),
            Self::Class(name) => write!(f, ".{name}"),
            Self::Sequence(parts) => parts.iter().try_for_each(|part| write!(f, "{part}")),
            Self::Descendant(ancestor, descendant) => write!(f, "{ancestor} {descendant}"),
        }
    }
}
