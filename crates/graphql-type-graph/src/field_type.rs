use std::fmt;

use cynic_parser::{common::WrappingType, type_system as ast};

/// The type of a field, argument or input field, e.g. `[String!]!`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Named(String),
    List(Box<FieldType>),
    NonNull(Box<FieldType>),
}

impl FieldType {
    /// The name of the innermost type.
    pub fn named_type(&self) -> &str {
        match self {
            FieldType::Named(name) => name,
            FieldType::List(inner) | FieldType::NonNull(inner) => inner.named_type(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, FieldType::NonNull(_))
    }

    pub fn is_list(&self) -> bool {
        match self {
            FieldType::List(_) => true,
            FieldType::NonNull(inner) => inner.is_list(),
            FieldType::Named(_) => false,
        }
    }

    /// The type with its outermost non-null wrapper removed, if any.
    pub fn nullable(&self) -> &FieldType {
        match self {
            FieldType::NonNull(inner) => inner,
            other => other,
        }
    }

    pub(crate) fn rename(&mut self, from: &str, to: &str) {
        match self {
            FieldType::Named(name) if name == from => *name = to.to_owned(),
            FieldType::Named(_) => (),
            FieldType::List(inner) | FieldType::NonNull(inner) => inner.rename(from, to),
        }
    }
}

impl From<ast::Type<'_>> for FieldType {
    fn from(ty: ast::Type<'_>) -> Self {
        // Wrappers come outermost first.
        let wrappers = ty.wrappers().collect::<Vec<_>>();

        wrappers
            .into_iter()
            .rev()
            .fold(FieldType::Named(ty.name().to_owned()), |inner, wrapper| match wrapper {
                WrappingType::NonNull => FieldType::NonNull(Box::new(inner)),
                WrappingType::List => FieldType::List(Box::new(inner)),
            })
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Named(name) => f.write_str(name),
            FieldType::List(inner) => write!(f, "[{inner}]"),
            FieldType::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}
