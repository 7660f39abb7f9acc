//! Type definitions shared by the AST and the analysis passes.
//!
//! The language only has primitive types. Numeric types widen along
//! `int < float < double`; every other type is only compatible with itself.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    Double,
    Char,
    Bool,
    String,
    Void,
    /// The type of an enum's own name. Enum values are plain `int`s.
    Enum,
    /// Produced when a type could not be determined; never reported twice.
    Error,
}

impl Type {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float | Type::Double)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Int)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    /// Position of a numeric type in the widening order, `None` for anything else.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Type::Int => Some(0),
            Type::Float => Some(1),
            Type::Double => Some(2),
            _ => None,
        }
    }

    /// The wider of two numeric types. Returns `Type::Error` if either side is not numeric.
    pub fn widest(a: Type, b: Type) -> Type {
        match (a.rank(), b.rank()) {
            (Some(left), Some(right)) => {
                if left >= right {
                    a
                } else {
                    b
                }
            }
            _ => Type::Error,
        }
    }

    /// Equal types, or any two numeric types. Error types are compatible with everything
    /// so a single mistake is reported once.
    pub fn is_compatible_with(&self, other: &Type) -> bool {
        if self.is_error() || other.is_error() {
            return true;
        }

        self == other || (self.is_numeric() && other.is_numeric())
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Double => "double",
            Type::Char => "char",
            Type::Bool => "bool",
            Type::String => "string",
            Type::Void => "void",
            Type::Enum => "enum",
            Type::Error => "<error>",
        };

        write!(f, "{}", name)
    }
}
