//! Node IDs and ranges for the flat AST.
//!
//! - `ExprId(u32)` / `StmtId(u32)` instead of `Box<Expr>` / `Box<Stmt>`
//! - Ranges index flattened side tables in the arena (argument lists,
//!   statement sequences, parameter lists)

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Invalid ID (sentinel value).
            pub const INVALID: $name = $name(u32::MAX);

            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Index into the owning arena table.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", stringify!($name), self.0)
                } else {
                    write!(f, "{}::INVALID", stringify!($name))
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }
    };
}

macro_rules! define_range {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        pub struct $name {
            pub start: u32,
            pub len: u32,
        }

        impl $name {
            pub const EMPTY: $name = $name { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u32) -> Self {
                $name { start, len }
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{}({}..{})",
                    stringify!($name),
                    self.start,
                    self.start.saturating_add(self.len)
                )
            }
        }
    };
}

define_id!(
    /// Index into the expression table of an `ExprArena`.
    ExprId
);

define_id!(
    /// Index into the statement table of an `ExprArena`.
    StmtId
);

define_range!(
    /// Range of expression IDs (call arguments, list elements, color components).
    ExprRange
);

define_range!(
    /// Range of statement IDs (block bodies, class members).
    StmtRange
);

define_range!(
    /// Range of function parameters.
    ParamRange
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_ids() {
        assert!(!ExprId::INVALID.is_valid());
        assert!(StmtId::new(0).is_valid());
        assert_eq!(format!("{:?}", ExprId::new(3)), "ExprId(3)");
        assert_eq!(format!("{:?}", StmtId::default()), "StmtId::INVALID");
    }

    #[test]
    fn range_len() {
        let range = StmtRange::new(4, 3);
        assert_eq!(range.len(), 3);
        assert!(!range.is_empty());
        assert!(ParamRange::EMPTY.is_empty());
    }
}
