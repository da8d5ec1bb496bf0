//! Typed indices and ranges into the AST arena.
//!
//! `ExprId(u32)` instead of `Box<Expr>`: 4 bytes, O(1) equality, and all
//! nodes of one parse sit in contiguous vectors.

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Index into the owning arena vector.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

macro_rules! arena_range {
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

            #[inline]
            pub(crate) fn to_range(self) -> std::ops::Range<usize> {
                let start = self.start as usize;
                start..start + self.len as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    concat!(stringify!($name), "({}..{})"),
                    self.start,
                    self.start + self.len
                )
            }
        }
    };
}

arena_id!(
    /// Index of an [`Expr`](super::Expr) in the arena.
    ExprId
);
arena_id!(
    /// Index of a [`Stmt`](super::Stmt) in the arena.
    StmtId
);
arena_id!(
    /// Index of a [`FunctionDef`](super::FunctionDef) in the arena.
    FunctionId
);

arena_range!(
    /// Contiguous run of expression ids: call arguments, array elements.
    ExprRange
);
arena_range!(
    /// Contiguous run of statement ids: block and program bodies.
    StmtRange
);
arena_range!(
    /// Contiguous run of object literal properties.
    PropRange
);
arena_range!(
    /// Contiguous run of parameter names.
    ParamRange
);

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ExprId, ExprRange};
    crate::static_assert_size!(ExprId, 4);
    crate::static_assert_size!(ExprRange, 8);
}
