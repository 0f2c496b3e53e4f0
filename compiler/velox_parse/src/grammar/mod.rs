//! Grammar productions, split by construct.
//!
//! - `expr.rs`: precedence chain, postfix selectors and primaries
//! - `stmt.rs`: statement forms and control flow
//! - `item.rs`: function, class and instant definitions, realization, include

mod expr;
mod item;
mod stmt;
