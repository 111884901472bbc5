//! Grammar productions of the language.
//!
//! Every production is a method on [Parser](crate::frontend::Parser) named
//! after the node it builds (`var_decl` builds `VAR_DECL`). Productions that
//! only pick between alternatives (`stmt`, `decl_stmt` and friends) return
//! the node of the alternative that matched and add no node of their own.

mod declarations;
mod expressions;
mod program;
mod statements;
