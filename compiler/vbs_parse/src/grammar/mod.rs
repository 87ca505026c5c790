//! Grammar productions, one module per area.

mod control;
mod decl;
mod expr;
mod markup;
mod stmt;
