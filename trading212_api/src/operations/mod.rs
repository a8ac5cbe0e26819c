//! Typed operations, one module per endpoint group.

mod account;
mod history;
mod instruments;
mod orders;
mod pies;
mod positions;
