//! Editing core: a persistent rope, linear undo history, an ANSI terminal screen model, and a
//! fuzzy matcher/picker. See each module's doc comment for its own invariants.

pub mod error;
pub mod fuzzy;
pub mod rope;
pub mod terminal;
pub mod undo;

pub use error::{CoreError, ErrorKind, ErrorSeverity, Result};
