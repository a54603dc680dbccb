//! Suggestion queries against a [`DefinitionIndex`](crate::indexer::DefinitionIndex)
//!
//! Pure and side-effect free: the editor host passes the line text up to the cursor and
//! renders the returned [`Suggestion`](crate::models::Suggestion)s.

pub mod lookup;
pub mod trigger;

pub use lookup::{MAX_SUGGESTIONS, lookup};
pub use trigger::{Trigger, parse_trigger, suggestions_for_line};
