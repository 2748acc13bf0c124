//! Form domain layer
//!
//! Typed field values, the zoning record and the gated session that owns it.

mod field;
mod form_state;
mod record;

pub use form_state::FormSession;
pub use record::{FieldId, FieldUpdate, FormRecord};

#[cfg(test)]
pub use field::{Answer, NumericText};
