//! Response formatting.
//!
//! - [`envelope`] - The uniform `{success, data | error, pagination?}` JSON shape

pub mod envelope;

pub use envelope::Envelope;
