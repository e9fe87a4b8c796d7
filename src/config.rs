//! Configuration schema and loading.
//!
//! Settings drive the browser's recognized audio extensions, the transport's
//! polling cadence and a few UI knobs; see [`Settings::load`] for precedence.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
