//! Domain data types shared by every stage of the assessment.
//!
//! Substances, equipment and the site are immutable inputs owned by the
//! caller; severity and branch tags key the reference tables.

mod equipment;
mod hazard;
mod substance;

pub use equipment::*;
pub use hazard::*;
pub use substance::*;

#[cfg(test)]
pub(crate) use substance::fixtures;
