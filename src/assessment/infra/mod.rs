//! Infrastructure modules.
//!
//! - **Logging**: tracing-subscriber setup and component log targets

mod logging;

pub use logging::*;
