//! Physical effect calculators.
//!
//! Stateless functions, mutually independent:
//! - **Evaporation**: flash and pool evaporation of a spill
//! - **Outflow**: orifice discharge and release duration
//! - **PoolFire**: thermal radiation zones of a burning pool
//! - **Explosion**: vapour cloud explosion overpressure zones
//! - **Flash**: LFL cloud and flash fire radii
//! - **Toxic**: Gaussian plume dose zones
//!
//! Every result record defaults to all zeros, and zero mass yields that record.

mod common;
mod evaporation;
mod explosion;
mod flash;
mod outflow;
mod pool_fire;
mod toxic;

pub use common::{AIR_DENSITY, ATMOSPHERIC_PRESSURE, GAS_CONSTANT, GRAVITY, SOUND_SPEED};
pub use evaporation::*;
pub use explosion::*;
pub use flash::*;
pub use outflow::*;
pub use pool_fire::*;
pub use toxic::*;
