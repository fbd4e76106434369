//! Built-in reference data.
//!
//! Generic industrial failure statistics and event trees. Sites with their
//! own statistics should supply a tables file instead.

use super::{EventTree, FailureRate};
use crate::types::Branch::{Explosion, FlashFire, NoEffect, PoolFire, ToxicDispersion};
use crate::types::{Archetype, SubstanceCategory};

/// (full, partial) annual frequencies for failure categories 1, 2, 3.
pub(super) fn failure_rates(archetype: Archetype) -> [FailureRate; 3] {
    let rows = match archetype {
        Archetype::Pipeline => [(1.0e-6, 5.0e-6), (3.0e-6, 1.5e-5), (1.0e-5, 5.0e-5)],
        Archetype::Pump => [(1.0e-5, 5.0e-5), (3.0e-5, 1.0e-4), (1.0e-4, 4.4e-4)],
        Archetype::Tank => [(5.0e-6, 1.0e-4), (1.0e-5, 2.0e-4), (5.0e-5, 5.0e-4)],
        Archetype::TruckTank => [(5.0e-7, 5.0e-6), (1.0e-6, 1.0e-5), (5.0e-6, 5.0e-5)],
        Archetype::TechnologicalDevice => [(1.0e-5, 1.0e-4), (5.0e-5, 5.0e-4), (1.0e-4, 1.0e-3)],
    };
    rows.map(|(full, partial)| FailureRate::new(full, partial))
}

/// Event tree for an archetype and substance category.
pub(super) fn event_tree(archetype: Archetype, category: SubstanceCategory) -> EventTree {
    match category {
        SubstanceCategory::FlammableLiquid => EventTree::from_pairs(
            &[(PoolFire, 0.20), (Explosion, 0.04), (FlashFire, 0.06), (NoEffect, 0.70)],
            &[(PoolFire, 0.05), (Explosion, 0.01), (FlashFire, 0.04), (NoEffect, 0.90)],
        ),
        // A pressurised line release flashes or forms a jet, not a pool.
        SubstanceCategory::LiquefiedGas if archetype.is_line() => EventTree::from_pairs(
            &[(Explosion, 0.20), (FlashFire, 0.30), (NoEffect, 0.50)],
            &[(Explosion, 0.05), (FlashFire, 0.15), (NoEffect, 0.80)],
        ),
        SubstanceCategory::LiquefiedGas => EventTree::from_pairs(
            &[(PoolFire, 0.10), (Explosion, 0.15), (FlashFire, 0.25), (NoEffect, 0.50)],
            &[(PoolFire, 0.05), (Explosion, 0.05), (FlashFire, 0.15), (NoEffect, 0.75)],
        ),
        SubstanceCategory::Toxic => EventTree::from_pairs(
            &[(ToxicDispersion, 0.90), (NoEffect, 0.10)],
            &[(ToxicDispersion, 0.60), (NoEffect, 0.40)],
        ),
        SubstanceCategory::FlammableToxic => EventTree::from_pairs(
            &[(Explosion, 0.05), (FlashFire, 0.10), (ToxicDispersion, 0.60), (NoEffect, 0.25)],
            &[(Explosion, 0.01), (FlashFire, 0.04), (ToxicDispersion, 0.50), (NoEffect, 0.45)],
        ),
    }
}
