//! Per-version structural transformers.
//!
//! One module per version boundary, named after the version it produces.
//! Boundaries without a structural change have no module; they are
//! placeholder steps in the chain definition.

mod v0_13_0;
mod v0_13_1;
mod v0_14_0;
mod v0_14_1;
mod v0_15_0;
mod v0_15_1;

pub use v0_13_0::backfill_defaults;
pub use v0_13_1::{convert_ai_deck, restructure_ai_decks};
pub use v0_14_0::backfill_survivors;
pub use v0_14_1::reconcile_settlement_monsters;
pub use v0_15_0::partition_custom_monsters;
pub use v0_15_1::denormalize_settlement_monsters;
