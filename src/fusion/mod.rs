//! Signal fusion engine.
//!
//! Pure, synchronous combination of one quantitative and one qualitative
//! prediction into an actionable decision:
//! - Direction normalization to a shared vocabulary
//! - Agreement scoring across direction, confidence, and internal consistency
//! - Strength classification through an ordered first-match-wins rule chain
//! - Action mapping and position sizing
//!
//! No I/O, no shared state; safe to call concurrently for different pairs.

mod agreement;
mod direction;
mod engine;
mod strength;

pub use agreement::agreement_score;
pub use direction::{directional_match, Direction};
pub use engine::{FusionDecision, FusionEngine, TradeAction};
pub use strength::{classify_strength, SignalStrength, StrengthInputs};
