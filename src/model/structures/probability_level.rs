use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Three-way label for a win percentage. The band around 50 keeps
/// near-even pairings from flipping label on single-point drifts.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProbabilityLevel {
    Favorite,
    Underdog,
    Even
}
