use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChangeMagnitude {
    Massive,
    Large,
    Moderate,
    Small,
    Minimal
}

impl ChangeMagnitude {
    pub fn from_delta(delta: i32) -> ChangeMagnitude {
        match delta.unsigned_abs() {
            30..=u32::MAX => ChangeMagnitude::Massive,
            20..=29 => ChangeMagnitude::Large,
            10..=19 => ChangeMagnitude::Moderate,
            5..=9 => ChangeMagnitude::Small,
            _ => ChangeMagnitude::Minimal
        }
    }
}
