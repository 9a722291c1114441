use std::collections::HashSet;

use itertools::Itertools;

use crate::{
    error::EngineError,
    model::db_structs::{Pairing, PlayerId}
};

/// Every participant against every other exactly once.
///
/// Pairs come out as `(i, j)` with `i` ahead of `j` in the input, in input
/// order, so the same roster always yields the same list.
pub fn generate_round_robin(participant_ids: &[PlayerId]) -> Result<Vec<Pairing>, EngineError> {
    if participant_ids.len() < 2 {
        return Err(EngineError::InsufficientParticipants(participant_ids.len()));
    }

    let mut seen = HashSet::with_capacity(participant_ids.len());
    if let Some(duplicate) = participant_ids.iter().find(|id| !seen.insert(id.as_str())) {
        return Err(EngineError::DuplicateParticipant(duplicate.clone()));
    }

    Ok(participant_ids
        .iter()
        .tuple_combinations()
        .map(|(a, b)| Pairing {
            player1_id: a.clone(),
            player2_id: b.clone()
        })
        .collect())
}

/// `n(n - 1) / 2`
pub fn total_matches(n_participants: usize) -> usize {
    n_participants * n_participants.saturating_sub(1) / 2
}
