use std::{fmt::Display, num::NonZeroU32};

use serde::{Deserialize, Serialize};

/// Identifier of a player. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(NonZeroU32);

impl PlayerId {
    /// Returns `None` for 0, which is never a valid id.
    pub const fn new(id: u32) -> Option<Self> {
        match NonZeroU32::new(id) {
            Some(id) => Some(PlayerId(id)),
            None => None,
        }
    }

    pub const fn get(&self) -> u32 {
        self.0.get()
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out increasing player ids, starting at 1.
///
/// Owned by whatever groups players together (a match, a session); two
/// sequences are independent of each other.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: NonZeroU32,
}

impl IdSequence {
    pub fn new() -> Self {
        IdSequence { next: NonZeroU32::MIN }
    }

    /// Returns the next id. Saturates at `u32::MAX`.
    pub fn next_id(&mut self) -> PlayerId {
        let id = self.next;
        self.next = id.saturating_add(1);
        PlayerId(id)
    }

    /// Shortcut for a player carrying the next id.
    pub fn player(&mut self, name: impl Into<String>) -> Player {
        Player::new(self.next_id(), name)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    id: PlayerId,
    name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Player { id, name: name.into() }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_an_id() {
        assert!(PlayerId::new(0).is_none());
        assert_eq!(PlayerId::new(7).map(|id| id.get()), Some(7));
    }

    #[test]
    fn sequence_is_monotonic_and_starts_at_one() {
        let mut ids = IdSequence::new();
        let a = ids.player("White");
        let b = ids.player("Black");
        assert_eq!(a.id().get(), 1);
        assert_eq!(b.id().get(), 2);
        assert_eq!(a.name(), "White");
        assert!(a.id() < b.id());
    }

    #[test]
    fn sequences_are_independent() {
        let mut first = IdSequence::new();
        let mut second = IdSequence::new();
        let _ = first.next_id();
        assert_eq!(second.next_id().get(), 1);
    }
}
