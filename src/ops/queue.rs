use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;

use crate::model::{GiftSuggestion, SuggestionId};

/// What the user decided about the card on top of the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Dismiss,
    Favourite,
}

/// Result of resolving a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The id did not name the current head; nothing changed
    Ignored,
    /// The head was removed. `exhausted` is set when this removed the last card.
    Resolved { exhausted: bool },
}

/// Not-yet-reviewed suggestions, consumed from the front
#[derive(Debug, Clone, Default)]
pub struct SuggestionQueue {
    items: VecDeque<GiftSuggestion>,
}

impl SuggestionQueue {
    /// Build a queue from a parsed batch, dropping repeated ids
    pub fn from_batch(suggestions: Vec<GiftSuggestion>) -> Self {
        let mut seen = HashSet::new();
        let items = suggestions
            .into_iter()
            .filter(|s| seen.insert(s.id))
            .collect();
        SuggestionQueue { items }
    }

    /// The card currently on top
    pub fn head(&self) -> Option<&GiftSuggestion> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GiftSuggestion> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Apply a decision to the head card. `id` must match the head;
    /// anything else is ignored so a stale or repeated action is harmless.
    pub fn resolve(
        &mut self,
        id: SuggestionId,
        decision: Decision,
        favourites: &mut FavouritesSet,
    ) -> Resolution {
        if self.head().map(|s| s.id) != Some(id) {
            return Resolution::Ignored;
        }
        let was_last = self.items.len() == 1;
        let Some(card) = self.items.pop_front() else {
            return Resolution::Ignored;
        };
        if decision == Decision::Favourite {
            favourites.insert(card);
        }
        Resolution::Resolved {
            exhausted: was_last,
        }
    }
}

/// Favourited suggestions, in the order they were favourited
#[derive(Debug, Clone, Default)]
pub struct FavouritesSet {
    items: IndexMap<SuggestionId, GiftSuggestion>,
}

impl FavouritesSet {
    /// Add a suggestion; returns false if it was already a favourite
    pub fn insert(&mut self, suggestion: GiftSuggestion) -> bool {
        if self.items.contains_key(&suggestion.id) {
            return false;
        }
        self.items.insert(suggestion.id, suggestion);
        true
    }

    /// Remove a favourite, keeping the order of the rest
    pub fn remove(&mut self, id: SuggestionId) -> Option<GiftSuggestion> {
        self.items.shift_remove(&id)
    }

    pub fn contains(&self, id: SuggestionId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_index(&self, index: usize) -> Option<&GiftSuggestion> {
        self.items.get_index(index).map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GiftSuggestion> {
        self.items.values()
    }

    pub fn ids(&self) -> Vec<SuggestionId> {
        self.items.keys().copied().collect()
    }
}
