//! Question sources.

use rustc_hash::FxHashMap;

use crate::core::{Region, RegionId};

use super::descriptor::ChallengeDescriptor;

/// Supplies the question for a region when a challenge opens.
pub trait ChallengeProvider {
    /// The question to ask for `region`.
    fn challenge_for(&mut self, region: &Region) -> ChallengeDescriptor;
}

impl<P: ChallengeProvider + ?Sized> ChallengeProvider for Box<P> {
    fn challenge_for(&mut self, region: &Region) -> ChallengeDescriptor {
        (**self).challenge_for(region)
    }
}

/// A fixed list of questions, dealt in order.
///
/// Regions with an override always get their own question. Everything else
/// draws the next card from the deck, wrapping at the end. With an empty
/// deck, a freeform question is built from the region itself.
#[derive(Clone, Debug, Default)]
pub struct QuestionDeck {
    cards: Vec<ChallengeDescriptor>,
    cursor: usize,
    overrides: FxHashMap<RegionId, ChallengeDescriptor>,
}

impl QuestionDeck {
    /// Create a deck from a list of questions.
    #[must_use]
    pub fn new(cards: Vec<ChallengeDescriptor>) -> Self {
        Self {
            cards,
            cursor: 0,
            overrides: FxHashMap::default(),
        }
    }

    /// Pin a question to one region.
    #[must_use]
    pub fn with_override(mut self, region: impl Into<RegionId>, card: ChallengeDescriptor) -> Self {
        self.overrides.insert(region.into(), card);
        self
    }

    /// Number of cards in the rotation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the rotation is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    fn fallback(region: &Region) -> ChallengeDescriptor {
        let card = ChallengeDescriptor::freeform(format!("What is {} used for?", region.name));
        match &region.description {
            Some(description) => card.with_explanation(description.clone()),
            None => card,
        }
    }
}

impl ChallengeProvider for QuestionDeck {
    fn challenge_for(&mut self, region: &Region) -> ChallengeDescriptor {
        if let Some(card) = self.overrides.get(&region.id) {
            return card.clone();
        }
        if self.cards.is_empty() {
            return Self::fallback(region);
        }
        let card = self.cards[self.cursor % self.cards.len()].clone();
        self.cursor = (self.cursor + 1) % self.cards.len();
        card
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_cycles() {
        let mut deck = QuestionDeck::new(vec![
            ChallengeDescriptor::freeform("one"),
            ChallengeDescriptor::freeform("two"),
        ]);
        let region = Region::new("facets", "Facets");

        let prompts: Vec<_> = (0..3).map(|_| deck.challenge_for(&region).prompt).collect();
        assert_eq!(prompts, vec!["one", "two", "one"]);
    }

    #[test]
    fn test_override_does_not_advance_deck() {
        let mut deck = QuestionDeck::new(vec![
            ChallengeDescriptor::freeform("one"),
            ChallengeDescriptor::freeform("two"),
        ])
        .with_override("outlook", ChallengeDescriptor::freeform("email?"));

        let outlook = Region::new("outlook", "Outlook / Email");
        let facets = Region::new("facets", "Facets");

        assert_eq!(deck.challenge_for(&outlook).prompt, "email?");
        assert_eq!(deck.challenge_for(&facets).prompt, "one");
        assert_eq!(deck.challenge_for(&outlook).prompt, "email?");
        assert_eq!(deck.challenge_for(&facets).prompt, "two");
    }

    #[test]
    fn test_empty_deck_falls_back_to_region() {
        let mut deck = QuestionDeck::default();
        let region = Region::new("nice", "NICE / Contact Center").with_description("Telephony.");

        let card = deck.challenge_for(&region);
        assert_eq!(card.prompt, "What is NICE / Contact Center used for?");
        assert_eq!(card.explanation.as_deref(), Some("Telephony."));
        assert!(!card.is_multiple_choice());
    }
}
