//! End-state consistency check.
//!
//! Once every worker has stopped, all cards of the pack must still be
//! somewhere: in a hand or in a deck. Every hand and every deck should hold
//! four cards. Findings are logged as warnings and returned; nothing is
//! changed and nothing aborts, since the game already has its result.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::Pack;
use crate::core::card::Card;
use crate::core::config::{CARDS_PER_DECK, HAND_SIZE};
use crate::core::player::{DeckId, PlayerId};
use crate::deck::Deck;
use crate::player::Player;

/// One end-state inconsistency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Warning {
    /// A hand does not hold `HAND_SIZE` cards.
    HandSize { player: PlayerId, size: usize },
    /// A deck does not hold `CARDS_PER_DECK` cards.
    DeckSize { deck: DeckId, size: usize },
    /// Hands and decks together do not hold as many cards as the pack.
    CardCount { expected: usize, found: usize },
    /// A card value appears a different number of times than in the pack.
    CardMultiplicity {
        card: Card,
        expected: usize,
        found: usize,
    },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::HandSize { player, size } => {
                write!(f, "{} has {} cards instead of {}", player, size, HAND_SIZE)
            }
            Warning::DeckSize { deck, size } => {
                write!(f, "{} has {} cards instead of {}", deck, size, CARDS_PER_DECK)
            }
            Warning::CardCount { expected, found } => {
                write!(f, "card count mismatch: pack had {}, found {}", expected, found)
            }
            Warning::CardMultiplicity {
                card,
                expected,
                found,
            } => write!(
                f,
                "card {} appears {} times, pack had {}",
                card, found, expected
            ),
        }
    }
}

/// Every warning raised by one validation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub warnings: Vec<Warning>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    fn warn(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Check live decks and players against the original pack.
///
/// Must only be called once the workers have stopped.
pub fn validate(original: &Pack, decks: &[Arc<Deck>], players: &[Arc<Player>]) -> ValidationReport {
    let hands: Vec<(PlayerId, Vec<Card>)> = players
        .iter()
        .map(|player| (player.id(), player.hand().to_vec()))
        .collect();
    let decks: Vec<(DeckId, Vec<Card>)> = decks
        .iter()
        .map(|deck| (deck.id(), deck.snapshot()))
        .collect();
    validate_contents(original.cards(), &hands, &decks)
}

/// Check plain hand and deck contents against the original cards.
pub fn validate_contents(
    original: &[Card],
    hands: &[(PlayerId, Vec<Card>)],
    decks: &[(DeckId, Vec<Card>)],
) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (player, hand) in hands {
        if hand.len() != HAND_SIZE {
            report.warn(Warning::HandSize {
                player: *player,
                size: hand.len(),
            });
        }
    }
    for (deck, cards) in decks {
        if cards.len() != CARDS_PER_DECK {
            report.warn(Warning::DeckSize {
                deck: *deck,
                size: cards.len(),
            });
        }
    }

    let found: Vec<Card> = hands
        .iter()
        .flat_map(|(_, cards)| cards.iter())
        .chain(decks.iter().flat_map(|(_, cards)| cards.iter()))
        .copied()
        .collect();

    if found.len() != original.len() {
        report.warn(Warning::CardCount {
            expected: original.len(),
            found: found.len(),
        });
    }

    let expected_counts = count(original);
    let found_counts = count(&found);
    let mut values: Vec<Card> = expected_counts
        .keys()
        .chain(found_counts.keys())
        .copied()
        .collect();
    values.sort_unstable();
    values.dedup();

    for card in values {
        let expected = expected_counts.get(&card).copied().unwrap_or(0);
        let found = found_counts.get(&card).copied().unwrap_or(0);
        if expected != found {
            report.warn(Warning::CardMultiplicity {
                card,
                expected,
                found,
            });
        }
    }

    report
}

fn count(cards: &[Card]) -> FxHashMap<Card, usize> {
    let mut counts = FxHashMap::default();
    for &card in cards {
        *counts.entry(card).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::cards_from;

    #[test]
    fn test_clean_end_state() {
        let original = cards_from(&[1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2]);
        let hands = vec![
            (PlayerId(1), cards_from(&[1, 1, 1, 1])),
            (PlayerId(2), cards_from(&[2, 2, 2, 2])),
        ];
        let decks = vec![
            (DeckId(1), cards_from(&[1, 1, 2, 2])),
            (DeckId(2), cards_from(&[1, 1, 2, 2])),
        ];
        assert!(validate_contents(&original, &hands, &decks).is_clean());
    }

    #[test]
    fn test_size_drift() {
        let original = cards_from(&[1; 16]);
        let hands = vec![
            (PlayerId(1), cards_from(&[1, 1, 1, 1, 1])),
            (PlayerId(2), cards_from(&[1, 1, 1, 1])),
        ];
        let decks = vec![
            (DeckId(1), cards_from(&[1, 1, 1])),
            (DeckId(2), cards_from(&[1, 1, 1, 1])),
        ];
        let report = validate_contents(&original, &hands, &decks);
        assert_eq!(
            report.warnings,
            vec![
                Warning::HandSize {
                    player: PlayerId(1),
                    size: 5
                },
                Warning::DeckSize {
                    deck: DeckId(1),
                    size: 3
                },
            ]
        );
    }

    #[test]
    fn test_lost_card() {
        let original = cards_from(&[1, 1, 1, 1, 2, 2, 2, 2]);
        let hands = vec![(PlayerId(1), cards_from(&[1, 1, 1, 1]))];
        let decks = vec![(DeckId(1), cards_from(&[2, 2, 2]))];
        let report = validate_contents(&original, &hands, &decks);

        assert!(report.warnings.contains(&Warning::CardCount {
            expected: 8,
            found: 7
        }));
        assert!(report.warnings.contains(&Warning::CardMultiplicity {
            card: Card(2),
            expected: 4,
            found: 3
        }));
    }

    #[test]
    fn test_swapped_card() {
        let original = cards_from(&[1, 1, 1, 1, 2, 2, 2, 2]);
        let hands = vec![(PlayerId(1), cards_from(&[1, 1, 1, 1]))];
        let decks = vec![(DeckId(1), cards_from(&[2, 2, 2, 9]))];
        let report = validate_contents(&original, &hands, &decks);

        assert_eq!(
            report.warnings,
            vec![
                Warning::CardMultiplicity {
                    card: Card(2),
                    expected: 4,
                    found: 3
                },
                Warning::CardMultiplicity {
                    card: Card(9),
                    expected: 0,
                    found: 1
                },
            ]
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning::HandSize {
            player: PlayerId(2),
            size: 3,
        };
        assert_eq!(warning.to_string(), "player 2 has 3 cards instead of 4");
    }
}
