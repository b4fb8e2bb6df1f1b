//! The pack: every card in the game, read once before setup.
//!
//! A pack file holds one non-negative integer per line. Blank lines are
//! skipped; anything else that is not a non-negative integer rejects the
//! whole file with the offending line number.

use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::card::Card;
use crate::core::config::PACK_CARDS_PER_PLAYER;
use crate::core::error::{PackError, SetupError};
use crate::core::rng::GameRng;

/// Immutable ordered sequence of cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pack {
    cards: Vec<Card>,
}

impl Pack {
    /// Wrap an ordered card list.
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Build a pack from raw values.
    pub fn from_values(values: &[u32]) -> Self {
        Self::new(values.iter().copied().map(Card).collect())
    }

    /// Parse a pack from any reader.
    pub fn parse(reader: impl Read) -> Result<Self, PackError> {
        let mut cards = Vec::new();
        for (idx, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            let lineno = idx + 1;
            match text.parse::<i64>() {
                Ok(v) if v < 0 => return Err(PackError::Negative { line: lineno }),
                Ok(v) => match u32::try_from(v) {
                    Ok(v) => cards.push(Card(v)),
                    Err(_) => {
                        return Err(PackError::InvalidNumber {
                            line: lineno,
                            text: text.to_string(),
                        })
                    }
                },
                Err(_) => {
                    return Err(PackError::InvalidNumber {
                        line: lineno,
                        text: text.to_string(),
                    })
                }
            }
        }
        Ok(Self { cards })
    }

    /// Read a pack file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PackError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let pack = Self::parse(file)?;
        log::debug!("loaded {} cards from {}", pack.len(), path.display());
        Ok(pack)
    }

    /// Generate a playable pack: values `1..=player_count`, eight of each,
    /// shuffled.
    pub fn generate(player_count: usize, rng: &mut GameRng) -> Self {
        let mut cards: Vec<Card> = (1..=player_count as u32)
            .flat_map(|v| std::iter::repeat(Card(v)).take(PACK_CARDS_PER_PLAYER))
            .collect();
        rng.shuffle(&mut cards);
        Self { cards }
    }

    /// Write the pack in file format, one value per line.
    pub fn write_to(&self, mut writer: impl Write) -> std::io::Result<()> {
        for card in &self.cards {
            writeln!(writer, "{}", card)?;
        }
        writer.flush()
    }

    /// Check the pack holds exactly enough cards for `player_count` players.
    pub fn validate_for(&self, player_count: usize) -> Result<(), SetupError> {
        if player_count == 0 {
            return Err(SetupError::NoPlayers);
        }
        let expected = PACK_CARDS_PER_PLAYER * player_count;
        if self.cards.len() != expected {
            return Err(SetupError::PackSize {
                players: player_count,
                expected,
                found: self.cards.len(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in pack order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::cards_from;

    #[test]
    fn test_parse_skips_blank_lines() {
        let pack = Pack::parse("1\n\n 2 \n3\n".as_bytes()).unwrap();
        assert_eq!(pack.cards(), cards_from(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn test_parse_rejects_negative() {
        let err = Pack::parse("1\n-4\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PackError::Negative { line: 2 }));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Pack::parse("1\n2\n\nfive\n".as_bytes()).unwrap_err();
        match err {
            PackError::InvalidNumber { line, text } => {
                assert_eq!(line, 4);
                assert_eq!(text, "five");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_for() {
        let pack = Pack::from_values(&[1; 16]);
        assert!(pack.validate_for(2).is_ok());
        assert_eq!(pack.validate_for(0), Err(SetupError::NoPlayers));
        assert_eq!(
            pack.validate_for(3),
            Err(SetupError::PackSize {
                players: 3,
                expected: 24,
                found: 16
            })
        );
    }

    #[test]
    fn test_generate_is_playable_and_deterministic() {
        let a = Pack::generate(3, &mut GameRng::new(5));
        let b = Pack::generate(3, &mut GameRng::new(5));
        assert_eq!(a, b);
        assert!(a.validate_for(3).is_ok());

        let mut sorted = a.cards().to_vec();
        sorted.sort();
        for (i, chunk) in sorted.chunks(PACK_CARDS_PER_PLAYER).enumerate() {
            assert!(chunk.iter().all(|c| c.value() == i as u32 + 1));
        }
    }

    #[test]
    fn test_write_then_parse() {
        let pack = Pack::from_values(&[4, 0, 12]);
        let mut buf = Vec::new();
        pack.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "4\n0\n12\n");
        assert_eq!(Pack::parse(buf.as_slice()).unwrap(), pack);
    }
}
