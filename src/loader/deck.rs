//! Deck lists and the plain-text deck file loader

use crate::config::MatchConfig;
use crate::core::TemplateId;
use crate::loader::CardRegistry;
use crate::{MatchError, Result};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;

/// Deck loader for plain-text deck files
///
/// One entry per line: `<count> <template id or card name>`. Blank lines and
/// lines starting with `#` are skipped.
pub struct DeckLoader;

impl DeckLoader {
    /// Load a deck from a file, resolving names through `registry`
    pub fn load_from_file(path: &Path, registry: &CardRegistry) -> Result<DeckList> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, registry)
    }

    /// Parse a deck from its text content
    pub fn parse(content: &str, registry: &CardRegistry) -> Result<DeckList> {
        let mut cards = Vec::new();

        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((count_str, card)) = line.split_once(' ') else {
                return Err(MatchError::InvalidDeck(format!(
                    "line {}: expected '<count> <card>'",
                    lineno + 1
                )));
            };
            let count = count_str.parse::<usize>().map_err(|_| {
                MatchError::InvalidDeck(format!("line {}: bad count '{count_str}'", lineno + 1))
            })?;

            let card = card.trim();
            let template = match card.parse::<u32>() {
                Ok(id) => TemplateId::new(id),
                Err(_) => registry.find_by_name(card).ok_or_else(|| {
                    MatchError::InvalidDeck(format!("line {}: unknown card '{card}'", lineno + 1))
                })?,
            };
            cards.extend(std::iter::repeat(template).take(count));
        }

        if cards.is_empty() {
            return Err(MatchError::InvalidDeck("Empty deck".to_string()));
        }
        Ok(DeckList { cards })
    }
}

/// Ordered list of templates a player brings to the match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckList {
    pub cards: Vec<TemplateId>,
}

impl DeckList {
    pub fn from_ids(ids: &[u32]) -> Self {
        DeckList {
            cards: ids.iter().copied().map(TemplateId::new).collect(),
        }
    }

    /// Raw template ids, as sent in a `choose_deck` message
    pub fn to_ids(&self) -> Vec<u32> {
        self.cards.iter().map(|t| t.as_u32()).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check the deck against the construction rules
    pub fn validate(&self, config: &MatchConfig, registry: &CardRegistry) -> Result<()> {
        if let Some(unknown) = self.cards.iter().find(|t| !registry.contains(**t)) {
            return Err(MatchError::UnknownTemplate(unknown.as_u32()));
        }
        if self.cards.len() != config.deck_size {
            return Err(MatchError::InvalidDeck(format!(
                "deck must have exactly {} cards",
                config.deck_size
            )));
        }

        let mut copies: FxHashMap<TemplateId, usize> = FxHashMap::default();
        for template in &self.cards {
            *copies.entry(*template).or_default() += 1;
        }
        if copies.values().any(|n| *n > config.max_copies) {
            return Err(MatchError::InvalidDeck(format!(
                "deck must have only {} copies of a card",
                config.max_copies
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardBuilder, Civilisation, Family};

    fn registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        for id in 1..=10 {
            registry.register(id, move || {
                CardBuilder::new(format!("Beast {id}"), Civilisation::Prithvi, Family::Beast)
                    .stats(1, 1)
                    .build()
            });
        }
        registry
    }

    #[test]
    fn test_parse_simple_deck() {
        let content = r#"
# starter
4 1
4 Beast 2
2 3
"#;
        let deck = DeckLoader::parse(content, &registry()).unwrap();
        assert_eq!(deck.len(), 10);
        assert_eq!(deck.cards[0], TemplateId::new(1));
        assert_eq!(deck.cards[4], TemplateId::new(2));
        assert_eq!(deck.cards[9], TemplateId::new(3));
    }

    #[test]
    fn test_parse_unknown_name() {
        assert!(DeckLoader::parse("4 Garuda", &registry()).is_err());
        assert!(DeckLoader::parse("# nothing", &registry()).is_err());
    }

    #[test]
    fn test_validate() {
        let registry = registry();
        let config = MatchConfig::default();

        let ids: Vec<u32> = (1..=10).flat_map(|id| [id; 4]).collect();
        assert!(DeckList::from_ids(&ids).validate(&config, &registry).is_ok());

        let short = DeckList::from_ids(&ids[..39]);
        assert!(matches!(
            short.validate(&config, &registry),
            Err(MatchError::InvalidDeck(_))
        ));

        let mut five = ids.clone();
        five[4] = 1;
        assert_eq!(
            DeckList::from_ids(&five)
                .validate(&config, &registry)
                .unwrap_err()
                .to_string(),
            "Invalid deck: deck must have only 4 copies of a card"
        );

        let mut unknown = ids;
        unknown[0] = 99;
        assert!(matches!(
            DeckList::from_ids(&unknown).validate(&config, &registry),
            Err(MatchError::UnknownTemplate(99))
        ));
    }
}
