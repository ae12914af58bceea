//! Template id to card constructor lookup

use crate::core::{Card, CardName, TemplateId};
use crate::{MatchError, Result};
use rustc_hash::FxHashMap;

/// Builds a fresh card for one template
pub type CardConstructor = Box<dyn Fn() -> Card + Send + Sync>;

struct Entry {
    name: CardName,
    constructor: CardConstructor,
}

/// All card templates known to a match
#[derive(Default)]
pub struct CardRegistry {
    entries: FxHashMap<TemplateId, Entry>,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template; a later registration under the same id replaces it
    pub fn register<F>(&mut self, id: u32, constructor: F)
    where
        F: Fn() -> Card + Send + Sync + 'static,
    {
        let name = constructor().name;
        self.entries.insert(
            TemplateId::new(id),
            Entry {
                name,
                constructor: Box::new(constructor),
            },
        );
    }

    pub fn contains(&self, id: TemplateId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Build a fresh card of template `id`
    pub fn construct(&self, id: TemplateId) -> Result<Card> {
        self.entries
            .get(&id)
            .map(|e| (e.constructor)())
            .ok_or(MatchError::UnknownTemplate(id.as_u32()))
    }

    pub fn name_of(&self, id: TemplateId) -> Option<&CardName> {
        self.entries.get(&id).map(|e| &e.name)
    }

    /// Template id registered under a (case-insensitive) card name
    pub fn find_by_name(&self, name: &str) -> Option<TemplateId> {
        self.entries
            .iter()
            .find(|(_, e)| e.name.as_str().eq_ignore_ascii_case(name))
            .map(|(id, _)| *id)
    }

    /// Template ids in ascending order
    pub fn ids(&self) -> Vec<TemplateId> {
        let mut ids: Vec<TemplateId> = self.entries.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for CardRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardRegistry")
            .field("templates", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardBuilder, Civilisation, Family};

    fn registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        registry.register(1, || {
            CardBuilder::new("Vanara", Civilisation::Prithvi, Family::Beast)
                .stats(2, 2)
                .build()
        });
        registry
    }

    #[test]
    fn test_construct() {
        let registry = registry();
        let card = registry.construct(TemplateId::new(1)).unwrap();
        assert_eq!(card.name.as_str(), "Vanara");
        assert_eq!(card.attack, 2);
    }

    #[test]
    fn test_unknown_template() {
        let registry = registry();
        assert!(matches!(
            registry.construct(TemplateId::new(99)),
            Err(MatchError::UnknownTemplate(99))
        ));
    }

    #[test]
    fn test_find_by_name() {
        let registry = registry();
        assert_eq!(registry.find_by_name("vanara"), Some(TemplateId::new(1)));
        assert_eq!(registry.find_by_name("Garuda"), None);
        assert_eq!(registry.ids(), vec![TemplateId::new(1)]);
    }
}
