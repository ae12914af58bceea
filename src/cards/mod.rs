//! The starter card set
//!
//! Template ids are stable: clients send them in `choose_deck` and deck
//! files may name them directly.

mod creatures;
mod equipment;
mod spells;

use crate::loader::CardRegistry;

pub const VANARA: u32 = 1;
pub const SALAVRKA: u32 = 2;
pub const DVIPIN: u32 = 3;
pub const SIMHA: u32 = 4;
pub const KUKKUTAH: u32 = 5;
pub const CATAKA: u32 = 6;
pub const DEADLY_ZEBRAFISH: u32 = 7;
pub const TORPEDOING_BARRACUDA: u32 = 8;
pub const PIPILIKA: u32 = 9;
pub const MASAKA: u32 = 10;
pub const SAINIKA: u32 = 11;

pub const CHURIKA: u32 = 20;
pub const KHADGA: u32 = 21;
pub const VAMPIRE_FANGS: u32 = 22;
pub const WIND_CLOAK: u32 = 23;
pub const SHELL_ARMOR: u32 = 24;

pub const FIREBALL: u32 = 30;
pub const ENERGY_SURGE: u32 = 31;
pub const RAIN_OF_ARROWS: u32 = 32;
pub const TIDAL_WAVE: u32 = 33;
pub const AMRITA: u32 = 34;
pub const BLIZZARD: u32 = 35;
pub const WHIRLWIND: u32 = 36;
pub const MIRAGE: u32 = 37;

/// Register every starter template into `registry`
pub fn register_all(registry: &mut CardRegistry) {
    registry.register(VANARA, creatures::vanara);
    registry.register(SALAVRKA, creatures::salavrka);
    registry.register(DVIPIN, creatures::dvipin);
    registry.register(SIMHA, creatures::simha);
    registry.register(KUKKUTAH, creatures::kukkutah);
    registry.register(CATAKA, creatures::cataka);
    registry.register(DEADLY_ZEBRAFISH, creatures::deadly_zebrafish);
    registry.register(TORPEDOING_BARRACUDA, creatures::torpedoing_barracuda);
    registry.register(PIPILIKA, creatures::pipilika);
    registry.register(MASAKA, creatures::masaka);
    registry.register(SAINIKA, creatures::sainika);

    registry.register(CHURIKA, equipment::churika);
    registry.register(KHADGA, equipment::khadga);
    registry.register(VAMPIRE_FANGS, equipment::vampire_fangs);
    registry.register(WIND_CLOAK, equipment::wind_cloak);
    registry.register(SHELL_ARMOR, equipment::shell_armor);

    registry.register(FIREBALL, spells::fireball);
    registry.register(ENERGY_SURGE, spells::energy_surge);
    registry.register(RAIN_OF_ARROWS, spells::rain_of_arrows);
    registry.register(TIDAL_WAVE, spells::tidal_wave);
    registry.register(AMRITA, spells::amrita);
    registry.register(BLIZZARD, spells::blizzard);
    registry.register(WHIRLWIND, spells::whirlwind);
    registry.register(MIRAGE, spells::mirage);
}

pub fn starter_registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    register_all(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardKind, TemplateId};

    #[test]
    fn test_starter_registry() {
        let registry = starter_registry();
        assert_eq!(registry.len(), 24);

        let vanara = registry.construct(TemplateId::new(VANARA)).unwrap();
        assert_eq!(vanara.name.as_str(), "Vanara");
        assert_eq!((vanara.attack, vanara.defence), (2, 2));

        let churika = registry.construct(TemplateId::new(CHURIKA)).unwrap();
        assert_eq!(churika.kind(), CardKind::Equipment);

        let fireball = registry.construct(TemplateId::new(FIREBALL)).unwrap();
        assert_eq!(fireball.kind(), CardKind::Spell);
    }

    #[test]
    fn test_names_resolve() {
        let registry = starter_registry();
        assert_eq!(
            registry.find_by_name("Deadly Zebrafish"),
            Some(TemplateId::new(DEADLY_ZEBRAFISH))
        );
    }
}
