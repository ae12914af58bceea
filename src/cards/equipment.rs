use crate::core::{Card, CardBuilder, Civilisation, Family};
use crate::fx;

pub fn churika() -> Card {
    CardBuilder::new("Churika", Civilisation::Agni, Family::Equipment)
        .stats(2, 0)
        .handler(fx::equipment())
        .build()
}

pub fn khadga() -> Card {
    CardBuilder::new("Khadga", Civilisation::Agni, Family::Equipment)
        .rank(1)
        .stats(4, 0)
        .handler(fx::equipment())
        .build()
}

pub fn vampire_fangs() -> Card {
    CardBuilder::new("Vampire Fangs", Civilisation::Prithvi, Family::Equipment)
        .rank(1)
        .stats(2, 0)
        .handler(fx::equipment())
        .handler(fx::granted(fx::leech()))
        .build()
}

pub fn wind_cloak() -> Card {
    CardBuilder::new("Wind Cloak", Civilisation::Vayu, Family::Equipment)
        .handler(fx::equipment())
        .handler(fx::granted(fx::cant_be_attacked()))
        .build()
}

pub fn shell_armor() -> Card {
    CardBuilder::new("Shell Armor", Civilisation::Apas, Family::Equipment)
        .stats(0, 2)
        .handler(fx::equipment())
        .build()
}
