//! Evolution, devolution and equipment

mod common;

use common::Table;
use ganjifa::cards::{CHURIKA, DVIPIN, KUKKUTAH, SAINIKA, SHELL_ARMOR, SIMHA, VANARA};
use ganjifa::core::Seat;
use ganjifa::game::Event;
use ganjifa::zones::Zone;

#[test]
fn test_evolve_takes_over_the_board_identity() {
    let mut t = Table::started(&[VANARA, DVIPIN], &[]);
    let vanara = t.place(Seat::One, VANARA, Zone::Battlezone);
    let dvipin = t.place(Seat::One, DVIPIN, Zone::Hand);

    assert!(t.m.play_card(Seat::One, dvipin, Some(vanara)));

    assert_eq!(t.name(vanara), "Dvipin");
    assert_eq!(t.zone(vanara), Zone::Battlezone);
    assert_eq!(t.name(dvipin), "Vanara");
    assert_eq!(t.zone(dvipin), Zone::Soul);
    assert_eq!(t.m.card(dvipin).unwrap().attached_to, Some(vanara));
    assert_eq!(t.m.attachments(vanara), vec![dvipin]);
    assert_eq!(t.m.get_attack(vanara), 4);
    assert!(t
        .client(Seat::Two)
        .chats()
        .contains(&"Alice evolved Vanara to Dvipin".to_string()));
}

#[test]
fn test_evolve_keeps_tap_state_and_equipment() {
    let mut t = Table::started(&[VANARA, DVIPIN, CHURIKA], &[]);
    let vanara = t.place(Seat::One, VANARA, Zone::Battlezone);
    let dvipin = t.place(Seat::One, DVIPIN, Zone::Hand);
    let churika = t.place(Seat::One, CHURIKA, Zone::Hand);
    t.m.fire(Event::Equip {
        card: churika,
        creature: vanara,
    });
    assert_eq!(t.m.get_attack(vanara), 4);
    t.m.card_mut(vanara).unwrap().tap();

    assert!(t.m.play_card(Seat::One, dvipin, Some(vanara)));

    assert!(t.m.card(vanara).unwrap().tapped);
    assert_eq!(t.m.card(churika).unwrap().attached_to, Some(vanara));
    assert_eq!(t.zone(churika), Zone::Soul);
    assert_eq!(t.m.get_attack(vanara), 6);
}

#[test]
fn test_fresh_summon_cannot_evolve() {
    let mut t = Table::started(&[VANARA, DVIPIN], &[]);
    let vanara = t.place(Seat::One, VANARA, Zone::Hand);
    let dvipin = t.place(Seat::One, DVIPIN, Zone::Hand);
    assert!(t.m.play_card(Seat::One, vanara, None));

    assert!(!t.m.play_card(Seat::One, dvipin, Some(vanara)));
    assert_eq!(t.zone(dvipin), Zone::Hand);
    assert_eq!(t.name(vanara), "Vanara");

    // The restriction is gone after Alice's next untap
    t.m.end_turn();
    t.m.end_turn();
    assert!(t.m.play_card(Seat::One, dvipin, Some(vanara)));
    assert_eq!(t.name(vanara), "Dvipin");
}

#[test]
fn test_evolution_needs_a_matching_base() {
    let mut t = Table::started(&[KUKKUTAH, DVIPIN, SIMHA, VANARA], &[]);
    let kukkutah = t.place(Seat::One, KUKKUTAH, Zone::Battlezone);
    let vanara = t.place(Seat::One, VANARA, Zone::Battlezone);
    let dvipin = t.place(Seat::One, DVIPIN, Zone::Hand);
    let simha = t.place(Seat::One, SIMHA, Zone::Hand);

    assert!(!t.m.play_card(Seat::One, dvipin, Some(kukkutah)));
    assert!(!t.m.play_card(Seat::One, dvipin, None));
    // Rank two cannot skip rank one
    assert!(!t.m.play_card(Seat::One, simha, Some(vanara)));

    assert_eq!(
        t.client(Seat::One).warnings(),
        vec![
            "Dvipin cannot evolve from that creature".to_string(),
            "Dvipin cannot evolve from that creature".to_string(),
            "Simha cannot evolve from that creature".to_string(),
        ]
    );
    assert_eq!(t.zone(dvipin), Zone::Hand);
}

#[test]
fn test_devolve_restores_the_previous_form() {
    let mut t = Table::started(&[VANARA, DVIPIN], &[]);
    let vanara = t.place(Seat::One, VANARA, Zone::Battlezone);
    let dvipin = t.place(Seat::One, DVIPIN, Zone::Hand);
    assert!(t.m.play_card(Seat::One, dvipin, Some(vanara)));

    t.client(Seat::One).select(&[dvipin]);
    t.m.devolve(vanara, None);

    assert_eq!(t.name(vanara), "Vanara");
    assert_eq!(t.zone(vanara), Zone::Battlezone);
    assert_eq!(t.name(dvipin), "Dvipin");
    assert_eq!(t.zone(dvipin), Zone::Graveyard);
    assert!(t.m.attachments(vanara).is_empty());
}

#[test]
fn test_devolve_without_previous_form_destroys() {
    let mut t = Table::started(&[VANARA], &[]);
    let vanara = t.place(Seat::One, VANARA, Zone::Battlezone);

    t.m.devolve(vanara, None);

    assert_eq!(t.zone(vanara), Zone::Graveyard);
}

#[test]
fn test_equipment_is_chosen_when_played_without_target() {
    let mut t = Table::started(&[SAINIKA, CHURIKA], &[]);
    let sainika = t.place(Seat::One, SAINIKA, Zone::Battlezone);
    let churika = t.place(Seat::One, CHURIKA, Zone::Hand);
    t.client(Seat::One).select(&[sainika]);

    assert!(t.m.play_card(Seat::One, churika, None));

    assert_eq!(
        t.client(Seat::One).prompts(),
        vec!["choose a creature to equip Churika from your battlezone".to_string()]
    );
    assert_eq!(t.m.card(churika).unwrap().attached_to, Some(sainika));
    assert_eq!(t.m.get_attack(sainika), 4);
    assert!(t
        .client(Seat::Two)
        .chats()
        .contains(&"Alice equipped Churika on Sainika".to_string()));
}

#[test]
fn test_new_equipment_replaces_the_old() {
    let mut t = Table::started(&[VANARA, CHURIKA, SHELL_ARMOR], &[]);
    let vanara = t.place(Seat::One, VANARA, Zone::Battlezone);
    let churika = t.place(Seat::One, CHURIKA, Zone::Hand);
    let armor = t.place(Seat::One, SHELL_ARMOR, Zone::Hand);

    t.m.fire(Event::Equip {
        card: churika,
        creature: vanara,
    });
    t.m.fire(Event::Equip {
        card: armor,
        creature: vanara,
    });

    assert_eq!(t.zone(churika), Zone::Graveyard);
    assert_eq!(t.m.get_attack(vanara), 2);
    assert_eq!(t.m.get_defence(vanara), 4);
}

#[test]
fn test_equipment_goes_down_with_its_creature() {
    let mut t = Table::started(&[VANARA, CHURIKA], &[]);
    let vanara = t.place(Seat::One, VANARA, Zone::Battlezone);
    let churika = t.place(Seat::One, CHURIKA, Zone::Hand);
    t.m.fire(Event::Equip {
        card: churika,
        creature: vanara,
    });

    t.m.destroy(vanara, None);

    assert_eq!(t.zone(vanara), Zone::Graveyard);
    assert_eq!(t.zone(churika), Zone::Graveyard);
    assert_eq!(t.m.card(churika).unwrap().attached_to, None);
}

#[test]
fn test_equipment_rules() {
    let mut t = Table::started(&[VANARA, CHURIKA], &[]);
    let vanara = t.place(Seat::One, VANARA, Zone::Battlezone);
    let churika = t.place(Seat::One, CHURIKA, Zone::Hand);

    // Churika is Agni, Vanara is Prithvi
    assert!(!t.m.play_card(Seat::One, churika, Some(vanara)));
    assert_eq!(
        t.client(Seat::One).warnings(),
        vec!["Churika cannot be equipped on that creature".to_string()]
    );
    assert_eq!(t.zone(churika), Zone::Hand);
}
