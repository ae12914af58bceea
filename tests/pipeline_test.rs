//! Effect pipeline: veto, override, scheduling and computed properties

mod common;

use common::Table;
use ganjifa::cards::{KUKKUTAH, SALAVRKA, VANARA};
use ganjifa::core::{Handler, Seat};
use ganjifa::fx;
use ganjifa::game::Event;
use ganjifa::zones::Zone;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[test]
fn test_summon_creature() {
    let mut t = Table::started(&[VANARA], &[]);
    let vanara = t.place(Seat::One, VANARA, Zone::Hand);

    assert!(t.m.play_card(Seat::One, vanara, None));

    assert_eq!(t.zone(vanara), Zone::Battlezone);
    assert!(t
        .client(Seat::Two)
        .chats()
        .contains(&"Alice summoned creature Vanara".to_string()));
}

#[test]
fn test_interrupt_skips_override_and_after_effects() {
    let mut t = Table::started(&[VANARA], &[]);
    let vanara = t.place(Seat::One, VANARA, Zone::Battlezone);

    let overridden = Arc::new(AtomicBool::new(false));
    let after = Arc::new(AtomicBool::new(false));
    let (o, a) = (overridden.clone(), after.clone());
    t.m.add_condition(
        vanara,
        Handler::new(move |_, _, ctx| {
            if let Event::Heal { .. } = ctx.event() {
                let o = o.clone();
                let a = a.clone();
                ctx.override_with(move |_, _| o.store(true, Ordering::SeqCst));
                ctx.schedule_after(move |_, _| a.store(true, Ordering::SeqCst));
            }
        }),
    )
    .unwrap();
    t.m.add_condition(
        vanara,
        Handler::new(|_, _, ctx| {
            if let Event::Heal { .. } = ctx.event() {
                ctx.interrupt_flow();
            }
        }),
    )
    .unwrap();

    t.m.heal(Seat::One, None, 300);

    assert_eq!(t.life(Seat::One), 2000);
    assert!(!overridden.load(Ordering::SeqCst));
    assert!(!after.load(Ordering::SeqCst));
}

#[test]
fn test_override_replaces_default_action() {
    let mut t = Table::started(&[VANARA], &[]);
    let vanara = t.place(Seat::One, VANARA, Zone::Battlezone);

    t.m.add_condition(
        vanara,
        Handler::new(|_, _, ctx| {
            if let Event::Damage { .. } = ctx.event() {
                ctx.override_with(|_, _| {});
            }
        }),
    )
    .unwrap();

    t.m.damage(Seat::Two, Some(vanara), 500);
    assert_eq!(t.life(Seat::Two), 2000);
}

#[test]
fn test_handlers_may_rewrite_the_event() {
    let mut t = Table::started(&[VANARA], &[]);
    let vanara = t.place(Seat::One, VANARA, Zone::Battlezone);

    t.m.add_condition(
        vanara,
        Handler::new(|_, _, ctx| {
            if let Event::Damage { amount, .. } = ctx.event_mut() {
                *amount /= 2;
            }
        }),
    )
    .unwrap();

    t.m.damage(Seat::Two, Some(vanara), 500);
    assert_eq!(t.life(Seat::Two), 1750);
    assert!(t
        .client(Seat::One)
        .chats()
        .contains(&"Vanara did 250 damage to Bob".to_string()));
}

#[test]
fn test_base_and_modified_stats() {
    let mut t = Table::started(&[VANARA], &[]);
    let vanara = t.place(Seat::One, VANARA, Zone::Battlezone);

    assert_eq!(t.m.get_attack(vanara), 2);
    assert_eq!(t.m.get_defence(vanara), 2);

    let condition = t.m.add_condition(vanara, fx::attack_modifier(3)).unwrap();
    assert_eq!(t.m.get_attack(vanara), 5);
    assert_eq!(t.m.get_defence(vanara), 2);

    assert!(t.m.remove_condition(vanara, condition));
    assert!(!t.m.remove_condition(vanara, condition));
    assert_eq!(t.m.get_attack(vanara), 2);
}

#[test]
fn test_pack_bonus_counts_other_beasts() {
    let mut t = Table::started(&[SALAVRKA, VANARA, VANARA], &[]);
    let salavrka = t.place(Seat::One, SALAVRKA, Zone::Battlezone);
    assert_eq!(t.m.get_attack(salavrka), 1);

    t.place(Seat::One, VANARA, Zone::Battlezone);
    t.place(Seat::One, VANARA, Zone::Battlezone);
    t.place(Seat::One, KUKKUTAH, Zone::Battlezone);
    assert_eq!(t.m.get_attack(salavrka), 3);
    assert_eq!(t.m.get_defence(salavrka), 3);
}

#[test]
fn test_queries_do_not_broadcast() {
    let mut t = Table::started(&[VANARA], &[]);
    let vanara = t.place(Seat::One, VANARA, Zone::Battlezone);
    t.client(Seat::One).clear();
    t.client(Seat::Two).clear();

    t.m.get_attack(vanara);
    t.m.get_rank(vanara);
    assert_eq!(t.client(Seat::One).count("state_update"), 0);
    assert_eq!(t.client(Seat::Two).count("state_update"), 0);

    t.m.heal(Seat::One, None, 10);
    assert_eq!(t.client(Seat::One).count("state_update"), 1);
    assert_eq!(t.client(Seat::Two).count("state_update"), 1);
}

#[test]
fn test_untap_clears_conditions() {
    let mut t = Table::started(&[VANARA], &[]);
    let vanara = t.place(Seat::One, VANARA, Zone::Battlezone);
    t.m.add_condition(vanara, fx::attack_modifier(3)).unwrap();
    t.m.card_mut(vanara).unwrap().tap();

    // Bob's turn leaves Alice's cards alone
    t.m.end_turn();
    assert_eq!(t.m.active_seat(), Seat::Two);
    assert_eq!(t.m.get_attack(vanara), 5);
    assert!(t.m.card(vanara).unwrap().tapped);

    t.m.end_turn();
    assert_eq!(t.m.active_seat(), Seat::One);
    assert_eq!(t.m.get_attack(vanara), 2);
    assert!(!t.m.card(vanara).unwrap().tapped);
}
