use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::mpsc;

use crate::events::EventBus;
use crate::hooks::registry::{HookRegistry, PendingEffect, Slot};
use crate::runtime::{ComponentId, Dispatcher};

fn section_id(name: &str) -> ComponentId {
    ComponentId::new(&[0, 2], "Section", Some(name))
}

fn counting_cleanup(counter: &Arc<AtomicUsize>) -> Option<crate::hooks::Cleanup> {
    let counter = counter.clone();
    Some(Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }))
}

#[test]
fn pruning_unmounted_sections_runs_their_cleanups() {
    let registry = HookRegistry::new();
    let kept = section_id("Account Information");
    let dropped = section_id("Address Information");
    let cleanups = Arc::new(AtomicUsize::new(0));
    for id in [&kept, &dropped] {
        registry.with_effect(id, 0, |effect| {
            effect.record(Box::new(()), counting_cleanup(&cleanups));
        });
    }

    registry.prune(&HashSet::from([kept.clone()]));
    assert_eq!(cleanups.load(Ordering::SeqCst), 1);

    registry.prune(&HashSet::new());
    assert_eq!(cleanups.load(Ordering::SeqCst), 2);
}

#[test]
fn cleanup_may_reach_the_registry_while_pruning() {
    let registry = Arc::new(HookRegistry::new());
    let id = section_id("System Information");
    let reentered = Arc::new(AtomicUsize::new(0));
    {
        let registry_in_cleanup = registry.clone();
        let reentered = reentered.clone();
        let other = section_id("Account Information");
        registry.with_effect(&id, 0, move |effect| {
            effect.record(
                Box::new(()),
                Some(Box::new(move || {
                    registry_in_cleanup.with_effect(&other, 0, |_| ());
                    reentered.fetch_add(1, Ordering::SeqCst);
                })),
            );
        });
    }

    registry.prune(&HashSet::new());
    assert_eq!(reentered.load(Ordering::SeqCst), 1);
}

#[test]
fn effect_slots_go_stale_when_deps_change() {
    let registry = HookRegistry::new();
    let id = section_id("System Information");

    registry.with_effect(&id, 3, |effect| {
        assert!(effect.is_stale(&(false, 1u64)));
        effect.record(Box::new((false, 1u64)), None);
        assert!(!effect.is_stale(&(false, 1u64)));
        assert!(effect.is_stale(&(true, 1u64)));
        assert!(effect.is_stale(&"other type"));
    });

    let slots = registry.slots_for(&id);
    let mut slots = slots.lock();
    assert!(matches!(slots.at(0), Slot::Vacant));
    assert!(matches!(slots.at(3), Slot::Effect(_)));
}

#[test]
fn applying_an_effect_replaces_the_previous_cleanup() {
    let (tx, _rx) = mpsc::channel(4);
    let dispatcher = Dispatcher::new(tx, EventBus::new(4));
    let registry = HookRegistry::new();
    let id = section_id("Account Information");
    let cleanups = Arc::new(AtomicUsize::new(0));

    for revision in 0..3u64 {
        let counter = cleanups.clone();
        PendingEffect {
            component_id: id.clone(),
            slot: 0,
            deps: Box::new(revision),
            run: Box::new(move |_| counting_cleanup(&counter)),
        }
        .apply(&registry, &dispatcher);
    }

    assert_eq!(cleanups.load(Ordering::SeqCst), 2);
    registry.with_effect(&id, 0, |effect| assert!(!effect.is_stale(&2u64)));
}

#[test]
fn keyed_ids_separate_sections_at_the_same_position() {
    assert_ne!(section_id("Account Information"), section_id("Address Information"));
    assert_eq!(
        section_id("Account Information").to_string(),
        "0.2#Account Information:Section"
    );
}
