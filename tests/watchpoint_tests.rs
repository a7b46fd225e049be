// Integration tests for the watchpoint registry

use pretty_assertions::assert_eq;
use rvsdb::interpreter::constants::NR_WP;
use rvsdb::{
    ExprError, GuestMemory, RegisterFile, SdbConfig, TriggerEvent, WatchpointError,
    WatchpointId, WatchpointPool,
};
use std::collections::HashSet;

const BASE: u32 = 0x8000_0000;

fn machine() -> (RegisterFile, GuestMemory) {
    (RegisterFile::new(BASE), GuestMemory::new(BASE, 0x1000))
}

#[test]
fn test_pool_exhaustion() {
    let (regs, mem) = machine();
    let mut pool = WatchpointPool::new();

    let ids: HashSet<WatchpointId> = (0..NR_WP)
        .map(|i| pool.create(&format!("{}", i), &regs, &mem).unwrap())
        .collect();
    assert_eq!(ids.len(), NR_WP);
    assert_eq!(pool.free_count(), 0);

    assert_eq!(
        pool.create("1", &regs, &mem),
        Err(WatchpointError::PoolExhausted { capacity: NR_WP })
    );
    assert_eq!(pool.active_count(), NR_WP);
}

#[test]
fn test_remove_restores_counts() {
    let (regs, mem) = machine();
    let mut pool = WatchpointPool::new();
    pool.create("1", &regs, &mem).unwrap();

    let (free, active) = (pool.free_count(), pool.active_count());
    let id = pool.create("sp + 4", &regs, &mem).unwrap();
    assert_eq!(pool.active_count(), active + 1);

    pool.remove(id).unwrap();
    assert_eq!((pool.free_count(), pool.active_count()), (free, active));
    assert!(pool.get(id).is_none());
}

#[test]
fn test_register_change_triggers_once() {
    let (mut regs, mem) = machine();
    let mut pool = WatchpointPool::new();

    let watched = pool.create("a0", &regs, &mem).unwrap();
    let steady = pool.create("a1 + 1", &regs, &mem).unwrap();

    regs.set_by_name("a0", 5);
    assert_eq!(
        pool.check_all(&regs, &mem),
        vec![TriggerEvent {
            id: watched,
            old: 0,
            new: 5
        }]
    );
    assert_eq!(pool.get(watched).map(|wp| wp.value()), Some(5));
    assert_eq!(pool.get(steady).map(|wp| wp.value()), Some(1));

    // Nothing changed since the last check
    assert!(pool.check_all(&regs, &mem).is_empty());
}

#[test]
fn test_memory_watch() {
    let (mut regs, mut mem) = machine();
    let mut pool = WatchpointPool::new();
    regs.set_by_name("sp", BASE + 0x100);

    let id = pool.create("*(sp + 4) == 7", &regs, &mem).unwrap();
    assert_eq!(pool.get(id).map(|wp| wp.value()), Some(0));

    mem.write_word(BASE + 0x104, 7).unwrap();
    assert_eq!(
        pool.check_all(&regs, &mem),
        vec![TriggerEvent { id, old: 0, new: 1 }]
    );
}

#[test]
fn test_events_follow_creation_order() {
    let (mut regs, mem) = machine();
    let mut pool = WatchpointPool::new();

    let a = pool.create("t0", &regs, &mem).unwrap();
    let b = pool.create("t1", &regs, &mem).unwrap();
    let c = pool.create("t0 + t1", &regs, &mem).unwrap();
    pool.remove(a).unwrap();
    let d = pool.create("t1 * 2", &regs, &mem).unwrap();

    regs.set_by_name("t0", 1);
    regs.set_by_name("t1", 2);
    let ids: Vec<_> = pool.check_all(&regs, &mem).iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![b, c, d]);

    let listed: Vec<_> = pool.iter().map(|wp| (wp.id(), wp.expr().to_string())).collect();
    assert_eq!(
        listed,
        vec![
            (b, "t1".to_string()),
            (c, "t0 + t1".to_string()),
            (d, "t1 * 2".to_string()),
        ]
    );
}

#[test]
fn test_invalid_expression_leaves_pool_unchanged() {
    let (regs, mem) = machine();
    let mut pool = WatchpointPool::with_config(&SdbConfig::default().with_pool_capacity(1));

    assert_eq!(
        pool.create("*0x10", &regs, &mem),
        Err(WatchpointError::Expr(ExprError::UnmappedDereference {
            address: 0x10
        }))
    );
    assert_eq!(
        pool.create("foo", &regs, &mem),
        Err(WatchpointError::Expr(ExprError::LexError { position: 0 }))
    );

    // The single slot is still available
    assert_eq!(pool.create("1", &regs, &mem), Ok(WatchpointId(0)));
}

#[test]
fn test_not_found_message() {
    let mut pool = WatchpointPool::new();
    let err = pool.remove(WatchpointId(3)).unwrap_err();
    assert_eq!(err.to_string(), "no active watchpoint 3");
}
