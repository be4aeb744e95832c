//! Cycle detection via a per-thread active-query stack (spec.md §4.6
//! "Cycle detection", §9 "Cycle-detection state", invariant 10).
//!
//! `startQuery` pushes the key onto the calling thread's active-query
//! stack; starting an already-active key raises `QE0007`. A dependency
//! edge that would close a cycle through an already-active ancestor is
//! likewise rejected. `ActiveGuard`'s `Drop` guarantees every `startQuery`
//! gets a matching `endQuery` on every exit path, including panics and
//! early `?` returns.

use std::cell::RefCell;

use astdb_error::{AstDbError, Result};

use crate::memo::MemoKey;

thread_local! {
    static ACTIVE_STACK: RefCell<Vec<MemoKey>> = const { RefCell::new(Vec::new()) };
}

/// RAII handle for one stack frame. Dropping it (including via `?`-early-
/// return or an unwinding panic) pops the frame.
#[must_use = "dropping this guard immediately ends the query frame"]
pub struct ActiveGuard {
    key: MemoKey,
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        ACTIVE_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|k| *k == self.key) {
                stack.remove(pos);
            }
        });
    }
}

/// Push `key` onto the active-query stack for the calling thread.
///
/// # Errors
/// `AstDbError::Cycle` (`QE0007`) if `key` is already active on this
/// thread.
pub fn start_query(key: MemoKey) -> Result<ActiveGuard> {
    ACTIVE_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        if stack.contains(&key) {
            return Err(AstDbError::Cycle);
        }
        stack.push(key);
        Ok(())
    })?;
    Ok(ActiveGuard { key })
}

/// Record a dependency edge `from -> to`. Rejected (without mutating any
/// state) if `to` is already active on this thread, which would close a
/// cycle (spec.md §4.6 Scenario 4).
///
/// # Errors
/// `AstDbError::Cycle` (`QE0007`) if the edge would close a cycle.
pub fn add_dependency(_from: MemoKey, to: MemoKey) -> Result<()> {
    ACTIVE_STACK.with(|stack| {
        if stack.borrow().contains(&to) {
            Err(AstDbError::Cycle)
        } else {
            Ok(())
        }
    })
}

/// `true` if the calling thread's active-query stack is empty. Used by
/// tests to assert every `startQuery` was matched by an `endQuery` on all
/// exit paths (spec.md §8 Scenario 4).
#[must_use]
pub fn active_stack_is_empty() -> bool {
    ACTIVE_STACK.with(|stack| stack.borrow().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::QueryId;

    fn key(byte: u8) -> MemoKey {
        let mut hash = [0u8; 32];
        hash[0] = byte;
        MemoKey {
            query_id: QueryId::TypeOf,
            args_hash: hash,
        }
    }

    #[test]
    fn starting_an_active_key_is_a_cycle() {
        assert!(active_stack_is_empty());
        let _guard = start_query(key(1)).unwrap();
        assert_eq!(start_query(key(1)), Err(AstDbError::Cycle));
        drop(_guard);
        assert!(active_stack_is_empty());
    }

    #[test]
    fn scenario_4_cycle_through_dependency_edges() {
        assert!(active_stack_is_empty());
        let a = key(10);
        let b = key(11);
        let c = key(12);

        let guard_a = start_query(a).unwrap();
        add_dependency(a, b).unwrap();
        let guard_b = start_query(b).unwrap();
        add_dependency(b, c).unwrap();
        let guard_c = start_query(c).unwrap();

        assert_eq!(add_dependency(c, a), Err(AstDbError::Cycle));

        drop(guard_c);
        drop(guard_b);
        drop(guard_a);
        assert!(active_stack_is_empty());
    }

    #[test]
    fn guard_unwinds_on_early_return() {
        fn run() -> Result<()> {
            let _guard = start_query(key(20))?;
            Err(AstDbError::NonCanonicalArg)
        }
        assert!(run().is_err());
        assert!(active_stack_is_empty());
    }
}
