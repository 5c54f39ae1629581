use super::*;

#[test]
fn profile_strip_local_info_limits() {
    let p = RecursionProfile::StripLocalInfo;
    assert_eq!(p.max_depth(), 256);
    assert_eq!(p.max_iterations(), 100_000);
}

#[test]
fn profile_custom_limits() {
    let p = RecursionProfile::Custom {
        max_depth: 7,
        max_iterations: 42,
    };
    assert_eq!(p.max_depth(), 7);
    assert_eq!(p.max_iterations(), 42);
}

#[test]
fn basic_enter_leave() {
    let mut guard = RecursionGuard::new(10, 100);
    assert_eq!(guard.enter(1u32), RecursionResult::Entered);
    assert_eq!(guard.depth(), 1);
    assert_eq!(guard.path(), &[1]);

    guard.leave(1);
    assert_eq!(guard.depth(), 0);
    assert!(guard.path().is_empty());
}

#[test]
fn reentering_same_key_is_cycle() {
    let mut guard = RecursionGuard::new(10, 100);
    assert_eq!(guard.enter(1u32), RecursionResult::Entered);
    assert_eq!(guard.enter(2u32), RecursionResult::Entered);

    assert_eq!(guard.enter(1u32), RecursionResult::Cycle);
    assert_eq!(guard.path(), &[1, 2], "a cycle does not push");
    assert!(!guard.is_exceeded(), "a cycle is not a limit violation");

    guard.leave(2);
    guard.leave(1);
}

#[test]
fn path_lists_keys_outermost_first() {
    let mut guard = RecursionGuard::new(10, 100);
    for key in [4u32, 9, 2] {
        assert_eq!(guard.enter(key), RecursionResult::Entered);
    }
    assert_eq!(guard.path(), &[4, 9, 2]);
    assert_eq!(guard.depth(), 3);
    for key in [2, 9, 4] {
        guard.leave(key);
    }
    assert!(guard.path().is_empty());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "must name the innermost entered key")]
fn leaving_out_of_order_panics_in_debug() {
    let mut guard = RecursionGuard::new(10, 100);
    let _ = guard.enter(1u32);
    let _ = guard.enter(2u32);
    guard.leave(1);
}

#[test]
fn key_can_be_entered_again_after_leave() {
    let mut guard = RecursionGuard::new(10, 100);
    assert_eq!(guard.enter(5u32), RecursionResult::Entered);
    guard.leave(5);
    assert_eq!(guard.enter(5u32), RecursionResult::Entered);
    guard.leave(5);
    assert_eq!(guard.iterations(), 2);
}

#[test]
fn depth_limit_is_sticky() {
    let mut guard = RecursionGuard::new(2, 100);
    assert_eq!(guard.enter(1u32), RecursionResult::Entered);
    assert_eq!(guard.enter(2u32), RecursionResult::Entered);
    assert_eq!(guard.enter(3u32), RecursionResult::DepthExceeded);
    assert!(guard.is_exceeded());

    guard.leave(2);
    guard.leave(1);
    assert!(guard.is_exceeded());
}

#[test]
fn iteration_limit() {
    let mut guard = RecursionGuard::new(10, 2);
    assert_eq!(guard.enter(1u32), RecursionResult::Entered);
    guard.leave(1);
    assert_eq!(guard.enter(2u32), RecursionResult::Entered);
    guard.leave(2);
    assert_eq!(guard.enter(3u32), RecursionResult::IterationExceeded);
    assert!(guard.is_exceeded());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "active entries on its path")]
fn dropping_active_guard_panics_in_debug() {
    let mut guard = RecursionGuard::new(10, 100);
    let _ = guard.enter(1u32);
    drop(guard);
}
