#![cfg(test)]

use super::*;
use crate::util::alloc::FaultyAlloc;
use crate::util::error::{AllocError, CapacityOverflow};

#[test]
fn test_new_is_unallocated() {
    let region = Region::new();
    assert_eq!(region.cap(), 0);
    assert!(!region.is_allocated(), "A new Region shouldn't own any memory.");

    let region = Region::new_in(FaultyAlloc::failing_after(0));
    assert_eq!(
        region.allocator().grants(),
        0,
        "Creating a Region should never touch the allocator."
    );
}

#[test]
fn test_realloc() {
    let mut region = Region::new_in(FaultyAlloc::unlimited());

    region.try_realloc(4).expect("allocation should succeed");
    assert_eq!(region.cap(), 4);
    assert_eq!(region.allocator().grants(), 1, "Growing from 0 should allocate once.");

    let old_ptr = region.ptr;
    region.try_realloc(4).expect("no-op reallocation should succeed");
    region.try_realloc(2).expect("shrinking request should be ignored");
    assert_eq!(region.ptr, old_ptr, "Requests that don't grow shouldn't move the pointer.");
    assert_eq!(region.cap(), 4, "Regions shouldn't shrink.");
    assert_eq!(region.allocator().grants(), 1);

    for i in 0..=4 {
        // SAFETY: The Region owns cap + 1 bytes.
        unsafe { region.ptr.add(i).write(i as u8 + 10) }
    }

    region.try_realloc(64).expect("growth should succeed");
    assert_eq!(region.cap(), 64);
    for i in 0..=4 {
        assert_eq!(
            // SAFETY: These bytes were initialized before growing and are still in bounds.
            unsafe { region.ptr.add(i).read() },
            i as u8 + 10,
            "When growing, all bytes including the terminator slot should be kept."
        );
    }
}

#[test]
fn test_overflow_leaves_region_untouched() {
    let mut region = Region::new_in(FaultyAlloc::unlimited());
    region.try_realloc(8).expect("allocation should succeed");
    let old_ptr = region.ptr;

    assert_eq!(
        region.try_realloc(usize::MAX),
        Err(AllocError::CapacityOverflow(CapacityOverflow))
    );
    assert_eq!(
        region.try_realloc(MAX_CAP + 1),
        Err(AllocError::CapacityOverflow(CapacityOverflow)),
        "MAX_CAP should be the largest accepted capacity."
    );
    assert_eq!(region.cap(), 8);
    assert_eq!(region.ptr, old_ptr);
}

#[test]
fn test_alloc_failure_leaves_region_untouched() {
    let mut region = Region::new_in(FaultyAlloc::failing_after(0));
    let error = region.try_realloc(8).expect_err("the allocator should refuse");
    assert!(error.is_alloc_failed());
    assert!(!region.is_allocated(), "A failed first allocation should leave the Region empty.");

    region.allocator().set_budget(None);
    region.try_realloc(8).expect("allocation should succeed");
    let old_ptr = region.ptr;

    region.allocator().fail_from_now();
    match region.try_realloc(100) {
        Err(AllocError::AllocFailed(failed)) => assert_eq!(
            failed.layout.size(),
            101,
            "The reported layout should include the terminator slot."
        ),
        other => panic!("expected an allocation failure, got {:?}", other),
    }
    assert_eq!(region.cap(), 8);
    assert_eq!(region.ptr, old_ptr, "A failed growth should keep the old allocation.");
}

#[test]
fn test_release_and_drop() {
    let mut region = Region::new_in(FaultyAlloc::unlimited());
    region.release();
    assert_eq!(region.allocator().frees(), 0, "Releasing nothing shouldn't free.");

    region.try_realloc(16).expect("allocation should succeed");
    region.try_realloc(32).expect("growth should succeed");
    region.release();
    assert_eq!(region.allocator().frees(), 1, "Release should free exactly once.");
    assert!(!region.is_allocated());

    region.release();
    assert_eq!(region.allocator().frees(), 1, "Releasing twice shouldn't double free.");
}

#[test]
fn test_release_frees_whole_layout() {
    let mut region = Region::new_in(FaultyAlloc::unlimited());
    region.try_realloc(8).expect("allocation should succeed");
    region.try_realloc(40).expect("growth should succeed");
    region.release();

    assert_eq!(region.allocator().frees(), 1);
    assert_eq!(
        region.allocator().freed_bytes(),
        41,
        "Release should free the current capacity plus the terminator slot."
    );
}

#[test]
fn test_drop() {
    let alloc = FaultyAlloc::unlimited();

    let mut region = Region::new_in(&alloc);
    region.try_realloc(10).expect("allocation should succeed");
    drop(region);
    assert_eq!(alloc.frees(), 1, "Dropping an allocated Region should free it.");

    drop(Region::new_in(&alloc));
    assert_eq!(alloc.frees(), 1, "Dropping an empty Region shouldn't free anything.");
}
