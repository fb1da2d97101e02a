use rallocator::{Allocator, ExplicitFreeList, SegregatedFreeList, VecRegion};

fn new_allocator() -> Allocator<VecRegion, SegregatedFreeList> {
  Allocator::new(VecRegion::new(8 * 1024 * 1024)).unwrap()
}

#[test]
fn repeated_allocate_free_of_the_same_size_does_not_grow_the_region() {
  let mut a = new_allocator();
  let p = a.allocate(128);
  a.free(p);
  a.check("baseline");

  for _ in 0..500 {
    let q = a.allocate(128);
    assert!(!q.is_null());
    a.free(q);
  }
  a.check("after_churn");
}

#[test]
fn exceeding_chunk_forces_a_region_extension_and_stays_consistent() {
  let mut a = new_allocator();
  // SegregatedFreeList::CHUNK is 2 MiB; a request well past that forces
  // allocate() down the extend path rather than the find_fit path.
  let p = a.allocate(3 * 1024 * 1024);
  assert!(!p.is_null());
  a.check("exceeding_chunk_forces_a_region_extension_and_stays_consistent");
  a.free(p);
  a.check("after_free");
}

#[test]
fn interleaved_allocations_and_frees_coalesce_back_to_one_block() {
  let mut a = new_allocator();
  let blocks: Vec<_> = (0..8).map(|_| a.allocate(256)).collect();
  assert!(blocks.iter().all(|p| !p.is_null()));
  a.check("all_allocated");

  // Free every other block, then the rest, exercising all four coalescing
  // cases (alloc/alloc, alloc/free, free/alloc, free/free).
  for (i, p) in blocks.iter().enumerate() {
    if i % 2 == 0 {
      a.free(*p);
    }
  }
  a.check("half_freed");
  for (i, p) in blocks.iter().enumerate() {
    if i % 2 != 0 {
      a.free(*p);
    }
  }
  a.check("all_freed");

  // With everything coalesced back down, a big allocation should succeed
  // without forcing a fresh region extension.
  let p = a.allocate(1024);
  assert!(!p.is_null());
  a.free(p);
}

#[test]
fn reallocate_preserves_bytes_across_a_growing_resize() {
  let mut a = new_allocator();
  let p = a.allocate(32);
  unsafe {
    for i in 0..32u8 {
      *p.add(i as usize) = i;
    }
  }
  let q = a.reallocate(p, 512);
  assert!(!q.is_null());
  unsafe {
    for i in 0..32u8 {
      assert_eq!(*q.add(i as usize), i);
    }
  }
  a.check("reallocate_preserves_bytes_across_a_growing_resize");
  a.free(q);
}

#[test]
fn reallocate_preserves_bytes_across_a_shrinking_resize() {
  let mut a = new_allocator();
  let p = a.allocate(512);
  unsafe {
    for i in 0..64u8 {
      *p.add(i as usize) = i;
    }
  }
  let q = a.reallocate(p, 16);
  assert!(!q.is_null());
  unsafe {
    for i in 0..16u8 {
      assert_eq!(*q.add(i as usize), i);
    }
  }
  a.free(q);
}

#[test]
fn explicit_free_list_index_supports_the_full_scenario_too() {
  let mut a: Allocator<VecRegion, ExplicitFreeList> = Allocator::new(VecRegion::new(1 << 20)).unwrap();
  let p1 = a.allocate(64);
  let p2 = a.allocate(128);
  a.free(p1);
  let p3 = a.allocate(32);
  a.free(p2);
  a.free(p3);
  a.check("explicit_free_list_index_supports_the_full_scenario_too");
}
