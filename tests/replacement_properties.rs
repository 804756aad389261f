//! Property tests over arbitrary access sequences.

use std::collections::HashSet;

use proptest::prelude::*;

use vmsim::mmu::replacer::{ClockReplacer, LruReplacer};
use vmsim::{Access, AccessKind, Algorithm, Mmu, PageId};

fn access_strategy(max_page: u64) -> impl Strategy<Value = Access> {
    (any::<bool>(), 0..max_page).prop_map(|(write, page)| {
        let page = PageId::new(page);
        if write {
            Access::write(page)
        } else {
            Access::read(page)
        }
    })
}

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::Random),
        Just(Algorithm::Lru),
        Just(Algorithm::Clock),
    ]
}

proptest! {
    #[test]
    fn prop_sized_replacer_must_match_frames(
        frames in 1usize..12,
        sized_for in 1usize..12,
    ) {
        prop_assert_eq!(
            Mmu::new(frames, LruReplacer::new(sized_for)).is_ok(),
            frames == sized_for
        );
        prop_assert_eq!(
            Mmu::new(frames, ClockReplacer::new(sized_for)).is_ok(),
            frames == sized_for
        );
    }

    #[test]
    fn prop_counters_and_capacity_hold(
        alg in algorithm_strategy(),
        frames in 1usize..8,
        seed in any::<u64>(),
        trace in prop::collection::vec(access_strategy(16), 0..300),
    ) {
        let mut mmu = Mmu::with_seed(alg, frames, seed).unwrap();

        for access in trace {
            let before = mmu.stats();
            let was_resident = mmu.is_resident(access.page);

            mmu.access(access);
            let after = mmu.stats();

            prop_assert!(mmu.resident_count() <= frames);
            prop_assert_eq!(mmu.resident_count(), mmu.frames().occupied());
            prop_assert_eq!(after.page_faults, after.disk_reads);
            prop_assert!(after.disk_writes <= after.page_faults);
            prop_assert!(mmu.is_resident(access.page));

            if was_resident {
                prop_assert_eq!(after.page_faults, before.page_faults);
                prop_assert_eq!(after.disk_reads, before.disk_reads);
                prop_assert_eq!(after.disk_writes, before.disk_writes);
            } else {
                prop_assert_eq!(after.page_faults, before.page_faults + 1);
                prop_assert!(after.disk_writes - before.disk_writes <= 1);
            }
        }
    }

    #[test]
    fn prop_dirty_iff_written_since_load(
        alg in algorithm_strategy(),
        frames in 1usize..6,
        seed in any::<u64>(),
        trace in prop::collection::vec(access_strategy(10), 0..300),
    ) {
        let mut mmu = Mmu::with_seed(alg, frames, seed).unwrap();
        // Pages written since their last load.
        let mut written = HashSet::new();
        let mut expected_writes = 0u64;

        for access in trace {
            let resident_before: Vec<PageId> = mmu.resident_pages();
            mmu.access(access);

            for page in resident_before {
                if !mmu.is_resident(page) && written.remove(&page) {
                    expected_writes += 1;
                }
            }
            if access.kind == AccessKind::Write {
                written.insert(access.page);
            }

            prop_assert_eq!(mmu.get_total_disk_writes(), expected_writes);
            for page in mmu.resident_pages() {
                prop_assert_eq!(mmu.is_dirty(page), Some(written.contains(&page)));
            }
        }
    }

    #[test]
    fn prop_lru_matches_reference_model(
        frames in 1usize..6,
        trace in prop::collection::vec(access_strategy(12), 0..300),
    ) {
        let mut mmu = Mmu::new(frames, LruReplacer::new(frames)).unwrap();
        // Least recent first.
        let mut model: Vec<PageId> = Vec::new();
        let mut model_faults = 0u64;

        for access in trace {
            if let Some(pos) = model.iter().position(|&p| p == access.page) {
                model.remove(pos);
            } else {
                model_faults += 1;
                if model.len() == frames {
                    model.remove(0);
                }
            }
            model.push(access.page);

            mmu.access(access);

            let order: Vec<PageId> = mmu
                .replacer()
                .order()
                .into_iter()
                .map(|f| mmu.frames().get(f).page_id().unwrap())
                .collect();
            prop_assert_eq!(&order, &model);
            prop_assert_eq!(mmu.get_total_page_faults(), model_faults);
        }
    }

    #[test]
    fn prop_clock_hand_bounded_per_eviction(
        frames in 1usize..8,
        trace in prop::collection::vec(access_strategy(20), 0..300),
    ) {
        let mut mmu = Mmu::new(frames, ClockReplacer::new(frames)).unwrap();

        for access in trace {
            let before = mmu.replacer().advances();
            let was_resident = mmu.is_resident(access.page);
            let was_full = mmu.frames().is_full();

            mmu.access(access);
            let moved = mmu.replacer().advances() - before;

            if was_resident || !was_full {
                prop_assert_eq!(moved, 0);
            } else {
                prop_assert!(moved >= 1);
                prop_assert!(moved <= 2 * frames as u64);
            }
        }
    }
}
