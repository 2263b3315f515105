//! Property tests for name interning and drain partitioning.

mod common;

use common::StubConduit;
use filament::{Name, Reservoir};
use proptest::collection::vec;
use proptest::prelude::*;

fn valid_path() -> impl Strategy<Value = String> {
    vec("[a-z][a-z0-9]{0,4}", 1..=4).prop_map(|segments| segments.join("."))
}

proptest! {
    #[test]
    fn prop_interning_is_idempotent(path in valid_path()) {
        let a = Name::intern(&path).unwrap();
        let b = Name::intern(&path).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.path(), path.as_str());
        prop_assert_eq!(a.depth(), path.split('.').count());
        prop_assert_eq!(a.segments().count(), a.depth());
    }

    #[test]
    fn prop_child_matches_interned_path(path in valid_path(), segment in "[a-z]{1,4}") {
        let base = Name::intern(&path).unwrap();
        let child = base.child(&segment).unwrap();
        prop_assert_eq!(&child, &Name::intern(&format!("{path}.{segment}")).unwrap());
        prop_assert_eq!(child.enclosure(), Some(&base));
    }

    #[test]
    fn prop_empty_segments_rejected(head in "[a-z]{1,4}", tail in "[a-z]{1,4}") {
        for path in [
            format!("{head}..{tail}"),
            format!(".{head}"),
            format!("{tail}."),
        ] {
            prop_assert!(Name::intern(&path).is_err());
        }
    }

    #[test]
    fn prop_drains_partition_emissions(
        values in vec(any::<i32>(), 1..50),
        splits in vec(0usize..50, 0..5),
    ) {
        let conduit: StubConduit<i32> = StubConduit::new("prop");
        let reservoir = Reservoir::new(&conduit);
        conduit.channel("prop.stream");

        let mut collected = Vec::new();
        for (i, value) in values.iter().enumerate() {
            if splits.contains(&i) {
                collected.extend(reservoir.drain().into_iter().map(|c| c.into_emission()));
            }
            conduit.emit("prop.stream", *value);
        }
        collected.extend(reservoir.drain().into_iter().map(|c| c.into_emission()));

        prop_assert_eq!(collected, values);
    }
}
