use std::collections::{HashMap, HashSet};

/// Hands out unique resource ids from possibly colliding base names.
///
/// The first occurrence of a base name keeps it as is; every later one gets
/// `{base}_{n}` where `n` is the 1-based occurrence count. Results depend on
/// the order of the `allocate` calls: reordering or filtering the input
/// changes which item keeps the bare name.
#[derive(Debug, Default)]
pub struct ResourceIdAllocator {
    occurrences: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl ResourceIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id for `base`
    pub fn allocate(&mut self, base: &str) -> String {
        let count = self.occurrences.entry(base.to_string()).or_insert(0);
        *count += 1;

        let mut candidate = if *count == 1 {
            base.to_string()
        } else {
            format!("{}_{}", base, count)
        };

        // A literal name such as "errors_2" may already hold the suffixed form
        while self.issued.contains(&candidate) {
            *count += 1;
            candidate = format!("{}_{}", base, count);
        }

        self.issued.insert(candidate.clone());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_occurrence_is_unsuffixed() {
        let mut allocator = ResourceIdAllocator::new();

        assert_eq!(allocator.allocate("ops--errors"), "ops--errors");
        assert_eq!(allocator.allocate("ops--errors"), "ops--errors_2");
        assert_eq!(allocator.allocate("ops--latency"), "ops--latency");
        assert_eq!(allocator.allocate("ops--errors"), "ops--errors_3");
    }

    #[test]
    fn test_literal_suffix_does_not_collide() {
        let mut allocator = ResourceIdAllocator::new();

        assert_eq!(allocator.allocate("errors_2"), "errors_2");
        assert_eq!(allocator.allocate("errors"), "errors");
        assert_eq!(allocator.allocate("errors"), "errors_3");
    }

    proptest! {
        #[test]
        fn prop_allocated_ids_are_distinct(bases in proptest::collection::vec("[a-c]{1,2}(--[a-c]{1,2})?", 0..40)) {
            let mut allocator = ResourceIdAllocator::new();
            let ids: Vec<String> = bases.iter().map(|b| allocator.allocate(b)).collect();
            let unique: HashSet<&String> = ids.iter().collect();

            prop_assert_eq!(unique.len(), ids.len());

            let mut seen = HashSet::new();
            for (base, id) in bases.iter().zip(&ids) {
                if seen.insert(base) {
                    prop_assert_eq!(id, base);
                }
            }
        }
    }
}
