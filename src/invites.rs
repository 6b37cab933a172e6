use dashmap::DashMap;

/// Invite-code → intended firstname, populated by staff action or the
/// `/invite-map` webhook. Entries are never evicted; for the guild sizes
/// this bot targets (tens to low hundreds of invites per process lifetime)
/// that is accepted rather than papered over with an eviction policy.
#[derive(Default)]
pub struct InviteRegistry {
    entries: DashMap<String, String>,
}

impl InviteRegistry {
    pub fn insert(&self, code: impl Into<String>, firstname: &str) {
        self.entries.insert(code.into(), firstname.trim().to_string());
    }

    pub fn lookup(&self, code: &str) -> Option<String> {
        self.entries.get(code).map(|e| e.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Invite-code → last observed use count, resynchronized wholesale on
/// startup and on every member join.
#[derive(Default)]
pub struct UsageCache {
    counts: DashMap<String, u64>,
}

impl UsageCache {
    /// Overwrites every cached count with the freshly fetched one and
    /// returns the code whose count strictly increased, if any.
    ///
    /// When several counts increased in the same pass (two joins between
    /// refreshes) the last one in iteration order wins; the attribution is
    /// ambiguous in that case and the caller gets a best guess. The cache
    /// is always fully resynced so drift never compounds.
    pub fn resync(&self, fresh: impl IntoIterator<Item = (String, u64)>) -> Option<String> {
        let mut used = None;
        for (code, uses) in fresh {
            let prev = self.counts.get(&code).map(|e| *e.value()).unwrap_or(0);
            if uses > prev {
                used = Some(code.clone());
            }
            self.counts.insert(code, uses);
        }
        used
    }

    pub fn count(&self, code: &str) -> Option<u64> {
        self.counts.get(code).map(|e| *e.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(list: &[(&str, u64)]) -> Vec<(String, u64)> {
        list.iter().map(|(c, n)| (c.to_string(), *n)).collect()
    }

    #[test]
    fn attributes_the_invite_whose_count_increased() {
        let cache = UsageCache::default();
        cache.resync(fresh(&[("A", 2), ("B", 5)]));

        let used = cache.resync(fresh(&[("A", 2), ("B", 6), ("C", 1)]));

        assert_eq!(used.as_deref(), Some("B"));
        assert_eq!(cache.count("A"), Some(2));
        assert_eq!(cache.count("B"), Some(6));
        assert_eq!(cache.count("C"), Some(1));
    }

    #[test]
    fn no_increase_means_no_attribution() {
        let cache = UsageCache::default();
        cache.resync(fresh(&[("A", 2)]));

        assert_eq!(cache.resync(fresh(&[("A", 2)])), None);
    }

    #[test]
    fn unseen_codes_count_from_zero() {
        let cache = UsageCache::default();
        let used = cache.resync(fresh(&[("fresh", 1)]));
        assert_eq!(used.as_deref(), Some("fresh"));
    }

    #[test]
    fn concurrent_increases_pick_the_last_in_order() {
        let cache = UsageCache::default();
        cache.resync(fresh(&[("A", 1), ("B", 1)]));

        let used = cache.resync(fresh(&[("A", 2), ("B", 2)]));

        assert_eq!(used.as_deref(), Some("B"));
    }

    #[test]
    fn cache_resyncs_even_when_attribution_succeeds_early() {
        let cache = UsageCache::default();
        cache.resync(fresh(&[("A", 0), ("B", 3)]));

        cache.resync(fresh(&[("A", 1), ("B", 9)]));

        // both were overwritten, not just the attributed one
        assert_eq!(cache.count("A"), Some(1));
        assert_eq!(cache.count("B"), Some(9));
    }

    #[test]
    fn registry_trims_firstname_on_insert() {
        let registry = InviteRegistry::default();
        registry.insert("x", "  Bob ");
        assert_eq!(registry.lookup("x").as_deref(), Some("Bob"));
    }

    #[test]
    fn registry_upserts_existing_codes() {
        let registry = InviteRegistry::default();
        registry.insert("x", "Bob");
        registry.insert("x", "Maria");
        assert_eq!(registry.lookup("x").as_deref(), Some("Maria"));
    }

    // Entries are never evicted; growth is bounded only by the process
    // lifetime. Accepted for the guild scale this targets.
    #[test]
    fn registry_accumulates_entries_for_process_lifetime() {
        let registry = InviteRegistry::default();
        for i in 0..200 {
            registry.insert(format!("code-{i}"), "Client");
        }
        assert_eq!(registry.len(), 200);
    }
}
