use rand::Rng;

pub trait Placement: Send + Sync {
    /// Picks one of `candidates`. Returns `None` only when the slice is empty.
    fn choose(&self, candidates: &[String]) -> Option<String>;
}

/// Uniform random choice. Calls are independent of each other.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPlacement;

impl Placement for RandomPlacement {
    fn choose(&self, candidates: &[String]) -> Option<String> {
        if candidates.is_empty() {
            return None;
        }
        let idx = rand::thread_rng().gen_range(0..candidates.len());
        Some(candidates[idx].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn candidates(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("node-{}:3000", i)).collect()
    }

    #[test]
    fn test_empty_candidates() {
        assert!(RandomPlacement.choose(&[]).is_none());
    }

    #[test]
    fn test_single_candidate_always_chosen() {
        let only = candidates(1);
        for _ in 0..20 {
            assert_eq!(RandomPlacement.choose(&only).unwrap(), only[0]);
        }
    }

    #[test]
    fn test_choice_is_a_candidate() {
        let nodes = candidates(5);
        for _ in 0..100 {
            let chosen = RandomPlacement.choose(&nodes).unwrap();
            assert!(nodes.contains(&chosen));
        }
    }

    #[test]
    fn test_every_candidate_reachable() {
        // 4 candidates, 1000 draws: missing one has probability ~4 * 0.75^1000.
        let nodes = candidates(4);
        let seen: HashSet<String> = (0..1000)
            .filter_map(|_| RandomPlacement.choose(&nodes))
            .collect();
        assert_eq!(seen.len(), nodes.len());
    }
}
