//! Replays recorded interactions from a cassette.

use super::format::{Cassette, Interaction};

/// Replays interactions from a loaded cassette.
///
/// Concurrent batch tasks call the port in nondeterministic order, so each
/// request is paired to the recorded interaction whose input `prompt`
/// matches. Requests without a usable prompt fall back to the next
/// unconsumed interaction for the port/method, in seq order.
pub struct CassetteReplayer {
    interactions: Vec<Interaction>,
    consumed: Vec<bool>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut interactions = cassette.interactions.clone();
        interactions.sort_by_key(|i| i.seq);
        let consumed = vec![false; interactions.len()];
        Self { interactions, consumed }
    }

    /// Take the recorded interaction for the given port, method, and input.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// port/method combination.
    pub fn take_matching(
        &mut self,
        port: &str,
        method: &str,
        input: &serde_json::Value,
    ) -> Interaction {
        if !self.interactions.iter().any(|i| i.port == port && i.method == method) {
            let available: Vec<String> = self
                .interactions
                .iter()
                .map(|i| format!("{}::{}", i.port, i.method))
                .collect();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        }

        let prompt = input.get("prompt").and_then(serde_json::Value::as_str);

        let position = prompt
            .and_then(|p| {
                self.find_unconsumed(|i| {
                    i.port == port
                        && i.method == method
                        && i.input.get("prompt").and_then(serde_json::Value::as_str) == Some(p)
                })
            })
            .or_else(|| self.find_unconsumed(|i| i.port == port && i.method == method));

        let Some(index) = position else {
            let count =
                self.interactions.iter().filter(|i| i.port == port && i.method == method).count();
            panic!(
                "Cassette exhausted: all {count} interactions for port={port:?} \
                 method={method:?} have been consumed.",
            );
        };

        self.consumed[index] = true;
        self.interactions[index].clone()
    }

    /// Index of the first unconsumed interaction satisfying the predicate.
    fn find_unconsumed(&self, predicate: impl Fn(&Interaction) -> bool) -> Option<usize> {
        self.interactions
            .iter()
            .enumerate()
            .find(|&(index, interaction)| !self.consumed[index] && predicate(interaction))
            .map(|(index, _)| index)
    }
}
