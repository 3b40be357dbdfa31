use std::{collections::HashMap, sync::Arc};

use crate::{
    animation::rng::Rng64,
    foundation::error::{SignError, SignResult},
};

use super::{Phase, PhaseCtx, PhaseFactory, builtin, step::StepDescription};

/// Pseudo phase type resolved to a random animated built-in at construction time.
pub const RANDOM: &str = "random";

/// Name → factory table for phase types.
///
/// Starts with the built-ins; callers can add their own types (or replace built-ins)
/// with [`PhaseRegistry::register`] at any time.
pub struct PhaseRegistry {
    factories: HashMap<String, PhaseFactory>,
    rng: Rng64,
}

impl Default for PhaseRegistry {
    fn default() -> Self {
        Self::with_builtins(0x5EED_F1A9)
    }
}

impl PhaseRegistry {
    pub fn with_builtins(seed: u64) -> Self {
        let factories = builtin::factories()
            .into_iter()
            .map(|(name, f)| (name.to_owned(), f))
            .collect();
        Self {
            factories,
            rng: Rng64::new(seed),
        }
    }

    pub fn empty(seed: u64) -> Self {
        Self {
            factories: HashMap::new(),
            rng: Rng64::new(seed),
        }
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&StepDescription, &PhaseCtx<'_>) -> SignResult<Box<dyn Phase>>
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        tracing::debug!(%name, "registering phase type");
        self.factories.insert(name, Arc::new(factory));
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = Rng64::new(seed);
    }

    pub fn contains(&self, name: &str) -> bool {
        name == RANDOM || self.factories.contains_key(name)
    }

    /// Registered names in sorted order, `random` excluded.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Fail with a configuration error naming the first unknown phase type.
    pub fn check(&self, steps: &[StepDescription]) -> SignResult<()> {
        for (i, step) in steps.iter().enumerate() {
            if !self.contains(&step.phase_type) {
                return Err(unknown(&step.phase_type, Some(i)));
            }
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, step, ctx), fields(phase = %step.phase_type))]
    pub fn build(
        &mut self,
        step: &StepDescription,
        ctx: &PhaseCtx<'_>,
    ) -> SignResult<Box<dyn Phase>> {
        let name = if step.phase_type == RANDOM {
            let picked = self.pick_random()?;
            tracing::debug!(picked, "random phase resolved");
            picked
        } else {
            step.phase_type.as_str()
        };

        let factory = self
            .factories
            .get(name)
            .cloned()
            .ok_or_else(|| unknown(name, None))?;
        factory(step, ctx)
    }

    fn pick_random(&mut self) -> SignResult<&'static str> {
        let pool: Vec<&'static str> = builtin::ANIMATED
            .iter()
            .copied()
            .filter(|n| self.factories.contains_key(*n))
            .collect();
        if pool.is_empty() {
            return Err(SignError::config(
                "phase type 'random' has no animated phase types to choose from",
            ));
        }
        Ok(pool[self.rng.pick_index(pool.len())])
    }
}

fn unknown(name: &str, index: Option<usize>) -> SignError {
    match index {
        Some(i) => SignError::config(format!("unknown phase type '{name}' at step {i}")),
        None => SignError::config(format!("unknown phase type '{name}'")),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/phase/registry.rs"]
mod tests;
