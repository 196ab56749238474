//! The `faker` binding exposed to `@generate` expressions.
//!
//! Namespaces mirror the layout people already know from the JS faker API
//! (`faker.person.fullName()`, `faker.internet.email()`, ...). Values come
//! from the `fake` crate and a shared ChaCha RNG, so a seeded [`Faker`]
//! produces the same sequence every run.

mod namespaces;

use std::sync::{Arc, Mutex, PoisonError};

use fake::Dummy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use namespaces::register;

/// Root of the `faker` binding. Clones share one RNG.
#[derive(Debug, Clone)]
pub struct Faker {
    rng: Arc<Mutex<ChaCha8Rng>>,
}

impl Faker {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))),
        }
    }

    pub(crate) fn with_rng<T>(&self, f: impl FnOnce(&mut ChaCha8Rng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }

    /// Draw a value from a `fake` generator.
    pub(crate) fn fake<F, U>(&self, generator: F) -> U
    where
        U: Dummy<F>,
    {
        self.with_rng(|rng| U::dummy_with_rng(&generator, rng))
    }
}
