//! Opaque build products.
//!
//! The two builders hand back handles rather than exposing their internals:
//! a `GeneratorHandle` wraps a boxed proptest strategy over terms, a
//! `ValidatorHandle` wraps a total predicate. Both are cheap to clone and
//! can be passed back in as type arguments.

use crate::error::Error;
use crate::term::Term;
use proptest::strategy::{BoxedStrategy, Strategy, ValueTree};
use proptest::test_runner::{Config, RngAlgorithm, TestRng, TestRunner};
use std::fmt;
use std::sync::Arc;

/// A stream of well-typed sample terms with shrinking support.
#[derive(Clone, Debug)]
pub struct GeneratorHandle(BoxedStrategy<Term>);

impl GeneratorHandle {
    pub fn new(strategy: impl Strategy<Value = Term> + 'static) -> GeneratorHandle {
        GeneratorHandle(strategy.boxed())
    }

    pub fn from_boxed(strategy: BoxedStrategy<Term>) -> GeneratorHandle {
        GeneratorHandle(strategy)
    }

    /// The underlying strategy, for composition into larger strategies.
    pub fn strategy(&self) -> BoxedStrategy<Term> {
        self.0.clone()
    }

    /// Draws `count` terms with a fresh runner. Convenient for inspecting
    /// what a generator produces outside a property campaign.
    pub fn sample(&self, count: usize) -> Result<Vec<Term>, Error> {
        self.draw_with(TestRunner::default(), count)
    }

    /// Deterministic variant of [`sample`](Self::sample): the same seed
    /// reproduces the same draws, for pinning down a misbehaving value.
    pub fn sample_seeded(&self, seed: [u8; 32], count: usize) -> Result<Vec<Term>, Error> {
        let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &seed);
        self.draw_with(TestRunner::new_with_rng(Config::default(), rng), count)
    }

    fn draw_with(&self, mut runner: TestRunner, count: usize) -> Result<Vec<Term>, Error> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            let tree = self
                .0
                .new_tree(&mut runner)
                .map_err(|reason| Error::bad_argument(format!("draw failed: {reason}")))?;
            out.push(tree.current());
        }
        Ok(out)
    }
}

impl Strategy for GeneratorHandle {
    type Tree = <BoxedStrategy<Term> as Strategy>::Tree;
    type Value = Term;

    fn new_tree(&self, runner: &mut TestRunner) -> proptest::strategy::NewTree<Self> {
        self.0.new_tree(runner)
    }
}

/// A total, pure membership predicate over terms.
#[derive(Clone)]
pub struct ValidatorHandle(Arc<dyn Fn(&Term) -> bool + Send + Sync>);

impl ValidatorHandle {
    pub fn new(predicate: impl Fn(&Term) -> bool + Send + Sync + 'static) -> ValidatorHandle {
        ValidatorHandle(Arc::new(predicate))
    }

    pub fn check(&self, term: &Term) -> bool {
        (self.0)(term)
    }
}

impl fmt::Debug for ValidatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValidatorHandle")
    }
}
