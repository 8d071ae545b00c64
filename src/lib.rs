//! `mab_ranking`: Thompson-sampling bandits composed into ranking policies.
//!
//! Designed for choosing an ordered handful of items ("arms") out of a larger
//! catalogue under online feedback: recommend `k` items, observe which ones were
//! relevant, update, repeat. Arms are identified by zero-based indices.
//!
//! **Single-position bandits** (the [`Bandit`] trait):
//! - [`BetaThompsonSampling`]: one Beta posterior per arm, context-free.
//! - [`DirichletThompsonSampling`]: a first-order transition model. A dense
//!   `num_arms x num_arms` strength matrix is sampled row-wise through
//!   normalized Gamma draws; the row is picked by the `previous_action` in the
//!   request [`Context`].
//!
//! Both return a full stochastic ranking per call ([`Choice`]), not just the
//! top arm, so a rank composition can fall back to the next arm in the same
//! draw.
//!
//! **Rank compositions** (the [`RankBandit`] trait):
//! - [`IndependentBandits`]: one bandit per rank position, filled top-down,
//!   with duplicate arms replaced by the position's next free arm.
//!   [`IndependentBandits::choose_explain`] reports which positions were
//!   displaced ([`RankingDecision`]).
//!
//! **Replay**: [`replay()`] runs a rank bandit against logged 0/1 relevance as a
//! sequential click-through experiment, including chained `previous_action`
//! contexts.
//!
//! **Goals:**
//! - **Deterministic by default**: every bandit owns a seeded `StdRng`; the same
//!   seed and feedback give the same rankings.
//! - **Fail loudly**: zero arms or ranks, out-of-range arms, infeasible rankings
//!   and degenerate posteriors are [`BanditError`]s, never silent NaNs or short
//!   lists.
//!
//! **Non-goals:** persistence, distributed execution, any network or UI layer.
//! Instances are not synchronized; callers sharing one must serialize access.
//!
//! ```rust
//! use mab_ranking::{
//!     Context, DirichletThompsonConfig, DirichletThompsonSampling, IndependentBandits,
//!     RankBandit,
//! };
//!
//! let mut ranker: IndependentBandits<DirichletThompsonSampling> =
//!     IndependentBandits::with_seed(3, 10, DirichletThompsonConfig::default(), 42).unwrap();
//!
//! let ctx = Context::with_previous_action(4);
//! let shown = ranker.choose(Some(&ctx)).unwrap();
//! assert_eq!(shown.len(), 3);
//!
//! let clicks: Vec<f64> = shown.iter().map(|&a| if a == 7 { 1.0 } else { 0.0 }).collect();
//! ranker.update(&shown, &clicks, Some(&ctx)).unwrap();
//! ```

#![forbid(unsafe_code)]

mod error;
pub use error::*;

mod context;
pub use context::{Context, PREVIOUS_ACTION};

mod alloc;
pub use alloc::*;

mod seed;
pub use seed::*;

mod policy;
pub use policy::*;

mod thompson;
pub use thompson::*;

mod dirichlet;
pub use dirichlet::*;

mod rank;
pub use rank::*;

mod decision;
pub use decision::*;

mod independent;
pub use independent::*;

mod replay;
pub use replay::*;
