//! Handler chain core
//!
//! This module provides the generalized chain-of-responsibility dispatch
//! mechanism: an ordered sequence of handlers traversed once per request,
//! with an explicit per-chain continuation policy.
//!
//! ## Key Components
//!
//! - [`HandlerChain`] - immutable ordered sequence of handlers
//! - [`Handler`] - one unit: id + eligibility predicate + sink-backed action
//! - [`Eligibility`] - pure predicate data (severity floor, magnitude cap,
//!   exact-match refinement)
//! - [`ChainMode`] - broadcast vs first-match continuation
//! - [`DispatchOutcome`] - per-dispatch result: handled flag, ordered acting
//!   handlers, recorded action failures
//!
//! ## Example
//!
//! ```rust,ignore
//! use relaybox::chain::{ChainMode, Eligibility, Handler, HandlerChain};
//!
//! let chain = HandlerChain::new(
//!     vec![Handler::new("manager", Eligibility::amount_within(1000), sink)],
//!     ChainMode::FirstMatch,
//! );
//! let outcome = chain.dispatch(&request);
//! ```

mod builder;
mod dispatch;
mod handler;

pub use builder::{ChainBuilder, ConfigurationError};
pub use dispatch::{ActionFailure, ChainMode, DispatchOutcome, HandlerChain};
pub use handler::{Eligibility, Handler};
