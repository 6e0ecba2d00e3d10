//! cooper-pair - Client library for programmatic access to the DQM GraphQL API.
//!
//! ## Scope
//!
//! This is deliberately a thin convenience layer ("training wheels") over
//! a small set of common operations: creating datasets, creating
//! checkpoints, and running evaluations. It does not cover the full query
//! surface of the service; sophisticated users should pass their own
//! documents to [`CooperPair::query`] or hit the GraphQL endpoint
//! directly. The documents behind each method live in [`pair::queries`]
//! as worked examples.
//!
//! ## Quick start
//!
//! ```no_run
//! use cooper_pair::{CooperPair, PairConfig};
//!
//! # async fn example() -> cooper_pair::Result<()> {
//! let config = PairConfig::new("http://localhost:3010/graphql")
//!     .with_credentials("machine@example.com", "secret");
//! let pair = CooperPair::new(&config)?;
//!
//! let checkpoint = pair.get_checkpoint("Q2hlY2twb2ludDoy").await?;
//! println!("{checkpoint:#}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod models;
pub mod pair;

// Re-exports for convenience
pub use client::{GraphqlTransport, TOKEN_HEADER};
pub use models::{
    ConfigError, ExpectationConfig, ExpectationsConfig, GraphqlError, GraphqlErrorList,
    GraphqlLocation, GraphqlResponse, PairConfig, PairError, Result,
};
pub use pair::{generate_slug, queries, CooperPair};
