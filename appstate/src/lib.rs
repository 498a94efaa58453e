//! Application-shell state core.
//!
//! - [`domain`]: identity primitives (entities, value objects), the
//!   [`domain::Outcome`] result type, the [`domain::UseCase`] contract, and
//!   the driven ports.
//! - [`store`]: store modules (`app`, `auth`, `ui`) composed by a registry,
//!   with selective persistence through [`domain::ports::StateStorage`].
//! - [`use_cases`]: sign-in, sign-out, and theme toggling.
//! - [`outbound`]: storage adapters.
//! - [`config`]: settings loaded from the environment and CLI.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod store;
pub mod use_cases;
