//! Domain primitives and values.
//!
//! Purpose: define the identity model ([`Entity`], [`ValueObject`]), the
//! two failure channels ([`Outcome`] for expected failures, [`Error`] for
//! everything else), the [`UseCase`] contract, and the values the store
//! modules hold. Types are immutable once built and validate their
//! invariants in constructors.

pub mod auth;
pub mod entity;
pub mod error;
pub mod outcome;
pub mod ports;
pub mod theme;
pub mod use_case;
pub mod user;
pub mod value_object;

pub use self::auth::{AuthToken, AuthValidationError, LoginCredentials};
pub use self::entity::{Entity, Identified};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::outcome::Outcome;
pub use self::theme::{ParseThemeError, Theme};
pub use self::use_case::UseCase;
pub use self::user::{DisplayName, EmailAddress, User, UserId, UserValidationError};
pub use self::value_object::ValueObject;
