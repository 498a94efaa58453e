//! Application-layer operation contract.
//!
//! A use case turns a request into an [`Outcome`] asynchronously. The two
//! failure channels stay apart:
//!
//! - invalid input and business-rule violations resolve to
//!   `Ok(Outcome::fail(..))`;
//! - infrastructure failures (storage, network) resolve to `Err(Error)` and
//!   should be caught at the presentation boundary.

use async_trait::async_trait;

use super::{Error, Outcome};

/// Driving port implemented by every application operation.
///
/// # Examples
/// ```
/// use appstate::domain::{Error, Outcome, UseCase};
/// use async_trait::async_trait;
///
/// struct Halve;
///
/// #[async_trait]
/// impl UseCase for Halve {
///     type Request = u32;
///     type Response = u32;
///
///     async fn execute(&self, request: u32) -> Result<Outcome<u32>, Error> {
///         if request % 2 == 1 {
///             return Ok(Outcome::fail("value must be even"));
///         }
///         Ok(Outcome::ok(request / 2))
///     }
/// }
///
/// # futures::executor::block_on(async {
/// let outcome = Halve.execute(8).await.unwrap();
/// assert_eq!(*outcome.value(), 4);
/// assert!(Halve.execute(3).await.unwrap().is_failure());
/// # });
/// ```
#[async_trait]
pub trait UseCase: Send + Sync {
    /// Input accepted by the operation.
    type Request: Send;
    /// Payload of a successful outcome.
    type Response: Send;

    /// Run the operation to completion.
    async fn execute(&self, request: Self::Request) -> Result<Outcome<Self::Response>, Error>;
}
