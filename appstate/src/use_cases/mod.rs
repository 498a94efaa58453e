//! Application use cases driving the store modules.

mod sign_in;
mod sign_out;
mod toggle_theme;

pub use sign_in::{SignInRequest, SignInResponse, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use toggle_theme::ToggleThemeUseCase;
