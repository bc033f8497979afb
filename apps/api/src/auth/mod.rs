// Email-only login: the caller's identity lives in a signed cookie and is
// resolved once per request by the extractors in `session`.

pub mod handlers;
pub mod session;

pub use session::{AuthUser, Session};
