//! Request middleware for the console routes.
//!
//! - [`session`]: Authentication gate, lazy permission load and the
//!   [`Session`](session::Session) extractor
//! - [`guard`]: Per-route permission guard
//!
//! # Flow
//!
//! 1. Browser sends the `token` cookie
//! 2. [`session::require_session`] resolves the session's permission directory
//!    (loading it on first sight) and inserts it into request extensions
//! 3. [`guard::require_permission`] allows the route or redirects to the dashboard
//! 4. The handler renders, filtering affordances through the same directory
//! 5. An upstream 401 anywhere in the handler turns into cookie removal and a
//!    redirect to `/login` on the way out

pub mod guard;
pub mod session;
