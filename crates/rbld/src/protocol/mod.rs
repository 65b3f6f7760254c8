//! Line protocol spoken by policy-check clients.
//!
//! Every request is one line of the form `<verb> <target>`, where the verb is
//! `get` (look the target up) or `put` (report the target, not served yet) and
//! the target may be percent-encoded:
//!
//! ```text
//! get spammer@example.org
//! put mail.example.net
//! ```
//!
//! The daemon answers every line with exactly one fixed response line:
//!
//! ```text
//! 400           malformed request or backend failure
//! 500           no record, score below the limit, or `put`
//! 200 REJECT    score above the limit
//! ```
//!
//! The 400 and 500 lines carry a trailing space after the code.

mod command;
mod errors;
mod response;

pub(crate) use self::command::{Command, Verb};
pub(crate) use self::response::{Response, ResponseWriter};
