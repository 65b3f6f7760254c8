//! Test suites for the policy daemon.

pub(crate) mod support;
