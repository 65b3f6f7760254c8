//! Version reporting for the `rbld` binary.
//!
//! `-V` and `--version` are recognised before configuration loading so the
//! version can be printed without a valid configuration file or database.

use std::ffi::OsStr;

const VERSION_FLAGS: [&str; 2] = ["-V", "--version"];

/// Line printed in answer to a version request.
pub const VERSION_LINE: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Returns true when the command line asks for the version.
///
/// The first element is the program name and is skipped. Scanning stops at a
/// `--` separator.
pub fn version_requested<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter()
        .skip(1)
        .take_while(|argument| AsRef::<OsStr>::as_ref(argument) != OsStr::new("--"))
        .any(|argument| {
            let argument: &OsStr = argument.as_ref();
            VERSION_FLAGS.iter().any(|flag| argument == OsStr::new(flag))
        })
}
