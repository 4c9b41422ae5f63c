//! Terminal output helpers.
//!
//! Status lines and the build summary go to stderr so the bundle path on
//! stdout stays machine readable.

mod format;
mod messages;

pub use format::{format_duration, format_size, print_build_summary};
pub use messages::{info, success};

/// Check if color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise colors follow whether stderr
/// is attended by a user.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}
