mod version;

#[doc(hidden)]
pub mod embed;

pub use version::Version;

#[doc(hidden)]
pub use ctor;

pub use verstamp_macros::*;

/// Version string of the running build.
///
/// Reports the version stamped at process startup (see the `main` attribute)
/// and falls back to the version this library was built with. The value is
/// fixed at build time; repeated calls return the same string.
pub fn get_version() -> &'static str {
    embed::get_app_version()
}
