use std::str::FromStr;

use anyhow::bail;
use once_cell::sync::OnceCell;

use crate::Version;

#[doc(hidden)]
static APP_VERSION: OnceCell<&'static str> = OnceCell::new();

// Injected by build.rs; a build that produced no version does not compile.
#[doc(hidden)]
pub const BUILD_VERSION: &str = env!("VERSTAMP_BUILD_VERSION");

#[doc(hidden)]
pub fn __set_version(version: &'static str) {
    let _ = APP_VERSION.set(version);
}

#[doc(hidden)]
pub fn get_app_version() -> &'static str {
    APP_VERSION.get().copied().unwrap_or(BUILD_VERSION)
}

#[doc(hidden)]
pub fn embed(version: &'static str) {
    __set_version(version);
    #[cfg(not(debug_assertions))]
    unsafe {
        core::ptr::read_volatile(&EMBED_REGION as *const _);
    }
}

// 20 bytes
// hex: 0x17425645525354414d504256455253494f4e4217
#[doc(hidden)]
pub const EMBED_BOUNDS: &[u8] = b"\x17\x42VERSTAMP\x42VERSION\x42\x17";

#[doc(hidden)]
const VERSION_FIELD_LEN: usize = 32;

#[doc(hidden)]
const fn version_field_ascii_padded(s: &str) -> [u8; VERSION_FIELD_LEN] {
    let bytes = s.as_bytes();
    let mut out = [0u8; VERSION_FIELD_LEN];
    let mut i = 0;
    while i < bytes.len() && i < VERSION_FIELD_LEN {
        out[i] = bytes[i];
        i += 1;
    }
    out
}

#[doc(hidden)]
const VERSION_BYTES: [u8; VERSION_FIELD_LEN] = version_field_ascii_padded(BUILD_VERSION);

#[doc(hidden)]
pub const EMBED_REGION_LEN: usize = 20 + VERSION_FIELD_LEN + 20;

// Assert layout at compile time; an empty or oversized version is a build
// error, not a runtime fallback.
const _: () = {
    assert!(EMBED_BOUNDS.len() == 20);
    assert!(!BUILD_VERSION.is_empty());
    assert!(BUILD_VERSION.len() <= VERSION_FIELD_LEN);
    assert!(EMBED_REGION_LEN == 72);
};

// Build const array without any runtime code or allocation
#[doc(hidden)]
#[link_section = ".verstamp_version"]
#[used]
pub static EMBED_REGION: [u8; EMBED_REGION_LEN] = {
    let mut buf = [0u8; EMBED_REGION_LEN];
    let mut off = 0;

    // bounds start
    {
        let b = EMBED_BOUNDS;
        let mut i = 0;
        while i < b.len() {
            buf[off + i] = b[i];
            i += 1;
        }
        off += b.len();
    }

    // padded-str-version
    {
        let b = VERSION_BYTES;
        let mut i = 0;
        while i < b.len() {
            buf[off + i] = b[i];
            i += 1;
        }
        off += b.len();
    }

    // bounds end
    {
        let b = EMBED_BOUNDS;
        let mut i = 0;
        while i < b.len() {
            buf[off + i] = b[i];
            i += 1;
        }
    }
    buf
};

/// Scans a binary image for the stamp region and parses the version field.
#[doc(hidden)]
pub fn find_embedded_version(bin_bytes: &[u8]) -> anyhow::Result<Version> {
    let start = bin_bytes
        .windows(EMBED_BOUNDS.len())
        .position(|window| window == EMBED_BOUNDS)
        .ok_or_else(|| anyhow::anyhow!("failed to find stamp bounds start"))?;
    let end = bin_bytes
        .windows(EMBED_BOUNDS.len())
        .rposition(|window| window == EMBED_BOUNDS)
        .ok_or_else(|| anyhow::anyhow!("failed to find stamp bounds end"))?
        + EMBED_BOUNDS.len();
    if end - start != EMBED_REGION_LEN {
        bail!("invalid stamp region size")
    }

    let field_offset = start + EMBED_BOUNDS.len();
    let version_bytes = &bin_bytes[field_offset..field_offset + VERSION_FIELD_LEN];
    let version_str = std::str::from_utf8(version_bytes)?;
    Version::from_str(version_str.trim_end_matches(char::from(0)).trim())
}
