use std::{cmp::Ordering, fmt::Display, str::FromStr};

use anyhow::bail;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Semantic version: `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<String>,
    pub build: Option<String>,
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{pre}")?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (s, build) = match s.split_once('+') {
            Some((head, build)) => (head, Some(build)),
            None => (s, None),
        };
        let (core, pre) = match s.split_once('-') {
            Some((head, pre)) => (head, Some(pre)),
            None => (s, None),
        };

        let parts: Vec<&str> = core.split('.').collect();

        if parts.len() != 3 {
            bail!("wrong version format: {s:?}")
        }

        let major = parse_numeric(parts[0])?;
        let minor = parse_numeric(parts[1])?;
        let patch = parse_numeric(parts[2])?;

        if let Some(pre) = pre {
            check_identifiers(pre, "pre-release")?;
        }
        if let Some(build) = build {
            check_identifiers(build, "build metadata")?;
        }

        Ok(Version {
            major,
            minor,
            patch,
            pre: pre.map(str::to_owned),
            build: build.map(str::to_owned),
        })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| cmp_pre(self.pre.as_deref(), other.pre.as_deref()))
            // build metadata carries no precedence of its own, it only breaks
            // ties so that cmp stays consistent with equality
            .then_with(|| self.build.cmp(&other.build))
    }
}

// Numeric components reject signs and non-digits that u64 parsing would let
// through.
fn parse_numeric(part: &str) -> anyhow::Result<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        bail!("invalid version component: {part:?}")
    }
    Ok(part.parse()?)
}

fn check_identifiers(label: &str, what: &str) -> anyhow::Result<()> {
    for ident in label.split('.') {
        if ident.is_empty() {
            bail!("empty {what} identifier in {label:?}")
        }
        if !ident.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
            bail!("invalid {what} identifier: {ident:?}")
        }
    }
    Ok(())
}

// A release outranks its pre-releases; pre-release labels compare identifier
// by identifier, numeric identifiers numerically and below alphanumeric ones.
fn cmp_pre(a: Option<&str>, b: Option<&str>) -> Ordering {
    let (a, b) = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(a), Some(b)) => (a, b),
    };

    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => l.cmp(r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: None,
            build: None,
        }
    }

    /// Structured form of the version reported by [`crate::get_version`].
    pub fn current() -> anyhow::Result<Self> {
        let v = Version::from_str(crate::embed::get_app_version());
        debug!("current version: {:?}", v);
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_triple() {
        let v = Version::from_str("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
        assert_eq!(v.pre, None);
        assert_eq!(v.build, None);
    }

    #[test]
    fn parses_pre_release_and_build_labels() {
        let v = Version::from_str("1.2.3-rc.1+build5").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 2, 3));
        assert_eq!(v.pre.as_deref(), Some("rc.1"));
        assert_eq!(v.build.as_deref(), Some("build5"));
    }

    #[test]
    fn display_round_trips() {
        for s in ["0.1.0", "1.2.3-alpha", "1.2.3+20260801", "1.2.3-rc.1+build5"] {
            assert_eq!(Version::from_str(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn rejects_wrong_shapes() {
        for s in ["", "1", "1.2", "1.2.3.4", "a.b.c", "1.-2.3", "1.2.3-", "1.2.3+", "1.2.3-rc..1"] {
            assert!(Version::from_str(s).is_err(), "accepted {s:?}");
        }
    }

    #[test]
    fn release_progression_orders() {
        let ordered = ["1.2.3", "1.2.4", "1.3.0", "2.0.0"];
        for pair in ordered.windows(2) {
            let a = Version::from_str(pair[0]).unwrap();
            let b = Version::from_str(pair[1]).unwrap();
            assert!(a < b, "{a} not below {b}");
        }
    }

    #[test]
    fn pre_release_sorts_below_the_release() {
        let ordered = ["1.0.0-alpha", "1.0.0-alpha.1", "1.0.0-alpha.beta", "1.0.0-beta", "1.0.0-beta.2", "1.0.0-beta.11", "1.0.0-rc.1", "1.0.0"];
        for pair in ordered.windows(2) {
            let a = Version::from_str(pair[0]).unwrap();
            let b = Version::from_str(pair[1]).unwrap();
            assert!(a < b, "{a} not below {b}");
        }
    }

    #[test]
    fn serde_keeps_optional_labels() {
        let v = Version::from_str("1.2.3-rc.1+build5").unwrap();
        let json = serde_json::to_string(&v).unwrap();
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
