//! Version advertised by the root info record.

use std::fmt;

/// `major.minor.patch`, rendered with `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SemVer(pub u32, pub u32, pub u32);

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let SemVer(major, minor, patch) = self;
        write!(f, "{major}.{minor}.{patch}")
    }
}

pub const API_VERSION: SemVer = SemVer(1, 0, 0);
