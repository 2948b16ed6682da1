//! Platform identifier mapping from Go toolchain names to Node.js names.
//!
//! goreleaser labels artifacts with `GOOS`/`GOARCH` values while npm platform
//! packages follow `process.platform`/`process.arch`. Identifiers missing
//! from the tables pass through unchanged.

use std::fmt;

/// `GOARCH` to `process.arch` translations.
const ARCH_TABLE: &[(&str, &str)] = &[("amd64", "x64"), ("386", "x86"), ("arm64", "arm64")];

/// `GOOS` to `process.platform` translations.
const OS_TABLE: &[(&str, &str)] = &[("windows", "win32")];

/// The `GOOS` value of Windows builds.
pub const WINDOWS_GOOS: &str = "windows";

/// A platform pair expressed in package-manager identifiers.
///
/// # Examples
///
/// ```
/// use safedep_release::platform::map_platform;
///
/// let platform = map_platform("windows", "amd64");
/// assert_eq!(platform.os, "win32");
/// assert_eq!(platform.arch, "x64");
/// assert_eq!(platform.to_string(), "win32-x64");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodePlatform<'a> {
    /// The `process.platform` value.
    pub os: &'a str,
    /// The `process.arch` value.
    pub arch: &'a str,
}

impl fmt::Display for NodePlatform<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Map a `GOARCH` value to its `process.arch` equivalent.
#[must_use]
pub fn map_arch(goarch: &str) -> &str {
    lookup(ARCH_TABLE, goarch)
}

/// Map a `GOOS` value to its `process.platform` equivalent.
#[must_use]
pub fn map_os(goos: &str) -> &str {
    lookup(OS_TABLE, goos)
}

/// Map a `GOOS`/`GOARCH` pair to its Node.js equivalent.
#[must_use]
pub fn map_platform<'a>(goos: &'a str, goarch: &'a str) -> NodePlatform<'a> {
    NodePlatform {
        os: map_os(goos),
        arch: map_arch(goarch),
    }
}

fn lookup<'a>(table: &[(&str, &'static str)], key: &'a str) -> &'a str {
    table
        .iter()
        .find(|(from, _)| *from == key)
        .map_or(key, |&(_, to)| to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::amd64("amd64", "x64")]
    #[case::i386("386", "x86")]
    #[case::arm64("arm64", "arm64")]
    fn maps_known_architectures(#[case] goarch: &str, #[case] expected: &str) {
        assert_eq!(map_arch(goarch), expected);
    }

    #[rstest]
    #[case::arm("arm")]
    #[case::riscv("riscv64")]
    #[case::ppc("ppc64le")]
    #[case::already_node("x64")]
    #[case::empty("")]
    fn unknown_architectures_pass_through(#[case] goarch: &str) {
        assert_eq!(map_arch(goarch), goarch);
    }

    #[test]
    fn windows_maps_to_win32() {
        assert_eq!(map_os(WINDOWS_GOOS), "win32");
    }

    #[rstest]
    #[case::linux("linux")]
    #[case::darwin("darwin")]
    #[case::freebsd("freebsd")]
    #[case::win32("win32")]
    #[case::upper_case("Windows")]
    fn other_operating_systems_pass_through(#[case] goos: &str) {
        assert_eq!(map_os(goos), goos);
    }

    #[test]
    fn map_platform_combines_both_tables() {
        let platform = map_platform("linux", "amd64");
        assert_eq!(
            platform,
            NodePlatform {
                os: "linux",
                arch: "x64"
            }
        );
        assert_eq!(platform.to_string(), "linux-x64");
    }
}
