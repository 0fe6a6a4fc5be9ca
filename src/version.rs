//! Crate version helpers and compile-time metadata.

/// Crate semantic version from Cargo.toml.
pub const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name used as the User-Agent product token.
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

/// Optional Git description (e.g., "v0.1.0-13-gabcdef1") injected at build time.
///
/// Example:
/// `LIQUID_GIT_DESCRIBE="$(git describe --always --dirty --tags)" cargo build`
pub const GIT_DESCRIBE: Option<&str> = option_env!("LIQUID_GIT_DESCRIBE");

/// Enabled cargo features baked into the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub native: bool,
}

impl Features {
    pub const fn current() -> Self {
        Self { native: cfg!(feature = "native") }
    }
}

/// Top-level version information.
#[derive(Debug, Clone, Copy)]
pub struct VersionInfo {
    pub crate_version: &'static str,
    pub git_describe: Option<&'static str>,
    pub target_os: &'static str,
    pub target_arch: &'static str,
    pub features: Features,
}

impl VersionInfo {
    pub const fn new() -> Self {
        Self {
            crate_version: CRATE_VERSION,
            git_describe: GIT_DESCRIBE,
            target_os: std::env::consts::OS,
            target_arch: std::env::consts::ARCH,
            features: Features::current(),
        }
    }
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the crate semantic version (e.g., `"0.1.0"`).
#[inline]
pub fn version() -> &'static str {
    CRATE_VERSION
}

/// Human-readable version string with git describe, platform and features.
pub fn full() -> String {
    let info = VersionInfo::new();
    let git = info.git_describe.unwrap_or("nogit");
    let feats = if info.features.native { "native" } else { "none" };
    format!(
        "{CRATE_NAME}/{} ({git}; {}/{}; features:{feats})",
        info.crate_version, info.target_os, info.target_arch
    )
}

/// User-Agent sent by the HTTP transport.
///
/// Example: `liquid-sdk/0.1.0 (nogit; linux/x86_64; features:native)`
#[inline]
pub fn user_agent() -> String {
    full()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_constants_present() {
        assert!(!CRATE_VERSION.is_empty());
        let ua = user_agent();
        assert!(ua.starts_with("liquid-sdk/"));
        assert!(ua.contains(CRATE_VERSION));
        assert_eq!(VersionInfo::default().target_os, std::env::consts::OS);
    }
}
