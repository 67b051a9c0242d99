//! Command names, flags and special values for the hg and git executors

/// Default Mercurial binary name
pub const HG_COMMAND: &str = "hg";

/// Default Git binary name
pub const GIT_COMMAND: &str = "git";

/// Mercurial subcommands and flags
pub mod hg {
    pub const LOG: &str = "log";
    /// Specify template
    pub const TEMPLATE: &str = "--template";
    /// Specify repository root
    pub const REPOSITORY: &str = "-R";
    /// Ignore user aliases, defaults and output tweaks
    pub const PLAIN_ENV: (&str, &str) = ("HGPLAIN", "1");
}

/// Git subcommands and flags
pub mod git {
    pub const LOG: &str = "log";
    /// Point git at a bare repository
    pub const GIT_DIR: &str = "--git-dir";
    /// Keep signature verification output out of the log
    pub const NO_SHOW_SIGNATURE: &str = "--no-show-signature";
}

/// Repository layout used by hg-git
pub mod layout {
    /// Mercurial metadata directory at the repository root
    pub const HG_DIR: &str = ".hg";

    /// Bare Git mirror maintained by hg-git, relative to the repository root
    pub const GIT_MIRROR: &str = ".hg/git";

    /// Mapfile read by hg-git, relative to the repository root
    pub const MAPFILE: &str = ".hg/git-mapfile";
}

/// Environment variables overriding the binaries
pub mod env {
    pub const HG: &str = "HGSYNC_HG";
    pub const GIT: &str = "HGSYNC_GIT";
}
