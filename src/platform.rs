//! Host platform identification

/// Operating system family, as far as character input is concerned
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PlatformKind {
    /// Windows console; input is read with a raw keystroke primitive
    Windows,
    /// Linux, macOS (Darwin) and the BSDs; input is read from a terminal
    /// placed in non-canonical, no-echo mode
    PosixLike,
    /// Anything else
    Unsupported,
}

impl PlatformKind {
    /// Classifies an operating system identification string,
    /// such as the `sysname` field reported by `uname`.
    ///
    /// Matching is a case-insensitive substring search. A string naming
    /// Windows is classified as `Windows` even if it also names a POSIX
    /// system.
    ///
    /// # Examples
    ///
    /// ```
    /// # use getc::PlatformKind;
    /// assert_eq!(PlatformKind::from_system_name("Linux-5.15"), PlatformKind::PosixLike);
    /// assert_eq!(PlatformKind::from_system_name("Darwin"), PlatformKind::PosixLike);
    /// assert_eq!(PlatformKind::from_system_name("Windows"), PlatformKind::Windows);
    /// assert_eq!(PlatformKind::from_system_name("SomeOS"), PlatformKind::Unsupported);
    /// ```
    pub fn from_system_name(name: &str) -> PlatformKind {
        let name = name.to_lowercase();

        if name.contains("windows") {
            PlatformKind::Windows
        } else if ["linux", "darwin", "bsd"].iter().any(|s| name.contains(s)) {
            PlatformKind::PosixLike
        } else {
            PlatformKind::Unsupported
        }
    }
}
