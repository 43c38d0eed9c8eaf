//! Go file naming conventions.

/// Returns `true` for `*.go` file names.
#[must_use]
pub fn is_go_file(file_name: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext == "go")
}

/// Returns `true` if `file_name` follows the Go test file convention, `*_test.go`.
///
/// # Examples
///
/// ```
/// use gosplit_parser::is_test_file;
/// assert!(is_test_file("widget_test.go"));
/// assert!(!is_test_file("widget.go"));
/// assert!(!is_test_file("_test.go"));
/// ```
#[must_use]
pub fn is_test_file(file_name: &str) -> bool {
    file_name
        .strip_suffix("_test.go")
        .is_some_and(|stem| !stem.is_empty())
}

/// Name of the test file accompanying a non-test Go file: `server.go` -> `server_test.go`.
#[must_use]
pub fn companion_test_file(file_name: &str) -> Option<String> {
    if is_test_file(file_name) {
        return None;
    }
    let stem = file_name.strip_suffix(".go")?;
    (!stem.is_empty()).then(|| format!("{stem}_test.go"))
}

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

/// Returns `true` if the go tool would restrict `<stem>.go` (or
/// `<stem>_test.go`) to one GOOS or GOARCH: an element after the first `_`
/// ending the stem as `_GOOS`, `_GOARCH`, or `_GOOS_GOARCH`.
///
/// ```
/// use gosplit_parser::has_build_suffix;
/// assert!(has_build_suffix("open_windows"));
/// assert!(!has_build_suffix("windows"));
/// ```
#[must_use]
pub fn has_build_suffix(stem: &str) -> bool {
    let Some((_, rest)) = stem.split_once('_') else {
        return false;
    };
    let parts: Vec<&str> = rest.split('_').collect();
    match parts.as_slice() {
        [.., os, arch] if KNOWN_OS.contains(os) && KNOWN_ARCH.contains(arch) => true,
        [.., last] => KNOWN_OS.contains(last) || KNOWN_ARCH.contains(last),
        [] => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("main.go", true)]
    #[case("handler_test.go", true)]
    #[case("notes.md", false)]
    #[case("go", false)]
    #[case("archive.go.bak", false)]
    fn go_files(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_go_file(name), expected, "{name}");
    }

    #[rstest]
    #[case("handler_test.go", true)]
    #[case("main_test.go", true)]
    #[case("handler.go", false)]
    #[case("_test.go", false)]
    #[case("handler_test.rs", false)]
    fn test_files(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_test_file(name), expected, "{name}");
    }

    #[rstest]
    #[case("open_windows", true)]
    #[case("set_amd64", true)]
    #[case("sense_linux_arm64", true)]
    #[case("windows", false)]
    #[case("linux_server", false)]
    #[case("load_test", false)]
    #[case("http_server", false)]
    fn build_suffixes(#[case] stem: &str, #[case] expected: bool) {
        assert_eq!(has_build_suffix(stem), expected, "{stem}");
    }

    #[test]
    fn companion_of_source_file() {
        assert_eq!(companion_test_file("server.go").as_deref(), Some("server_test.go"));
        assert_eq!(companion_test_file("server_test.go"), None);
        assert_eq!(companion_test_file("README"), None);
    }
}
