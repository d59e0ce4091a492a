//! GitLab file links: `{url}/-/blob/{ref}/{file}` with `#L{start}-{end}`.

pub(super) fn file_link(repository_url: &str, filename: &str, branch: &str, commit: &str) -> String {
    let reference = if commit.is_empty() { branch } else { commit };
    format!("{repository_url}/-/blob/{reference}/{filename}")
}

pub(super) fn file_line_link(
    repository_url: &str,
    filename: &str,
    branch: &str,
    commit: &str,
    start_line: u32,
    end_line: u32,
) -> String {
    let mut link = file_link(repository_url, filename, branch, commit);
    if start_line != 0 {
        let end_line = if end_line == 0 { start_line } else { end_line };
        link.push_str(&format!("#L{start_line}-{end_line}"));
    }
    link
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPO: &str = "https://gitlab.com/group/sub/repo";

    #[test]
    fn test_file_link() {
        assert_eq!(
            file_link(REPO, "src/lib.rs", "main", ""),
            "https://gitlab.com/group/sub/repo/-/blob/main/src/lib.rs"
        );
        assert_eq!(
            file_link(REPO, "src/lib.rs", "main", "abc123"),
            "https://gitlab.com/group/sub/repo/-/blob/abc123/src/lib.rs"
        );
    }

    #[test]
    fn test_line_range_has_single_l_prefix() {
        assert_eq!(
            file_line_link(REPO, "f", "main", "", 3, 7),
            "https://gitlab.com/group/sub/repo/-/blob/main/f#L3-7"
        );
        assert_eq!(
            file_line_link(REPO, "f", "main", "", 3, 0),
            "https://gitlab.com/group/sub/repo/-/blob/main/f#L3-3"
        );
    }

    #[test]
    fn test_zero_start_line_omits_anchor() {
        assert_eq!(
            file_line_link(REPO, "f", "main", "", 0, 7),
            "https://gitlab.com/group/sub/repo/-/blob/main/f"
        );
    }
}
