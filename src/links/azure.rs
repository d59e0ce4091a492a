//! Azure DevOps file links.
//!
//! Azure addresses files through query parameters rather than path segments,
//! and its line-end parameter is column-exclusive: with `lineEndColumn=1`,
//! `lineEnd` must be one past the intended last line.

pub(super) fn file_link(repository_url: &str, filename: &str, branch: &str, commit: &str) -> String {
    let reference = if commit.is_empty() { branch } else { commit };
    format!(
        "{repository_url}?path={}&version=GB{}&_a=contents",
        urlencoding::encode(filename),
        urlencoding::encode(reference),
    )
}

pub(super) fn file_line_link(
    repository_url: &str,
    filename: &str,
    branch: &str,
    commit: &str,
    start_line: u32,
    end_line: u32,
) -> String {
    if start_line == 0 {
        return file_link(repository_url, filename, branch, commit);
    }
    let end_line = if end_line == 0 { start_line } else { end_line } + 1;
    let reference = if commit.is_empty() { branch } else { commit };
    format!(
        "{repository_url}?path={}&version=GB{}&line={start_line}&lineEnd={end_line}&lineStartColumn=1&lineEndColumn=1&lineStyle=plain&_a=contents",
        urlencoding::encode(filename),
        urlencoding::encode(reference),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPO: &str = "https://dev.azure.com/org/project/_git/repo";

    #[test]
    fn test_file_link_escapes_path() {
        assert_eq!(
            file_link(REPO, "path/to/file", "branch", ""),
            "https://dev.azure.com/org/project/_git/repo?path=path%2Fto%2Ffile&version=GBbranch&_a=contents"
        );
    }

    #[test]
    fn test_file_link_prefers_commit() {
        assert_eq!(
            file_link(REPO, "f", "branch", "abc123"),
            "https://dev.azure.com/org/project/_git/repo?path=f&version=GBabc123&_a=contents"
        );
    }

    #[test]
    fn test_line_end_is_one_past_last_line() {
        assert_eq!(
            file_line_link(REPO, "f", "branch", "", 1, 1),
            "https://dev.azure.com/org/project/_git/repo?path=f&version=GBbranch&line=1&lineEnd=2&lineStartColumn=1&lineEndColumn=1&lineStyle=plain&_a=contents"
        );
        assert_eq!(
            file_line_link(REPO, "f", "branch", "", 5, 9),
            "https://dev.azure.com/org/project/_git/repo?path=f&version=GBbranch&line=5&lineEnd=10&lineStartColumn=1&lineEndColumn=1&lineStyle=plain&_a=contents"
        );
    }

    #[test]
    fn test_zero_end_line_means_single_line() {
        assert_eq!(
            file_line_link(REPO, "f", "branch", "", 3, 0),
            file_line_link(REPO, "f", "branch", "", 3, 3),
        );
    }

    #[test]
    fn test_zero_start_line_falls_back_to_file_link() {
        assert_eq!(
            file_line_link(REPO, "f", "branch", "", 0, 9),
            file_link(REPO, "f", "branch", ""),
        );
    }
}
