//! Bitbucket Server file links: `{url}/browse/{file}?at={ref}` with `#{start}-{end}`.

pub(super) fn file_link(repository_url: &str, filename: &str, branch: &str, commit: &str) -> String {
    if !commit.is_empty() {
        return format!("{repository_url}/browse/{filename}?at={commit}");
    }
    if !branch.is_empty() {
        return format!("{repository_url}/browse/{filename}?at={branch}");
    }
    String::new()
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
        let mut lines = format!("#{start_line}");
        if end_line != 0 && end_line != start_line {
            lines.push_str(&format!("-{end_line}"));
        }
        link.push_str(&lines);
    }
    link
}
