//! Bitbucket Cloud file links: `{url}/src/{ref}/{file}` with `#lines-{start}:{end}`.

pub(super) fn file_link(repository_url: &str, filename: &str, branch: &str, commit: &str) -> String {
    if !branch.is_empty() && !commit.is_empty() {
        // With both refs the commit pins the content and the branch rides
        // along as a query parameter.
        return format!(
            "{repository_url}/src/{commit}/{filename}?at={}",
            urlencoding::encode(branch)
        );
    }
    if !branch.is_empty() {
        return format!("{repository_url}/src/{branch}/{filename}");
    }
    format!("{repository_url}/src/{commit}/{filename}")
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
        let mut lines = format!("#lines-{start_line}");
        if end_line != 0 && end_line != start_line {
            lines.push_str(&format!(":{end_line}"));
        }
        link.push_str(&lines);
    }
    link
}
