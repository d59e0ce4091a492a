//! GitHub file links: `{url}/blob/{ref}/{file}` with `#L{start}-L{end}`.

pub(super) fn file_link(repository_url: &str, filename: &str, branch: &str, commit: &str) -> String {
    let reference = if commit.is_empty() { branch } else { commit };
    format!("{repository_url}/blob/{reference}/{filename}")
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
        link.push_str(&format!("#L{start_line}-L{end_line}"));
    }
    link
}
