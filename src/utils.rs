// src/utils.rs
use anyhow::{Context, Result};
use scraper::Html;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Collapse runs of whitespace and line breaks into single spaces
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop HTML markup from a description, keeping its text
pub fn strip_html(text: &str) -> String {
    if !text.contains('<') {
        return clean_text(text);
    }
    let fragment = Html::parse_fragment(text);
    clean_text(&fragment.root_element().text().collect::<Vec<_>>().join(" "))
}

/// Trimmed value, or `None` when blank
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Case-insensitive containment that respects word edges, so "Java" does not
/// match "JavaScript". `haystack` must already be lowercase.
pub fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    let needle = keyword.to_lowercase();
    if needle.is_empty() {
        return false;
    }

    let is_word = |c: char| c.is_alphanumeric();
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(&needle) {
        let begin = start + pos;
        let end = begin + needle.len();
        let before_ok = haystack[..begin].chars().next_back().map_or(true, |c| !is_word(c));
        let after_ok = haystack[end..].chars().next().map_or(true, |c| !is_word(c));
        if before_ok && after_ok {
            return true;
        }
        start = begin + haystack[begin..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// Ensure directory exists
pub async fn ensure_directory(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Replace a file's content so readers see either the old or the new version, never a mix.
/// Each write goes through its own temp file in the target directory, so concurrent
/// writers never share one.
pub async fn write_file_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    ensure_directory(&dir).await?;

    let target = path.to_path_buf();
    let content = content.to_vec();
    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut temp = tempfile::Builder::new()
            .prefix(".")
            .suffix(".tmp")
            .tempfile_in(&dir)
            .with_context(|| format!("Failed to create temp file in: {}", dir.display()))?;
        temp.write_all(&content)
            .and_then(|_| temp.as_file().sync_all())
            .with_context(|| format!("Failed to write file: {}", temp.path().display()))?;
        // dropping an unpersisted temp file removes it
        temp.persist(&target)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace file: {}", target.display()))?;
        Ok(())
    })
    .await
    .context("File write task panicked")?
}

/// Read file content as string with proper error context
pub async fn read_file_safe(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Data\n\n  Analyst\t role "), "Data Analyst role");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<p>Knowledge of <b>SQL</b></p><ul><li>Excel</li></ul>"),
            "Knowledge of SQL Excel"
        );
        assert_eq!(strip_html("plain   text"), "plain text");
    }

    #[test]
    fn test_contains_keyword_word_edges() {
        let text = "experience with javascript, sql and power bi.";
        assert!(contains_keyword(text, "SQL"));
        assert!(contains_keyword(text, "Power BI"));
        assert!(!contains_keyword(text, "Java"));
        assert!(contains_keyword("c++ and c#", "C++"));
        assert!(contains_keyword("tableau", "Tableau"));
        assert!(!contains_keyword("mysqlx", "MySQL"));
        assert!(contains_keyword("nosql, then sql", "SQL"));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Pune ")), Some("Pune"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[tokio::test]
    async fn test_write_file_atomic_replaces_content() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.csv");

        write_file_atomic(&path, b"first").await.unwrap();
        write_file_atomic(&path, b"second").await.unwrap();

        assert_eq!(read_file_safe(&path).await.unwrap(), "second");
        let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("out.csv")]);
    }
}
