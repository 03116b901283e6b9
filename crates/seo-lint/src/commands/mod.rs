//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;

pub mod analyze;
pub mod checklist;
pub mod density;
pub mod info;
pub mod keywords;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read an input file, or stdin when `path` is `-`, within the size limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    if path.as_str() == "-" {
        return read_stdin(max_bytes);
    }

    // Check the size before reading the file into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut content = String::new();
    let stdin = std::io::stdin().lock();
    match max_bytes {
        Some(max) => {
            // One byte past the limit is enough to know it was exceeded.
            let read = stdin
                .take(max as u64 + 1)
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            if read > max {
                anyhow::bail!("input too large: stdin exceeds {max} bytes");
            }
        }
        None => {
            let mut stdin = stdin;
            stdin
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
        }
    }
    Ok(content)
}

/// Whether an input should be treated as markdown.
pub fn is_markdown(path: &Utf8Path) -> bool {
    matches!(path.extension(), Some("md" | "markdown"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn reads_file_under_limit() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "hello").unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        assert_eq!(read_input_file(&path, Some(10)).unwrap(), "hello");
    }

    #[test]
    fn rejects_file_over_limit() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "hello world").unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let err = read_input_file(&path, Some(5)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }

    #[test]
    fn missing_file_has_context() {
        let err = read_input_file(Utf8Path::new("/no/such/file.md"), None).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.md"));
    }

    #[test]
    fn markdown_detection() {
        assert!(is_markdown(Utf8Path::new("post.md")));
        assert!(!is_markdown(Utf8Path::new("post.txt")));
        assert!(!is_markdown(Utf8Path::new("-")));
    }
}
