//! Reading prefix lists from files or stdin.
//!
//! Prefixes may be separated by whitespace, commas or semicolons. `#` starts a
//! comment that runs to the end of the line.

use crate::error::AggregateError;
use crate::models::Prefix;
use lazy_static::lazy_static;
use regex::Regex;
use std::io::BufRead;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"#.*|[^\s,;#]+").expect("Invalid Regex?");
}

/// Errors raised while reading a prefix list.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{name} line {line}: {source}")]
    Parse {
        name: String,
        line: usize,
        #[source]
        source: AggregateError,
    },
}

/// Split one line into prefix tokens, dropping any trailing comment.
pub fn split_tokens(line: &str) -> Vec<&str> {
    TOKEN_RE
        .find_iter(line)
        .map(|m| m.as_str())
        .take_while(|token| !token.starts_with('#'))
        .collect()
}

/// Parse every prefix from `reader`. `name` labels errors.
pub fn read_prefixes<R: BufRead>(reader: R, name: &str) -> Result<Vec<Prefix>, InputError> {
    let mut prefixes = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| InputError::Io {
            path: PathBuf::from(name),
            source,
        })?;
        for token in split_tokens(&line) {
            let prefix = token.parse::<Prefix>().map_err(|source| InputError::Parse {
                name: name.to_string(),
                line: i + 1,
                source,
            })?;
            prefixes.push(prefix);
        }
    }
    log::debug!("Read {} prefixes from {name}", prefixes.len());
    Ok(prefixes)
}

/// Parse every prefix from the file at `path`.
pub fn read_prefix_file(path: &Path) -> Result<Vec<Prefix>, InputError> {
    let file = std::fs::File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Reading prefixes from {}", path.display());
    read_prefixes(std::io::BufReader::new(file), &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_split_tokens() {
        assert_eq!(
            split_tokens("10.0.0.0/8, 192.0.2.0/24;2001:db8::/32"),
            vec!["10.0.0.0/8", "192.0.2.0/24", "2001:db8::/32"]
        );
    }

    #[test]
    fn test_split_tokens_comments() {
        assert_eq!(split_tokens("# only a comment"), Vec::<&str>::new());
        assert_eq!(
            split_tokens("  10.0.0.0/8 # office, 10.1.0.0/16"),
            vec!["10.0.0.0/8"]
        );
        assert_eq!(split_tokens("10.0.0.0/8#lab"), vec!["10.0.0.0/8"]);
        assert_eq!(split_tokens(""), Vec::<&str>::new());
    }

    #[test]
    fn test_read_prefixes() {
        let text = "# edge ranges\n192.0.2.0/25\n\n192.0.2.128/25 2001:db8::/32\n";
        let prefixes = read_prefixes(text.as_bytes(), "stdin").unwrap();
        assert_eq!(prefixes.len(), 3);
        assert_eq!(prefixes[2].to_string(), "2001:db8::/32");
    }

    #[test]
    fn test_read_prefixes_reports_line() {
        let text = "192.0.2.0/24\n192.0.2.0/99\n";
        let err = read_prefixes(text.as_bytes(), "list.txt").unwrap_err();
        assert!(matches!(err, InputError::Parse { line: 2, .. }));
        assert!(err.to_string().starts_with("list.txt line 2: Invalid prefix '192.0.2.0/99'"));
    }

    #[test]
    fn test_read_prefix_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "10.0.0.0/9").unwrap();
        writeln!(file, "10.128.0.0/9").unwrap();
        let prefixes = read_prefix_file(file.path()).unwrap();
        assert_eq!(prefixes.len(), 2);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_prefix_file(Path::new("does/not/exist.txt")).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }
}
