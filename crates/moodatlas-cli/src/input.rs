use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Read a whole file, or stdin when no path is given.
pub fn read_text(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

/// Parse JSON input, naming the source in the error.
pub fn parse_json<T: DeserializeOwned>(text: &str, source: &str) -> anyhow::Result<T> {
    serde_json::from_str(text).with_context(|| format!("parsing {source} as JSON"))
}

pub fn source_name(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[1, 2]").unwrap();
        let text = read_text(Some(tmp.path())).unwrap();
        let v: Vec<u32> = parse_json(&text, "test").unwrap();
        assert_eq!(v, vec![1, 2]);
    }

    #[test]
    fn bad_json_names_source() {
        let err = parse_json::<Vec<u32>>("{", "tags.json").unwrap_err();
        assert!(err.to_string().contains("tags.json"));
    }

    #[test]
    fn missing_file_errors() {
        assert!(read_text(Some(Path::new("/nonexistent/input.json"))).is_err());
        assert_eq!(source_name(None), "stdin");
    }
}
