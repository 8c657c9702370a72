//! Document text parsing (JSON/JSONC/YAML) into the generic tree.

use crate::error::CodecError;
use serde_json::Value;
use std::path::Path;

/// Textual syntax of a wire document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Jsonc,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from a path extension, ignoring case
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Some(DocumentFormat::Json),
            "jsonc" => Some(DocumentFormat::Jsonc),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }
}

/// Strip `//` and `/* */` comments that are not inside a string literal.
///
/// Line comments keep their terminating newline.
pub fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                while let Some(&n) = chars.peek() {
                    if n == '\n' || n == '\r' {
                        break;
                    }
                    chars.next();
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut previous = '\0';
                for n in chars.by_ref() {
                    if previous == '*' && n == '/' {
                        break;
                    }
                    previous = n;
                }
            }
            _ => result.push(c),
        }
    }

    result
}

/// Parse document text of a known format into a tree
pub fn parse_tree(content: &str, format: DocumentFormat) -> Result<Value, CodecError> {
    let tree = match format {
        DocumentFormat::Json => serde_json::from_str(content)?,
        DocumentFormat::Jsonc => serde_json::from_str(&strip_json_comments(content))?,
        DocumentFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(tree)
}

/// Parse document text, picking the format from the path extension
pub fn parse_tree_for_path(content: &str, path: &str) -> Result<Value, CodecError> {
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| CodecError::UnknownFileType(path.to_string()))?;
    parse_tree(content, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("mocks.yaml", Some(DocumentFormat::Yaml))]
    #[case("mocks.YML", Some(DocumentFormat::Yaml))]
    #[case("mocks.json", Some(DocumentFormat::Json))]
    #[case("dir/mocks.JSON", Some(DocumentFormat::Json))]
    #[case("mocks.jsonc", Some(DocumentFormat::Jsonc))]
    #[case("mocks.txt", None)]
    #[case("mocks", None)]
    #[case("", None)]
    fn test_format_from_path(#[case] path: &str, #[case] expected: Option<DocumentFormat>) {
        assert_eq!(DocumentFormat::from_path(path), expected);
    }

    #[rstest]
    #[case("{\"key\": \"value\"} // comment", "{\"key\": \"value\"} ")]
    #[case("{\"key\": \"value\"} /* block */", "{\"key\": \"value\"} ")]
    #[case("{\"a\": 1, // one\n\"b\": 2}", "{\"a\": 1, \n\"b\": 2}")]
    #[case("{/* multi\nline */\"a\": 1}", "{\"a\": 1}")]
    #[case("{\"url\": \"http://host/path\"}", "{\"url\": \"http://host/path\"}")]
    #[case("{\"text\": \"say \\\"/* hi */\\\"\"}", "{\"text\": \"say \\\"/* hi */\\\"\"}")]
    #[case("{\"path\": \"C:\\\\\"} // trailing", "{\"path\": \"C:\\\\\"} ")]
    fn test_strip_json_comments(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_json_comments(input), expected);
    }

    #[rstest]
    fn test_parse_tree_formats_converge() {
        let expected = json!({"url": "/a", "method": "POST"});

        let json = parse_tree(r#"{"url": "/a", "method": "POST"}"#, DocumentFormat::Json);
        let jsonc = parse_tree(
            "{\n  // endpoint\n  \"url\": \"/a\",\n  \"method\": \"POST\" /* verb */\n}",
            DocumentFormat::Jsonc,
        );
        let yaml = parse_tree("url: /a\nmethod: POST\n", DocumentFormat::Yaml);

        assert_eq!(json.expect("Should parse JSON"), expected);
        assert_eq!(jsonc.expect("Should parse JSONC"), expected);
        assert_eq!(yaml.expect("Should parse YAML"), expected);
    }

    #[rstest]
    #[case("invalid json", DocumentFormat::Json)]
    #[case("{\"a\": 1 // unterminated", DocumentFormat::Jsonc)]
    fn test_parse_tree_invalid_json(#[case] content: &str, #[case] format: DocumentFormat) {
        assert!(matches!(
            parse_tree(content, format).unwrap_err(),
            CodecError::Json(_)
        ));
    }

    #[rstest]
    fn test_parse_tree_invalid_yaml() {
        let result = parse_tree("invalid: yaml: [", DocumentFormat::Yaml);
        assert!(matches!(result.unwrap_err(), CodecError::Yaml(_)));
    }

    #[rstest]
    #[case("mocks.txt")]
    #[case("")]
    fn test_parse_tree_for_path_unknown_file_type(#[case] path: &str) {
        let result = parse_tree_for_path("{}", path);
        assert!(matches!(
            result.unwrap_err(),
            CodecError::UnknownFileType(ref p) if p == path
        ));
    }
}
