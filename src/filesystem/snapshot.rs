//! Serialized form of the tree.
//!
//! A snapshot is JSON text wrapping the root entry in a versioned envelope:
//!
//! ```json
//! {"version":1,"root":{"type":"dir","children":{"a.txt":{"type":"file","content":"hi"}}}}
//! ```
//!
//! Blobs without the envelope (a bare root entry) are accepted on read.

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu, ensure};

use super::node::{Directory, Node};

pub const FORMAT_VERSION: u32 = 1;

/// Deepest entry, in path segments, a snapshot can hold. Every directory level
/// adds two levels of JSON nesting and the decoder refuses input nested deeper
/// than 127, so trees are kept well below that.
pub const MAX_DEPTH: usize = 48;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    root: TaggedRoot<'a>,
}

/// Borrowed root written with the same `"type":"dir"` tag as nested directories.
#[derive(Serialize)]
#[serde(tag = "type", rename = "dir")]
struct TaggedRoot<'a> {
    children: &'a LinkedHashMap<String, Node>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSnapshot {
    Versioned { version: u32, root: Node },
    Legacy(Node),
}

pub fn encode(root: &Directory) -> Result<String, SnapshotError> {
    serde_json::to_string(&EnvelopeRef {
        version: FORMAT_VERSION,
        root: TaggedRoot {
            children: root.children(),
        },
    })
    .context(EncodeSnafu)
}

pub fn decode(raw: &str) -> Result<Directory, SnapshotError> {
    let root = match serde_json::from_str::<StoredSnapshot>(raw).context(DecodeSnafu)? {
        StoredSnapshot::Versioned { version, root } => {
            ensure!(version == FORMAT_VERSION, UnsupportedVersionSnafu { version });
            root
        }
        StoredSnapshot::Legacy(root) => root,
    };

    let Node::Directory(root) = root else {
        return RootNotDirectorySnafu.fail();
    };
    validate_names(&root)?;
    Ok(root)
}

/// Rejects names that could never be addressed by a path.
fn validate_names(dir: &Directory) -> Result<(), SnapshotError> {
    for (name, node) in dir.children() {
        ensure!(
            !name.is_empty() && !name.contains(['/', '\\']),
            InvalidNameSnafu { name: name.clone() }
        );
        if let Node::Directory(child) = node {
            validate_names(child)?;
        }
    }
    Ok(())
}

#[derive(Debug, Snafu)]
pub enum SnapshotError {
    #[snafu(display("Failed to serialize the tree"))]
    EncodeError { source: serde_json::Error },
    #[snafu(display("Stored tree is not valid"))]
    DecodeError { source: serde_json::Error },
    #[snafu(display("Unsupported snapshot version {}", version))]
    UnsupportedVersion { version: u32 },
    #[snafu(display("Stored root is not a directory"))]
    RootNotDirectory,
    #[snafu(display("Stored tree contains an unaddressable name '{}'", name))]
    InvalidName { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn sample_tree() -> Directory {
        Directory::new()
            .with_dir(
                "home",
                Directory::new().with_dir(
                    "user",
                    Directory::new()
                        .with_file("README.md", "# Title\n\nbody")
                        .with_file("empty", ""),
                ),
            )
            .with_dir("tmp", Directory::new())
    }

    #[test]
    fn test_round_trip_preserves_tree() {
        let tree = sample_tree();
        let encoded = encode(&tree).expect("Failed to encode");
        let decoded = decode(&encoded).expect("Failed to decode");
        assert_eq!(decoded, tree);
    }

    #[test]
    fn test_round_trip_preserves_child_order() {
        let tree = Directory::new()
            .with_file("z", "")
            .with_file("a", "")
            .with_file("m", "");
        let decoded = decode(&encode(&tree).expect("Failed to encode")).expect("Failed to decode");

        let names = decoded.entries().map(|e| e.name).collect::<Vec<_>>();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_encoded_envelope_carries_version() {
        let encoded = encode(&Directory::new()).expect("Failed to encode");
        let value: serde_json::Value = serde_json::from_str(&encoded).expect("Invalid JSON");

        assert_eq!(value["version"], FORMAT_VERSION);
        assert_eq!(value["root"]["type"], "dir");
    }

    #[test]
    fn test_decode_accepts_unversioned_blob() {
        let legacy = r#"{"type":"dir","children":{"home":{"type":"dir","children":{"a.txt":{"type":"file","content":"x"}}}}}"#;
        let decoded = decode(legacy).expect("Failed to decode legacy blob");

        let expected =
            Directory::new().with_dir("home", Directory::new().with_file("a.txt", "x"));
        assert_eq!(decoded, expected);
    }

    #[rstest]
    #[case("")]
    #[case("not json")]
    #[case("{\"type\":\"dir\"}")]
    #[case("{\"type\":\"symlink\",\"target\":\"/\"}")]
    #[case("[1, 2, 3]")]
    fn test_decode_rejects_malformed_input(#[case] raw: &str) {
        assert!(matches!(decode(raw), Err(SnapshotError::DecodeError { .. })));
    }

    #[test]
    fn test_decode_rejects_file_root() {
        let raw = r#"{"version":1,"root":{"type":"file","content":"oops"}}"#;
        assert!(matches!(decode(raw), Err(SnapshotError::RootNotDirectory)));
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let raw = r#"{"version":7,"root":{"type":"dir","children":{}}}"#;
        assert!(matches!(
            decode(raw),
            Err(SnapshotError::UnsupportedVersion { version: 7 })
        ));
    }

    #[test]
    fn test_round_trip_at_max_depth() {
        let mut tree = Directory::new().with_file("leaf.txt", "deep");
        for _ in 1..MAX_DEPTH {
            tree = Directory::new().with_dir("d", tree);
        }

        let decoded = decode(&encode(&tree).expect("Failed to encode")).expect("Failed to decode");
        assert_eq!(decoded, tree);
    }

    #[rstest]
    #[case("")]
    #[case("a/b")]
    #[case("a\\\\b")]
    fn test_decode_rejects_unaddressable_names(#[case] name: &str) {
        let raw = format!(
            r#"{{"version":1,"root":{{"type":"dir","children":{{"ok":{{"type":"dir","children":{{"{name}":{{"type":"file","content":""}}}}}}}}}}}}"#
        );
        assert!(matches!(
            decode(&raw),
            Err(SnapshotError::InvalidName { .. })
        ));
    }
}
