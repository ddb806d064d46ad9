use crate::{Result, VendorFixError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the project root that holds vendored sources and the manifest.
pub const VENDOR_DIR: &str = "vendor";

/// File name of the govendor manifest inside [`VENDOR_DIR`].
pub const MANIFEST_FILE: &str = "vendor.json";

/// One vendored dependency entry from `vendor.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    #[serde(
        rename = "checksumSHA1",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub checksum: Option<String>,

    /// Import path, e.g. `github.com/coldze/foo`
    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub revision: String,

    #[serde(
        rename = "revisionTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub revision_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(
        rename = "versionExact",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub version_exact: Option<String>,
}

/// Parsed `vendor/vendor.json`. Package order matches the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<String>,

    #[serde(rename = "rootPath", default, skip_serializing_if = "Option::is_none")]
    pub root_path: Option<String>,

    #[serde(rename = "package", default)]
    pub packages: Vec<PackageRecord>,
}

impl Manifest {
    pub fn from_slice(data: &[u8], source: &Path) -> Result<Self> {
        serde_json::from_slice(data).map_err(|source_err| VendorFixError::Parse {
            path: source.to_path_buf(),
            source: source_err,
        })
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(VENDOR_DIR).join(MANIFEST_FILE)
}

/// Read and parse the manifest under `root`. Either the whole package list is
/// returned or an error; nothing is partially loaded.
pub fn parse_manifest(root: &Path) -> Result<Manifest> {
    let path = manifest_path(root);
    let data = fs::read(&path).map_err(|source| VendorFixError::Io {
        path: path.clone(),
        source,
    })?;
    let manifest = Manifest::from_slice(&data, &path)?;
    log::debug!(
        "Loaded manifest {} ({} packages)",
        path.display(),
        manifest.len()
    );
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn write_manifest(root: &Path, body: &str) {
        fs::create_dir_all(root.join(VENDOR_DIR)).unwrap();
        fs::write(manifest_path(root), body).unwrap();
    }

    #[test]
    fn parses_packages_in_file_order() {
        let temp = tempdir().unwrap();
        write_manifest(
            temp.path(),
            r#"{
                "comment": "",
                "ignore": "test",
                "package": [
                    {
                        "checksumSHA1": "Zz1Xh3x0Vt5oH5xQ0p8aH0ZQ1xE=",
                        "path": "github.com/coldze/primitives",
                        "revision": "c1b2a3",
                        "revisionTime": "2018-01-10T12:00:00Z"
                    },
                    {
                        "path": "github.com/pkg/errors",
                        "revision": "645ef00459ed84a119197bfb8d8205042c6df63d",
                        "version": "v0.8.0",
                        "versionExact": "v0.8.0"
                    }
                ],
                "rootPath": "github.com/coldze/service"
            }"#,
        );

        let manifest = parse_manifest(temp.path()).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.packages[0].path, "github.com/coldze/primitives");
        assert_eq!(
            manifest.packages[0].checksum.as_deref(),
            Some("Zz1Xh3x0Vt5oH5xQ0p8aH0ZQ1xE=")
        );
        assert_eq!(
            manifest.packages[0].revision_time.as_deref(),
            Some("2018-01-10T12:00:00Z")
        );
        assert_eq!(manifest.packages[1].path, "github.com/pkg/errors");
        assert_eq!(manifest.packages[1].version.as_deref(), Some("v0.8.0"));
        assert_eq!(manifest.packages[1].version_exact.as_deref(), Some("v0.8.0"));
        assert_eq!(
            manifest.root_path.as_deref(),
            Some("github.com/coldze/service")
        );
    }

    #[test]
    fn unknown_fields_are_ignored_and_missing_fields_default() {
        let temp = tempdir().unwrap();
        write_manifest(
            temp.path(),
            r#"{"heading": 1, "package": [{"tree": true, "origin": "x"}]}"#,
        );

        let manifest = parse_manifest(temp.path()).unwrap();
        assert_eq!(manifest.packages, vec![PackageRecord::default()]);
    }

    #[test]
    fn missing_package_field_yields_empty_manifest() {
        let temp = tempdir().unwrap();
        write_manifest(temp.path(), r#"{"comment": "nothing here"}"#);

        let manifest = parse_manifest(temp.path()).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn absent_manifest_is_io_error() {
        let temp = tempdir().unwrap();
        let err = parse_manifest(temp.path()).unwrap_err();
        match err {
            VendorFixError::Io { path, source } => {
                assert_eq!(path, manifest_path(temp.path()));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_manifest_is_parse_error() {
        let temp = tempdir().unwrap();
        write_manifest(temp.path(), r#"{"package": [{"path": "github.com/coldze/a""#);

        let err = parse_manifest(temp.path()).unwrap_err();
        assert!(matches!(err, VendorFixError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn wrong_schema_is_parse_error() {
        let temp = tempdir().unwrap();
        write_manifest(temp.path(), r#"{"package": {"path": "github.com/coldze/a"}}"#);

        let err = parse_manifest(temp.path()).unwrap_err();
        assert!(matches!(err, VendorFixError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn reserialized_record_keeps_path_and_revision() {
        let input = br#"{"package":[{"path":"github.com/coldze/foo","revision":"abc123"}]}"#;
        let manifest = Manifest::from_slice(input, Path::new("inline")).unwrap();

        let json = manifest.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["package"][0]["path"], "github.com/coldze/foo");
        assert_eq!(value["package"][0]["revision"], "abc123");
        assert!(value["package"][0].get("checksumSHA1").is_none());

        let again = Manifest::from_slice(json.as_bytes(), Path::new("inline")).unwrap();
        assert_eq!(again, manifest);
    }
}
