// file: src/exporter/json.rs
// description: json export of navigator layers without partial output on failure

use crate::error::{Result, TtpError};
use crate::models::NavigatorLayer;
use crate::utils::Validator;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LayerWriter {
    output_path: PathBuf,
}

impl LayerWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Result<Self> {
        let output_path = output_path.into();
        Validator::validate_output_path(&output_path)?;
        Ok(Self { output_path })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Pretty JSON with two-space indentation and a trailing newline.
    pub fn render(layer: &NavigatorLayer) -> Result<String> {
        let mut rendered = serde_json::to_string_pretty(layer)?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// Renders first, then writes a uniquely named temp file beside the target
    /// and persists it into place, so the target is either the complete layer
    /// or untouched.
    pub fn write(&self, layer: &NavigatorLayer) -> Result<&Path> {
        let rendered = Self::render(layer)?;

        let dir = match self.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|source| TtpError::FileOperation {
                    path: parent.to_path_buf(),
                    source,
                })?;
                parent
            }
            None => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(|source| TtpError::FileOperation {
            path: dir.to_path_buf(),
            source,
        })?;
        debug!("Writing layer to temporary file {}", temp.path().display());

        temp.write_all(rendered.as_bytes())
            .map_err(|source| TtpError::FileOperation {
                path: temp.path().to_path_buf(),
                source,
            })?;

        // dropping the returned handle on failure removes the temp file
        temp.persist(&self.output_path)
            .map_err(|e| TtpError::FileOperation {
                path: self.output_path.clone(),
                source: e.error,
            })?;

        info!("Navigator layer saved to {}", self.output_path.display());
        Ok(&self.output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{ParseMode, extract};
    use crate::layer::LayerBuilder;
    use crate::models::Source;
    use crate::taxonomy::stix::tests::sample_taxonomy;
    use serde_json::Value;
    use tempfile::tempdir;

    fn sample_layer(text: &str) -> NavigatorLayer {
        let taxonomy = sample_taxonomy();
        let extraction = extract(text, ParseMode::Text, &taxonomy);
        LayerBuilder::default()
            .build(&extraction, 100, "Test", &Source::Text(text.into()), "17")
            .unwrap()
    }

    #[test]
    fn test_writer_rejects_directory() {
        let dir = tempdir().unwrap();
        assert!(LayerWriter::new(dir.path()).is_err());
    }

    #[test]
    fn test_write_creates_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("layer.json");
        let writer = LayerWriter::new(&path).unwrap();

        writer.write(&sample_layer("T1566 and T1078")).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["name"], "Test");
        assert_eq!(written["techniques"].as_array().unwrap().len(), 2);
        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("layer.json")]);
    }

    #[test]
    fn test_write_leaves_neighbouring_files_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layer.json");
        let neighbour = dir.path().join("layer.json.tmp");
        fs::write(&neighbour, "user notes").unwrap();

        LayerWriter::new(&path)
            .unwrap()
            .write(&sample_layer("T1566"))
            .unwrap();

        assert_eq!(fs::read_to_string(&neighbour).unwrap(), "user notes");
        assert!(path.exists());
    }

    #[test]
    fn test_write_replaces_existing_layer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layer.json");
        fs::write(&path, "stale").unwrap();

        LayerWriter::new(&path)
            .unwrap()
            .write(&sample_layer("T1078"))
            .unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["techniques"][0]["techniqueID"], "T1078");
    }

    #[test]
    fn test_render_uses_two_space_indent() {
        let rendered = LayerWriter::render(&sample_layer("T1566")).unwrap();
        assert!(rendered.starts_with("{\n  \"name\": \"Test\""));
        assert!(rendered.ends_with("}\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let first = LayerWriter::render(&sample_layer("T1566 T1078 TA0001")).unwrap();
        let second = LayerWriter::render(&sample_layer("T1566 T1078 TA0001")).unwrap();
        assert_eq!(first, second);
    }
}
