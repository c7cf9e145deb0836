//! Output directory management and file writing (spec §6): the out-dir is
//! recreated on every run, then populated with the emitted codec file and,
//! when requested, one `.xb` example file per message format.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use codec_core::examples;
use codec_core::model::Schema;
use codec_core::wire;

/// Removes any prior contents of `out_dir` and recreates it empty.
pub fn prepare_out_dir(out_dir: &Path) -> Result<()> {
    match fs::remove_dir_all(out_dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).context(format!("failed to clear {}", out_dir.display())),
    }
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    tracing::info!(path = %out_dir.display(), "recreated output directory");
    Ok(())
}

/// Writes the emitted codec source to `<out_dir>/<schema_name>.rs`.
pub fn write_codec_file(out_dir: &Path, schema_name: &str, source: &str) -> Result<PathBuf> {
    let path = out_dir.join(format!("{schema_name}.rs"));
    fs::write(&path, source).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = source.len(), "wrote generated codec");
    Ok(path)
}

/// Writes one framed example file per message format, named
/// `<schema_name>_<messageName>.xb`, matching what the emitted test
/// suite's `include_bytes!` expects to find alongside it.
pub fn write_example_files(out_dir: &Path, schema: &Schema, schema_name: &str) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(schema.message_formats.len());
    for message in &schema.message_formats {
        let instance = examples::example_instance(schema, message);
        let bytes = wire::serialize_message(schema, message, &instance);

        let path = out_dir.join(format!("{schema_name}_{}.xb", message.name));
        fs::write(&path, &bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote example file");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec_core::model::{Field, FieldKind, MessageFormat};

    fn schema() -> Schema {
        Schema {
            enums: vec![],
            message_formats: vec![MessageFormat {
                id: None,
                name: "Ping".to_string(),
                fields: vec![Field {
                    name: "seq".to_string(),
                    kind: FieldKind::UInt(4),
                    required: true,
                }],
            }],
            source_path: None,
        }
    }

    #[test]
    fn prepare_out_dir_discards_stale_contents() {
        let dir = std::env::temp_dir().join(format!("codegen_cli_test_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("stale.txt"), b"old").unwrap();

        prepare_out_dir(&dir).unwrap();

        assert!(!dir.join("stale.txt").exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn write_example_files_names_each_file_after_schema_and_message() {
        let dir = std::env::temp_dir().join(format!("codegen_cli_test_xb_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let paths = write_example_files(&dir, &schema(), "orders").unwrap();

        assert_eq!(paths, vec![dir.join("orders_Ping.xb")]);
        assert!(paths[0].exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
