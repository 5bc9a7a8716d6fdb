//! Deflate compression as a single-entry in-memory ZIP archive.

use crate::pipeline::{PipelineStopped, Transform, TransformEntry, TransformParams};

/// Local file header signature every archive starts with.
pub const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Name of the one entry inside the archive.
pub const ENTRY_NAME: &str = "drawing.txt";

pub const ENTRY: TransformEntry = TransformEntry {
    name: "Zip",
    is_ready: ready,
    create,
};

fn ready() -> bool {
    cfg!(feature = "compression")
}

#[cfg(feature = "compression")]
fn create(_params: &TransformParams) -> Result<Box<dyn Transform>, PipelineStopped> {
    Ok(Box::new(ZipTransform))
}

#[cfg(not(feature = "compression"))]
fn create(_params: &TransformParams) -> Result<Box<dyn Transform>, PipelineStopped> {
    Err(PipelineStopped::new("Zip support is not compiled in"))
}

#[cfg(feature = "compression")]
pub use imp::ZipTransform;

#[cfg(feature = "compression")]
mod imp {
    use std::io::{Cursor, Read, Write};

    use ::zip::write::SimpleFileOptions;
    use ::zip::{CompressionMethod, ZipArchive, ZipWriter};

    use super::{ENTRY_NAME, ZIP_MAGIC};
    use crate::pipeline::{Transform, TransformError};

    /// Stores the payload deflated inside a ZIP archive.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct ZipTransform;

    impl Transform for ZipTransform {
        fn display_name(&self) -> &'static str {
            "Zip"
        }

        fn write(&self, data: Vec<u8>) -> Result<Vec<u8>, TransformError> {
            let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

            writer
                .start_file(ENTRY_NAME, options)
                .map_err(TransformError::other)?;
            writer.write_all(&data)?;
            let archive = writer.finish().map_err(TransformError::other)?.into_inner();

            log::debug!("Zip: {} bytes compressed to {}", data.len(), archive.len());
            Ok(archive)
        }

        fn read(&self, data: Vec<u8>) -> Result<Vec<u8>, TransformError> {
            if !data.starts_with(ZIP_MAGIC) {
                log::warn!("Zip: input is not a ZIP archive, passing it through");
                return Ok(data);
            }

            let mut archive = ZipArchive::new(Cursor::new(data)).map_err(TransformError::other)?;
            if archive.is_empty() {
                return Err(TransformError::other("archive has no entries"));
            }
            let mut entry = archive.by_index(0).map_err(TransformError::other)?;
            let mut out = Vec::new();
            entry.read_to_end(&mut out)?;

            log::debug!("Zip: {} bytes decompressed", out.len());
            Ok(out)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_write_produces_archive() {
            let data = b"Circle\n\tradius: 2".to_vec();
            let archive = ZipTransform.write(data).unwrap();
            assert!(archive.starts_with(ZIP_MAGIC));
        }

        #[test]
        fn test_read_inverts_write() {
            let data = "Container\n\tcoordinates: 0 0\n\titems:\n".repeat(50).into_bytes();
            let archive = ZipTransform.write(data.clone()).unwrap();
            assert!(archive.len() < data.len());
            assert_eq!(ZipTransform.read(archive).unwrap(), data);
        }

        #[test]
        fn test_read_passes_plain_text_through() {
            let data = b"Circle\n\tradius: 2".to_vec();
            assert_eq!(ZipTransform.read(data.clone()).unwrap(), data);
        }

        #[test]
        fn test_truncated_archive_is_error() {
            let mut archive = ZipTransform.write(b"Circle\n\tradius: 2".to_vec()).unwrap();
            archive.truncate(10);
            assert!(matches!(
                ZipTransform.read(archive),
                Err(TransformError::Other(_))
            ));
        }
    }
}
