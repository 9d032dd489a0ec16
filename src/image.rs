//! Loading uploaded images and embedding them as `data:` URIs.

use base64::{ engine::general_purpose::STANDARD, Engine };
use log::debug;
use std::fs;
use std::path::Path;

use crate::error::InputError;
use crate::models::chat::ContentPart;

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
const JPEG_MAGIC: &[u8] = &[0xff, 0xd8, 0xff];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PNG_MAGIC) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(JPEG_MAGIC) {
            Some(ImageFormat::Jpeg)
        } else {
            None
        }
    }
}

/// Reads a JPEG or PNG file into an image part. Both the extension and the
/// magic bytes must say JPEG or PNG; the content decides the MIME type when
/// the two disagree.
pub fn load_image(path: impl AsRef<Path>) -> Result<ContentPart, InputError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    if ImageFormat::from_extension(ext).is_none() {
        return Err(InputError::UnsupportedFormat(ext.to_string()));
    }

    let bytes = fs::read(path)?;
    if bytes.is_empty() {
        return Err(InputError::EmptyImage);
    }

    let format = ImageFormat::sniff(&bytes).ok_or(InputError::UnrecognizedImage)?;
    debug!("Loaded {} ({} bytes) as {}", path.display(), bytes.len(), format.mime_type());
    Ok(ContentPart::image(format.mime_type(), bytes))
}

pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), InputError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| InputError::InvalidDataUrl("missing 'data:' scheme".to_string()))?;
    let (mime_type, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| InputError::InvalidDataUrl("missing ';base64,' marker".to_string()))?;
    let bytes = STANDARD.decode(payload).map_err(|e| InputError::InvalidDataUrl(e.to_string()))?;
    Ok((mime_type.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::Builder;

    fn jpeg_bytes() -> Vec<u8> {
        let mut bytes = JPEG_MAGIC.to_vec();
        bytes.extend_from_slice(&[0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0xff, 0xd9]);
        bytes
    }

    fn write_temp(suffix: &str, bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn data_url_round_trip_is_byte_identical() {
        let original: Vec<u8> = (0..=255u8).collect();
        let url = encode_data_url("image/png", &original);
        assert!(url.starts_with("data:image/png;base64,"));

        let (mime, decoded) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(decoded, original);
    }

    #[test]
    fn decode_rejects_non_data_urls() {
        assert!(matches!(
            decode_data_url("https://example.com/cat.png"),
            Err(InputError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            decode_data_url("data:image/png,plain"),
            Err(InputError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64,@@@"),
            Err(InputError::InvalidDataUrl(_))
        ));
    }

    #[test]
    fn loads_jpeg_from_disk() {
        let bytes = jpeg_bytes();
        let file = write_temp(".JPG", &bytes);

        let part = load_image(file.path()).unwrap();
        assert_eq!(part, ContentPart::image("image/jpeg", bytes));
    }

    #[test]
    fn content_wins_over_extension() {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.extend_from_slice(b"IHDR");
        let file = write_temp(".jpeg", &bytes);

        match load_image(file.path()).unwrap() {
            ContentPart::Image { mime_type, .. } => assert_eq!(mime_type, "image/png"),
            other => panic!("expected image part, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unsupported_extension() {
        let file = write_temp(".gif", b"GIF89a");
        assert!(matches!(load_image(file.path()), Err(InputError::UnsupportedFormat(ext)) if ext == "gif"));
    }

    #[test]
    fn rejects_non_image_content_behind_image_extension() {
        let file = write_temp(".png", b"just some notes, not a picture");
        assert!(matches!(load_image(file.path()), Err(InputError::UnrecognizedImage)));
    }

    #[test]
    fn rejects_empty_file() {
        let file = write_temp(".png", b"");
        assert!(matches!(load_image(file.path()), Err(InputError::EmptyImage)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.png");
        assert!(matches!(load_image(&path), Err(InputError::Io(_))));
    }

    proptest! {
        #[test]
        fn any_upload_survives_the_data_url(
            bytes in proptest::collection::vec(any::<u8>(), 0..2048),
            format in prop_oneof![Just(ImageFormat::Jpeg), Just(ImageFormat::Png)],
        ) {
            let url = encode_data_url(format.mime_type(), &bytes);
            let prefix = format!("data:{};base64,", format.mime_type());
            prop_assert!(url.starts_with(&prefix));

            let (mime, decoded) = decode_data_url(&url).unwrap();
            prop_assert_eq!(mime, format.mime_type());
            prop_assert_eq!(decoded, bytes);
        }
    }
}
