use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::EditorError;

/// Largest upload accepted for inlining into the document.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Turns an uploaded image into a `data:` URL stored directly in an image
/// field. There is no separate asset store.
pub fn to_data_url(content_type: &str, bytes: &[u8]) -> Result<String, EditorError> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if !mime.starts_with("image/") || mime.len() == "image/".len() {
        return Err(EditorError::UnsupportedImage(content_type.to_string()));
    }
    if bytes.is_empty() {
        return Err(EditorError::EmptyImage);
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(EditorError::ImageTooLarge {
            size: bytes.len(),
            limit: MAX_IMAGE_BYTES,
        });
    }

    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_becomes_data_url() {
        let url = to_data_url("image/png", &[0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_content_type_parameters_are_dropped() {
        let url = to_data_url("Image/JPEG; charset=binary", b"abc").unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_rejects_non_images() {
        assert_eq!(
            to_data_url("application/pdf", b"%PDF"),
            Err(EditorError::UnsupportedImage("application/pdf".to_string()))
        );
        assert!(to_data_url("image/", b"x").is_err());
    }

    #[test]
    fn test_rejects_empty_and_oversized() {
        assert_eq!(to_data_url("image/png", b""), Err(EditorError::EmptyImage));
        let big = vec![0u8; MAX_IMAGE_BYTES + 1];
        assert!(matches!(
            to_data_url("image/png", &big),
            Err(EditorError::ImageTooLarge { .. })
        ));
    }
}
