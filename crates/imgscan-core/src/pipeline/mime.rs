//! Extension-based MIME type inference.
//!
//! No content sniffing: a file with a spoofed or missing extension is
//! classified by its name alone.

use std::path::Path;

/// Returned when the extension is not recognized.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Infer a MIME type from the file extension (case-insensitive).
pub fn lookup(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();

    let mime = match ext.as_str() {
        // Images
        "jpg" | "jpeg" | "jpe" | "jfif" => "image/jpeg",
        "png" => "image/png",
        "apng" => "image/apng",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "svg" | "svgz" => "image/svg+xml",
        "avif" => "image/avif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "jxl" => "image/jxl",
        "jp2" => "image/jp2",
        "tga" => "image/x-tga",
        "psd" => "image/vnd.adobe.photoshop",
        "pbm" => "image/x-portable-bitmap",
        "pgm" => "image/x-portable-graymap",
        "ppm" => "image/x-portable-pixmap",
        "pnm" => "image/x-portable-anymap",
        "exr" => "image/x-exr",
        "hdr" => "image/vnd.radiance",
        "dds" => "image/vnd.ms-dds",
        // RAW
        "cr2" => "image/x-canon-cr2",
        "nef" => "image/x-nikon-nef",
        "arw" => "image/x-sony-arw",
        "dng" => "image/x-adobe-dng",
        "raf" => "image/x-fuji-raf",
        "orf" => "image/x-olympus-orf",
        "rw2" => "image/x-panasonic-rw2",
        // Common non-images seen alongside uploads
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        _ => return None,
    };
    Some(mime)
}

/// MIME type for a path, falling back to [`FALLBACK_MIME`].
pub fn mime_or_default(path: &Path) -> &'static str {
    lookup(path).unwrap_or(FALLBACK_MIME)
}

/// True if the extension maps to an `image/*` type.
pub fn is_image(path: &Path) -> bool {
    lookup(path).is_some_and(|mime| mime.starts_with("image/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_common_images() {
        assert_eq!(lookup(Path::new("a.jpg")), Some("image/jpeg"));
        assert_eq!(lookup(Path::new("a.JPEG")), Some("image/jpeg"));
        assert_eq!(lookup(Path::new("b.png")), Some("image/png"));
        assert_eq!(lookup(Path::new("c.webp")), Some("image/webp"));
        assert_eq!(lookup(Path::new("d.svg")), Some("image/svg+xml"));
    }

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("photo.JPG")));
        assert!(is_image(Path::new("dir/scan.tiff")));
        assert!(!is_image(Path::new("notes.txt")));
        assert!(!is_image(Path::new("clip.mp4")));
        assert!(!is_image(Path::new("README")));
        assert!(!is_image(Path::new(".png")));
    }

    #[test]
    fn test_fallback_for_unknown_extension() {
        assert_eq!(mime_or_default(Path::new("blob.xyz")), FALLBACK_MIME);
        assert_eq!(mime_or_default(Path::new("noext")), FALLBACK_MIME);
        assert_eq!(mime_or_default(Path::new("a.gif")), "image/gif");
    }
}
