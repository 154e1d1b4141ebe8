//! PDF text and page-image extraction using lopdf and pdf-extract.

use image::{DynamicImage, GrayImage, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace};

use super::Result;
use crate::error::PdfError;

/// Loaded PDF ready for text or image extraction.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create an empty extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load a PDF from bytes, decrypting documents protected by an empty password.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads the bytes again, so keep the decrypted copy.
            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    /// Number of pages in the loaded document.
    pub fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    /// Extract the text of all pages, pages concatenated without a separator.
    pub fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("no document loaded".to_string()));
        }
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(normalize_text(&text))
    }

    /// Decode the raster images placed on a page (scanned slips carry one per page).
    pub fn page_images(&self, page: u32) -> Result<Vec<DynamicImage>> {
        let doc = self
            .document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("no document loaded".to_string()))?;

        let pages = doc.get_pages();
        let page_id = pages.get(&page).ok_or(PdfError::InvalidPage(page))?;

        let mut images = Vec::new();
        if let Some(resources) = page_resources(doc, *page_id) {
            if let Ok(xobjects) = resources.get(b"XObject") {
                if let Ok((_, Object::Dictionary(xobj_dict))) = doc.dereference(xobjects) {
                    for (_name, obj_ref) in xobj_dict.iter() {
                        if let Ok((_, obj)) = doc.dereference(obj_ref) {
                            if let Some(img) = decode_image_object(doc, obj) {
                                images.push(img);
                            }
                        }
                    }
                }
            }
        }

        debug!("Decoded {} images on page {}", images.len(), page);
        Ok(images)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop carriage returns and form feeds and the blank lines pdf-extract
/// emits before the first page, so line offsets count from the first
/// printed line.
fn normalize_text(text: &str) -> String {
    let cleaned: String = text.chars().filter(|c| *c != '\r' && *c != '\u{c}').collect();
    cleaned.trim_start_matches('\n').trim_end_matches('\n').to_string()
}

/// Page resources, following the `Parent` chain for inherited entries.
fn page_resources(doc: &Document, node_id: ObjectId) -> Option<Dictionary> {
    let Ok(Object::Dictionary(dict)) = doc.get_object(node_id) else {
        return None;
    };

    if let Ok(resources) = dict.get(b"Resources") {
        if let Ok((_, Object::Dictionary(res))) = doc.dereference(resources) {
            return Some(res.clone());
        }
    }

    match dict.get(b"Parent") {
        Ok(Object::Reference(parent)) => page_resources(doc, *parent),
        _ => None,
    }
}

fn decode_image_object(doc: &Document, obj: &Object) -> Option<DynamicImage> {
    let Object::Stream(stream) = obj else {
        return None;
    };
    let dict = &stream.dict;
    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }

    let width = u32::try_from(dict.get(b"Width").ok()?.as_i64().ok()?).ok()?;
    let height = u32::try_from(dict.get(b"Height").ok()?.as_i64().ok()?).ok()?;
    trace!("Found image object: {}x{}", width, height);

    let filter = dict.get(b"Filter").ok().and_then(|f| match f {
        Object::Name(name) => Some(name.as_slice()),
        Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
        _ => None,
    });

    match filter {
        Some(b"DCTDecode") => {
            return image::load_from_memory_with_format(&stream.content, image::ImageFormat::Jpeg)
                .ok();
        }
        Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
            trace!("Unsupported image filter");
            return None;
        }
        _ => {}
    }

    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8);
    if bits != 8 {
        trace!("Unsupported bits per component: {}", bits);
        return None;
    }

    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| match o {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
            _ => None,
        })
        .unwrap_or(b"DeviceRGB");

    let pixels = (width as usize).checked_mul(height as usize)?;
    match color_space {
        b"DeviceRGB" | b"RGB" if data.len() / 3 >= pixels => {
            RgbImage::from_raw(width, height, data[..pixels * 3].to_vec()).map(DynamicImage::ImageRgb8)
        }
        b"DeviceGray" | b"G" if data.len() >= pixels => {
            GrayImage::from_raw(width, height, data[..pixels].to_vec()).map(DynamicImage::ImageLuma8)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
        assert!(extractor.extract_text().is_err());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        assert!(extractor.load(b"not a pdf").is_err());
    }

    fn image_stream(width: i64, height: i64, content: Vec<u8>) -> Object {
        let mut dict = Dictionary::new();
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(width));
        dict.set("Height", Object::Integer(height));
        dict.set("ColorSpace", Object::Name(b"DeviceGray".to_vec()));
        Object::Stream(lopdf::Stream::new(dict, content))
    }

    #[test]
    fn test_decode_gray_image() {
        let doc = Document::with_version("1.5");
        let image = decode_image_object(&doc, &image_stream(2, 2, vec![0, 64, 128, 255])).unwrap();
        assert_eq!((image.width(), image.height()), (2, 2));
    }

    #[test]
    fn test_decode_rejects_bad_dimensions() {
        let doc = Document::with_version("1.5");
        assert!(decode_image_object(&doc, &image_stream(-2, 2, vec![0; 4])).is_none());
        assert!(decode_image_object(&doc, &image_stream(1 << 33, 2, vec![0; 4])).is_none());
        assert!(decode_image_object(&doc, &image_stream(70_000, 70_000, vec![0; 4])).is_none());
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("\n\n好买基金\r\n产品代码\u{c}\n"), "好买基金\n产品代码");
    }
}
