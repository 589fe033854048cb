//! PDF Image Handling
//!
//! Rasters are embedded as Flate-compressed DeviceRGB image XObjects; an
//! alpha plane becomes a DeviceGray soft mask.

use super::objects::{PdfDictionary, PdfObject, PdfStream};
use super::writer::Result;
use crate::RasterAsset;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

/// Compress bytes with zlib (FlateDecode)
pub fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn image_stream(width: u32, height: u32, color_space: &str, pixels: &[u8]) -> Result<PdfStream> {
    let mut dict = PdfDictionary::new().with_type("XObject");
    dict.insert("Subtype", PdfObject::name("Image"));
    dict.insert("Width", PdfObject::Integer(i64::from(width)));
    dict.insert("Height", PdfObject::Integer(i64::from(height)));
    dict.insert("BitsPerComponent", PdfObject::Integer(8));
    dict.insert("ColorSpace", PdfObject::name(color_space));
    dict.insert("Filter", PdfObject::name("FlateDecode"));

    Ok(PdfStream {
        dict,
        data: deflate(pixels)?,
        compressed: true,
    })
}

/// Image XObject for a raster, referencing `soft_mask` when given
pub fn image_xobject(raster: &RasterAsset, soft_mask: Option<u32>) -> Result<PdfStream> {
    let mut stream = image_stream(raster.width, raster.height, "DeviceRGB", &raster.rgb)?;
    if let Some(mask) = soft_mask {
        stream.dict.insert("SMask", PdfObject::Reference(mask));
    }
    Ok(stream)
}

/// Soft mask XObject from an alpha plane
pub fn soft_mask_xobject(raster: &RasterAsset, alpha: &[u8]) -> Result<PdfStream> {
    image_stream(raster.width, raster.height, "DeviceGray", alpha)
}

/// Image resources used on the document, keyed by render resource id
#[derive(Debug, Default)]
pub struct ImageManager {
    images: Vec<String>,
}

impl ImageManager {
    /// XObject name for a resource id, registering it on first use
    pub fn resource_name(&mut self, resource_id: &str) -> String {
        let index = match self.images.iter().position(|id| id == resource_id) {
            Some(index) => index,
            None => {
                self.images.push(resource_id.to_string());
                self.images.len() - 1
            }
        };
        format!("Im{index}")
    }

    /// Registered images as `(xobject name, resource id)`
    pub fn images(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.images
            .iter()
            .enumerate()
            .map(|(i, id)| (format!("Im{i}"), id.as_str()))
    }
}
