//! Pascal VOC XML loading utilities.

use crate::error::{ReviewError, Result};
use crate::types::{BoundingBox, DetectedObject};
use log::warn;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Image size recorded in the `<size>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

/// A parsed VOC annotation file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocAnnotation {
    pub filename: Option<String>,
    pub size: Option<ImageSize>,
    /// Objects with a name and a valid box, in document order.
    pub objects: Vec<DetectedObject>,
    /// Number of `<object>` elements dropped for a missing name or bad box.
    pub dropped_objects: usize,
}

#[derive(Debug, Deserialize)]
struct RawAnnotation {
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    size: Option<RawSize>,
    /// Direct children of the root only; `<object>` elements nested deeper
    /// are not part of the annotation.
    #[serde(rename = "object", default)]
    objects: Vec<RawObject>,
}

#[derive(Debug, Deserialize)]
struct RawSize {
    #[serde(default)]
    width: Option<String>,
    #[serde(default)]
    height: Option<String>,
    #[serde(default)]
    depth: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawObject {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    bndbox: Option<RawBndBox>,
}

#[derive(Debug, Deserialize)]
struct RawBndBox {
    #[serde(default)]
    xmin: Option<String>,
    #[serde(default)]
    ymin: Option<String>,
    #[serde(default)]
    xmax: Option<String>,
    #[serde(default)]
    ymax: Option<String>,
}

/// Coordinates may be written as floats; they are truncated toward zero.
/// Missing or unparsable values read as 0.
fn coordinate(text: &Option<String>) -> f64 {
    text.as_deref()
        .and_then(|t| t.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map_or(0.0, f64::trunc)
}

fn dimension(text: &Option<String>) -> u32 {
    text.as_deref()
        .and_then(|t| t.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map_or(0, |v| v as u32)
}

impl RawBndBox {
    fn to_bbox(&self) -> Option<BoundingBox> {
        let xmin = coordinate(&self.xmin);
        let ymin = coordinate(&self.ymin);
        let xmax = coordinate(&self.xmax);
        let ymax = coordinate(&self.ymax);

        if xmax < xmin || ymax < ymin {
            return None;
        }
        Some(BoundingBox::from_corners(xmin, ymin, xmax, ymax))
    }
}

fn root_element_name(xml_str: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml_str);
    loop {
        match reader.read_event().map_err(quick_xml::DeError::InvalidXml)? {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(Some(String::from_utf8_lossy(e.name().as_ref()).into_owned()));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Load a VOC annotation from an XML string.
///
/// # Errors
///
/// Returns an error if the XML is malformed or its root element is not
/// `<annotation>`. Individual objects with a missing name or an inverted
/// box are dropped (and counted) rather than failing the document.
///
/// Only `<object>` elements that are direct children of `<annotation>` are
/// read. Objects nested inside other elements are ignored and not counted
/// in `dropped_objects`.
///
/// # Example
///
/// ```
/// use det_review::loader::load_from_string;
///
/// let xml = r#"<annotation>
///     <object>
///         <name>car</name>
///         <bndbox><xmin>10</xmin><ymin>20</ymin><xmax>19</xmax><ymax>29</ymax></bndbox>
///     </object>
/// </annotation>"#;
/// let annotation = load_from_string(xml).unwrap();
/// assert_eq!(annotation.objects.len(), 1);
/// assert_eq!(annotation.objects[0].bbox.width, 10.0);
/// ```
pub fn load_from_string(xml_str: &str) -> Result<VocAnnotation> {
    match root_element_name(xml_str)? {
        Some(name) if name == "annotation" => {}
        Some(name) => {
            return Err(ReviewError::InvalidAnnotation(format!(
                "root element is <{name}>, expected <annotation>"
            )));
        }
        None => {
            return Err(ReviewError::InvalidAnnotation(
                "document has no root element".to_string(),
            ));
        }
    }

    let raw: RawAnnotation = quick_xml::de::from_str(xml_str)?;
    let mut annotation = VocAnnotation {
        filename: raw.filename.map(|f| f.trim().to_string()).filter(|f| !f.is_empty()),
        size: raw.size.map(|s| ImageSize {
            width: dimension(&s.width),
            height: dimension(&s.height),
            depth: dimension(&s.depth),
        }),
        ..VocAnnotation::default()
    };

    for object in raw.objects {
        let name = object.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            annotation.dropped_objects += 1;
            continue;
        }

        match object.bndbox.as_ref().and_then(RawBndBox::to_bbox) {
            Some(bbox) if bbox.is_valid() => {
                annotation.objects.push(DetectedObject::new(name, bbox));
            }
            _ => {
                warn!("object '{name}' has an invalid or missing bndbox, skipping");
                annotation.dropped_objects += 1;
            }
        }
    }

    Ok(annotation)
}

/// Load a VOC annotation from an XML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<VocAnnotation> {
    let xml_str = fs::read_to_string(path)?;
    load_from_string(&xml_str)
}

/// Read the objects of a VOC file, degrading to an empty list on any failure.
///
/// Failures are logged, never returned; this is the entry point used when a
/// missing or broken file should just mean "no objects".
pub fn parse_objects<P: AsRef<Path>>(path: P) -> Vec<DetectedObject> {
    let path = path.as_ref();
    match load_from_file(path) {
        Ok(annotation) => annotation.objects,
        Err(e) => {
            warn!("cannot read VOC objects from {}: {e}", path.display());
            Vec::new()
        }
    }
}
