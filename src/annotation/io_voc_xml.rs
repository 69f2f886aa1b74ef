//! Pascal VOC-style XML annotations.
//!
//! Every `<bndbox>` element in the document counts as one box, wherever it
//! sits in the tree. Its `xmin`, `ymin`, `xmax` and `ymax` children are looked
//! up by name and must hold integer pixel values.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Node;

use super::{AnnotationReader, BoxEntries, RawBox};
use crate::error::CropError;

const VOC_XML_EXTENSION: &str = "xml";
const BNDBOX_TAG: &str = "bndbox";

/// Reader for `<image_stem>.xml` annotation files.
#[derive(Clone, Copy, Debug, Default)]
pub struct AbsoluteReader;

impl AnnotationReader for AbsoluteReader {
    fn extension(&self) -> &'static str {
        VOC_XML_EXTENSION
    }

    fn read_boxes(&self, path: &Path) -> Result<BoxEntries, CropError> {
        let xml = fs::read_to_string(path).map_err(CropError::Io)?;
        let entries = parse_bndboxes_str(&xml, path)?;
        Ok(Box::new(entries.into_iter()))
    }
}

/// Parses every `<bndbox>` in `xml`.
///
/// Returns `Err` only when the document itself is not well-formed XML. A
/// `<bndbox>` with missing or non-integer fields becomes an `Err` entry in the
/// returned list; its siblings are unaffected.
pub fn parse_bndboxes_str(
    xml: &str,
    path: &Path,
) -> Result<Vec<Result<RawBox, CropError>>, CropError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|source| CropError::AbsoluteXmlParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let entries = document
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == BNDBOX_TAG)
        .enumerate()
        .map(|(idx, bndbox)| parse_bndbox(bndbox, path, idx + 1))
        .collect();

    Ok(entries)
}

/// Parse VOC XML from bytes, discarding the result.
///
/// The input must be valid UTF-8. Used by the fuzz targets.
pub fn from_xml_slice(bytes: &[u8]) -> Result<(), CropError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| CropError::AbsoluteXmlParse {
        path: PathBuf::from("<memory>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    parse_bndboxes_str(xml, Path::new("<memory>"))?;
    Ok(())
}

fn parse_bndbox(bndbox: Node<'_, '_>, path: &Path, element: usize) -> Result<RawBox, CropError> {
    Ok(RawBox::Absolute {
        x_min: parse_required_i64(bndbox, "xmin", path, element)?,
        y_min: parse_required_i64(bndbox, "ymin", path, element)?,
        x_max: parse_required_i64(bndbox, "xmax", path, element)?,
        y_max: parse_required_i64(bndbox, "ymax", path, element)?,
    })
}

fn parse_required_i64(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    element: usize,
) -> Result<i64, CropError> {
    let raw = optional_child_text(node, tag).ok_or_else(|| CropError::AbsoluteBoxParse {
        path: path.to_path_buf(),
        element,
        message: format!("missing <{tag}>"),
    })?;
    raw.parse::<i64>().map_err(|_| CropError::AbsoluteBoxParse {
        path: path.to_path_buf(),
        element,
        message: format!("invalid <{tag}> value '{raw}'; expected integer"),
    })
}

fn optional_child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
}
