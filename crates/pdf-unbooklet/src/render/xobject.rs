//! XObject creation for sheet splitting
//!
//! This module handles creating Form XObjects from source PDF pages,
//! which are then placed onto output pages with transformations.
//! Each sheet becomes one XObject shared by both of its halves.

use crate::layout::Rect;
use crate::types::{Orientation, PaperSize, Result, UnbookletError};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{HashMap, HashSet};

// =============================================================================
// XObject Creation
// =============================================================================

/// Create an XObject from a source page.
///
/// # Arguments
/// * `output` - The output document to add the XObject to
/// * `source` - The source document containing the page
/// * `page_id` - The object ID of the source page
/// * `cache` - Cache to avoid copying the same object multiple times
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let page_dict = source.get_dictionary(page_id)?;
    let media_box = get_media_box(source, page_id)?.unwrap_or_else(default_media_box);

    // Get page content
    let content_data = get_page_content(source, page_dict)?;

    // Create XObject dictionary
    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set(
        "BBox",
        Object::Array(vec![
            Object::Real(media_box.x),
            Object::Real(media_box.y),
            Object::Real(media_box.right()),
            Object::Real(media_box.top()),
        ]),
    );
    xobject_dict.set("FormType", Object::Integer(1));

    // Resources may live on an ancestor in the page tree
    if let Some(resources) = resolve_inherited(source, page_id, b"Resources")? {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, resources, cache)?,
        );
    }

    // Create XObject with content stream
    Ok(output.add_object(Stream::new(xobject_dict, content_data)))
}

/// Get default MediaBox for A4 landscape
fn default_media_box() -> Rect {
    let (width, height) = PaperSize::A4.dimensions_pt(Orientation::Landscape);
    Rect::sized(width, height)
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Get the content stream data from a page.
fn get_page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()), // No content = blank page
    };

    match contents {
        Object::Reference(id) => get_single_content_stream(doc, *id),
        Object::Array(arr) => get_concatenated_content_streams(doc, arr),
        _ => Ok(Vec::new()),
    }
}

/// Get content from a single content stream reference
fn get_single_content_stream(doc: &Document, id: ObjectId) -> Result<Vec<u8>> {
    if let Ok(stream) = doc.get_object(id)?.as_stream() {
        Ok(stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone()))
    } else {
        Ok(Vec::new())
    }
}

/// Concatenate multiple content streams
fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for obj in refs {
        if let Object::Reference(id) = obj {
            if let Ok(stream) = doc.get_object(*id)?.as_stream() {
                let content = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                result.extend_from_slice(&content);
                result.push(b'\n');
            }
        }
    }

    Ok(result)
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// Uses a cache to avoid copying the same object multiple times.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            // Reserve the id first so reference cycles terminate
            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in dict.iter() {
                // Never pull the source page tree in through a back pointer
                if key.as_slice() == b"Parent" {
                    continue;
                }
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Dictionary(new_dict))
        }
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in stream.dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Stream(Stream {
                dict: new_dict,
                content: stream.content.clone(),
                allows_compression: stream.allows_compression,
                start_position: None,
            }))
        }
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}

// =============================================================================
// Page Attributes
// =============================================================================

/// Look up a page attribute, walking up the page tree through `/Parent`.
///
/// A `/Parent` chain that revisits a node is reported as a malformed page tree.
pub fn resolve_inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut visited = HashSet::new();
    let mut current_id = page_id;
    loop {
        if !visited.insert(current_id) {
            return Err(UnbookletError::MalformedPageTree(format!(
                "cyclic /Parent chain at object {} {}",
                current_id.0, current_id.1
            )));
        }
        let dict = doc.get_dictionary(current_id)?;

        if let Ok(value) = dict.get(key) {
            return match value {
                Object::Reference(id) => Ok(Some(doc.get_object(*id)?)),
                other => Ok(Some(other)),
            };
        }

        match dict.get(b"Parent") {
            Ok(parent) => current_id = parent.as_reference()?,
            Err(_) => return Ok(None),
        }
    }
}

/// Get the page's MediaBox in points, `None` if missing or malformed
pub fn get_media_box(doc: &Document, page_id: ObjectId) -> Result<Option<Rect>> {
    let values = match resolve_inherited(doc, page_id, b"MediaBox")? {
        Some(Object::Array(values)) if values.len() == 4 => values,
        _ => return Ok(None),
    };

    let mut corners = [0.0f32; 4];
    for (corner, value) in corners.iter_mut().zip(values) {
        match extract_number(doc, value)? {
            Some(number) => *corner = number,
            None => return Ok(None),
        }
    }
    let [x0, y0, x1, y1] = corners;

    Ok(Some(Rect::new(
        x0.min(x1),
        y0.min(y1),
        (x1 - x0).abs(),
        (y1 - y0).abs(),
    )))
}

/// Get the page's `/Rotate` value in degrees, 0 when absent
pub fn get_rotate_degrees(doc: &Document, page_id: ObjectId) -> Result<i64> {
    let value = match resolve_inherited(doc, page_id, b"Rotate")? {
        Some(obj) => extract_number(doc, obj)?,
        None => None,
    };
    Ok(value.map(|value| value.round() as i64).unwrap_or(0))
}

/// Extract a numeric value, following indirect references.
///
/// lopdf bounds the dereference chain, so a reference cycle surfaces as an error.
fn extract_number(doc: &Document, obj: &Object) -> Result<Option<f32>> {
    let resolved = match obj {
        Object::Reference(id) => doc.get_object(*id)?,
        other => other,
    };
    Ok(match resolved {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    })
}
