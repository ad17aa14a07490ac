//! Output page rendering
//!
//! [`OutputBuilder`] owns the document being written. Source pages are
//! turned into Form XObjects once and every output page draws one of them
//! through its placement transform, clipped to the visible area.

use crate::constants::{DEBUG_FONT_SIZE, DEBUG_TEXT_COLOR, HELVETICA_CHAR_WIDTH_RATIO};
use crate::layout::Placement;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::xobject::create_page_xobject;

/// Incrementally builds an output document from placed source pages
pub struct OutputBuilder {
    output: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    /// Source page id -> XObject id
    xobjects: HashMap<ObjectId, ObjectId>,
    /// Source object id -> copied object id, shared by all XObjects
    object_cache: HashMap<ObjectId, ObjectId>,
    font_id: Option<ObjectId>,
}

impl Default for OutputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputBuilder {
    pub fn new() -> Self {
        let mut output = Document::with_version("1.7");
        let pages_tree_id = output.new_object_id();
        Self {
            output,
            pages_tree_id,
            page_refs: Vec::new(),
            xobjects: HashMap::new(),
            object_cache: HashMap::new(),
            font_id: None,
        }
    }

    /// Number of pages added so far
    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    /// XObject for a source page, created on first use
    pub fn xobject_for(&mut self, source: &Document, page_id: ObjectId) -> Result<ObjectId> {
        if let Some(&id) = self.xobjects.get(&page_id) {
            return Ok(id);
        }
        let id = create_page_xobject(&mut self.output, source, page_id, &mut self.object_cache)?;
        self.xobjects.insert(page_id, id);
        Ok(id)
    }

    /// Add a page drawing `xobject_id` through `placement`.
    ///
    /// `annotation` is written as a centered text overlay on top of the content.
    pub fn push_page(
        &mut self,
        xobject_id: ObjectId,
        placement: &Placement,
        annotation: Option<&str>,
    ) -> Result<ObjectId> {
        let xobject_name = "S0";
        let mut content_ops = vec![placement_command(xobject_name, placement)];

        let mut xobjects = Dictionary::new();
        xobjects.set(xobject_name, Object::Reference(xobject_id));

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        if let Some(text) = annotation {
            let font_id = self.debug_font();
            content_ops.push(annotation_command(text, placement.width, placement.height));

            let mut fonts = Dictionary::new();
            fonts.set("F1", Object::Reference(font_id));
            resources.set("Font", Object::Dictionary(fonts));
        }

        let content = content_ops.join("");
        let content_id = self
            .output
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(self.pages_tree_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(placement.width),
                    Object::Real(placement.height),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Dictionary(resources)),
        ]);

        let page_id = self.output.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
        Ok(page_id)
    }

    /// Write the page tree and catalog and return the finished document
    pub fn finish(mut self) -> Document {
        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.output
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));

        self.output.trailer.set("Root", catalog_id);
        self.output
    }

    fn debug_font(&mut self) -> ObjectId {
        if let Some(id) = self.font_id {
            return id;
        }
        let mut font_dict = Dictionary::new();
        font_dict.set("Type", Object::Name(b"Font".to_vec()));
        font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
        let id = self.output.add_object(font_dict);
        self.font_id = Some(id);
        id
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Generate the content stream commands drawing an XObject through a placement.
fn placement_command(xobject_name: &str, placement: &Placement) -> String {
    let clip = &placement.clip;
    format!(
        "q {} {} {} {} re W n q {} /{} Do Q Q\n",
        clip.x,
        clip.y,
        clip.width,
        clip.height,
        placement.transform.to_cm(),
        xobject_name
    )
}

/// Generate a centered text overlay.
fn annotation_command(text: &str, page_width: f32, page_height: f32) -> String {
    let text = escape_text(text);
    let text_width = text.chars().count() as f32 * DEBUG_FONT_SIZE * HELVETICA_CHAR_WIDTH_RATIO;
    let x = (page_width - text_width) / 2.0;
    let y = (page_height - DEBUG_FONT_SIZE) / 2.0;
    let (r, g, b) = DEBUG_TEXT_COLOR;
    format!(
        "q {} {} {} rg BT /F1 {} Tf {} {} Td ({}) Tj ET Q\n",
        r, g, b, DEBUG_FONT_SIZE, x, y, text
    )
}

/// Escape a string for a PDF literal, dropping anything outside printable ASCII
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            ' '..='~' => escaped.push(ch),
            _ => {}
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Rect, Transform};

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a(b)c\\"), "a\\(b\\)c\\\\");
        assert_eq!(escape_text("→ 90"), " 90");
    }

    #[test]
    fn test_placement_command() {
        let placement = Placement {
            width: 100.0,
            height: 200.0,
            transform: Transform::translate(-50.0, 0.0),
            clip: Rect::sized(100.0, 200.0),
        };
        assert_eq!(
            placement_command("S0", &placement),
            "q 0 0 100 200 re W n q 1 0 0 1 -50 0 cm /S0 Do Q Q\n"
        );
    }

    #[test]
    fn test_builder_shares_font() {
        let mut builder = OutputBuilder::new();
        let xobject = builder
            .output
            .add_object(Stream::new(Dictionary::new(), Vec::new()));
        let placement = Placement {
            width: 10.0,
            height: 10.0,
            transform: Transform::IDENTITY,
            clip: Rect::sized(10.0, 10.0),
        };
        builder.push_page(xobject, &placement, Some("one")).unwrap();
        builder.push_page(xobject, &placement, Some("two")).unwrap();
        assert_eq!(builder.page_count(), 2);

        let doc = builder.finish();
        assert_eq!(doc.get_pages().len(), 2);
        let fonts = doc
            .objects
            .values()
            .filter(|obj| {
                obj.as_dict()
                    .and_then(|d| d.get(b"Type"))
                    .and_then(Object::as_name)
                    .map(|name| name == b"Font")
                    .unwrap_or(false)
            })
            .count();
        assert_eq!(fonts, 1);
    }
}
