//! Sample booklet generation
//!
//! Produces scanned-booklet look-alikes: A4 landscape sheets with two framed
//! halves, each showing its logical page number in large digits. Sheets may
//! carry a `/Rotate` entry, in which case their content is stored
//! counter-rotated so a viewer still shows them upright.

use crate::constants::{
    HELVETICA_BOLD_DIGIT_WIDTH_RATIO, PAGES_PER_SHEET, SAMPLE_FRAME_MARGIN_MM,
    SAMPLE_NUMBER_FONT_SIZE, mm_to_pt,
};
use crate::layout::{Transform, booklet_page_numbers};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, Stream};

/// What to generate
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleBooklet {
    /// Number of double-wide sheets
    pub sheets: usize,
    pub scan_order: ScanOrder,
    /// Rotation per sheet, cycled; empty means no rotation
    pub rotations: Vec<Rotation>,
}

impl SampleBooklet {
    pub fn new(sheets: usize) -> Self {
        Self {
            sheets,
            ..Default::default()
        }
    }

    pub fn rotation_of(&self, index: usize) -> Rotation {
        if self.rotations.is_empty() {
            Rotation::None
        } else {
            self.rotations[index % self.rotations.len()]
        }
    }
}

/// Build the sample booklet document
pub fn create_sample_booklet(options: &SampleBooklet) -> Result<Document> {
    if options.sheets == 0 {
        return Err(UnbookletError::InvalidArgument(
            "a sample booklet needs at least one sheet".to_string(),
        ));
    }

    let total_pages = PAGES_PER_SHEET * options.sheets;
    let (width, height) = PaperSize::A4.dimensions_pt(Orientation::Landscape);

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut font_dict = Dictionary::new();
    font_dict.set("Type", Object::Name(b"Font".to_vec()));
    font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    font_dict.set("BaseFont", Object::Name(b"Helvetica-Bold".to_vec()));
    let font_id = doc.add_object(font_dict);

    let mut page_ids = Vec::with_capacity(options.sheets);
    for index in 0..options.sheets {
        let rotation = options.rotation_of(index);
        let (left, right) = booklet_page_numbers(index, total_pages, options.scan_order)?;

        // Unrotated content space is the displayed sheet turned back
        let (media_width, media_height) = if rotation.is_quarter_turn() {
            (height, width)
        } else {
            (width, height)
        };
        let to_content = Transform::page_rotation(rotation, media_width, media_height)
            .inverse()
            .ok_or_else(|| UnbookletError::Geometry {
                sheet: index,
                reason: "singular page rotation".to_string(),
            })?;

        let content = format!(
            "q {}\n{}Q\n",
            to_content.to_cm(),
            sheet_content(left, right, width, height)
        );
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut fonts = Dictionary::new();
        fonts.set("F1", Object::Reference(font_id));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(media_width),
                    Object::Real(media_height),
                ]),
            ),
            ("Rotate", Object::Integer(rotation.degrees() as i64)),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Dictionary(resources)),
        ]);
        page_ids.push(Object::Reference(doc.add_object(page)));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(options.sheets as i64)),
        ("Kids", Object::Array(page_ids)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    log::info!(
        "Created sample booklet with {} sheets ({} pages)",
        options.sheets,
        total_pages
    );
    Ok(doc)
}

/// Frames and page numbers of one sheet, in displayed coordinates
fn sheet_content(left: usize, right: usize, width: f32, height: f32) -> String {
    let half_width = width / 2.0;
    let margin = mm_to_pt(SAMPLE_FRAME_MARGIN_MM);
    let baseline = height / 2.0 - SAMPLE_NUMBER_FONT_SIZE / 3.5;

    let mut ops = String::new();
    for (offset, number) in [(0.0, left), (half_width, right)] {
        ops.push_str(&format!(
            "{} {} {} {} re S\n",
            offset + margin,
            margin,
            half_width - 2.0 * margin,
            height - 2.0 * margin
        ));

        let label = number.to_string();
        let text_width =
            label.len() as f32 * SAMPLE_NUMBER_FONT_SIZE * HELVETICA_BOLD_DIGIT_WIDTH_RATIO;
        ops.push_str(&format!(
            "BT /F1 {} Tf 1 0 0 1 {} {} Tm ({}) Tj ET\n",
            SAMPLE_NUMBER_FONT_SIZE,
            offset + (half_width - text_width) / 2.0,
            baseline,
            label
        ));
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_cycles() {
        let sample = SampleBooklet {
            sheets: 5,
            scan_order: ScanOrder::CoverFirst,
            rotations: vec![Rotation::None, Rotation::Clockwise90],
        };
        assert_eq!(sample.rotation_of(0), Rotation::None);
        assert_eq!(sample.rotation_of(1), Rotation::Clockwise90);
        assert_eq!(sample.rotation_of(4), Rotation::None);
        assert_eq!(SampleBooklet::new(3).rotation_of(2), Rotation::None);
    }

    #[test]
    fn test_zero_sheets_rejected() {
        assert!(matches!(
            create_sample_booklet(&SampleBooklet::new(0)),
            Err(UnbookletError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_quarter_turn_swaps_media_box() {
        let sample = SampleBooklet {
            sheets: 2,
            scan_order: ScanOrder::CoverFirst,
            rotations: vec![Rotation::Clockwise90],
        };
        let doc = create_sample_booklet(&sample).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 2);

        for page_id in pages.values() {
            let page = doc.get_dictionary(*page_id).unwrap();
            assert_eq!(page.get(b"Rotate").unwrap().as_i64().unwrap(), 90);
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            let width = media_box[2].as_float().unwrap();
            let height = media_box[3].as_float().unwrap();
            assert!(height > width);
        }
    }

    #[test]
    fn test_labels_follow_numbering() {
        let content = sheet_content(8, 1, 841.89, 595.28);
        assert!(content.contains("(8) Tj"));
        assert!(content.contains("(1) Tj"));
        assert_eq!(content.matches(" re S").count(), 2);
    }
}
