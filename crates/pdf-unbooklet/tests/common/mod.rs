#![allow(dead_code)]

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdf_unbooklet::layout::Transform;

/// Plain portrait pages without rotation, as a scanner that drops metadata writes them
pub fn create_test_pdf(num_pages: usize) -> Document {
    create_pdf_with_media_box(num_pages, [0, 0, 612, 792])
}

pub fn create_pdf_with_media_box(num_pages: usize, media_box: [i64; 4]) -> Document {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(media_box.iter().map(|v| Object::Integer(*v)).collect()),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

/// Object id of the page tree root
pub fn pages_root(doc: &Document) -> ObjectId {
    let catalog_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    doc.get_dictionary(catalog_id)
        .unwrap()
        .get(b"Pages")
        .unwrap()
        .as_reference()
        .unwrap()
}

/// A string drawn with `Tj`, located at its text origin in page space
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Width and height of a page's MediaBox
pub fn page_size(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let media_box = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect::<Vec<_>>();
    (media_box[2] - media_box[0], media_box[3] - media_box[1])
}

/// Every label drawn on a page, following Form XObjects
pub fn page_labels(doc: &Document, page_id: ObjectId) -> Vec<Label> {
    let content = doc.get_page_content(page_id).unwrap();
    let resources = resolve_dict(doc, doc.get_dictionary(page_id).unwrap().get(b"Resources").ok());
    let mut labels = Vec::new();
    interpret(doc, &content, &resources, Transform::IDENTITY, &mut labels);
    labels
}

/// Labels whose origin lies on the page
pub fn visible_labels(doc: &Document, page_id: ObjectId) -> Vec<String> {
    let (width, height) = page_size(doc, page_id);
    page_labels(doc, page_id)
        .into_iter()
        .filter(|l| l.x >= -0.5 && l.x <= width + 0.5 && l.y >= -0.5 && l.y <= height + 0.5)
        .map(|l| l.text)
        .collect()
}

fn resolve_dict(doc: &Document, obj: Option<&Object>) -> Dictionary {
    match obj {
        Some(Object::Dictionary(dict)) => dict.clone(),
        Some(Object::Reference(id)) => doc
            .get_dictionary(*id)
            .cloned()
            .unwrap_or_else(|_| Dictionary::new()),
        _ => Dictionary::new(),
    }
}

fn matrix(operands: &[Object]) -> Transform {
    let v: Vec<f32> = operands.iter().map(|o| o.as_float().unwrap()).collect();
    Transform::new(v[0], v[1], v[2], v[3], v[4], v[5])
}

fn interpret(
    doc: &Document,
    content: &[u8],
    resources: &Dictionary,
    base: Transform,
    labels: &mut Vec<Label>,
) {
    let operations = Content::decode(content).unwrap().operations;
    let mut ctm = base;
    let mut stack = Vec::new();
    let mut text_matrix = Transform::IDENTITY;

    for op in operations {
        match op.operator.as_str() {
            "q" => stack.push(ctm),
            "Q" => ctm = stack.pop().expect("unbalanced Q"),
            "cm" => ctm = matrix(&op.operands).then(ctm),
            "BT" => text_matrix = Transform::IDENTITY,
            "Tm" => text_matrix = matrix(&op.operands),
            "Td" => {
                let tx = op.operands[0].as_float().unwrap();
                let ty = op.operands[1].as_float().unwrap();
                text_matrix = Transform::translate(tx, ty).then(text_matrix);
            }
            "Tj" => {
                if let Object::String(bytes, _) = &op.operands[0] {
                    let (x, y) = text_matrix.then(ctm).apply(0.0, 0.0);
                    labels.push(Label {
                        text: String::from_utf8_lossy(bytes).into_owned(),
                        x,
                        y,
                    });
                }
            }
            "Do" => {
                let name = op.operands[0].as_name().unwrap();
                let xobjects = resolve_dict(doc, resources.get(b"XObject").ok());
                let id = xobjects.get(name).unwrap().as_reference().unwrap();
                let stream = doc.get_object(id).unwrap().as_stream().unwrap();
                let data = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                let form_resources = resolve_dict(doc, stream.dict.get(b"Resources").ok());
                interpret(doc, &data, &form_resources, ctm, labels);
            }
            _ => {}
        }
    }
}
