#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

use lopdf::content::Content;
use lopdf::content::Operation;
use lopdf::dictionary;
use lopdf::Document;
use lopdf::Object;
use lopdf::Stream;

fn page_operations(text: &str) -> Vec<Operation> {
    // Pages without text get a filled rectangle, the same shape a scanned
    // page has once its image is stripped.
    if text.is_empty() {
        return vec![
            Operation::new("re", vec![50.into(), 50.into(), 400.into(), 600.into()]),
            Operation::new("f", vec![]),
        ];
    }

    return vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ];
}

/// Builds an in-memory PDF with one page per entry. Empty entries produce
/// pages with no extractable text.
pub fn pdf_fixture(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = vec![];
    for text in pages {
        let content = Content {
            operations: page_operations(text),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes: Vec<u8> = vec![];
    doc.save_to(&mut bytes).unwrap();

    return bytes;
}
