//! Serializes laid-out pages with lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::render::composer::TextStyle;
use crate::render::layout::{Page, PageGeometry};
use crate::render::RenderError;

const PDF_VERSION: &str = "1.5";

/// Document information dictionary entries.
pub struct DocumentInfo {
    pub title: &'static str,
    pub author: &'static str,
    pub creator: &'static str,
}

impl DocumentInfo {
    pub const RESUME: Self = Self {
        title: "Customized Resume",
        author: "Resume Customizer",
        creator: "Resume Customizer API",
    };
}

pub fn write_pdf(
    pages: &[Page],
    geometry: &PageGeometry,
    info: &DocumentInfo,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let body_font = doc.add_object(font_dictionary(TextStyle::Body));
    let heading_font = doc.add_object(font_dictionary(TextStyle::Heading));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            TextStyle::Body.resource_name() => body_font,
            TextStyle::Heading.resource_name() => heading_font,
        },
    });

    let media_box: Vec<Object> = vec![
        Object::from(0.0_f32),
        Object::from(0.0_f32),
        Object::from(geometry.width),
        Object::from(geometry.height),
    ];

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page);
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => media_box.clone(),
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
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(info.title),
        "Author" => Object::string_literal(info.author),
        "Creator" => Object::string_literal(info.creator),
        "Producer" => Object::string_literal(info.creator),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(bytes)
}

fn font_dictionary(style: TextStyle) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => style.face().base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn page_content(page: &Page) -> Content {
    let mut operations = Vec::with_capacity(page.lines.len() * 4);
    for line in &page.lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![
                line.style.resource_name().into(),
                Object::from(line.style.font_size()),
            ],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::from(line.x), Object::from(line.y)],
        ));
        // lopdf escapes parentheses and backslashes in literal strings.
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(line.text.as_str())],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}
