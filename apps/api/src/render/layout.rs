//! Places composed lines on A4 pages.

use crate::render::composer::{LayoutItem, TextStyle};

#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    pub const A4: Self = Self {
        width: 595.28,
        height: 841.89,
        margin: 50.0,
    };

    pub fn text_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    fn top(&self) -> f32 {
        self.height - self.margin
    }
}

/// One line of text at its baseline position, in PDF user space.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub style: TextStyle,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Wraps every line to the text column and flows the result onto pages.
/// Always returns at least one page.
pub fn paginate(items: &[LayoutItem], geometry: &PageGeometry) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut page = Page::default();
    let mut cursor = geometry.top();

    for item in items {
        match item {
            LayoutItem::Gap => {
                // A gap at the top of a fresh page is dropped.
                if !page.lines.is_empty() {
                    cursor -= TextStyle::Body.line_height();
                }
            }
            LayoutItem::Line(line) => {
                let style = line.style;
                let size = style.font_size();
                let advance = style.line_height();
                let max_em = geometry.text_width() / size;

                for text in style.metrics().wrap(&line.text, max_em) {
                    if cursor - advance < geometry.margin && !page.lines.is_empty() {
                        pages.push(std::mem::take(&mut page));
                        cursor = geometry.top();
                    }
                    page.lines.push(PlacedLine {
                        text,
                        style,
                        x: geometry.margin,
                        y: cursor - size,
                    });
                    cursor -= advance;
                }
            }
        }
    }

    if !page.lines.is_empty() || pages.is_empty() {
        pages.push(page);
    }
    pages
}
