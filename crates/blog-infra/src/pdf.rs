//! PDF rendering of blog posts with printpdf.
//!
//! Layout is CPU bound and runs on the blocking pool; only the cover image
//! fetch stays on the async runtime. A post without a reachable cover still
//! renders, the image is simply skipped.

use async_trait::async_trait;
use printpdf::image_crate::{DynamicImage, GenericImageView, load_from_memory};
use printpdf::{BuiltinFont, Image, ImageTransform, Mm, PdfDocument};

use blog_core::domain::BlogPost;
use blog_core::ports::{PostRenderer, RenderError};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
const BODY_LINE_STEP_MM: f32 = 5.0;
const WRAP_COLUMNS: usize = 90;

pub struct PrintPdfRenderer {
    http: reqwest::Client,
}

impl PrintPdfRenderer {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Best-effort cover download. Render proceeds without it on any failure.
    async fn fetch_cover(&self, url: &str) -> Option<DynamicImage> {
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%url, error = %err, "cover fetch failed, rendering without it");
                return None;
            }
        };
        let bytes = response.error_for_status().ok()?.bytes().await.ok()?;
        match load_from_memory(&bytes) {
            Ok(image) => Some(image),
            Err(err) => {
                tracing::warn!(%url, error = %err, "cover is not a decodable image");
                None
            }
        }
    }
}

impl Default for PrintPdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Greedy word wrap at a column budget. Overlong single words get their own
/// line rather than being split.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.chars().count() + 1 + word.chars().count() <= columns {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn layout(post: &BlogPost, cover: Option<DynamicImage>) -> Result<Vec<u8>, RenderError> {
    let (doc, page, layer) = PdfDocument::new(
        &post.title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "content",
    );
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| RenderError::Layout(err.to_string()))?;
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| RenderError::Layout(err.to_string()))?;

    let mut layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    if let Some(image) = cover {
        let (px_w, px_h) = image.dimensions();
        // Scale so the bitmap spans the content width regardless of its
        // native resolution: printpdf sizes images from dpi.
        let dpi = px_w as f32 * 25.4 / CONTENT_WIDTH_MM;
        let height_mm = px_h as f32 * 25.4 / dpi;
        y -= height_mm;
        Image::from_dynamic_image(&image).add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN_MM)),
                translate_y: Some(Mm(y)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        y -= 10.0;
    }

    layer.use_text(&post.title, 18.0, Mm(MARGIN_MM), Mm(y), &bold);
    y -= 8.0;
    layer.use_text(&post.category, 11.0, Mm(MARGIN_MM), Mm(y), &regular);
    y -= 10.0;

    for line in wrap(&post.content, WRAP_COLUMNS) {
        if y < MARGIN_MM {
            let (next_page, next_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
            layer = doc.get_page(next_page).get_layer(next_layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        if !line.is_empty() {
            layer.use_text(&line, 11.0, Mm(MARGIN_MM), Mm(y), &regular);
        }
        y -= BODY_LINE_STEP_MM;
    }

    doc.save_to_bytes()
        .map_err(|err| RenderError::Layout(err.to_string()))
}

#[async_trait]
impl PostRenderer for PrintPdfRenderer {
    async fn render_pdf(&self, post: &BlogPost) -> Result<Vec<u8>, RenderError> {
        let cover = match &post.cover {
            Some(url) if url.starts_with("http") => self.fetch_cover(url).await,
            _ => None,
        };

        let post = post.clone();
        tokio::task::spawn_blocking(move || layout(&post, cover))
            .await
            .map_err(|err| RenderError::Layout(err.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::NewBlogPost;

    fn sample_post(content: &str) -> BlogPost {
        BlogPost::new(
            NewBlogPost {
                category: "rust".to_string(),
                title: "Ownership in practice".to_string(),
                content: content.to_string(),
                cover: None,
                read_time: None,
                author: None,
            },
            None,
        )
    }

    #[test]
    fn wrap_respects_column_budget() {
        let lines = wrap("one two three four five six seven eight", 14);
        assert!(lines.iter().all(|line| line.chars().count() <= 14));
        assert_eq!(lines.join(" "), "one two three four five six seven eight");
    }

    #[test]
    fn wrap_keeps_blank_lines_as_paragraph_breaks() {
        let lines = wrap("first paragraph\n\nsecond paragraph", 80);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_empty());
    }

    #[test]
    fn wrap_gives_overlong_word_its_own_line() {
        let lines = wrap("tiny supercalifragilisticexpialidocious tiny", 10);
        assert_eq!(lines[1], "supercalifragilisticexpialidocious");
    }

    #[tokio::test]
    async fn renders_a_nonempty_pdf_document() {
        let renderer = PrintPdfRenderer::new();
        let post = sample_post("A body long enough to produce several wrapped lines of output in the final document, repeated words and all.");
        let bytes = renderer.render_pdf(&post).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn multipage_content_does_not_error() {
        let renderer = PrintPdfRenderer::new();
        let body = "lorem ipsum dolor sit amet ".repeat(600);
        let bytes = renderer.render_pdf(&sample_post(&body)).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
