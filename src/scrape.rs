use crate::config::Selectors;
use crate::forecast::extract::Paragraph;
use crate::source::{PageRenderer, RenderError};
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Finds the newest forecast article and reads its paragraphs through a [`PageRenderer`].
pub struct ForecastScraper {
    renderer: Box<dyn PageRenderer>,
    selectors: Selectors,
}

impl ForecastScraper {
    pub fn new(renderer: Box<dyn PageRenderer>, selectors: Selectors) -> Self {
        Self {
            renderer,
            selectors,
        }
    }

    /// Link target of the first article button on the listing page, resolved against it.
    pub async fn find_article_url(&self, listing_url: &str) -> Result<Option<String>, RenderError> {
        let html = self
            .renderer
            .render(listing_url, &self.selectors.article_button)
            .await?;
        first_link(&html, &self.selectors.article_button, listing_url)
    }

    pub async fn read_article(&self, article_url: &str) -> Result<Vec<Paragraph>, RenderError> {
        let html = self
            .renderer
            .render(article_url, &self.selectors.article_content)
            .await?;
        read_paragraphs(&html, &self.selectors.paragraph, &self.selectors.marked)
    }
}

pub fn parse_selector(raw: &str) -> Result<Selector, RenderError> {
    Selector::parse(raw).map_err(|_| RenderError::InvalidSelector(raw.to_string()))
}

pub fn contains_selector(html: &str, selector: &str) -> Result<bool, RenderError> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);
    let found = document.select(&selector).next().is_some();
    Ok(found)
}

pub fn first_link(
    html: &str,
    selector: &str,
    base_url: &str,
) -> Result<Option<String>, RenderError> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);

    let href = document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty());

    Ok(href.map(|href| resolve(base_url, href)))
}

fn resolve(base_url: &str, href: &str) -> String {
    Url::parse(base_url)
        .and_then(|base| base.join(href))
        .map(String::from)
        .unwrap_or_else(|_| href.to_string())
}

pub fn read_paragraphs(
    html: &str,
    paragraph: &str,
    marked: &str,
) -> Result<Vec<Paragraph>, RenderError> {
    let paragraph = parse_selector(paragraph)?;
    let marked = parse_selector(marked)?;
    let document = Html::parse_document(html);

    let paragraphs = document
        .select(&paragraph)
        .map(|p| Paragraph {
            marked: p.select(&marked).next().map(rendered_text),
            text: rendered_text(p),
        })
        .collect();
    Ok(paragraphs)
}

/// Visible text of an element: source whitespace runs collapse to one space, `<br>` is a line
/// break, and spaces around line breaks and at both ends are dropped.
fn rendered_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(t) => {
                for c in t.chars() {
                    if !c.is_ascii_whitespace() {
                        text.push(c);
                    } else if !text.is_empty() && !text.ends_with([' ', '\n']) {
                        text.push(' ');
                    }
                }
            }
            Node::Element(e) if e.name() == "br" => {
                if text.ends_with(' ') {
                    text.pop();
                }
                text.push('\n');
            }
            _ => {}
        }
    }
    text.trim_end_matches(' ').to_string()
}
