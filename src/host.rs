//! Content hosted inside a panel
//!
//! The panel never looks inside its content. It asks for a height and a few
//! chrome colors through `ContentHeightProvider`, once on first appearance and
//! again on every `reload()`.

use crate::ui::primitives::{colors, Color};
use crate::ui::theme::Theme;

/// What a panel needs to know about the content it hosts
pub trait ContentHeightProvider {
    /// Intrinsic height of the content area
    fn current_height(&self) -> f64;

    /// Fill for the strip below the panel that shows during overscroll
    fn background_color(&self) -> Option<Color> {
        None
    }

    /// Top bar fill, same as the background unless overridden
    fn top_bar_color(&self) -> Option<Color> {
        self.background_color()
    }

    /// Drag handle line color, theme default when `None`
    fn top_accent_line_color(&self) -> Option<Color> {
        None
    }
}

/// Content with a fixed size and optional background
#[derive(Debug, Clone, PartialEq)]
pub struct FixedContent {
    pub height: f64,
    pub background: Option<Color>,
}

impl FixedContent {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            background: None,
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
}

impl ContentHeightProvider for FixedContent {
    fn current_height(&self) -> f64 {
        self.height
    }

    fn background_color(&self) -> Option<Color> {
        self.background
    }
}

/// A quote card: author title, text and tags
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteContent {
    pub author: Option<String>,
    pub quote: Option<String>,
    pub tags: Vec<String>,
    /// Laid-out height of the card
    pub content_height: f64,
    /// Height of the screen the panel is presented on
    pub screen_height: f64,
    top_bar: Color,
}

impl QuoteContent {
    /// Space always left above the card so the backdrop stays tappable
    pub const TOP_MARGIN: f64 = 100.0;

    pub fn new(content_height: f64, screen_height: f64, theme: &Theme) -> Self {
        Self {
            author: None,
            quote: None,
            tags: Vec::new(),
            content_height,
            screen_height,
            top_bar: theme.primary,
        }
    }

    pub fn with_quote(mut self, author: &str, quote: &str, tags: &[&str]) -> Self {
        self.author = Some(author.to_string());
        self.quote = Some(quote.to_string());
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn title(&self) -> &str {
        self.author.as_deref().unwrap_or("Title")
    }

    pub fn text(&self) -> &str {
        self.quote.as_deref().unwrap_or("Random quote here")
    }
}

impl ContentHeightProvider for QuoteContent {
    fn current_height(&self) -> f64 {
        self.content_height.min(self.screen_height - Self::TOP_MARGIN)
    }

    fn background_color(&self) -> Option<Color> {
        Some(colors::WHITE)
    }

    fn top_bar_color(&self) -> Option<Color> {
        Some(self.top_bar)
    }

    fn top_accent_line_color(&self) -> Option<Color> {
        Some(colors::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_bar_defaults_to_background() {
        let content = FixedContent::new(200.0).with_background([0.2, 0.3, 0.4, 1.0]);
        assert_eq!(content.top_bar_color(), Some([0.2, 0.3, 0.4, 1.0]));
        assert_eq!(content.top_accent_line_color(), None);
        assert_eq!(FixedContent::new(10.0).top_bar_color(), None);
    }

    #[test]
    fn test_quote_height_capped_by_screen() {
        let theme = Theme::default();
        let tall = QuoteContent::new(900.0, 800.0, &theme);
        assert_eq!(tall.current_height(), 700.0);
        let short = QuoteContent::new(420.0, 800.0, &theme);
        assert_eq!(short.current_height(), 420.0);
        assert_eq!(short.top_bar_color(), Some(theme.primary));
    }

    #[test]
    fn test_quote_placeholders() {
        let theme = Theme::default();
        let empty = QuoteContent::new(300.0, 800.0, &theme);
        assert_eq!(empty.title(), "Title");
        assert_eq!(empty.text(), "Random quote here");
        let full = empty.with_quote("Ada", "Hello", &["code"]);
        assert_eq!(full.title(), "Ada");
        assert_eq!(full.tags, vec!["code".to_string()]);
    }
}
