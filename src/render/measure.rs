//! Text metrics for node sizing
//!
//! Node boxes grow to fit their display name. Without a font stack to ask,
//! width is estimated from the unicode display width of the text at a
//! fixed per-cell advance, which holds up well for the UI fonts diagrams
//! are typically rendered in.

use unicode_width::UnicodeWidthStr;

pub struct TextMetrics {
    /// Horizontal advance per display cell
    pub char_width: f64,
    /// Padding added around a plain text label
    pub padding: f64,
    /// Extra width reserved when an icon is drawn before the label
    pub icon_extra: f64,
    /// Fixed node box height
    pub box_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            padding: 10.0,
            icon_extra: 20.0,
            box_height: 24.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    /// Box dimensions for a node label, optionally leaving room for an icon
    pub fn node_box(&self, label: &str, has_icon: bool) -> (f64, f64) {
        let mut width = self.text_width(label) + self.padding;
        if has_icon {
            width += self.icon_extra;
        }
        (width, self.box_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        let m = TextMetrics::default();
        assert_eq!(m.text_width("User"), 4.0 * 8.0);
    }

    #[test]
    fn test_wide_chars_count_double() {
        let m = TextMetrics::default();
        assert_eq!(m.text_width("ユーザー"), 8.0 * 8.0);
    }

    #[test]
    fn test_node_box_padding() {
        let m = TextMetrics::default();
        let (w, h) = m.node_box("User", false);
        assert_eq!(w, 32.0 + 10.0);
        assert_eq!(h, 24.0);
    }

    #[test]
    fn test_node_box_reserves_icon_room() {
        let m = TextMetrics::default();
        let (plain, _) = m.node_box("User", false);
        let (with_icon, _) = m.node_box("User", true);
        assert_eq!(with_icon, plain + 20.0);
    }
}
