/// Apply color decisions to page nodes
use serde::{Deserialize, Serialize};

use crate::classifier::DisplayColor;
use crate::host::PageNode;

/// CSS colors used for the two classifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub proven: String,
    pub disproven: String,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            proven: "#00cc1f".to_string(),
            disproven: "#ff1c1c".to_string(),
        }
    }
}

impl Palette {
    /// CSS value for a decision, `None` when the node keeps its own color
    pub fn css(&self, color: DisplayColor) -> Option<&str> {
        match color {
            DisplayColor::Proven => Some(self.proven.as_str()),
            DisplayColor::Disproven => Some(self.disproven.as_str()),
            DisplayColor::NoOverride => None,
        }
    }
}

pub trait Painter<N> {
    fn paint(&self, node: &N, color: DisplayColor);
}

/// Writes the foreground color style of exactly one node
#[derive(Debug, Clone, Default)]
pub struct StylePainter {
    palette: Palette,
}

impl StylePainter {
    pub fn new(palette: Palette) -> Self {
        StylePainter { palette }
    }
}

impl<N: PageNode> Painter<N> for StylePainter {
    fn paint(&self, node: &N, color: DisplayColor) {
        if let Some(css) = self.palette.css(color) {
            node.set_text_color(css);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeNode;

    #[test]
    fn test_paint_proven_and_disproven() {
        let painter = StylePainter::default();
        let fire = FakeNode::item(Some("Fire"));
        let noise = FakeNode::item(Some("Noise"));

        painter.paint(&fire, DisplayColor::Proven);
        painter.paint(&noise, DisplayColor::Disproven);

        assert_eq!(fire.color().as_deref(), Some("#00cc1f"));
        assert_eq!(noise.color().as_deref(), Some("#ff1c1c"));
    }

    #[test]
    fn test_no_override_leaves_node_untouched() {
        let painter = StylePainter::default();
        let node = FakeNode::item(Some("Wind"));

        painter.paint(&node, DisplayColor::NoOverride);

        assert_eq!(node.color(), None);
        assert_eq!(node.color_writes(), 0);
    }

    #[test]
    fn test_paint_is_idempotent() {
        let painter = StylePainter::default();
        let once = FakeNode::item(Some("Fire"));
        let twice = FakeNode::item(Some("Fire"));

        painter.paint(&once, DisplayColor::Proven);
        painter.paint(&twice, DisplayColor::Proven);
        painter.paint(&twice, DisplayColor::Proven);

        assert_eq!(once.color(), twice.color());
    }

    #[test]
    fn test_paint_only_touches_the_given_node() {
        let painter = StylePainter::default();
        let item = FakeNode::item(Some("Fire"));
        let wrapper = FakeNode::item_wrapper(item.clone());

        painter.paint(&wrapper, DisplayColor::Proven);

        assert_eq!(wrapper.color().as_deref(), Some("#00cc1f"));
        assert_eq!(item.color(), None);
    }

    #[test]
    fn test_custom_palette() {
        let painter = StylePainter::new(Palette {
            proven: "lime".to_string(),
            disproven: "crimson".to_string(),
        });
        let node = FakeNode::item(Some("Fire"));

        painter.paint(&node, DisplayColor::Disproven);

        assert_eq!(node.color().as_deref(), Some("crimson"));
    }
}
