use ratatui::layout::Rect;

use super::panel::PANEL_HEIGHT;

const SECTION_GAP: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Section {
    Hero {
        title: &'static str,
        tagline: &'static str,
    },
    Text {
        title: &'static str,
        body: &'static str,
        height: u16,
    },
    CodeWindow,
}

impl Section {
    fn height(&self) -> u16 {
        match self {
            Self::Hero { .. } => 7,
            Self::Text { height, .. } => *height,
            Self::CodeWindow => PANEL_HEIGHT,
        }
    }
}

/// A vertical stack of sections laid out in page coordinates. The terminal
/// shows a window of it starting at the scroll offset.
#[derive(Debug, Clone)]
pub(crate) struct Page {
    sections: Vec<Section>,
}

impl Page {
    pub(crate) fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub(crate) fn landing() -> Self {
        Self::new(vec![
            Section::Hero {
                title: "Find the ads that already went viral",
                tagline: "Describe your product. We search every short-video platform and hand back the hooks that work.",
            },
            Section::Text {
                title: "Step 1 · Describe what you sell",
                body: "Type a topic, a format and the bar a video has to clear. \
                       Views, comments and growth speed are all fair game.\n\n\
                       The query is expanded into hundreds of related keywords \
                       before anything is scanned.",
                height: 10,
            },
            Section::CodeWindow,
            Section::Text {
                title: "Step 3 · Read the hook report",
                body: "Every match is scored on its opening seconds. \
                       The strongest hooks are ranked, grouped by pattern \
                       and ready to brief into your next shoot.\n\n\
                       Scroll away and the generator pauses. Scroll back and \
                       it picks up where it left off.",
                height: 10,
            },
            Section::Text {
                title: "Keys",
                body: "↑/↓ or j/k scroll   PgUp/PgDn page   Home/End jump\n\
                       r reset the generator   q or Esc quit",
                height: 6,
            },
        ])
    }

    pub(crate) fn has_code_window(&self) -> bool {
        self.sections.contains(&Section::CodeWindow)
    }

    /// Section rectangles for a page `width` columns wide.
    pub(crate) fn layout(&self, width: u16) -> Vec<(Rect, &Section)> {
        let mut y = 0u16;
        self.sections
            .iter()
            .map(|section| {
                let rect = Rect::new(0, y, width, section.height());
                y = y.saturating_add(section.height()).saturating_add(SECTION_GAP);
                (rect, section)
            })
            .collect()
    }

    pub(crate) fn height(&self) -> u16 {
        let sections = self
            .sections
            .iter()
            .map(Section::height)
            .fold(0u16, u16::saturating_add);
        let gaps = u16::try_from(self.sections.len())
            .unwrap_or(u16::MAX)
            .saturating_sub(1)
            .saturating_mul(SECTION_GAP);
        sections.saturating_add(gaps)
    }

    pub(crate) fn code_window(&self, width: u16) -> Option<Rect> {
        self.layout(width)
            .into_iter()
            .find(|(_, section)| matches!(section, Section::CodeWindow))
            .map(|(rect, _)| rect)
    }

    pub(crate) fn max_scroll(&self, viewport_height: u16) -> u16 {
        self.height().saturating_sub(viewport_height)
    }
}
