#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Sequence {
    pub(crate) status: &'static str,
    pub(crate) lines: &'static [&'static str],
}

impl Sequence {
    /// Text shown in the status label while this sequence plays.
    pub(crate) fn label(&self) -> String {
        format!("{}...", self.status)
    }
}

pub(crate) const INITIAL_STATUS: &str = "Initializing search...";

pub(crate) const CODE_SEQUENCES: &[Sequence] = &[
    Sequence {
        status: "Parsing search parameters",
        lines: &[
            "const query = {",
            "  topic: 'organic skincare',",
            "  format: 'viral ad video',",
            "  minViews: 500000,",
            "  minComments: 300",
            "};",
            "// Expanded to 847 keywords",
        ],
    },
    Sequence {
        status: "Scanning TikTok, Reels, Shorts",
        lines: &[
            "const platforms = ['tiktok', 'instagram', 'youtube'];",
            "const results = await scanAll(platforms, query);",
            "",
            "console.log('Found', results.length, 'videos');",
            "// Scanned 24,847 videos",
        ],
    },
    Sequence {
        status: "Filtering viral content",
        lines: &[
            "const viral = results.filter(v => {",
            "  return v.views > 500000 &&",
            "         v.comments > 300 &&",
            "         v.velocity > 10000;",
            "});",
            "// 127 high-potential matches",
        ],
    },
    Sequence {
        status: "Analyzing hook patterns",
        lines: &[
            "const analyzed = await analyzeHooks(viral);",
            "const top = analyzed",
            "  .sort((a, b) => b.score - a.score)",
            "  .slice(0, 12);",
            "",
            "// Report ready: 12 videos identified",
        ],
    },
];
