use heatcal::rollup::RollupKeys;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static COMMANDS: &[&str] = &[
    "j, DOWN         Scroll down one year",
    "k, UP           Scroll up one year",
    "TAB, r          Color by the next key",
    "BACKTAB, R      Color by the previous key",
    "n               Color by plain values only",
    "?               Show this help",
    "q, ESC          Quit",
];

/// Popup listing the commands and the rollup keys that can be colored by
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help<'a> {
    pub(crate) style: Style,
    pub(crate) rollup_keys: &'a RollupKeys,
}

impl Help<'_> {
    fn text(&self) -> Text<'static> {
        let mut lines = COMMANDS.iter().map(|&s| Line::raw(s)).collect::<Vec<_>>();
        lines.push(Line::default());
        if self.rollup_keys.is_empty() {
            lines.push(Line::raw("No rollup keys in the data."));
        } else {
            let keys = self.rollup_keys.iter().collect::<Vec<_>>().join(", ");
            lines.push(Line::raw(format!("Rollup keys: {keys}")));
        }
        lines.push(Line::default());
        lines.push(Line::raw("Press the Any Key to dismiss."));
        Text::from(lines)
    }
}

impl Widget for Help<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.style);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        Clear.render(help_area, buf);
        para.render(help_area, buf);
    }
}
