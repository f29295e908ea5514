//! Style-resolved HTML node sequences.
//!
//! Markup parsing and the style cascade happen elsewhere; this module gets
//! a flat sequence of opening, closing and text nodes. Every tag kind maps
//! to a handler through [`handler`], and the handlers only describe what to
//! do as [`LayoutCommand`]s. [`Document::write_html`] runs the commands.

use crate::document::{Document, EPSILON};
use crate::error::{DocumentError, Result};
use folio_style::{FontStyleBits, Margins, ResolvedStyle, TextAlign, TextDirection};
use folio_types::Color;

/// Font size factors for `h1` to `h6`.
const HEADING_SCALES: [f32; 6] = [2.0, 1.5, 1.17, 1.0, 0.83, 0.67];

/// List indentation in multiples of the font size.
const LIST_INDENT_EMS: f32 = 2.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKind {
    Text,
    P,
    Div,
    Br,
    B,
    Strong,
    I,
    Em,
    U,
    Span,
    /// `h1` to `h6`.
    Heading(u8),
    Hr,
    Ul,
    Ol,
    Li,
    Unknown(String),
}

impl TagKind {
    /// Maps a lowercase or uppercase element name.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "p" => Self::P,
            "div" => Self::Div,
            "br" => Self::Br,
            "b" => Self::B,
            "strong" => Self::Strong,
            "i" => Self::I,
            "em" => Self::Em,
            "u" => Self::U,
            "span" => Self::Span,
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "hr" => Self::Hr,
            "ul" => Self::Ul,
            "ol" => Self::Ol,
            "li" => Self::Li,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// One entry of the node sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledNode {
    pub tag: TagKind,
    /// A closing tag; closing nodes carry no text or style.
    pub closing: bool,
    /// Content of a [`TagKind::Text`] node.
    pub text: String,
    pub style: ResolvedStyle,
    /// Index of the enclosing element in the sequence.
    pub parent: Option<usize>,
}

impl StyledNode {
    pub fn open(tag: TagKind) -> Self {
        Self {
            tag,
            closing: false,
            text: String::new(),
            style: ResolvedStyle::default(),
            parent: None,
        }
    }

    pub fn close(tag: TagKind) -> Self {
        Self {
            closing: true,
            ..Self::open(tag)
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::open(TagKind::Text)
        }
    }

    pub fn with_style(mut self, style: ResolvedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Font changes pushed by an element, applied over the current font.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontChange {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Factor on the current size, ignored when the style sets a size.
    pub scale: Option<f32>,
    pub style: ResolvedStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutCommand {
    Write(String),
    /// Forced line break.
    LineBreak,
    /// Ends the current line unless the cursor is already at a line start.
    BlockBreak,
    PushFont(FontChange),
    PopFont,
    PushBlock {
        align: Option<TextAlign>,
        direction: Option<TextDirection>,
        indent: Option<f32>,
    },
    PopBlock,
    BeginList {
        ordered: bool,
    },
    EndList,
    /// Writes the marker of the next list item.
    ListItem,
    HorizontalRule,
}

pub type TagHandler = fn(&StyledNode) -> Vec<LayoutCommand>;

/// The handler for each tag kind.
pub fn handler(tag: &TagKind) -> TagHandler {
    match tag {
        TagKind::Text => text,
        TagKind::P | TagKind::Div => block,
        TagKind::Br => line_break,
        TagKind::B | TagKind::Strong => bold,
        TagKind::I | TagKind::Em => italic,
        TagKind::U => underline,
        TagKind::Span => span,
        TagKind::Heading(_) => heading,
        TagKind::Hr => rule,
        TagKind::Ul | TagKind::Ol => list,
        TagKind::Li => list_item,
        TagKind::Unknown(_) => ignore,
    }
}

fn text(node: &StyledNode) -> Vec<LayoutCommand> {
    if node.text.is_empty() {
        Vec::new()
    } else {
        vec![LayoutCommand::Write(node.text.clone())]
    }
}

fn push_block(node: &StyledNode) -> LayoutCommand {
    LayoutCommand::PushBlock {
        align: node.style.text_align,
        direction: node.style.direction,
        indent: node.style.text_indent,
    }
}

fn styled_block(node: &StyledNode, font: FontChange) -> Vec<LayoutCommand> {
    if node.closing {
        vec![
            LayoutCommand::PopFont,
            LayoutCommand::PopBlock,
            LayoutCommand::BlockBreak,
        ]
    } else {
        vec![
            LayoutCommand::BlockBreak,
            push_block(node),
            LayoutCommand::PushFont(font),
        ]
    }
}

fn block(node: &StyledNode) -> Vec<LayoutCommand> {
    styled_block(
        node,
        FontChange {
            style: node.style.clone(),
            ..Default::default()
        },
    )
}

fn heading(node: &StyledNode) -> Vec<LayoutCommand> {
    let level = match node.tag {
        TagKind::Heading(level) => level.clamp(1, 6),
        _ => 1,
    };
    styled_block(
        node,
        FontChange {
            bold: true,
            scale: Some(HEADING_SCALES[usize::from(level) - 1]),
            style: node.style.clone(),
            ..Default::default()
        },
    )
}

fn line_break(node: &StyledNode) -> Vec<LayoutCommand> {
    if node.closing {
        Vec::new()
    } else {
        vec![LayoutCommand::LineBreak]
    }
}

fn inline(node: &StyledNode, font: FontChange) -> Vec<LayoutCommand> {
    if node.closing {
        vec![LayoutCommand::PopFont]
    } else {
        vec![LayoutCommand::PushFont(FontChange {
            style: node.style.clone(),
            ..font
        })]
    }
}

fn bold(node: &StyledNode) -> Vec<LayoutCommand> {
    inline(
        node,
        FontChange {
            bold: true,
            ..Default::default()
        },
    )
}

fn italic(node: &StyledNode) -> Vec<LayoutCommand> {
    inline(
        node,
        FontChange {
            italic: true,
            ..Default::default()
        },
    )
}

fn underline(node: &StyledNode) -> Vec<LayoutCommand> {
    inline(
        node,
        FontChange {
            underline: true,
            ..Default::default()
        },
    )
}

fn span(node: &StyledNode) -> Vec<LayoutCommand> {
    inline(node, FontChange::default())
}

fn rule(node: &StyledNode) -> Vec<LayoutCommand> {
    if node.closing {
        Vec::new()
    } else {
        vec![LayoutCommand::BlockBreak, LayoutCommand::HorizontalRule]
    }
}

fn list(node: &StyledNode) -> Vec<LayoutCommand> {
    if node.closing {
        vec![LayoutCommand::EndList, LayoutCommand::BlockBreak]
    } else {
        vec![
            LayoutCommand::BlockBreak,
            LayoutCommand::BeginList {
                ordered: node.tag == TagKind::Ol,
            },
        ]
    }
}

fn list_item(node: &StyledNode) -> Vec<LayoutCommand> {
    if node.closing {
        vec![LayoutCommand::PopFont, LayoutCommand::BlockBreak]
    } else {
        vec![
            LayoutCommand::BlockBreak,
            LayoutCommand::PushFont(FontChange {
                style: node.style.clone(),
                ..Default::default()
            }),
            LayoutCommand::ListItem,
        ]
    }
}

fn ignore(_: &StyledNode) -> Vec<LayoutCommand> {
    Vec::new()
}

#[derive(Debug, Clone)]
struct SavedFont {
    family: String,
    style: FontStyleBits,
    size: f32,
    color: Color,
}

#[derive(Debug, Clone, Copy)]
struct SavedBlock {
    align: TextAlign,
    direction: Option<TextDirection>,
}

#[derive(Debug, Clone, Copy)]
struct ListState {
    ordered: bool,
    count: usize,
    margins: Margins,
}

/// Executor state for one `write_html` call.
#[derive(Debug, Default)]
struct HtmlRun {
    line_height: f32,
    align: TextAlign,
    direction: Option<TextDirection>,
    /// First-line indent waiting for the next write.
    indent: f32,
    fonts: Vec<SavedFont>,
    blocks: Vec<SavedBlock>,
    lists: Vec<ListState>,
}

impl Document {
    /// Lays out a style-resolved node sequence with lines `h` high (the
    /// default line height when `h <= 0`). Font and margins are restored
    /// afterwards.
    pub fn write_html(&mut self, nodes: &[StyledNode], h: f32) -> Result<()> {
        for (i, node) in nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                if parent >= i {
                    return Err(DocumentError::InvalidInput(format!(
                        "node {i} has parent {parent}, which does not precede it"
                    )));
                }
            }
        }
        self.page_index()?;

        let mut run = HtmlRun {
            line_height: self.height_or_default(h),
            ..Default::default()
        };
        let base_font = self.save_font();
        let base_margins = self.state.margins;

        let mut result = Ok(());
        'nodes: for node in nodes {
            if let TagKind::Unknown(name) = &node.tag {
                if !node.closing {
                    log::warn!("Skipping unsupported tag <{name}>");
                }
            }
            for command in handler(&node.tag)(node) {
                result = self.run_command(command, &mut run);
                if result.is_err() {
                    break 'nodes;
                }
            }
        }

        self.restore_font(&base_font)?;
        self.state.margins = base_margins;
        result
    }

    fn save_font(&self) -> SavedFont {
        SavedFont {
            family: self.font_family().to_string(),
            style: self.font_style(),
            size: self.font_size(),
            color: self.text_color(),
        }
    }

    fn restore_font(&mut self, saved: &SavedFont) -> Result<()> {
        self.set_font(&saved.family, saved.style, Some(saved.size))?;
        self.set_text_color(saved.color);
        Ok(())
    }

    fn block_rtl(&self, run: &HtmlRun) -> bool {
        run.direction.map_or(self.state.rtl, TextDirection::is_rtl)
    }

    fn html_new_line(&mut self, run: &HtmlRun) {
        self.state.cursor.y += run.line_height;
        self.state.cursor.x = self.line_start(self.block_rtl(run));
        self.state.cursor.last_height = run.line_height;
        self.break_page_if_needed(run.line_height);
    }

    fn html_write(&mut self, text: &str, run: &mut HtmlRun) -> Result<()> {
        let rtl = self.block_rtl(run);
        if run.indent != 0.0 && (self.state.cursor.x - self.line_start(rtl)).abs() < EPSILON {
            if rtl {
                self.state.cursor.x -= run.indent;
            } else {
                self.state.cursor.x += run.indent;
            }
        }
        run.indent = 0.0;
        self.set_temp_rtl(run.direction);
        self.write(run.line_height, text, run.align)
    }

    fn run_command(&mut self, command: LayoutCommand, run: &mut HtmlRun) -> Result<()> {
        log::trace!("html: {:?}", command);
        match command {
            LayoutCommand::Write(text) => self.html_write(&text, run)?,
            LayoutCommand::LineBreak => self.html_new_line(run),
            LayoutCommand::BlockBreak => {
                let start = self.line_start(self.block_rtl(run));
                if (self.state.cursor.x - start).abs() >= EPSILON {
                    self.html_new_line(run);
                }
            }
            LayoutCommand::PushFont(change) => {
                let saved = self.save_font();
                let mut bits = saved.style;
                bits.bold |= change.bold;
                bits.italic |= change.italic;
                bits.underline |= change.underline;
                let bits = change.style.font_bits(bits);
                let size = change
                    .style
                    .font_size
                    .or(change.scale.map(|scale| saved.size * scale))
                    .unwrap_or(saved.size);
                let color = change.style.color.unwrap_or(saved.color);
                self.set_font(&saved.family, bits, Some(size))?;
                self.set_text_color(color);
                run.fonts.push(saved);
            }
            LayoutCommand::PopFont => match run.fonts.pop() {
                Some(saved) => self.restore_font(&saved)?,
                None => log::warn!("Unbalanced closing tag; font stack is empty"),
            },
            LayoutCommand::PushBlock {
                align,
                direction,
                indent,
            } => {
                run.blocks.push(SavedBlock {
                    align: run.align,
                    direction: run.direction,
                });
                if let Some(align) = align {
                    run.align = align;
                }
                if direction.is_some() {
                    run.direction = direction;
                }
                run.indent = indent.unwrap_or(0.0);
                self.state.cursor.x = self.line_start(self.block_rtl(run));
            }
            LayoutCommand::PopBlock => {
                if let Some(saved) = run.blocks.pop() {
                    run.align = saved.align;
                    run.direction = saved.direction;
                }
                run.indent = 0.0;
            }
            LayoutCommand::BeginList { ordered } => {
                let margins = self.state.margins;
                let indent = self.active_font().size_in_units() * LIST_INDENT_EMS;
                if self.block_rtl(run) {
                    self.state.margins.right += indent;
                } else {
                    self.state.margins.left += indent;
                }
                run.lists.push(ListState {
                    ordered,
                    count: 0,
                    margins,
                });
                self.state.cursor.x = self.line_start(self.block_rtl(run));
            }
            LayoutCommand::EndList => {
                if let Some(list) = run.lists.pop() {
                    let rtl = self.block_rtl(run);
                    let at_start = (self.state.cursor.x - self.line_start(rtl)).abs() < EPSILON;
                    self.state.margins = list.margins;
                    if at_start {
                        self.state.cursor.x = self.line_start(rtl);
                    }
                }
            }
            LayoutCommand::ListItem => {
                let marker = match run.lists.last_mut() {
                    Some(list) => {
                        list.count += 1;
                        if list.ordered {
                            format!("{}. ", list.count)
                        } else {
                            "\u{2022} ".to_string()
                        }
                    }
                    None => "\u{2022} ".to_string(),
                };
                self.html_write(&marker, run)?;
            }
            LayoutCommand::HorizontalRule => {
                let half = run.line_height / 2.0;
                let y = self.state.cursor.y + half;
                let left = self.state.margins.left;
                let right = self.page_width - self.state.margins.right;
                self.line(left, y, right, y)?;
                self.html_new_line(run);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_layout::CoreFontProvider;
    use folio_style::{FontWeight, Unit};
    use lopdf::Object;
    use lopdf::content::Content;
    use std::sync::Arc;

    fn document() -> Document {
        let config = crate::DocumentConfig {
            unit: Unit::Pt,
            margins: Margins::all(10.0),
            font_size: 10.0,
            ..Default::default()
        };
        let mut doc = Document::new(config, Arc::new(CoreFontProvider::new())).unwrap();
        doc.add_page();
        doc
    }

    fn shown(doc: &Document) -> Vec<Vec<u8>> {
        let content = Content::decode(&doc.page_content(1).unwrap()).unwrap();
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(TagKind::from_name("P"), TagKind::P);
        assert_eq!(TagKind::from_name("h3"), TagKind::Heading(3));
        assert_eq!(TagKind::from_name("strong"), TagKind::Strong);
        assert_eq!(
            TagKind::from_name("blink"),
            TagKind::Unknown("blink".to_string())
        );
    }

    #[test]
    fn test_handler_table() {
        let bold_open = handler(&TagKind::B)(&StyledNode::open(TagKind::B));
        assert!(matches!(
            bold_open.as_slice(),
            [LayoutCommand::PushFont(FontChange { bold: true, .. })]
        ));
        let bold_close = handler(&TagKind::B)(&StyledNode::close(TagKind::B));
        assert_eq!(bold_close, vec![LayoutCommand::PopFont]);

        let text = handler(&TagKind::Text)(&StyledNode::text("hi"));
        assert_eq!(text, vec![LayoutCommand::Write("hi".to_string())]);

        let rtl = ResolvedStyle {
            direction: Some(TextDirection::Rtl),
            text_align: Some(TextAlign::Center),
            ..Default::default()
        };
        let paragraph = handler(&TagKind::P)(&StyledNode::open(TagKind::P).with_style(rtl));
        assert_eq!(
            paragraph[1],
            LayoutCommand::PushBlock {
                align: Some(TextAlign::Center),
                direction: Some(TextDirection::Rtl),
                indent: None,
            }
        );

        let heading = handler(&TagKind::Heading(2))(&StyledNode::open(TagKind::Heading(2)));
        assert!(matches!(
            heading.last(),
            Some(LayoutCommand::PushFont(FontChange { bold: true, scale: Some(s), .. })) if *s == 1.5
        ));

        assert!(handler(&TagKind::Unknown("x".into()))(&StyledNode::open(TagKind::Unknown("x".into()))).is_empty());
        assert_eq!(
            handler(&TagKind::Ol)(&StyledNode::open(TagKind::Ol))[1],
            LayoutCommand::BeginList { ordered: true }
        );
    }

    #[test]
    fn test_paragraphs_and_inline_styles() {
        let mut doc = document();
        let strong = ResolvedStyle {
            font_weight: Some(FontWeight::Bold),
            ..Default::default()
        };
        let nodes = vec![
            StyledNode::open(TagKind::P),
            StyledNode::text("Plain "),
            StyledNode::open(TagKind::Span).with_style(strong).with_parent(0),
            StyledNode::text("bold").with_parent(2),
            StyledNode::close(TagKind::Span),
            StyledNode::close(TagKind::P),
            StyledNode::open(TagKind::P),
            StyledNode::text("Next"),
            StyledNode::close(TagKind::P),
        ];
        doc.write_html(&nodes, 0.0).unwrap();

        assert_eq!(
            shown(&doc),
            vec![b"Plain ".to_vec(), b"bold".to_vec(), b"Next".to_vec()]
        );
        let fonts: Vec<_> = doc
            .font_resources()
            .iter()
            .map(|f| f.base_font.as_str())
            .collect();
        assert_eq!(fonts, vec!["Helvetica", "Helvetica-Bold"]);
        // Two paragraphs: the cursor sits below the second line.
        assert_eq!(doc.y(), 35.0);
        assert!(!doc.font_style().bold);
    }

    #[test]
    fn test_lists_write_markers() {
        let mut doc = document();
        let nodes = vec![
            StyledNode::open(TagKind::Ol),
            StyledNode::open(TagKind::Li),
            StyledNode::text("first"),
            StyledNode::close(TagKind::Li),
            StyledNode::open(TagKind::Li),
            StyledNode::text("second"),
            StyledNode::close(TagKind::Li),
            StyledNode::close(TagKind::Ol),
            StyledNode::open(TagKind::Ul),
            StyledNode::open(TagKind::Li),
            StyledNode::text("dot"),
            StyledNode::close(TagKind::Li),
            StyledNode::close(TagKind::Ul),
        ];
        doc.write_html(&nodes, 0.0).unwrap();

        let strings = shown(&doc);
        assert_eq!(strings[0], b"1. ");
        assert_eq!(strings[2], b"2. ");
        // U+2022 in WinAnsi.
        assert_eq!(strings[4], b"\x95 ");
        assert_eq!(strings[5], b"dot");
        assert_eq!(doc.margins().left, 10.0);
    }

    #[test]
    fn test_heading_and_rule() {
        let mut doc = document();
        let nodes = vec![
            StyledNode::open(TagKind::Heading(1)),
            StyledNode::text("Title"),
            StyledNode::close(TagKind::Heading(1)),
            StyledNode::open(TagKind::Hr),
            StyledNode::open(TagKind::Unknown("blink".into())),
            StyledNode::text("after"),
        ];
        doc.write_html(&nodes, 0.0).unwrap();

        let content = Content::decode(&doc.page_content(1).unwrap()).unwrap();
        let sizes: Vec<f32> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tf")
            .map(|op| op.operands[1].as_float().unwrap())
            .collect();
        assert_eq!(sizes, vec![20.0, 10.0]);
        assert!(content.operations.iter().any(|op| op.operator == "l"));
        assert_eq!(shown(&doc), vec![b"Title".to_vec(), b"after".to_vec()]);
        assert_eq!(doc.font_size(), 10.0);
    }

    #[test]
    fn test_rtl_paragraph_starts_at_right_margin() {
        let mut doc = document();
        let rtl = ResolvedStyle {
            direction: Some(TextDirection::Rtl),
            ..Default::default()
        };
        let nodes = vec![
            StyledNode::open(TagKind::P).with_style(rtl),
            StyledNode::text("abc"),
            StyledNode::close(TagKind::P),
        ];
        doc.write_html(&nodes, 0.0).unwrap();

        let content = Content::decode(&doc.page_content(1).unwrap()).unwrap();
        let td = content
            .operations
            .iter()
            .find(|op| op.operator == "Td")
            .unwrap();
        let x = td.operands[0].as_float().unwrap();
        assert!((x - (585.28 - 16.12)).abs() < 0.02);
        assert!(!doc.is_rtl());
    }

    #[test]
    fn test_invalid_parent_is_rejected() {
        let mut doc = document();
        let nodes = vec![
            StyledNode::open(TagKind::P),
            StyledNode::text("orphan").with_parent(7),
        ];
        assert!(matches!(
            doc.write_html(&nodes, 0.0),
            Err(DocumentError::InvalidInput(_))
        ));
        assert!(doc.page_content(1).unwrap().is_empty());
    }
}
