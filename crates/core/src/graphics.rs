//! Per-page graphics state cache.
//!
//! A page remembers the stroke, fill and text state its content stream has
//! established so far. Requests only produce operators for the parameters
//! that differ from what the page already has.

use folio_style::{DashPattern, LineCap, LineJoin, LineStyle};
use folio_types::{Color, ResourceName};
use lopdf::Object;
use lopdf::content::Operation;

/// Rounds a length to two decimals for the content stream.
pub(crate) fn real(value: f32) -> Object {
    Object::Real((value * 100.0).round() / 100.0)
}

fn color_operands(color: Color) -> Vec<Object> {
    color
        .components()
        .iter()
        .map(|c| Object::Real((c * 1000.0).round() / 1000.0))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsState {
    /// Points.
    pub line_width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub dash: DashPattern,
    pub stroke_color: Color,
    pub fill_color: Color,
    /// Selected font resource and size in points.
    pub font: Option<(ResourceName, f32)>,
    pub char_spacing: f32,
    pub word_spacing: f32,
    /// Percent.
    pub horizontal_scaling: f32,
}

impl Default for GraphicsState {
    /// The state every content stream starts with.
    fn default() -> Self {
        Self {
            line_width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            dash: DashPattern::solid(),
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            font: None,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scaling: 100.0,
        }
    }
}

impl GraphicsState {
    pub fn stroke_ops(&mut self, style: &LineStyle, color: Color) -> Vec<Operation> {
        let mut ops = Vec::new();
        if self.line_width != style.width {
            ops.push(Operation::new("w", vec![real(style.width)]));
            self.line_width = style.width;
        }
        if self.cap != style.cap {
            ops.push(Operation::new("J", vec![style.cap.pdf_value().into()]));
            self.cap = style.cap;
        }
        if self.join != style.join {
            ops.push(Operation::new("j", vec![style.join.pdf_value().into()]));
            self.join = style.join;
        }
        if self.dash != style.dash {
            let array = style.dash.array.iter().map(|v| real(*v)).collect::<Vec<_>>();
            ops.push(Operation::new(
                "d",
                vec![Object::Array(array), real(style.dash.phase)],
            ));
            self.dash = style.dash.clone();
        }
        if self.stroke_color != color {
            ops.push(Operation::new("RG", color_operands(color)));
            self.stroke_color = color;
        }
        ops
    }

    pub fn fill_ops(&mut self, color: Color) -> Vec<Operation> {
        if self.fill_color == color {
            return Vec::new();
        }
        self.fill_color = color;
        vec![Operation::new("rg", color_operands(color))]
    }

    /// Text state: font, character spacing (points) and horizontal scaling.
    pub fn text_ops(
        &mut self,
        font: &ResourceName,
        size: f32,
        char_spacing: f32,
        horizontal_scaling: f32,
    ) -> Vec<Operation> {
        let mut ops = Vec::new();
        let selected = self
            .font
            .as_ref()
            .is_some_and(|(name, current)| name == font && *current == size);
        if !selected {
            ops.push(Operation::new(
                "Tf",
                vec![Object::Name(font.as_bytes().to_vec()), real(size)],
            ));
            self.font = Some((font.clone(), size));
        }
        if self.char_spacing != char_spacing {
            ops.push(Operation::new("Tc", vec![real(char_spacing)]));
            self.char_spacing = char_spacing;
        }
        if self.horizontal_scaling != horizontal_scaling {
            ops.push(Operation::new("Tz", vec![real(horizontal_scaling)]));
            self.horizontal_scaling = horizontal_scaling;
        }
        ops
    }

    pub fn word_spacing_ops(&mut self, word_spacing: f32) -> Vec<Operation> {
        if self.word_spacing == word_spacing {
            return Vec::new();
        }
        self.word_spacing = word_spacing;
        vec![Operation::new("Tw", vec![real(word_spacing)])]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operators(ops: &[Operation]) -> Vec<&str> {
        ops.iter().map(|op| op.operator.as_str()).collect()
    }

    #[test]
    fn test_stroke_ops_only_emit_changes() {
        let mut state = GraphicsState::default();
        let style = LineStyle::default();
        assert_eq!(operators(&state.stroke_ops(&style, Color::BLACK)), vec!["w"]);
        assert!(state.stroke_ops(&style, Color::BLACK).is_empty());

        let dashed = LineStyle {
            cap: LineCap::Round,
            dash: DashPattern::new(vec![3.0, 1.0], 0.0),
            ..LineStyle::default()
        };
        assert_eq!(
            operators(&state.stroke_ops(&dashed, Color::rgb(255, 0, 0))),
            vec!["J", "d", "RG"]
        );
    }

    #[test]
    fn test_fill_ops() {
        let mut state = GraphicsState::default();
        assert!(state.fill_ops(Color::BLACK).is_empty());
        let ops = state.fill_ops(Color::rgb(255, 0, 0));
        assert_eq!(operators(&ops), vec!["rg"]);
        assert_eq!(ops[0].operands[0].as_float().unwrap(), 1.0);
        assert!(state.fill_ops(Color::rgb(255, 0, 0)).is_empty());
    }

    #[test]
    fn test_text_ops() {
        let mut state = GraphicsState::default();
        let f1 = ResourceName::font(1);
        assert_eq!(operators(&state.text_ops(&f1, 12.0, 0.0, 100.0)), vec!["Tf"]);
        assert!(state.text_ops(&f1, 12.0, 0.0, 100.0).is_empty());
        assert_eq!(
            operators(&state.text_ops(&f1, 10.0, 0.5, 80.0)),
            vec!["Tf", "Tc", "Tz"]
        );
        assert_eq!(operators(&state.word_spacing_ops(2.0)), vec!["Tw"]);
        assert!(state.word_spacing_ops(2.0).is_empty());
    }
}
