use super::LineKind;
use crossterm::style::Color;

pub struct Theme {
    pub banner: Color,
    pub prompt: Color,
    pub rule: Color,
    pub output: Color,
    pub runtime_error: Color, // Errors raised while executing statements
    pub interp_error: Color,  // Errors in the program text
    pub internal_error: Color,
    pub notice: Color, // Missing files and other CLI messages
}

impl Theme {
    pub fn line_color(&self, kind: LineKind) -> Color {
        match kind {
            LineKind::Output => self.output,
            LineKind::Error => self.runtime_error,
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    banner: Color::Rgb { r: 250, g: 179, b: 135 },    // Orange
    prompt: Color::Rgb { r: 137, g: 180, b: 250 },    // Blue
    rule: Color::Rgb { r: 108, g: 112, b: 134 },      // Grey
    output: Color::Rgb { r: 205, g: 214, b: 244 },
    runtime_error: Color::Rgb { r: 243, g: 139, b: 168 },
    interp_error: Color::Rgb { r: 249, g: 226, b: 175 }, // Yellow
    internal_error: Color::Rgb { r: 245, g: 194, b: 231 }, // Pink
    notice: Color::Rgb { r: 148, g: 226, b: 213 },   // Teal
};
