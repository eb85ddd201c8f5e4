use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub positive: Color,
    pub error: Color,
    pub stripe: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(0, 123, 255),
            border: Color::Rgb(70, 80, 90),
            positive: Color::Rgb(40, 167, 69),
            error: Color::Rgb(220, 53, 69),
            stripe: Color::Rgb(28, 32, 38),
        }
    }
}
