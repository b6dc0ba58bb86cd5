use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub brand: Style,
    pub nav: Style,
    pub nav_active: Style,
    pub search: Style,
    pub placeholder: Style,
    pub title: Style,
    pub price: Style,
    pub selected: Style,
    pub muted: Style,
    pub notice: Style,
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            brand: Style::new().with_color(Color::Magenta).with_bold(),
            nav: Style::new().with_color(Color::DarkGrey),
            nav_active: Style::new().with_color(Color::Cyan).with_bold(),
            search: Style::new().with_color(Color::White),
            placeholder: Style::new().with_color(Color::DarkGrey),
            title: Style::new().with_bold(),
            price: Style::new().with_color(Color::Green),
            selected: Style::new().with_color(Color::Cyan).with_bold(),
            muted: Style::new().with_dim(),
            notice: Style::new().with_color(Color::Yellow),
            error: Style::new().with_color(Color::Red).with_bold(),
        }
    }
}
