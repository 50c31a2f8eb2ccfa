use eframe::egui;
use egui::Color32;
use shared::domain::ThemePreference;

pub const ERROR_COLOR: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color32,
    pub text: Color32,
    pub card: Color32,
    pub border: Color32,
    pub button: Color32,
    pub button_text: Color32,
}

pub fn palette(theme: ThemePreference) -> Palette {
    match theme {
        ThemePreference::Light => Palette {
            background: Color32::from_rgb(0xf4, 0xf4, 0xf7),
            text: Color32::from_rgb(0x18, 0x18, 0x1a),
            card: Color32::WHITE,
            border: Color32::from_rgb(0xec, 0xec, 0xec),
            button: Color32::from_rgb(0x1a, 0x1a, 0x1a),
            button_text: Color32::WHITE,
        },
        ThemePreference::Dark => Palette {
            background: Color32::from_rgb(0x18, 0x18, 0x1a),
            text: Color32::from_rgb(0xf4, 0xf4, 0xf7),
            card: Color32::from_rgb(0x20, 0x20, 0x24),
            border: Color32::from_rgb(0x23, 0x23, 0x26),
            button: Color32::from_rgb(0xf4, 0xf4, 0xf7),
            button_text: Color32::from_rgb(0x18, 0x18, 0x1a),
        },
    }
}

pub fn egui_theme(theme: ThemePreference) -> egui::Theme {
    match theme {
        ThemePreference::Light => egui::Theme::Light,
        ThemePreference::Dark => egui::Theme::Dark,
    }
}

pub fn visuals_for_theme(theme: ThemePreference) -> egui::Visuals {
    let colors = palette(theme);
    let mut v = match theme {
        ThemePreference::Light => egui::Visuals::light(),
        ThemePreference::Dark => egui::Visuals::dark(),
    };
    v.override_text_color = Some(colors.text);
    v.window_fill = colors.card;
    v.panel_fill = colors.background;
    v.extreme_bg_color = colors.background;
    v.faint_bg_color = colors.border;
    v.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, colors.border);
    v
}

/// Label for the header toggle, naming the mode it switches to.
pub fn toggle_label(theme: ThemePreference) -> &'static str {
    match theme {
        ThemePreference::Light => "🌙 Dark mode",
        ThemePreference::Dark => "☀ Light mode",
    }
}
