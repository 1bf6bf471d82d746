use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::RangeInclusive;

use macroquad::prelude::*;
use macroquad::ui::{Id, Skin, Ui};

use physics_visualizer::sim::panel::ControlPanel;

/// Label skins per text colour, built on first use.
#[derive(Default)]
pub(crate) struct ColorSkins {
    skins: Vec<(Color, Skin)>,
}

impl ColorSkins {
    fn get(&mut self, ui: &Ui, color: Color) -> &Skin {
        let index = match self.skins.iter().position(|(c, _)| *c == color) {
            Some(index) => index,
            None => {
                let label_style = ui.style_builder().text_color(color).build();
                let skin = Skin {
                    label_style,
                    ..ui.default_skin()
                };
                self.skins.push((color, skin));
                self.skins.len() - 1
            }
        };
        &self.skins[index].1
    }
}

/// Widget ids must be stable across frames, so they come from the label.
pub(crate) fn widget_id(label: &str) -> Id {
    let mut hasher = DefaultHasher::new();
    label.hash(&mut hasher);
    hasher.finish()
}

/// [`ControlPanel`] backed by a macroquad UI window.
pub(crate) struct MacroquadPanel<'a> {
    ui: &'a mut Ui,
    skins: &'a mut ColorSkins,
}

impl<'a> MacroquadPanel<'a> {
    pub(crate) fn new(ui: &'a mut Ui, skins: &'a mut ColorSkins) -> Self {
        Self { ui, skins }
    }
}

impl ControlPanel for MacroquadPanel<'_> {
    fn text(&mut self, text: &str) {
        self.ui.label(None, text);
    }

    fn colored_text(&mut self, color: Color, text: &str) {
        let skin = self.skins.get(&*self.ui, color).clone();
        self.ui.push_skin(&skin);
        self.ui.label(None, text);
        self.ui.pop_skin();
    }

    fn separator(&mut self) {
        self.ui.separator();
    }

    fn slider(&mut self, label: &str, range: RangeInclusive<f32>, value: &mut f32) -> bool {
        let before = *value;
        self.ui
            .slider(widget_id(label), label, *range.start()..*range.end(), value);
        *value != before
    }

    fn button(&mut self, label: &str) -> bool {
        self.ui.button(None, label)
    }

    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool {
        let before = *value;
        self.ui.checkbox(widget_id(label), label, value);
        *value != before
    }
}
