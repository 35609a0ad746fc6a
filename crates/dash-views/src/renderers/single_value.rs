//! Single headline value

use dash_core::catalog::RendererKey;
use egui::{Id, RichText, Ui};

use super::BlockRenderer;
use crate::colors::POSITIVE;
use crate::content::BlockContent;

pub struct SingleValueRenderer;

impl BlockRenderer for SingleValueRenderer {
    fn key(&self) -> RendererKey {
        RendererKey::SingleValue
    }

    fn ui(&self, ui: &mut Ui, content: &BlockContent, _id: Id) {
        let BlockContent::SingleValue { value, caption, .. } = content else {
            return;
        };
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new(value).size(30.0).strong());
            ui.label(RichText::new(*caption).small().color(POSITIVE));
            ui.add_space(8.0);
        });
    }
}
