// src/app/vue.rs
//
// Vue (UI egui)
// -------------
// - Pile en haut (bas de pile en haut de l’écran, sommet juste au-dessus de la saisie)
// - Saisie en bas : Entrée évalue, ↑/↓ rappellent l’historique, C efface
// - Cellules d’état : mode d’angle, précision, erreur (E)
// - Boutons : insèrent un nom du catalogue dans la saisie

use eframe::egui;

use super::etat::AppCalc;

/// Noms proposés en boutons, par rangée.
const TOUCHES: [&[&str]; 4] = [
    &["+", "-", "*", "/", "^", "%"],
    &["sqrt", "abs", "ceil", "floor", "round", "trunc"],
    &["sin", "cos", "tan", "asin", "acos", "atan"],
    &["dup", "drop", "swap", "clear", "pi", "phi", "rad", "deg", "#"],
];

const COULEUR_UNITE: egui::Color32 = egui::Color32::from_rgb(0, 170, 190);

/// Représentation la plus courte qui relit la même valeur, sans exposant.
fn format_valeur(v: f64) -> String {
    format!("{v}")
}

impl AppCalc {
    /// Pile : à appeler dans le panneau central.
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 4.0);

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for v in &self.affichage.pile {
                            ui.horizontal(|ui| {
                                ui.monospace(format_valeur(*v));
                            });
                        }
                    });
            });
    }

    /// Touches + saisie + cellules d’état : à appeler dans le panneau du bas.
    pub fn ui_saisie(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        self.ui_touches(ui);
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            let id = egui::Id::new("entree_rpn");

            // ↑/↓ : consommés avant le TextEdit (sinon ils déplacent le curseur)
            if ui.memory(|m| m.has_focus(id)) {
                if ui.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowUp)) {
                    self.rappel_precedent();
                }
                if ui.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowDown)) {
                    self.rappel_suivant();
                }
            }

            let largeur = (ui.available_width() - 200.0).max(120.0);
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.entree)
                    .id(id)
                    .desired_width(largeur)
                    .hint_text("Ex: 3 4 +, 2 sqrt, 100 usd_eur *")
                    .code_editor()
                    .interactive(!self.en_attente),
            );

            if self.focus_entree && !self.en_attente {
                resp.request_focus();
                self.focus_entree = false;
            }

            let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
            if resp.lost_focus() && enter {
                self.soumettre();
            }

            if ui
                .add_enabled(!self.en_attente, egui::Button::new("ENTER"))
                .clicked()
            {
                self.soumettre();
            }
            if ui.button("C").clicked() {
                self.clear_entree();
            }

            Self::cellule(ui, self.affichage.libelle_mode(), COULEUR_UNITE);
            Self::cellule(ui, &self.affichage.libelle_precision(), COULEUR_UNITE);
            let erreur = if self.affichage.erreur { "E" } else { " " };
            let rouge = ui.visuals().error_fg_color;
            Self::cellule(ui, erreur, rouge);

            if self.en_attente {
                ui.spinner();
            }
        });
        ui.add_space(4.0);
    }

    fn ui_touches(&mut self, ui: &mut egui::Ui) {
        for rangee in TOUCHES {
            ui.horizontal_wrapped(|ui| {
                for nom in rangee {
                    if ui.add_sized([46.0, 26.0], egui::Button::new(*nom)).clicked() {
                        self.inserer(nom);
                    }
                }
            });
        }
    }

    fn cellule(ui: &mut egui::Ui, texte: &str, couleur: egui::Color32) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_width(28.0);
            ui.colored_label(couleur, egui::RichText::new(texte).monospace());
        });
    }
}
