// src/app.rs
//
// Calculatrice RPN — module App (racine)
// -------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs + session.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App
//
// Important:
// - La gestion Enter/↑/↓ est faite dans vue.rs (quand le champ a le focus).

pub mod etat;
pub mod session;
pub mod vue;

pub use etat::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // réponses de la session arrivées depuis la dernière image
        self.traiter_reponses();

        // ESC = quitter (comme la ligne `quit`)
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.fermer();
        }

        egui::TopBottomPanel::bottom("saisie").show(ctx, |ui| {
            self.ui_saisie(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });

        if self.quitter {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
