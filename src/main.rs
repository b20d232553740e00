// src/main.rs
//
// Calculatrice RPN — point d’entrée natif
// ---------------------------------------
// Ordre de démarrage :
// 1) configuration (fichier + environnement)
// 2) journal (niveau issu de la configuration, RUST_LOG prioritaire)
// 3) moteur + client de taux, confiés au fil de session
// 4) fenêtre eframe

use std::error::Error as _;

use eframe::egui;
use env_logger::Env;
use log::{error, info};

use calculatrice_rpn::app::session::Session;
use calculatrice_rpn::app::AppCalc;
use calculatrice_rpn::config::Config;
use calculatrice_rpn::noyau::change::ClientHttpTaux;
use calculatrice_rpn::noyau::moteur::Moteur;

/// Titre unique.
const TITRE_APP: &str = "Calculatrice RPN";

fn main() -> eframe::Result<()> {
    let config = Config::charger();

    let niveau = config
        .as_ref()
        .map(|c| c.journal.niveau.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(niveau)).init();

    let config = config.unwrap_or_else(|e| {
        match e.source() {
            Some(cause) => error!("{e}: {cause}"),
            None => error!("{e}"),
        }
        Config::default()
    });

    info!("{TITRE_APP} v{} démarre", env!("CARGO_PKG_VERSION"));

    let service = ClientHttpTaux::new(config.taux.url.clone(), config.taux.delai());
    let mut moteur = Moteur::avec_reglages(
        Box::new(service),
        config.calcul.mode,
        config.precision(),
    );
    let depart = moteur.instantane();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([520.0, 640.0])
            .with_min_inner_size([420.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |cc| {
            // la session réveille l’UI à chaque réponse
            let ctx = cc.egui_ctx.clone();
            let session = Session::demarrer(moteur, move || ctx.request_repaint())?;
            Ok(Box::new(AppCalc::new(session, depart)))
        }),
    )
}
