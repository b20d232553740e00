//! Calculatrice RPN
//!
//! - `noyau`  : moteur d’évaluation (pile, jetons, catalogue, taux de change)
//! - `config` : configuration en couches (fichier TOML, environnement)
//! - `app`    : présentation egui + session d’évaluation (fil dédié)

pub mod app;
pub mod config;
pub mod noyau;
