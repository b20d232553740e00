//! src/config.rs
//!
//! Configuration de la calculatrice.
//!
//! Sources, de la plus forte à la plus faible :
//! 1. variables d’environnement `CALC_RPN_*`
//! 2. fichier TOML (`CALC_RPN_CONFIG`, sinon `./calculatrice_rpn.toml`)
//! 3. valeurs par défaut
//!
//! Exemple de fichier :
//!
//! ```toml
//! [calcul]
//! mode = "deg"
//! precision = 4
//!
//! [taux]
//! url = "http://free.currencyconverterapi.com/api/v5/convert"
//! delai_ms = 3000
//!
//! [journal]
//! niveau = "debug"
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::noyau::catalogue::{ModeAngle, PRECISION_MAX};
use crate::noyau::change::{DELAI_TAUX_DEFAUT, URL_TAUX_DEFAUT};

pub const FICHIER_DEFAUT: &str = "calculatrice_rpn.toml";

#[derive(Debug, Error)]
pub enum ErreurConfig {
    #[error("lecture de {chemin} impossible")]
    Lecture {
        chemin: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("configuration {chemin} invalide")]
    Syntaxe {
        chemin: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub calcul: ConfigCalcul,
    pub taux: ConfigTaux,
    pub journal: ConfigJournal,
}

/// Réglages de départ du moteur.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigCalcul {
    pub mode: ModeAngle,
    pub precision: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigTaux {
    pub url: String,
    pub delai_ms: u64,
}

impl Default for ConfigTaux {
    fn default() -> Self {
        Self {
            url: URL_TAUX_DEFAUT.to_string(),
            delai_ms: DELAI_TAUX_DEFAUT.as_millis() as u64,
        }
    }
}

impl ConfigTaux {
    pub fn delai(&self) -> Duration {
        Duration::from_millis(self.delai_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigJournal {
    /// Filtre env_logger (`info`, `debug`, `calculatrice_rpn=trace`…).
    pub niveau: String,
}

impl Default for ConfigJournal {
    fn default() -> Self {
        Self {
            niveau: "info".to_string(),
        }
    }
}

impl Config {
    /// Charge fichier + environnement. Fichier absent => valeurs par défaut.
    pub fn charger() -> Result<Config, ErreurConfig> {
        let chemin = env::var_os("CALC_RPN_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(FICHIER_DEFAUT));

        let mut config = if chemin.exists() {
            Self::depuis_fichier(&chemin)?
        } else {
            debug!("pas de fichier {}, valeurs par défaut", chemin.display());
            Config::default()
        };

        config.appliquer_env(|cle| env::var(cle).ok());
        Ok(config)
    }

    pub fn depuis_fichier(chemin: &Path) -> Result<Config, ErreurConfig> {
        let texte = fs::read_to_string(chemin).map_err(|source| ErreurConfig::Lecture {
            chemin: chemin.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&texte).map_err(|source| ErreurConfig::Syntaxe {
            chemin: chemin.to_path_buf(),
            source,
        })?;
        info!("configuration lue depuis {}", chemin.display());
        Ok(config)
    }

    /// Surcharges `CALC_RPN_*`. Une valeur illisible est ignorée (avec avertissement).
    pub fn appliquer_env(&mut self, lire: impl Fn(&str) -> Option<String>) {
        if let Some(mode) = lire("CALC_RPN_MODE") {
            match mode.trim().to_lowercase().as_str() {
                "rad" => self.calcul.mode = ModeAngle::Radians,
                "deg" => self.calcul.mode = ModeAngle::Degres,
                autre => warn!("CALC_RPN_MODE ignoré: {autre:?}"),
            }
        }

        if let Some(p) = lire("CALC_RPN_PRECISION") {
            let p = p.trim();
            if p.is_empty() {
                self.calcul.precision = None;
            } else {
                match p.parse::<u32>() {
                    Ok(n) => self.calcul.precision = Some(n),
                    Err(_) => warn!("CALC_RPN_PRECISION ignoré: {p:?}"),
                }
            }
        }

        if let Some(url) = lire("CALC_RPN_TAUX_URL") {
            self.taux.url = url;
        }

        if let Some(d) = lire("CALC_RPN_TAUX_DELAI_MS") {
            match d.trim().parse::<u64>() {
                Ok(ms) => self.taux.delai_ms = ms,
                Err(_) => warn!("CALC_RPN_TAUX_DELAI_MS ignoré: {d:?}"),
            }
        }

        if let Some(niveau) = lire("CALC_RPN_JOURNAL") {
            self.journal.niveau = niveau;
        }
    }

    /// Précision de départ, bornée comme celle fixée par `precision`.
    pub fn precision(&self) -> Option<u32> {
        self.calcul.precision.map(|p| p.min(PRECISION_MAX))
    }
}
