// src/noyau/change.rs
//
// Taux de change : collaborateur externe du moteur.
//
// Contrat :
// - entrée : une paire `abc_def` (3 lettres, '_', 3 lettres)
// - sortie : un f64, ou un échec (le détail n’est qu’indicatif)
//
// Le moteur traite tout échec de la même façon : drapeau d’erreur, rien d’empilé.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use log::{debug, info};
use regex::Regex;

use super::erreur::ErreurTaux;

pub const URL_TAUX_DEFAUT: &str = "http://free.currencyconverterapi.com/api/v5/convert";
pub const DELAI_TAUX_DEFAUT: Duration = Duration::from_millis(5000);

/// Paire de devises `abc_def`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PaireDevises {
    code: String,
}

impl PaireDevises {
    /// Reconnaît exactement la forme `[a-z]{3}_[a-z]{3}`.
    pub fn analyser(nom: &str) -> Option<Self> {
        static FORME: OnceLock<Regex> = OnceLock::new();
        let forme = FORME.get_or_init(|| Regex::new(r"^[a-z]{3}_[a-z]{3}$").expect("forme paire"));
        forme.is_match(nom).then(|| Self {
            code: nom.to_string(),
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn source(&self) -> &str {
        &self.code[..3]
    }

    pub fn cible(&self) -> &str {
        &self.code[4..]
    }
}

impl fmt::Display for PaireDevises {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Service de taux (injecté dans le moteur).
pub trait ServiceTaux: Send {
    fn taux(&self, paire: &PaireDevises) -> Result<f64, ErreurTaux>;
}

/// Premier nombre décimal lisible dans une réponse brute.
///
/// Exemple: `{"usd_eur":{"val":0.9214}}` => 0.9214
pub fn extraire_taux(corps: &str) -> Option<f64> {
    static NOMBRE: OnceLock<Regex> = OnceLock::new();
    let nombre =
        NOMBRE.get_or_init(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?|\.[0-9]+").expect("motif nombre"));
    nombre
        .find_iter(corps)
        .find_map(|m| m.as_str().parse::<f64>().ok())
}

/* ------------------------ Client HTTP ------------------------ */

/// Client HTTP bloquant, borné par un délai global.
pub struct ClientHttpTaux {
    agent: ureq::Agent,
    url: String,
}

impl ClientHttpTaux {
    pub fn new(url: impl Into<String>, delai: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(delai).build();
        Self {
            agent,
            url: url.into(),
        }
    }
}

impl Default for ClientHttpTaux {
    fn default() -> Self {
        Self::new(URL_TAUX_DEFAUT, DELAI_TAUX_DEFAUT)
    }
}

impl ServiceTaux for ClientHttpTaux {
    fn taux(&self, paire: &PaireDevises) -> Result<f64, ErreurTaux> {
        info!("taux {} -> {} via {}", paire.source(), paire.cible(), self.url);

        let reponse = self
            .agent
            .get(&self.url)
            .query("q", paire.code())
            .query("compact", "y")
            .call()
            .map_err(|e| ErreurTaux::Transport(e.to_string()))?;

        let corps = reponse
            .into_string()
            .map_err(|_| ErreurTaux::ReponseIllisible)?;
        debug!("réponse taux {paire}: {corps}");

        extraire_taux(&corps).ok_or(ErreurTaux::ReponseSansTaux)
    }
}

/* ------------------------ Taux fixes ------------------------ */

/// Table de taux en mémoire (hors ligne). Une paire absente est un échec.
#[derive(Clone, Debug, Default)]
pub struct TauxFixes {
    table: HashMap<String, f64>,
}

impl TauxFixes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn avec(mut self, paire: &str, taux: f64) -> Self {
        self.table.insert(paire.to_string(), taux);
        self
    }
}

impl ServiceTaux for TauxFixes {
    fn taux(&self, paire: &PaireDevises) -> Result<f64, ErreurTaux> {
        self.table
            .get(paire.code())
            .copied()
            .ok_or_else(|| ErreurTaux::Transport(format!("paire {paire} inconnue")))
    }
}
