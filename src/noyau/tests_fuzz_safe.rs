//! Tests fuzz safe : lignes aléatoires, le moteur ne panique jamais.
//!
//! Invariants vérifiés après chaque ligne :
//! - l’historique grandit exactement du nombre de jetons émis
//! - le curseur reste dans [0, len-1]
//! - un instantané consomme le drapeau (le suivant est propre)

use proptest::prelude::*;

use super::change::TauxFixes;
use super::jetons::tokenize;
use super::moteur::Moteur;

fn moteur() -> Moteur {
    Moteur::new(Box::new(TauxFixes::new().avec("usd_eur", 0.92)))
}

/// Jetons plausibles + bruit (séparateurs, caractères ignorés, noms inconnus).
fn morceau() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,4}(\\.[0-9]{0,3})?",
        prop::sample::select(vec![
            "+", "-", "*", "/", "^", "%", "pow", "sqrt", "abs", "ceil", "floor", "round",
            "trunc", "sin", "cos", "tan", "asin", "acos", "atan", "precision", "#", "rad",
            "deg", "dup", "drop", "clear", "swap", "pi", "phi", "usd_eur", "eur_gbp", "foo",
            ",", "  ", "(", "X", "=",
        ])
        .prop_map(|s| s.to_string()),
    ]
}

fn ligne() -> impl Strategy<Value = String> {
    prop::collection::vec(morceau(), 0..12).prop_map(|v| v.join(" "))
}

proptest! {
    #[test]
    fn fuzz_lignes_plausibles(lignes in prop::collection::vec(ligne(), 1..8)) {
        let mut m = moteur();
        for l in &lignes {
            let avant = m.historique().len();
            let emis = tokenize(l).count();

            m.evaluer_ligne(l);

            prop_assert_eq!(m.historique().len(), avant + emis);
            if !m.historique().is_empty() {
                prop_assert!(m.historique().curseur() < m.historique().len());
            }

            let _ = m.instantane();
            prop_assert!(!m.instantane().erreur);
        }
    }

    #[test]
    fn fuzz_texte_arbitraire(l in any::<String>()) {
        let mut m = moteur();
        m.evaluer_ligne(&l);
        let _ = m.instantane();
    }

    #[test]
    fn fuzz_navigation_historique(lignes in prop::collection::vec(ligne(), 0..4), pas in prop::collection::vec(any::<bool>(), 0..30)) {
        let mut m = moteur();
        for l in &lignes {
            m.evaluer_ligne(l);
        }
        for en_arriere in pas {
            let r = if en_arriere { m.rappel_precedent() } else { m.rappel_suivant() };
            prop_assert_eq!(r.is_some(), !m.historique().is_empty());
            if !m.historique().is_empty() {
                prop_assert!(m.historique().curseur() < m.historique().len());
            }
        }
    }
}
