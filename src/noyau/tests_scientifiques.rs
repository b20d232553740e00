//! Tests scientifiques : propriétés du moteur sur des entrées tirées au hasard.
//!
//! Bornes choisies pour rester loin des zones où le f64 ne garantit plus rien
//! (produits proches de 2^53, asin au voisinage de ±90°).

use proptest::prelude::*;

use super::catalogue::{arrondir, ModeAngle};
use super::change::TauxFixes;
use super::moteur::Moteur;

fn moteur() -> Moteur {
    Moteur::new(Box::new(TauxFixes::new()))
}

fn operateur() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["+", "-", "*", "/"])
}

proptest! {
    #[test]
    fn sci_binaires_remplacent_deux_operandes(
        a in -1e6f64..1e6,
        b in 1e-3f64..1e6,
        op in operateur(),
    ) {
        let mut m = moteur();
        m.push(a);
        m.push(b);
        prop_assert!(m.compute(op).is_ok());

        let attendu = match op {
            "+" => a + b,
            "-" => a - b,
            "*" => a * b,
            _ => a / b,
        };
        prop_assert_eq!(m.pile(), &[attendu][..]);
        prop_assert!(!m.prendre_erreur());
    }

    #[test]
    fn sci_dup_ajoute_une_copie_du_sommet(vals in prop::collection::vec(-1e9f64..1e9, 1..20)) {
        let mut m = moteur();
        for v in &vals {
            m.push(*v);
        }
        let sommet = *vals.last().unwrap();

        prop_assert!(m.compute("dup").is_ok());
        prop_assert_eq!(m.pile().len(), vals.len() + 1);
        prop_assert_eq!(m.pile()[vals.len()], sommet);
        prop_assert_eq!(&m.pile()[..vals.len()], &vals[..]);
    }

    #[test]
    fn sci_swap_insuffisant_laisse_la_pile(vals in prop::collection::vec(-1e3f64..1e3, 0..2)) {
        let mut m = moteur();
        for v in &vals {
            m.push(*v);
        }
        prop_assert!(m.compute("swap").is_err());
        prop_assert_eq!(m.pile(), &vals[..]);
        prop_assert!(m.prendre_erreur());
    }

    #[test]
    fn sci_operations_binaires_sans_operandes(op in operateur(), n in 0usize..2) {
        let mut m = moteur();
        for i in 0..n {
            m.push(i as f64);
        }
        let avant = m.pile().to_vec();
        prop_assert!(m.compute(op).is_err());
        prop_assert_eq!(m.pile(), &avant[..]);
        prop_assert!(m.prendre_erreur());
    }

    #[test]
    fn sci_precision_aller_retour(p in 0u32..8, v in -1e4f64..1e4) {
        let mut m = moteur();
        m.push(p as f64);
        prop_assert!(m.compute("precision").is_ok());

        m.push(v);
        let stocke = m.pile()[0];
        prop_assert_eq!(stocke, arrondir(v, p as f64));

        // empiler une valeur déjà arrondie ne la change pas
        m.push(stocke);
        prop_assert_eq!(m.pile()[1], stocke);
    }

    #[test]
    fn sci_asin_sin_en_degres(x in -89.0f64..89.0) {
        let mut m = moteur();
        m.evaluer_ligne("deg");
        m.push(x);
        prop_assert!(m.compute("sin").is_ok());
        prop_assert!(m.compute("asin").is_ok());
        prop_assert!((m.pile()[0] - x).abs() < 1e-6);
    }

    #[test]
    fn sci_changement_de_mode_non_retroactif(x in -1e3f64..1e3) {
        let mut m = moteur();
        m.push(x);
        m.evaluer_ligne("deg deg");
        prop_assert_eq!(m.mode(), ModeAngle::Degres);
        prop_assert_eq!(m.pile(), &[x][..]);

        m.push(x);
        prop_assert!(m.compute("sin").is_ok());
        prop_assert_eq!(m.pile()[1], x.to_radians().sin());

        m.evaluer_ligne("rad");
        prop_assert_eq!(m.pile()[1], x.to_radians().sin());
    }

    #[test]
    fn sci_modulo_non_negatif(a in -1e6f64..1e6, b in 1.0f64..1e3) {
        let mut m = moteur();
        m.push(a);
        m.push(b);
        prop_assert!(m.compute("%").is_ok());
        let r = m.pile()[0];
        prop_assert!(r >= 0.0 && r < b.trunc());
        prop_assert_eq!(r, r.trunc());
    }
}

#[test]
fn sci_exemples_bout_en_bout() {
    let mut m = moteur();
    m.evaluer_ligne("3 4 +");
    assert_eq!(m.pile(), &[7.0]);
    assert!(!m.prendre_erreur());

    let mut m = moteur();
    m.evaluer_ligne("5 sqrt");
    assert_eq!(m.pile(), &[5f64.sqrt()]);

    let mut m = moteur();
    m.evaluer_ligne("10 3 %");
    assert_eq!(m.pile(), &[1.0]);

    let mut m = moteur();
    m.evaluer_ligne("9");
    m.evaluer_ligne("");
    assert_eq!(m.pile(), &[9.0, 9.0]);
}
