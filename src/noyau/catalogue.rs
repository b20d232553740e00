// src/noyau/catalogue.rs
//
// Catalogue figé des opérations : nom -> descripteur.
//
// Chaque descripteur porte sa propre arité (donnée statique, jamais déduite à l’appel) :
// - Binaire        (2) : + - * / ^ pow % trunc
// - Unaire         (1) : sqrt abs ceil floor round
// - Trigo          (1) : sin cos tan (entrée convertie du mode courant vers radians)
// - TrigoInverse   (1) : asin acos atan (sortie convertie des radians vers le mode courant)
// - Precision      (1) : precision, #
// - Mode           (0) : rad, deg
// - Pile           (0) : dup drop clear swap
// - Constante      (0) : pi phi
//
// Les opérations ne capturent rien : l’état à modifier leur est passé explicitement.

use std::collections::HashMap;
use std::f64::consts::PI;

use num_traits::ToPrimitive;
use serde::Deserialize;

use super::erreur::ErreurNoyau;
use super::moteur::EtatCalcul;
use super::pile::Pile;

/// Nombre d’or.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Garde-fou : au-delà, 10^p n’est plus représentable en f64.
pub const PRECISION_MAX: u32 = 308;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum ModeAngle {
    #[default]
    #[serde(rename = "rad")]
    Radians,
    #[serde(rename = "deg")]
    Degres,
}

impl ModeAngle {
    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Radians => "RAD",
            ModeAngle::Degres => "DEG",
        }
    }

    pub fn vers_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Radians => x,
            ModeAngle::Degres => x.to_radians(),
        }
    }

    pub fn depuis_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Radians => x,
            ModeAngle::Degres => x.to_degrees(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpPile {
    Dupliquer,
    Retirer,
    Vider,
    Echanger,
}

impl OpPile {
    fn appliquer(self, pile: &mut Pile) -> Result<(), ErreurNoyau> {
        match self {
            OpPile::Dupliquer => pile.dupliquer(),
            OpPile::Retirer => pile.depiler().map(|_| ()),
            OpPile::Vider => {
                pile.vider();
                Ok(())
            }
            OpPile::Echanger => pile.echanger(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Operation {
    Binaire(fn(f64, f64) -> f64),
    Unaire(fn(f64) -> f64),
    Trigo(fn(f64) -> f64),
    TrigoInverse(fn(f64) -> f64),
    Precision,
    Mode(ModeAngle),
    Pile(OpPile),
    Constante(f64),
}

impl Operation {
    pub fn arite(&self) -> usize {
        match self {
            Operation::Binaire(_) => 2,
            Operation::Unaire(_)
            | Operation::Trigo(_)
            | Operation::TrigoInverse(_)
            | Operation::Precision => 1,
            Operation::Mode(_) | Operation::Pile(_) | Operation::Constante(_) => 0,
        }
    }

    /// Applique l’opération à des opérandes déjà dépilés (ordre d’empilement).
    ///
    /// Retour: `Some(v)` si une valeur doit être empilée, `None` si l’opération
    /// a seulement modifié l’état (mode, précision, pile).
    pub fn appliquer(
        &self,
        etat: &mut EtatCalcul,
        operandes: &[f64],
    ) -> Result<Option<f64>, ErreurNoyau> {
        match (*self, operandes) {
            (Operation::Binaire(f), &[x, y]) => Ok(Some(f(x, y))),
            (Operation::Unaire(f), &[x]) => Ok(Some(f(x))),
            (Operation::Trigo(f), &[x]) => Ok(Some(f(etat.mode.vers_radians(x)))),
            (Operation::TrigoInverse(f), &[x]) => Ok(Some(etat.mode.depuis_radians(f(x)))),
            (Operation::Precision, &[x]) => {
                etat.precision = precision_depuis(x)?;
                Ok(None)
            }
            (Operation::Mode(m), []) => {
                etat.mode = m;
                Ok(None)
            }
            (Operation::Pile(op), []) => {
                op.appliquer(&mut etat.pile)?;
                Ok(None)
            }
            (Operation::Constante(c), []) => Ok(Some(c)),
            _ => Err(ErreurNoyau::PileInsuffisante {
                requis: self.arite(),
                disponible: operandes.len(),
            }),
        }
    }
}

/// round(v · 10^chiffres) / 10^chiffres, arrondi « loin de zéro » sur la demi-unité.
/// Si l’échelle sort du domaine fini, la valeur est rendue telle quelle.
pub fn arrondir(v: f64, chiffres: f64) -> f64 {
    let echelle = if chiffres.fract() == 0.0 && chiffres.abs() <= i32::MAX as f64 {
        10f64.powi(chiffres as i32)
    } else {
        10f64.powf(chiffres)
    };
    let s = v * echelle;
    // y NaN/±∞ ou échelle hors domaine : x inchangé (la formule brute donnerait NaN)
    if !s.is_finite() || echelle == 0.0 {
        return v;
    }
    s.round() / echelle
}

/// Précision = partie entière de x ; négative => plus d’arrondi.
fn precision_depuis(x: f64) -> Result<Option<u32>, ErreurNoyau> {
    if !x.is_finite() {
        return Err(ErreurNoyau::PrecisionInvalide(x));
    }
    let t = x.trunc();
    if t < 0.0 {
        return Ok(None);
    }
    t.min(PRECISION_MAX as f64)
        .to_u32()
        .map(Some)
        .ok_or(ErreurNoyau::PrecisionInvalide(x))
}

fn modulo_entier(x: f64, y: f64) -> f64 {
    x.trunc().rem_euclid(y.trunc())
}

#[derive(Clone, Debug)]
pub struct Catalogue {
    table: HashMap<&'static str, Operation>,
}

impl Catalogue {
    /// Table standard, construite une fois par moteur.
    pub fn standard() -> Self {
        use Operation::*;

        let entrees: [(&'static str, Operation); 29] = [
            ("+", Binaire(|x, y| x + y)),
            ("-", Binaire(|x, y| x - y)),
            ("*", Binaire(|x, y| x * y)),
            ("/", Binaire(|x, y| x / y)),
            ("^", Binaire(f64::powf)),
            ("pow", Binaire(f64::powf)),
            ("%", Binaire(modulo_entier)),
            ("trunc", Binaire(arrondir)),
            ("sqrt", Unaire(f64::sqrt)),
            ("abs", Unaire(f64::abs)),
            ("ceil", Unaire(f64::ceil)),
            ("floor", Unaire(f64::floor)),
            ("round", Unaire(f64::round)),
            ("sin", Trigo(f64::sin)),
            ("cos", Trigo(f64::cos)),
            ("tan", Trigo(f64::tan)),
            ("asin", TrigoInverse(f64::asin)),
            ("acos", TrigoInverse(f64::acos)),
            ("atan", TrigoInverse(f64::atan)),
            ("precision", Precision),
            ("#", Precision),
            ("rad", Mode(ModeAngle::Radians)),
            ("deg", Mode(ModeAngle::Degres)),
            ("dup", Pile(OpPile::Dupliquer)),
            ("drop", Pile(OpPile::Retirer)),
            ("clear", Pile(OpPile::Vider)),
            ("swap", Pile(OpPile::Echanger)),
            ("pi", Constante(PI)),
            ("phi", Constante(PHI)),
        ];

        Self {
            table: entrees.into_iter().collect(),
        }
    }

    pub fn get(&self, nom: &str) -> Option<Operation> {
        self.table.get(nom).copied()
    }

    pub fn contient(&self, nom: &str) -> bool {
        self.table.contains_key(nom)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binaire(nom: &str, x: f64, y: f64) -> f64 {
        let mut etat = EtatCalcul::default();
        Catalogue::standard()
            .get(nom)
            .unwrap_or_else(|| panic!("{nom} absent"))
            .appliquer(&mut etat, &[x, y])
            .unwrap()
            .unwrap()
    }

    fn unaire_en(mode: ModeAngle, nom: &str, x: f64) -> f64 {
        let mut etat = EtatCalcul {
            mode,
            ..EtatCalcul::default()
        };
        Catalogue::standard()
            .get(nom)
            .unwrap()
            .appliquer(&mut etat, &[x])
            .unwrap()
            .unwrap()
    }

    fn proche(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn arites_statiques() {
        let c = Catalogue::standard();
        for (nom, arite) in [
            ("+", 2),
            ("pow", 2),
            ("%", 2),
            ("trunc", 2),
            ("sqrt", 1),
            ("sin", 1),
            ("asin", 1),
            ("precision", 1),
            ("#", 1),
            ("rad", 0),
            ("swap", 0),
            ("pi", 0),
        ] {
            assert_eq!(c.get(nom).map(|o| o.arite()), Some(arite), "{nom}");
        }
        assert_eq!(c.len(), 29);
        assert!(!c.contient("foo"));
    }

    #[test]
    fn ordre_des_operandes() {
        // x empilé en premier, y en second
        assert_eq!(binaire("-", 10.0, 3.0), 7.0);
        assert_eq!(binaire("/", 12.0, 4.0), 3.0);
        assert_eq!(binaire("^", 2.0, 10.0), 1024.0);
        assert_eq!(binaire("pow", 9.0, 0.5), 3.0);
    }

    #[test]
    fn modulo_tronque_non_negatif() {
        assert_eq!(binaire("%", 10.0, 3.0), 1.0);
        assert_eq!(binaire("%", 10.9, 3.7), 1.0);
        assert_eq!(binaire("%", -7.0, 3.0), 2.0);
        assert!(binaire("%", 5.0, 0.5).is_nan());
    }

    #[test]
    fn trunc_arrondit_aux_decimales() {
        assert_eq!(binaire("trunc", 3.14159, 2.0), 3.14);
        assert_eq!(binaire("trunc", 2.5, 0.0), 3.0);
        assert_eq!(binaire("trunc", -2.5, 0.0), -3.0);
        assert_eq!(binaire("trunc", 1234.0, -2.0), 1200.0);
    }

    #[test]
    fn arrondir_hors_domaine_rend_la_valeur() {
        assert_eq!(arrondir(1.5e300, 100.0), 1.5e300);
        assert_eq!(arrondir(0.125, 2.0), 0.13);
        assert_eq!(arrondir(2.5, f64::NAN), 2.5);
        assert_eq!(arrondir(2.5, f64::INFINITY), 2.5);
        assert_eq!(arrondir(2.5, f64::NEG_INFINITY), 2.5);
    }

    #[test]
    fn trigo_selon_le_mode() {
        proche(unaire_en(ModeAngle::Degres, "sin", 90.0), 1.0);
        proche(unaire_en(ModeAngle::Radians, "sin", PI / 2.0), 1.0);
        proche(unaire_en(ModeAngle::Degres, "cos", 180.0), -1.0);
        proche(unaire_en(ModeAngle::Degres, "asin", 1.0), 90.0);
        proche(unaire_en(ModeAngle::Radians, "atan", 1.0), PI / 4.0);
    }

    #[test]
    fn precision_et_mode_modifient_l_etat() {
        let c = Catalogue::standard();
        let mut etat = EtatCalcul::default();

        let r = c.get("#").unwrap().appliquer(&mut etat, &[3.9]).unwrap();
        assert_eq!(r, None);
        assert_eq!(etat.precision, Some(3));

        c.get("precision").unwrap().appliquer(&mut etat, &[-1.0]).unwrap();
        assert_eq!(etat.precision, None);

        c.get("precision").unwrap().appliquer(&mut etat, &[1e9]).unwrap();
        assert_eq!(etat.precision, Some(PRECISION_MAX));

        let r = c.get("#").unwrap().appliquer(&mut etat, &[f64::NAN]);
        assert!(matches!(r, Err(ErreurNoyau::PrecisionInvalide(v)) if v.is_nan()));
        assert_eq!(etat.precision, Some(PRECISION_MAX));

        c.get("deg").unwrap().appliquer(&mut etat, &[]).unwrap();
        assert_eq!(etat.mode, ModeAngle::Degres);
    }

    #[test]
    fn constantes() {
        let c = Catalogue::standard();
        let mut etat = EtatCalcul::default();
        assert_eq!(c.get("pi").unwrap().appliquer(&mut etat, &[]), Ok(Some(PI)));
        assert_eq!(c.get("phi").unwrap().appliquer(&mut etat, &[]), Ok(Some(PHI)));
    }

    #[test]
    fn mauvais_nombre_d_operandes() {
        let c = Catalogue::standard();
        let mut etat = EtatCalcul::default();
        assert_eq!(
            c.get("+").unwrap().appliquer(&mut etat, &[1.0]),
            Err(ErreurNoyau::PileInsuffisante {
                requis: 2,
                disponible: 1
            })
        );
    }
}
