//! Noyau — comparaison d'une réponse brute à la réponse attendue.
//!
//! Cible texte    : blancs compactés des deux côtés, égalité stricte (casse comprise).
//! Cible numérique:
//!   1) voie exacte : fraction == valeur attendue (fraction décimale exacte),
//!      ou valeur flottante de la fraction dans la tolérance ;
//!   2) sinon voie flottante, même règle de tolérance ;
//!   3) sinon faux.
//!
//! Aucun échec ne traverse `noter` : chaque voie rend un Result, on aiguille dessus.

use serde::Deserialize;

use super::exact::evaluer_exact_normalise;
use super::fraction::Fraction;
use super::jetons::{format_tokens, tokenize};
use super::normalise::{espaces, normaliser};
use super::numerique::essayer_numerique_normalise;

/// Tolérance par défaut d'une cible numérique.
pub const TOLERANCE_DEFAUT: f64 = 1e-6;

fn tolerance_defaut() -> f64 {
    TOLERANCE_DEFAUT
}

/// Réponse attendue, telle que fournie par la question :
/// `{"value": 0.375, "tolerance": 1e-9}` ou `"apple pie"`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Attendu {
    Numerique {
        #[serde(rename = "value")]
        valeur: f64,
        #[serde(rename = "tolerance", default = "tolerance_defaut")]
        tolerance: f64,
    },
    Texte(String),
}

impl Attendu {
    pub fn numerique(valeur: f64) -> Attendu {
        Attendu::Numerique {
            valeur,
            tolerance: TOLERANCE_DEFAUT,
        }
    }

    pub fn avec_tolerance(valeur: f64, tolerance: f64) -> Attendu {
        Attendu::Numerique { valeur, tolerance }
    }

    pub fn texte(t: impl Into<String>) -> Attendu {
        Attendu::Texte(t.into())
    }
}

/// Voie qui a tranché.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategie {
    Texte,
    Exacte,
    Numerique,
    /// Aucune voie n'a accepté.
    Aucune,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Verdict {
    pub correct: bool,
    pub strategie: Strategie,
    pub normalise: String,
    /// Présente si la voie exacte a abouti.
    pub fraction: Option<Fraction>,
    /// Présente si la voie flottante a été tentée et a abouti.
    pub valeur: Option<f64>,
}

/// API publique : note une réponse brute.
pub fn noter(brut: &str, attendu: &Attendu) -> Verdict {
    match attendu {
        Attendu::Texte(cible) => {
            let correct = espaces(brut) == espaces(cible);
            tracing::debug!(correct, "cible texte");
            Verdict {
                correct,
                strategie: if correct {
                    Strategie::Texte
                } else {
                    Strategie::Aucune
                },
                normalise: normaliser(brut),
                fraction: None,
                valeur: None,
            }
        }
        Attendu::Numerique { valeur, tolerance } => noter_numerique(brut, *valeur, *tolerance),
    }
}

fn noter_numerique(brut: &str, cible: f64, tolerance: f64) -> Verdict {
    let normalise = normaliser(brut);

    // 1) voie exacte
    let fraction = match evaluer_exact_normalise(&normalise) {
        Ok(f) => Some(f),
        Err(e) => {
            tracing::trace!(erreur = %e, texte = %normalise, "voie exacte en échec, repli");
            None
        }
    };

    if let Some(f) = &fraction {
        let egale = Fraction::depuis_f64(cible).as_ref() == Some(f);
        if egale || dans_tolerance(f.to_f64(), cible, tolerance) {
            tracing::debug!(fraction = %f, egale, "accepté par la voie exacte");
            return Verdict {
                correct: true,
                strategie: Strategie::Exacte,
                normalise,
                fraction,
                valeur: None,
            };
        }
    }

    // 2) voie flottante
    let valeur = match essayer_numerique_normalise(&normalise) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::trace!(erreur = %e, "voie flottante en échec");
            None
        }
    };

    let correct = valeur.is_some_and(|v| dans_tolerance(v, cible, tolerance));
    tracing::debug!(correct, ?valeur, cible, "verdict numérique");

    Verdict {
        correct,
        strategie: if correct {
            Strategie::Numerique
        } else {
            Strategie::Aucune
        },
        normalise,
        fraction,
        valeur,
    }
}

/// |a - b| <= tol * max(1, |a|, |b|) : absolue près de zéro, relative au-delà.
pub fn dans_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    let echelle = 1f64.max(a.abs()).max(b.abs());
    (a - b).abs() <= tolerance * echelle
}

/* ------------------------ Diagnostic ------------------------ */

/// Ce qu'un écran de débogage montre pour une saisie (recalculable à chaque frappe).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostic {
    pub normalise: String,
    pub jetons: String,
    /// "n/d" ou "indisponible".
    pub fraction: String,
    /// Valeur flottante ou "NaN".
    pub valeur: String,
}

pub const INDISPONIBLE: &str = "indisponible";

pub fn diagnostic(brut: &str) -> Diagnostic {
    let normalise = normaliser(brut);

    let jetons = match tokenize(&normalise) {
        Ok(t) => format_tokens(&t),
        Err(e) => e.to_string(),
    };

    Diagnostic {
        fraction: fraction_normalise(&normalise),
        valeur: valeur_normalise(&normalise),
        jetons,
        normalise,
    }
}

/// Texte normalisé d'une saisie brute.
pub fn texte_normalise(brut: &str) -> String {
    normaliser(brut)
}

/// Fraction réduite "n/d", ou "indisponible".
pub fn texte_fraction(brut: &str) -> String {
    fraction_normalise(&normaliser(brut))
}

/// Valeur flottante, ou "NaN".
pub fn texte_valeur(brut: &str) -> String {
    valeur_normalise(&normaliser(brut))
}

fn fraction_normalise(normalise: &str) -> String {
    evaluer_exact_normalise(normalise)
        .map(|f| f.texte_n_sur_d())
        .unwrap_or_else(|_| INDISPONIBLE.to_string())
}

fn valeur_normalise(normalise: &str) -> String {
    format!("{}", essayer_numerique_normalise(normalise).unwrap_or(f64::NAN))
}
