//! Scénarios de correction de bout en bout : saisie brute -> verdict.
//!
//! Chaque test reprend une situation d'élève réaliste ; les cas limites
//! (division par zéro, irrationnels, cible texte) vérifient aussi qu'aucune
//! erreur ne s'échappe de `noter`.

use num_bigint::BigInt;

use super::erreurs::ErreurEval;
use super::{diagnostic, evaluer_exact, noter, normaliser, Attendu, Fraction, Strategie};

fn fr(n: i64, d: i64) -> Fraction {
    Fraction::new(BigInt::from(n), BigInt::from(d)).unwrap()
}

fn assert_correct(brut: &str, attendu: Attendu) {
    let v = noter(brut, &attendu);
    assert!(v.correct, "attendu correct: brut={brut:?} attendu={attendu:?} verdict={v:?}");
}

fn assert_faux(brut: &str, attendu: Attendu) {
    let v = noter(brut, &attendu);
    assert!(!v.correct, "attendu faux: brut={brut:?} attendu={attendu:?} verdict={v:?}");
}

/* ------------------------ Exactitude ------------------------ */

#[test]
fn fraction_imbriquee_et_puissance() {
    let brut = "( \\frac{1}{2} )^3 + \\frac{1}{4}";
    assert_eq!(evaluer_exact(brut), Ok(fr(3, 8)));

    let v = noter(brut, &Attendu::avec_tolerance(0.375, 1e-9));
    assert!(v.correct);
    assert_eq!(v.strategie, Strategie::Exacte);
    assert_eq!(v.fraction, Some(fr(3, 8)));
}

#[test]
fn quotient_entier_toujours_reduit() {
    for (a, b) in [(6, 8), (-6, 8), (0, 5), (12, 4), (7, 13), (100, -25)] {
        let f = evaluer_exact(&format!("{a}/{b}")).unwrap();
        assert_eq!(f, fr(a, b), "{a}/{b}");
        assert!(f.denom() > &BigInt::from(0));
    }
}

#[test]
fn division_par_zero_sans_panique() {
    assert_eq!(evaluer_exact("5/0"), Err(ErreurEval::DivisionParZero));
    assert_faux("5/0", Attendu::avec_tolerance(5.0, 1e-6));
}

/* ------------------------ Normalisation ------------------------ */

#[test]
fn virgule_decimale() {
    assert_eq!(normaliser("3,5"), "3.5");
    assert_eq!(normaliser("1,234"), "1.234");
    assert_correct("3,5", Attendu::numerique(3.5));
}

#[test]
fn notations_variees_meme_valeur() {
    for brut in [
        "3/4",
        "0.75",
        "0,75",
        "¾",
        "$\\frac{3}{4}$",
        "\\dfrac{3}{4}",
        "\\(\\tfrac34\\)",
        "6 ÷ 8",
        "1 − ¼",
        "\\left( \\frac{1}{2} \\right) + \\frac{1}{4}",
    ] {
        assert_correct(brut, Attendu::avec_tolerance(0.75, 1e-12));
    }
}

/* ------------------------ Repli flottant ------------------------ */

#[test]
fn racine_irrationnelle_par_repli() {
    assert!(matches!(
        evaluer_exact("sqrt(2)"),
        Err(ErreurEval::Symbolique(_))
    ));

    let v = noter("sqrt(2)", &Attendu::avec_tolerance(1.4142135624, 1e-6));
    assert!(v.correct);
    assert_eq!(v.strategie, Strategie::Numerique);
}

#[test]
fn pi_en_glyphe_et_en_latex() {
    assert_correct("π/2", Attendu::numerique(std::f64::consts::FRAC_PI_2));
    assert_correct("\\frac{\\pi}{2}", Attendu::numerique(std::f64::consts::FRAC_PI_2));
    assert_faux("pi/3", Attendu::numerique(std::f64::consts::FRAC_PI_2));
}

/* ------------------------ Cible texte ------------------------ */

#[test]
fn cible_texte_blancs_compactes_casse_stricte() {
    assert_faux(" Apple   pie ", Attendu::texte("apple pie"));
    assert_correct(" apple   pie ", Attendu::texte("apple pie"));
}

/* ------------------------ Équation : on note la valeur soumise ------------------------ */

#[test]
fn equation_lineaire_valeur_soumise() {
    // 2x + 3 = 11 : l'élève soumet 4, le moteur ne résout rien.
    assert_correct("4", Attendu::avec_tolerance(4.0, 1e-9));
    assert_faux("x = 4", Attendu::avec_tolerance(4.0, 1e-9));
    assert_faux("5", Attendu::avec_tolerance(4.0, 1e-9));
}

/* ------------------------ Robustesse ------------------------ */

#[test]
fn saisies_degenerees_jamais_correctes() {
    for brut in ["", "   ", "(", ")", "+", "1+", "\\frac{1}", "$", "2^", "abc", "1..2"] {
        assert_faux(brut, Attendu::numerique(1.0));
    }
}

#[test]
fn grande_magnitude_tolerance_relative() {
    assert_correct("1000000.5", Attendu::avec_tolerance(1_000_000.0, 1e-6));
    assert_faux("1000002", Attendu::avec_tolerance(1_000_000.0, 1e-6));
}

#[test]
fn tour_de_puissances_verdict_immediat() {
    let tour = "((2^4096)^4096)^4096";

    let v = noter(tour, &Attendu::numerique(1.0));
    assert!(!v.correct);
    assert_eq!(v.strategie, Strategie::Aucune);
    assert_eq!(v.fraction, None);
    assert_eq!(v.valeur, None);

    // le banc recalcule ce diagnostic à chaque frappe
    let d = diagnostic(tour);
    assert_eq!(d.fraction, "indisponible");
    assert_eq!(d.valeur, "NaN");

    // une tour raisonnable reste exacte
    assert_correct("(2^{10})^3", Attendu::avec_tolerance(1_073_741_824.0, 0.0));
}

#[test]
fn longue_chaine_plate_notee_sur_petite_pile() {
    let somme = vec!["1"; 1000].join("+");
    let produit = vec!["\\frac{3}{3}"; 400].join("\\cdot");

    let (v, w) = std::thread::Builder::new()
        .stack_size(1 << 20)
        .spawn(move || {
            (
                noter(&somme, &Attendu::numerique(1000.0)),
                noter(&produit, &Attendu::numerique(1.0)),
            )
        })
        .unwrap()
        .join()
        .unwrap();

    assert!(v.correct);
    assert_eq!(v.strategie, Strategie::Exacte);
    assert_eq!(v.fraction, Some(fr(1000, 1)));
    assert!(w.correct);
}
