//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline de correction sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés :
//!   * normaliser est idempotent
//!   * evaluer_exact("a/b") donne la fraction réduite a/b
//!   * noter ne panique jamais, et un verdict correct est toujours justifié par une voie

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_integer::Integer;

use super::erreurs::ErreurEval;
use super::{evaluer_exact, noter, normaliser, Attendu, Strategie};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn entier(&mut self, borne: i64) -> i64 {
        (self.pick((2 * borne + 1) as u32) as i64) - borne
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération (bornée) ------------------------ */

/// Fragments "sales" : LaTeX, Unicode, blancs exotiques, virgules, accolades orphelines.
const FRAGMENTS: &[&str] = &[
    "1", "2", "3", "12", "0", ",", ".", "+", "-", "*", "/", "^", "(", ")", "{", "}", " ", "  ",
    "\u{00A0}", "\u{200B}", "−", "–", "÷", "×", "·", "⁄", "π", "½", "¾", "⅛", "$", "\\(", "\\)",
    "\\frac", "\\dfrac", "\\sqrt", "\\pi", "\\cdot", "\\,", "\\quad", "\\left(", "\\right)",
    "\\hspace{1em}", "\\operatorname{abs}", "^{", "sqrt", "pi", "x",
];

fn gen_bruit(rng: &mut Rng, longueur: usize) -> String {
    (0..longueur)
        .map(|_| FRAGMENTS[rng.pick(FRAGMENTS.len() as u32) as usize])
        .collect()
}

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => format!("{}", rng.pick(20)),
        1 => format!("\\frac{{{}}}{{{}}}", rng.pick(9), 1 + rng.pick(9)),
        2 => format!("{},{}", rng.pick(10), rng.pick(100)),
        3 => "½".to_string(),
        4 => "\\sqrt{2}".to_string(),
        _ => "\\pi".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }

    match rng.pick(7) {
        0 => gen_atome(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({} − {})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("{} \\cdot {}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!(
            "\\frac{{{}}}{{{}}}",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        5 => format!("\\left({}\\right)^{{{}}}", gen_expr(rng, depth - 1), rng.pick(4)),
        _ => format!("-{}", gen_atome(rng)),
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_normalisation_idempotente() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let longueur = 1 + rng.pick(12) as usize;
        let brut = gen_bruit(&mut rng, longueur);

        let une = normaliser(&brut);
        let deux = normaliser(&une);
        assert_eq!(une, deux, "non idempotent pour {brut:?}");
    }
}

#[test]
fn fuzz_safe_quotients_entiers_reduits() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..200 {
        budget(t0, max);

        let a = rng.entier(1000);
        let b = rng.entier(1000);
        let brut = format!("{a}/{b}");

        match evaluer_exact(&brut) {
            Ok(f) => {
                assert_ne!(b, 0);
                let g = BigInt::from(a).gcd(&BigInt::from(b));
                let signe = if b < 0 { -1 } else { 1 };
                assert_eq!(f.numer(), &(BigInt::from(a * signe) / &g), "{brut}");
                assert_eq!(f.denom(), &(BigInt::from(b * signe) / &g), "{brut}");
            }
            Err(e) => {
                assert_eq!(b, 0, "erreur non attendue: {brut} {e}");
                assert_eq!(e, ErreurEval::DivisionParZero);
            }
        }
    }
}

#[test]
fn fuzz_safe_noter_sans_panique_et_justifie() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0x5EED_u64);

    let mut seen_exact = 0usize;
    let mut seen_repli = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let brut = gen_expr(&mut rng, 3);
        let cible = rng.entier(5) as f64 / 2.0;

        let v = noter(&brut, &Attendu::numerique(cible));
        match v.strategie {
            Strategie::Exacte => assert!(v.correct && v.fraction.is_some()),
            Strategie::Numerique => assert!(v.correct && v.valeur.is_some()),
            Strategie::Aucune => assert!(!v.correct),
            Strategie::Texte => panic!("cible numérique notée en texte: {brut:?}"),
        }

        if v.fraction.is_some() {
            seen_exact += 1;
        } else {
            seen_repli += 1;
        }
    }

    // On veut voir les deux voies, sinon le fuzz ne "balaye" rien.
    assert!(seen_exact > 10, "trop peu d'évaluations exactes: {seen_exact}");
    assert!(seen_repli > 0, "aucun repli vu: fuzz trop \"sage\"");
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xDEADBEEF_u64);

    for _ in 0..300 {
        budget(t0, max);

        let longueur = 1 + rng.pick(16) as usize;
        let brut = gen_bruit(&mut rng, longueur);

        let v = noter(&brut, &Attendu::numerique(1.0));
        if v.correct {
            assert!(v.fraction.is_some() || v.valeur.is_some(), "brut={brut:?}");
        }
    }
}
