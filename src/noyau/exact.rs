//! Noyau — évaluation exacte (rationnels)
//!
//! normaliser -> voie rapide `a/b` -> jetons -> arbre -> Fraction
//!
//! Tout ce qui n'a pas de valeur rationnelle (pi, sqrt, x...) échoue en
//! `Symbolique` : c'est le signal de repli vers l'évaluateur flottant.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

use super::analyse::parse;
use super::erreurs::ErreurEval;
use super::expr::{Expr, Op};
use super::fraction::Fraction;
use super::jetons::tokenize;
use super::normalise::normaliser;

/// Garde-fou : |exposant| maximal (croissance des grands entiers).
pub const EXPOSANT_MAX: i64 = 4096;

/// Garde-fou : taille maximale (bits) d'un numérateur ou dénominateur.
/// Vérifiée avant chaque puissance (estimation) et après chaque opération.
pub const BITS_MAX: u64 = 1 << 16;

/// API publique : texte brut -> fraction réduite.
pub fn evaluer_exact(brut: &str) -> Result<Fraction, ErreurEval> {
    evaluer_exact_normalise(&normaliser(brut))
}

/// Même chose sur un texte déjà normalisé (évite de normaliser deux fois).
pub fn evaluer_exact_normalise(texte: &str) -> Result<Fraction, ErreurEval> {
    if let Some(r) = voie_rapide(texte) {
        return r;
    }

    let jetons = tokenize(texte)?;
    let arbre = parse(&jetons)?;
    evaluer_arbre(&arbre)
}

/// Parcours récursif de l'arbre ; la réduction est portée par `Fraction`.
/// Les chaînes + - * / sont repliées en boucle (voir `Expr::chaine_gauche`).
pub fn evaluer_arbre(e: &Expr) -> Result<Fraction, ErreurEval> {
    match e {
        Expr::Nombre(n) => {
            let f = Fraction::depuis_litteral(n).ok_or_else(|| ErreurEval::Symbolique(n.clone()))?;
            borner(f)
        }

        Expr::Ident(name) => Err(ErreurEval::Symbolique(name.clone())),
        Expr::Appel(name, _) => Err(ErreurEval::Symbolique(format!("{name}(…)"))),

        Expr::Neg(x) => Ok(evaluer_arbre(x)?.oppose()),

        Expr::Binaire(Op::Puissance, base, exposant) => {
            let b = evaluer_arbre(base)?;
            let n = exposant_entier(exposant)?;

            // |n| * bits(base) majore la taille du résultat : on refuse avant de calculer
            let estimation = b.taille_bits().saturating_mul(n.unsigned_abs());
            if estimation > BITS_MAX {
                return Err(ErreurEval::TailleExcessive(estimation));
            }
            b.puissance(n)
        }

        Expr::Binaire(..) => {
            let (tete, suite) = e.chaine_gauche();
            let mut acc = evaluer_arbre(tete)?;
            for (op, droite) in suite {
                let f = evaluer_arbre(droite)?;
                acc = match op {
                    Op::Plus => acc.ajouter(&f),
                    Op::Moins => acc.soustraire(&f),
                    Op::Fois => acc.multiplier(&f),
                    Op::Divise => acc.diviser(&f)?,
                    Op::Puissance => unreachable!("exclue de la chaîne gauche"),
                };
                acc = borner(acc)?;
            }
            Ok(acc)
        }
    }
}

fn borner(f: Fraction) -> Result<Fraction, ErreurEval> {
    match f.taille_bits() {
        bits if bits > BITS_MAX => Err(ErreurEval::TailleExcessive(bits)),
        _ => Ok(f),
    }
}

/// L'exposant doit être un littéral entier (éventuellement sous moins unaire).
fn exposant_entier(e: &Expr) -> Result<i64, ErreurEval> {
    let n = litteral_entier(e).ok_or(ErreurEval::ExposantNonEntier)?;
    if n.abs() > BigInt::from(EXPOSANT_MAX) {
        return Err(ErreurEval::ExposantTropGrand(n.to_string()));
    }
    n.to_i64()
        .ok_or_else(|| ErreurEval::ExposantTropGrand(n.to_string()))
}

fn litteral_entier(e: &Expr) -> Option<BigInt> {
    match e {
        Expr::Nombre(n) if !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) => {
            BigInt::parse_bytes(n.as_bytes(), 10)
        }
        Expr::Neg(x) => litteral_entier(x).map(|n| -n),
        _ => None,
    }
}

/// Voie rapide : `entier/entier`, éventuellement entre parenthèses, numérateur signé.
/// Renvoie None si le motif ne s'applique pas (le parseur prend le relais).
fn voie_rapide(texte: &str) -> Option<Result<Fraction, ErreurEval>> {
    let mut t = texte.trim();
    if let Some(inner) = t.strip_prefix('(').and_then(|x| x.strip_suffix(')')) {
        t = inner.trim();
    }

    let (num, den) = t.split_once('/')?;
    let num = entier_signe(num.trim())?;
    let den = entier_signe(den.trim())?;

    Some(Fraction::new(num, den).ok_or(ErreurEval::DivisionParZero))
}

fn entier_signe(s: &str) -> Option<BigInt> {
    let chiffres = s.strip_prefix('-').unwrap_or(s);
    if chiffres.is_empty() || !chiffres.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigInt::parse_bytes(s.as_bytes(), 10)
}
