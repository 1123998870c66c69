// src/noyau/fraction.rs
//
// Fraction exacte sur grands entiers.
//
// Invariant (tenu après CHAQUE opération) :
// - dénominateur > 0
// - pgcd(|numérateur|, dénominateur) = 1
// L'égalité est donc structurelle : même numérateur, même dénominateur.
//
// BigRational réduit et normalise le signe à la construction ; on ne
// l'expose pas directement pour que rien ne contourne `Fraction::new`.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::fmt;

use super::erreurs::ErreurEval;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fraction(BigRational);

impl Fraction {
    /// n/d réduite. `None` si d = 0.
    pub fn new(n: BigInt, d: BigInt) -> Option<Fraction> {
        if d.is_zero() {
            return None;
        }
        Some(Fraction(BigRational::new(n, d)))
    }

    pub fn entier(n: impl Into<BigInt>) -> Fraction {
        Fraction(BigRational::from_integer(n.into()))
    }

    pub fn zero() -> Fraction {
        Fraction(BigRational::zero())
    }

    pub fn un() -> Fraction {
        Fraction(BigRational::one())
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    /// Taille en bits du plus grand des deux termes.
    pub fn taille_bits(&self) -> u64 {
        self.numer().bits().max(self.denom().bits())
    }

    pub fn est_nul(&self) -> bool {
        self.0.is_zero()
    }

    /// Littéral décimal exact : "1.25" -> 5/4, ".5" -> 1/2, "7." -> 7.
    /// Mise à l'échelle par 10^k, aucun arrondi.
    pub fn depuis_litteral(s: &str) -> Option<Fraction> {
        let (entiere, decimale) = match s.split_once('.') {
            Some((a, b)) => (a, b),
            None => (s, ""),
        };

        if entiere.is_empty() && decimale.is_empty() {
            return None;
        }
        if !entiere.bytes().chain(decimale.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let chiffres = format!("{entiere}{decimale}");
        let n = BigInt::parse_bytes(chiffres.as_bytes(), 10)?;
        let d = BigInt::from(10).pow(decimale.len() as u32);
        Fraction::new(n, d)
    }

    /// Valeur attendue (double) vue comme fraction décimale exacte.
    /// On passe par l'écriture décimale la plus courte qui relit le même double
    /// (`Display` de f64 n'utilise jamais la notation scientifique) : 0.1 -> 1/10.
    pub fn depuis_f64(v: f64) -> Option<Fraction> {
        if !v.is_finite() {
            return None;
        }
        let texte = format!("{v}");
        match texte.strip_prefix('-') {
            Some(abs) => Fraction::depuis_litteral(abs).map(|f| f.oppose()),
            None => Fraction::depuis_litteral(&texte),
        }
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    pub fn oppose(&self) -> Fraction {
        Fraction(-self.0.clone())
    }

    pub fn ajouter(&self, autre: &Fraction) -> Fraction {
        Fraction(&self.0 + &autre.0)
    }

    pub fn soustraire(&self, autre: &Fraction) -> Fraction {
        Fraction(&self.0 - &autre.0)
    }

    pub fn multiplier(&self, autre: &Fraction) -> Fraction {
        Fraction(&self.0 * &autre.0)
    }

    pub fn diviser(&self, autre: &Fraction) -> Result<Fraction, ErreurEval> {
        if autre.est_nul() {
            return Err(ErreurEval::DivisionParZero);
        }
        Ok(Fraction(&self.0 / &autre.0))
    }

    pub fn inverse(&self) -> Result<Fraction, ErreurEval> {
        Fraction::un().diviser(self)
    }

    /// Puissance entière par carrés successifs ; exposant négatif => inverse de la base.
    pub fn puissance(&self, exp: i64) -> Result<Fraction, ErreurEval> {
        if exp < 0 {
            return Ok(self.inverse()?.puissance_naturelle(exp.unsigned_abs()));
        }
        Ok(self.puissance_naturelle(exp as u64))
    }

    fn puissance_naturelle(&self, exp: u64) -> Fraction {
        let mut e = exp;
        let mut acc = BigRational::one();
        let mut b = self.0.clone();

        while e > 0 {
            if (e & 1) == 1 {
                acc *= b.clone();
            }
            e >>= 1;
            if e > 0 {
                b *= b.clone();
            }
        }
        Fraction(acc)
    }

    pub fn est_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// "n/d" systématique (diagnostic).
    pub fn texte_n_sur_d(&self) -> String {
        format!("{}/{}", self.numer(), self.denom())
    }
}

/// n si entier, sinon n/d.
impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom().is_one() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}
