// src/noyau/expr.rs
//
// Arbre d'expression (immuable une fois construit).
// - Nombre : littéral tel que lu (le texte reste exact, chaque évaluateur l'interprète)
// - Ident  : mot nu (pi, e, x...)
// - Neg    : moins unaire
// - Binaire: + - * / ^
// - Appel  : fonction appliquée à des arguments (sqrt(2), max(1, 2))

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
}

impl Op {
    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Moins => '-',
            Op::Fois => '*',
            Op::Divise => '/',
            Op::Puissance => '^',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Nombre(String),
    Ident(String),
    Neg(Box<Expr>),
    Binaire(Op, Box<Expr>, Box<Expr>),
    Appel(String, Vec<Expr>),
}

impl Expr {
    pub fn binaire(op: Op, a: Expr, b: Expr) -> Expr {
        Expr::Binaire(op, Box::new(a), Box::new(b))
    }

    pub fn neg(x: Expr) -> Expr {
        Expr::Neg(Box::new(x))
    }

    /// Chaîne gauche d'opérateurs + - * / : `((a op1 b) op2 c)` -> `(a, [(op1, b), (op2, c)])`.
    /// La tête n'est jamais un `Binaire` hors puissance : les évaluateurs replient la
    /// suite en boucle, la pile ne suit que l'imbrication (bornée par le parseur).
    pub fn chaine_gauche(&self) -> (&Expr, Vec<(Op, &Expr)>) {
        let mut suite = Vec::new();
        let mut courant = self;
        while let Expr::Binaire(op, a, b) = courant {
            if *op == Op::Puissance {
                break;
            }
            suite.push((*op, b.as_ref()));
            courant = a.as_ref();
        }
        suite.reverse();
        (courant, suite)
    }
}

/// Affichage entièrement parenthésé : montre la structure que le parseur a retenue.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nombre(n) => write!(f, "{n}"),
            Expr::Ident(name) => write!(f, "{name}"),
            Expr::Neg(x) => write!(f, "(-{x})"),
            Expr::Binaire(op, a, b) => write!(f, "({a} {} {b})", op.symbole()),
            Expr::Appel(name, args) => {
                write!(f, "{name}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
        }
    }
}
