// src/noyau/analyse.rs
//
// Descente récursive : jetons -> Expr
//
// Grammaire (du plus lié au moins lié) :
//   primaire  := Nombre | Ident | Ident '(' args ')' | '-' primaire | '+' primaire | '(' somme ')'
//   puissance := primaire ( '^' primaire )?
//   terme     := puissance ( ('*' | '/') puissance )*      (gauche)
//   somme     := terme ( ('+' | '-') terme )*              (gauche)
//
// L'opérande droit de '^' est un primaire : la normalisation a déjà parenthésé
// les exposants ^{...}. Conséquence : 2^3^2 est refusé (entrée résiduelle).
// Le moins unaire lie plus fort que tout opérateur binaire : -2^2 = (-2)^2.

use super::erreurs::ErreurSyntaxe;
use super::expr::{Expr, Op};
use super::jetons::Tok;

/// Garde-fou : imbrication maximale (parenthèses, moins unaires, appels).
const PROFONDEUR_MAX: usize = 200;

/// Garde-fou : longueur maximale d'une suite de jetons (chaînes gauches profondes).
const JETONS_MAX: usize = 4096;

/// Construit l'arbre ; tous les jetons (hors `Fin`) doivent être consommés.
pub fn parse(tokens: &[Tok]) -> Result<Expr, ErreurSyntaxe> {
    if tokens.len() > JETONS_MAX {
        return Err(ErreurSyntaxe::EntreeTropLongue(tokens.len()));
    }

    let mut p = Parseur {
        tokens,
        pos: 0,
        profondeur: 0,
    };
    let e = p.somme()?;

    match p.courant() {
        Tok::Fin => Ok(e),
        t => Err(ErreurSyntaxe::EntreeResiduelle(decrire(t))),
    }
}

struct Parseur<'a> {
    tokens: &'a [Tok],
    pos: usize,
    profondeur: usize,
}

impl Parseur<'_> {
    fn courant(&self) -> &Tok {
        // Fin implicite si la suite n'a pas été terminée par tokenize()
        self.tokens.get(self.pos).unwrap_or(&Tok::Fin)
    }

    fn avancer(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn descendre(&mut self) -> Result<(), ErreurSyntaxe> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(ErreurSyntaxe::ImbricationExcessive);
        }
        Ok(())
    }

    fn remonter(&mut self) {
        self.profondeur -= 1;
    }

    fn somme(&mut self) -> Result<Expr, ErreurSyntaxe> {
        let mut acc = self.terme()?;
        loop {
            let op = match self.courant() {
                Tok::Plus => Op::Plus,
                Tok::Minus => Op::Moins,
                _ => return Ok(acc),
            };
            self.avancer();
            let droite = self.terme()?;
            acc = Expr::binaire(op, acc, droite);
        }
    }

    fn terme(&mut self) -> Result<Expr, ErreurSyntaxe> {
        let mut acc = self.puissance()?;
        loop {
            let op = match self.courant() {
                Tok::Star => Op::Fois,
                Tok::Slash => Op::Divise,
                _ => return Ok(acc),
            };
            self.avancer();
            let droite = self.puissance()?;
            acc = Expr::binaire(op, acc, droite);
        }
    }

    fn puissance(&mut self) -> Result<Expr, ErreurSyntaxe> {
        let base = self.primaire()?;
        if matches!(self.courant(), Tok::Caret) {
            self.avancer();
            let exposant = self.primaire()?;
            return Ok(Expr::binaire(Op::Puissance, base, exposant));
        }
        Ok(base)
    }

    fn primaire(&mut self) -> Result<Expr, ErreurSyntaxe> {
        match self.courant().clone() {
            Tok::Nombre(n) => {
                self.avancer();
                Ok(Expr::Nombre(n))
            }

            Tok::Ident(name) => {
                self.avancer();
                if matches!(self.courant(), Tok::LPar) {
                    self.avancer();
                    self.descendre()?;
                    let args = self.arguments()?;
                    self.remonter();
                    Ok(Expr::Appel(name, args))
                } else {
                    Ok(Expr::Ident(name))
                }
            }

            Tok::Minus => {
                self.avancer();
                self.descendre()?;
                let x = self.primaire()?;
                self.remonter();
                Ok(Expr::neg(x))
            }

            // plus unaire : aucun noeud
            Tok::Plus => {
                self.avancer();
                self.descendre()?;
                let x = self.primaire()?;
                self.remonter();
                Ok(x)
            }

            Tok::LPar => {
                self.avancer();
                self.descendre()?;
                let e = self.somme()?;
                self.remonter();
                self.fermer()?;
                Ok(e)
            }

            t => Err(ErreurSyntaxe::PrimaireAttendue(decrire(&t))),
        }
    }

    /// Après `nom(` : zéro ou plusieurs sommes séparées par des virgules, puis `)`.
    fn arguments(&mut self) -> Result<Vec<Expr>, ErreurSyntaxe> {
        let mut args = Vec::new();
        if matches!(self.courant(), Tok::RPar) {
            self.avancer();
            return Ok(args);
        }

        loop {
            args.push(self.somme()?);
            if matches!(self.courant(), Tok::Virgule) {
                self.avancer();
                continue;
            }
            self.fermer()?;
            return Ok(args);
        }
    }

    fn fermer(&mut self) -> Result<(), ErreurSyntaxe> {
        match self.courant() {
            Tok::RPar => {
                self.avancer();
                Ok(())
            }
            Tok::Fin => Err(ErreurSyntaxe::ParentheseNonFermee),
            t => Err(ErreurSyntaxe::EntreeResiduelle(decrire(t))),
        }
    }
}

fn decrire(t: &Tok) -> String {
    match t {
        Tok::Fin => "fin d'entrée".to_string(),
        autre => format!("'{}'", super::jetons::format_tokens(std::slice::from_ref(autre))),
    }
}
