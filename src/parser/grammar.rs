//! Grammar: statement signatures and their builders
//!
//! A [`Grammar`] is an ordered list of `(signature, builder)` pairs. A token
//! list is matched against each signature in registration order and the
//! first one that matches position by position, at exactly the same length,
//! wins. Its builder then reads the tokens at known positions and produces a
//! [`Statement`].
//!
//! Registration order is part of a grammar's contract. Within
//! [`Grammar::spl_1`] no two signatures can match the same token list, which
//! [`Grammar::overlapping_pairs`] can check.
//!
//! # Signature tokens
//!
//! - [`SignatureToken::Type`] matches any token of that type
//! - [`SignatureToken::Keyword`] matches exactly that keyword
//! - [`SignatureToken::PizzaSpecifier`] matches a string, integer or pizza

use super::ast::{Alteration, Statement};
use super::errors::{ErrorKind, InterpError, Stage};
use super::lexer::{Keyword, Token};
use super::tokenizer::TokenType;
use crate::pizza::PizzaElement;
use std::fmt;

/// Orders a new session reserves room for.
pub const EXPECTED_PIZZAS: usize = 30;

/// Votes added by `SUBVERT DEMOCRACY`.
pub const SUBVERSION_VOTES: i32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureToken {
    Type(TokenType),
    Keyword(Keyword),
    PizzaSpecifier,
}

fn is_specifier_type(kind: TokenType) -> bool {
    matches!(kind, TokenType::String | TokenType::Int | TokenType::Pizza)
}

impl SignatureToken {
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Self::Type(kind) => token.kind() == *kind,
            Self::Keyword(keyword) => token.is_keyword(*keyword),
            Self::PizzaSpecifier => is_specifier_type(token.kind()),
        }
    }

    /// True if at least one token would match both.
    pub fn overlaps(&self, other: &SignatureToken) -> bool {
        match (self, other) {
            (Self::Keyword(a), Self::Keyword(b)) => a == b,
            (Self::Keyword(_), Self::Type(kind)) | (Self::Type(kind), Self::Keyword(_)) => {
                *kind == TokenType::Keyword
            }
            (Self::Type(a), Self::Type(b)) => a == b,
            (Self::PizzaSpecifier, Self::PizzaSpecifier) => true,
            (Self::PizzaSpecifier, Self::Type(kind))
            | (Self::Type(kind), Self::PizzaSpecifier) => is_specifier_type(*kind),
            (Self::PizzaSpecifier, Self::Keyword(_))
            | (Self::Keyword(_), Self::PizzaSpecifier) => false,
        }
    }
}

impl fmt::Display for SignatureToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(kind) => write!(f, "<{kind}>"),
            Self::Keyword(keyword) => write!(f, "{keyword}"),
            Self::PizzaSpecifier => f.write_str("<pizza specifier>"),
        }
    }
}

pub type Signature = Vec<SignatureToken>;

/// Builds a statement from a token list already known to match its signature.
pub type Builder = fn(&[Token]) -> Result<Statement, InterpError>;

fn signature_matches(signature: &[SignatureToken], tokens: &[Token]) -> bool {
    signature.len() == tokens.len()
        && signature.iter().zip(tokens).all(|(sig, tok)| sig.matches(tok))
}

fn signatures_overlap(a: &[SignatureToken], b: &[SignatureToken]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.overlaps(y))
}

/// Render a signature the way it would be written in source.
pub fn describe_signature(signature: &[SignatureToken]) -> String {
    signature
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Released versions of the statement grammar. Each one keeps every
/// signature of the version before it, in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GrammarVersion {
    Spl1,
    Spl1Dot1,
    #[default]
    Spl2,
}

impl GrammarVersion {
    pub const ALL: [GrammarVersion; 3] = [
        GrammarVersion::Spl1,
        GrammarVersion::Spl1Dot1,
        GrammarVersion::Spl2,
    ];

    pub fn grammar(self) -> Grammar {
        match self {
            GrammarVersion::Spl1 => Grammar::spl_1(),
            GrammarVersion::Spl1Dot1 => Grammar::spl_1_1(),
            GrammarVersion::Spl2 => Grammar::spl_2(),
        }
    }
}

impl fmt::Display for GrammarVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GrammarVersion::Spl1 => "SPL 1",
            GrammarVersion::Spl1Dot1 => "SPL 1.1",
            GrammarVersion::Spl2 => "SPL 2",
        })
    }
}

#[derive(Clone, Default)]
pub struct Grammar {
    entries: Vec<(Signature, Builder)>,
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.signatures().map(|s| describe_signature(s)))
            .finish()
    }
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_signature(mut self, signature: Signature, builder: Builder) -> Self {
        self.entries.push((signature, builder));
        self
    }

    /// Builder of the first signature matching `tokens`.
    pub fn find(&self, tokens: &[Token]) -> Option<Builder> {
        self.entries
            .iter()
            .find(|(signature, _)| signature_matches(signature, tokens))
            .map(|(_, builder)| *builder)
    }

    pub fn is_valid(&self, tokens: &[Token]) -> bool {
        self.find(tokens).is_some()
    }

    /// Run the matching builder, or `None` if no signature matches.
    pub fn make_statement(&self, tokens: &[Token]) -> Option<Result<Statement, InterpError>> {
        self.find(tokens).map(|builder| builder(tokens))
    }

    /// Index pairs of signatures that could match the same token list.
    pub fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, (a, _)) in self.entries.iter().enumerate() {
            for (j, (b, _)) in self.entries.iter().enumerate().skip(i + 1) {
                if signatures_overlap(a, b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    pub fn signatures(&self) -> impl Iterator<Item = &Signature> {
        self.entries.iter().map(|(signature, _)| signature)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The SPL 1 statement grammar.
    pub fn spl_1() -> Self {
        use Keyword as K;
        use TokenType as T;
        const SPEC: SignatureToken = SignatureToken::PizzaSpecifier;

        Self::new()
            // Sessions
            .add_signature(vec![kw(K::Start), kw(K::Session)], |_| {
                Ok(Statement::StartSession {
                    name: String::new(),
                    reserved: EXPECTED_PIZZAS,
                })
            })
            .add_signature(
                vec![kw(K::Start), kw(K::Session), kw(K::As), ty(T::String)],
                |tl| {
                    Ok(Statement::StartSession {
                        name: tl[3].as_string()?.to_string(),
                        reserved: EXPECTED_PIZZAS,
                    })
                },
            )
            .add_signature(vec![kw(K::Name), kw(K::Session), ty(T::String)], |tl| {
                Ok(Statement::NameSession(tl[2].as_string()?.to_string()))
            })
            .add_signature(vec![kw(K::End), kw(K::Session)], |_| {
                Ok(Statement::EndSession)
            })
            .add_signature(
                vec![kw(K::Save), kw(K::Session), kw(K::To), ty(T::String)],
                |tl| Ok(Statement::SaveSession(tl[3].as_string()?.to_string())),
            )
            .add_signature(
                vec![kw(K::Load), kw(K::Session), kw(K::From), ty(T::String)],
                |tl| Ok(Statement::LoadSession(tl[3].as_string()?.to_string())),
            )
            // Orders
            .add_signature(vec![kw(K::Add), kw(K::Pizza), ty(T::Pizza)], |tl| {
                Ok(Statement::AddPizza {
                    pizza: tl[2].as_pizza()?.clone(),
                    name: String::new(),
                })
            })
            .add_signature(
                vec![kw(K::Add), kw(K::Pizza), ty(T::Pizza), kw(K::As), ty(T::String)],
                |tl| {
                    Ok(Statement::AddPizza {
                        pizza: tl[2].as_pizza()?.clone(),
                        name: tl[4].as_string()?.to_string(),
                    })
                },
            )
            .add_signature(vec![kw(K::Remove), kw(K::Pizza), SPEC], |tl| {
                Ok(Statement::RemovePizza(tl[2].to_specifier()?))
            })
            .add_signature(vec![kw(K::View), kw(K::Pizza), SPEC], |tl| {
                Ok(Statement::ViewPizza {
                    spec: Some(tl[2].to_specifier()?),
                    details: false,
                })
            })
            .add_signature(vec![kw(K::View), kw(K::Pizza)], |_| {
                Ok(Statement::ViewPizza {
                    spec: None,
                    details: false,
                })
            })
            .add_signature(
                vec![kw(K::View), kw(K::Pizza), SPEC, kw(K::Details)],
                |tl| {
                    Ok(Statement::ViewPizza {
                        spec: Some(tl[2].to_specifier()?),
                        details: true,
                    })
                },
            )
            .add_signature(vec![kw(K::View), kw(K::Pizza), kw(K::Details)], |_| {
                Ok(Statement::ViewPizza {
                    spec: None,
                    details: true,
                })
            })
            // Voting
            .add_signature(vec![kw(K::Vote), kw(K::For), kw(K::Pizza), SPEC], |tl| {
                Ok(Statement::VotePizza {
                    spec: tl[3].to_specifier()?,
                    votes: 1,
                })
            })
            .add_signature(
                vec![kw(K::Vote), kw(K::For), kw(K::Pizza), SPEC, ty(T::Int)],
                |tl| {
                    Ok(Statement::VotePizza {
                        spec: tl[3].to_specifier()?,
                        votes: tl[4].as_int()?,
                    })
                },
            )
            .add_signature(
                vec![kw(K::Subvert), kw(K::Democracy), kw(K::For), kw(K::Pizza), SPEC],
                |tl| {
                    Ok(Statement::VotePizza {
                        spec: tl[4].to_specifier()?,
                        votes: SUBVERSION_VOTES,
                    })
                },
            )
            .add_signature(
                vec![kw(K::Select), kw(K::Top), ty(T::Int), kw(K::Pizza)],
                |tl| Ok(Statement::SelectTopPizza(tl[2].as_int()?)),
            )
            .add_signature(vec![kw(K::Reset), kw(K::Session), kw(K::Votes)], |_| {
                Ok(Statement::ResetSessionVotes)
            })
            .add_signature(vec![kw(K::Reset), kw(K::Session)], |_| {
                Ok(Statement::ResetSession)
            })
            // Alterations
            .add_signature(alter(K::Add, K::Topping), |tl| {
                alter_pizza(tl, "topping arrangement", |element| match element {
                    PizzaElement::Topping(ta) => Some(Alteration::AddTopping(ta)),
                    _ => None,
                })
            })
            .add_signature(alter(K::Remove, K::Topping), |tl| {
                alter_pizza(tl, "topping arrangement", |element| match element {
                    PizzaElement::Topping(ta) => Some(Alteration::RemoveTopping(ta)),
                    _ => None,
                })
            })
            .add_signature(alter(K::Set, K::Crust), |tl| {
                alter_pizza(tl, "crust", |element| match element {
                    PizzaElement::Crust(c) => Some(Alteration::SetCrust(c)),
                    _ => None,
                })
            })
            .add_signature(alter(K::Set, K::Sauce), |tl| {
                alter_pizza(tl, "sauce", |element| match element {
                    PizzaElement::Sauce(s) => Some(Alteration::SetSauce(s)),
                    _ => None,
                })
            })
            .add_signature(alter(K::Set, K::Cheese), |tl| {
                alter_pizza(tl, "cheese", |element| match element {
                    PizzaElement::Cheese(c) => Some(Alteration::SetCheese(c)),
                    _ => None,
                })
            })
            .add_signature(vec![kw(K::Quit)], |_| Ok(Statement::Quit))
    }
}

impl Grammar {
    /// SPL 1.1. New signatures are appended after SPL 1's so that existing
    /// programs keep building the same statements; none have been added yet.
    pub fn spl_1_1() -> Self {
        Self::spl_1()
    }

    /// SPL 2, extending SPL 1.1 the same way.
    pub fn spl_2() -> Self {
        Self::spl_1_1()
    }
}

fn kw(keyword: Keyword) -> SignatureToken {
    SignatureToken::Keyword(keyword)
}

fn ty(kind: TokenType) -> SignatureToken {
    SignatureToken::Type(kind)
}

/// `ALTER PIZZA <spec> <verb> <what> {element}`
fn alter(verb: Keyword, what: Keyword) -> Signature {
    vec![
        kw(Keyword::Alter),
        kw(Keyword::Pizza),
        SignatureToken::PizzaSpecifier,
        kw(verb),
        kw(what),
        ty(TokenType::PizzaElement),
    ]
}

fn alter_pizza(
    tl: &[Token],
    expected: &str,
    convert: fn(PizzaElement) -> Option<Alteration>,
) -> Result<Statement, InterpError> {
    let element_token = &tl[5];
    let element = element_token.as_element()?;
    let alteration = convert(element).ok_or_else(|| {
        InterpError::new(
            ErrorKind::WrongPizzaComponent,
            Stage::Parsing,
            element_token.location(),
            format!("Expected a {expected}, found a {}", element.category()),
        )
        .with_token(&element_token.data.text)
    })?;

    Ok(Statement::AlterPizza {
        spec: tl[2].to_specifier()?,
        alteration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::PizzaSpecifier;
    use crate::parser::lexer::lex;
    use crate::parser::scanner::Location;
    use crate::parser::tokenizer::tokenize;
    use crate::pizza::{Crust, Topping, ToppingArrangement, ToppingPosition};

    /// Tokens of `source` as one statement, without its delimiter.
    fn tokens(source: &str) -> Vec<Token> {
        lex(&tokenize(&format!("{source}\n")).unwrap()).unwrap()
    }

    fn build(source: &str) -> Result<Statement, InterpError> {
        Grammar::spl_1()
            .make_statement(&tokens(source))
            .expect("no signature matched")
    }

    #[test]
    fn test_spl_1_registers_every_statement() {
        assert_eq!(Grammar::spl_1().len(), 25);
    }

    #[test]
    fn test_spl_1_has_no_overlapping_signatures() {
        let grammar = Grammar::spl_1();
        let pairs = grammar.overlapping_pairs();
        let signatures: Vec<_> = grammar.signatures().collect();
        let described: Vec<_> = pairs
            .iter()
            .map(|(a, b)| {
                format!(
                    "{} / {}",
                    describe_signature(signatures[*a]),
                    describe_signature(signatures[*b])
                )
            })
            .collect();
        assert!(described.is_empty(), "overlapping: {described:?}");
    }

    #[test]
    fn test_versions_extend_their_predecessor() {
        for pair in GrammarVersion::ALL.windows(2) {
            let older = pair[0].grammar();
            let newer = pair[1].grammar();
            assert!(newer.len() >= older.len(), "{} shrank", pair[1]);
            assert!(
                older.signatures().zip(newer.signatures()).all(|(a, b)| a == b),
                "{} reorders {}",
                pair[1],
                pair[0]
            );
            assert!(newer.overlapping_pairs().is_empty());
        }
    }

    #[test]
    fn test_every_version_parses_spl_1_programs() {
        let statement = tokens("VOTE FOR PIZZA \"Test\" (3)");
        for version in GrammarVersion::ALL {
            assert!(version.grammar().is_valid(&statement), "{version}");
        }
        assert_eq!(GrammarVersion::default(), GrammarVersion::Spl2);
    }

    #[test]
    fn test_overlap_detection() {
        let grammar = Grammar::new()
            .add_signature(
                vec![kw(Keyword::View), kw(Keyword::Pizza), SignatureToken::PizzaSpecifier],
                |_| Ok(Statement::Quit),
            )
            .add_signature(
                vec![kw(Keyword::View), kw(Keyword::Pizza), ty(TokenType::Int)],
                |_| Ok(Statement::ResetSession),
            )
            .add_signature(
                vec![kw(Keyword::View), kw(Keyword::Pizza), ty(TokenType::Keyword)],
                |_| Ok(Statement::EndSession),
            );

        assert_eq!(grammar.overlapping_pairs(), vec![(0, 1)]);
    }

    #[test]
    fn test_first_match_wins() {
        let grammar = Grammar::new()
            .add_signature(vec![ty(TokenType::Keyword)], |_| Ok(Statement::EndSession))
            .add_signature(vec![kw(Keyword::Quit)], |_| Ok(Statement::Quit));

        let statement = grammar.make_statement(&tokens("QUIT")).unwrap().unwrap();
        assert_eq!(statement, Statement::EndSession);
    }

    #[test]
    fn test_no_prefix_matches() {
        let grammar = Grammar::spl_1();
        assert!(!grammar.is_valid(&tokens("START")));
        assert!(!grammar.is_valid(&tokens("QUIT QUIT")));
        assert!(!grammar.is_valid(&tokens("SESSION START")));
        assert!(grammar.is_valid(&tokens("start session")));
    }

    #[test]
    fn test_session_statements() {
        assert_eq!(
            build("START SESSION").unwrap(),
            Statement::StartSession {
                name: String::new(),
                reserved: EXPECTED_PIZZAS
            }
        );
        assert_eq!(
            build("START SESSION AS \"Lunch\"").unwrap(),
            Statement::StartSession {
                name: "Lunch".to_string(),
                reserved: EXPECTED_PIZZAS
            }
        );
        assert_eq!(
            build("SAVE SESSION TO \"lunch.spl\"").unwrap(),
            Statement::SaveSession("lunch.spl".to_string())
        );
        assert_eq!(build("RESET SESSION VOTES").unwrap(), Statement::ResetSessionVotes);
    }

    #[test]
    fn test_view_variants() {
        assert_eq!(
            build("VIEW PIZZA DETAILS").unwrap(),
            Statement::ViewPizza {
                spec: None,
                details: true
            }
        );
        assert_eq!(
            build("VIEW PIZZA (2)").unwrap(),
            Statement::ViewPizza {
                spec: Some(PizzaSpecifier::Index(2)),
                details: false
            }
        );
        assert_eq!(
            build("VIEW PIZZA \"Test\" DETAILS").unwrap(),
            Statement::ViewPizza {
                spec: Some(PizzaSpecifier::Name("Test".to_string())),
                details: true
            }
        );
    }

    #[test]
    fn test_votes() {
        assert_eq!(
            build("VOTE FOR PIZZA \"Test\" (3)").unwrap(),
            Statement::VotePizza {
                spec: PizzaSpecifier::Name("Test".to_string()),
                votes: 3
            }
        );
        assert_eq!(
            build("SUBVERT DEMOCRACY FOR PIZZA (1)").unwrap(),
            Statement::VotePizza {
                spec: PizzaSpecifier::Index(1),
                votes: SUBVERSION_VOTES
            }
        );
        assert_eq!(
            build("SELECT TOP (3) PIZZA").unwrap(),
            Statement::SelectTopPizza(3)
        );
    }

    #[test]
    fn test_alter_builds_alteration() {
        assert_eq!(
            build("ALTER PIZZA (1) ADD TOPPING {RIGHT:HAM}").unwrap(),
            Statement::AlterPizza {
                spec: PizzaSpecifier::Index(1),
                alteration: Alteration::AddTopping(ToppingArrangement::new(
                    ToppingPosition::Right,
                    Topping::Ham
                )),
            }
        );
        assert_eq!(
            build("ALTER PIZZA \"x\" SET CRUST {THICKCRUST}").unwrap(),
            Statement::AlterPizza {
                spec: PizzaSpecifier::Name("x".to_string()),
                alteration: Alteration::SetCrust(Crust::ThickCrust),
            }
        );
    }

    #[test]
    fn test_alter_rejects_wrong_component() {
        let err = build("ALTER PIZZA (1) ADD TOPPING {CRUST:STANDARD}").unwrap_err();
        assert_eq!(err.kind, ErrorKind::WrongPizzaComponent);
        assert_eq!(err.stage, Stage::Parsing);
        assert_eq!(err.message, "Expected a topping arrangement, found a crust");
        assert_eq!(err.location, Location::new(1, 29));
        assert_eq!(err.token.as_deref(), Some("{CRUST:STANDARD}"));

        let err = build("ALTER PIZZA (1) SET SAUCE {HAM}").unwrap_err();
        assert_eq!(err.message, "Expected a sauce, found a topping arrangement");

        let err = build("ALTER PIZZA (1) REMOVE TOPPING {DAIRYFREE}").unwrap_err();
        assert_eq!(err.message, "Expected a topping arrangement, found a cheese");
    }

    #[test]
    fn test_describe_signature() {
        let described: Vec<String> = Grammar::spl_1()
            .signatures()
            .map(|s| describe_signature(s))
            .collect();
        assert_eq!(described[0], "START SESSION");
        assert_eq!(described[14], "VOTE FOR PIZZA <pizza specifier> <integer>");
    }
}
