// Statement definitions produced by the grammar

use crate::pizza::{Cheese, Crust, Pizza, Sauce, ToppingArrangement};

/// A reference to an existing order.
#[derive(Debug, Clone, PartialEq)]
pub enum PizzaSpecifier {
    /// 1-based position in the session's order list
    Index(i32),
    /// First order with this name
    Name(String),
    /// First order whose pizza equals this one
    Replica(Pizza),
}

/// A change applied by `ALTER PIZZA`.
#[derive(Debug, Clone, PartialEq)]
pub enum Alteration {
    AddTopping(ToppingArrangement),
    RemoveTopping(ToppingArrangement),
    SetCrust(Crust),
    SetSauce(Sauce),
    SetCheese(Cheese),
}

/// One executable statement. An empty name means "unnamed".
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    // Session management
    StartSession {
        name: String,
        reserved: usize,
    },
    NameSession(String),
    EndSession,
    SaveSession(String),
    LoadSession(String),

    // Orders
    AddPizza {
        pizza: Pizza,
        name: String,
    },
    RemovePizza(PizzaSpecifier),
    /// `spec` is `None` for "every order"
    ViewPizza {
        spec: Option<PizzaSpecifier>,
        details: bool,
    },
    AlterPizza {
        spec: PizzaSpecifier,
        alteration: Alteration,
    },

    // Voting
    VotePizza {
        spec: PizzaSpecifier,
        votes: i32,
    },
    SelectTopPizza(i32),
    ResetSessionVotes,
    ResetSession,

    Quit,
}

impl Statement {
    /// Short name used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Statement::StartSession { .. } => "START SESSION",
            Statement::NameSession(_) => "NAME SESSION",
            Statement::EndSession => "END SESSION",
            Statement::SaveSession(_) => "SAVE SESSION",
            Statement::LoadSession(_) => "LOAD SESSION",
            Statement::AddPizza { .. } => "ADD PIZZA",
            Statement::RemovePizza(_) => "REMOVE PIZZA",
            Statement::ViewPizza { .. } => "VIEW PIZZA",
            Statement::AlterPizza { .. } => "ALTER PIZZA",
            Statement::VotePizza { .. } => "VOTE FOR PIZZA",
            Statement::SelectTopPizza(_) => "SELECT TOP PIZZA",
            Statement::ResetSessionVotes => "RESET SESSION VOTES",
            Statement::ResetSession => "RESET SESSION",
            Statement::Quit => "QUIT",
        }
    }
}

/// A parsed program, in source order.
pub type Program = Vec<Statement>;
