//! Session model
//!
//! - [`PizzaOrder`]: a pizza with a vote count and an optional name
//! - [`OrderSession`]: the orders of one voting session
//! - [`ProgramState`]: everything a statement executes against
//!
//! Orders are referred to by [`PizzaSpecifier`]: a 1-based index, the name of
//! the first order carrying it, or the first order whose pizza is equal to a
//! given one.

use crate::parser::ast::PizzaSpecifier;
use crate::pizza::Pizza;
use crate::printer::{Console, Settings};

#[derive(Debug, Clone, PartialEq)]
pub struct PizzaOrder {
    pub pizza: Pizza,
    pub votes: i32,
    /// Empty when unnamed
    pub name: String,
}

impl PizzaOrder {
    pub fn new(pizza: Pizza, name: impl Into<String>) -> Self {
        Self {
            pizza,
            votes: 0,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderSession {
    pub name: String,
    pub orders: Vec<PizzaOrder>,
    reserved: usize,
}

impl OrderSession {
    pub fn new(name: impl Into<String>, reserved: usize) -> Self {
        Self {
            name: name.into(),
            orders: Vec::with_capacity(reserved),
            reserved,
        }
    }

    /// Number of orders room was reserved for when the session started.
    pub fn reserved(&self) -> usize {
        self.reserved
    }

    pub fn add(&mut self, order: PizzaOrder) {
        self.orders.push(order);
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// 0-based position of the order `spec` refers to.
    pub fn locate(&self, spec: &PizzaSpecifier) -> Option<usize> {
        match spec {
            PizzaSpecifier::Index(n) => usize::try_from(*n)
                .ok()
                .filter(|n| (1..=self.orders.len()).contains(n))
                .map(|n| n - 1),
            PizzaSpecifier::Name(name) => self.orders.iter().position(|o| &o.name == name),
            PizzaSpecifier::Replica(pizza) => self.orders.iter().position(|o| &o.pizza == pizza),
        }
    }

    pub fn get_mut(&mut self, spec: &PizzaSpecifier) -> Option<&mut PizzaOrder> {
        self.locate(spec).map(move |i| &mut self.orders[i])
    }

    pub fn remove(&mut self, spec: &PizzaSpecifier) -> Option<PizzaOrder> {
        self.locate(spec).map(|i| self.orders.remove(i))
    }

    /// Add `amount` votes, saturating at the `i32` bounds. False if no order
    /// matches.
    pub fn vote(&mut self, spec: &PizzaSpecifier, amount: i32) -> bool {
        match self.get_mut(spec) {
            Some(order) => {
                order.votes = order.votes.saturating_add(amount);
                true
            }
            None => false,
        }
    }

    pub fn reset_votes(&mut self) {
        for order in &mut self.orders {
            order.votes = 0;
        }
    }

    pub fn reset(&mut self) {
        self.orders.clear();
    }

    /// Orders by votes, highest first; ties keep their order of entry.
    pub fn ranked(&self) -> Vec<&PizzaOrder> {
        let mut ranked: Vec<&PizzaOrder> = self.orders.iter().collect();
        ranked.sort_by(|a, b| b.votes.cmp(&a.votes));
        ranked
    }
}

/// State a program executes against
#[derive(Debug, Clone)]
pub struct ProgramState {
    pub session: Option<OrderSession>,
    pub console: Console,
    pub settings: Settings,
    /// 1-based number of the statement being executed
    pub program_counter: usize,
    pub running: bool,
}

impl ProgramState {
    pub fn new(settings: Settings) -> Self {
        Self {
            session: None,
            console: Console::new(),
            settings,
            program_counter: 0,
            running: true,
        }
    }
}

impl Default for ProgramState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pizza::{Crust, Pizza};

    fn session() -> OrderSession {
        let mut session = OrderSession::new("", 30);
        session.add(PizzaOrder::new(Pizza::default(), "plain"));
        session.add(PizzaOrder::new(
            Pizza {
                crust: Crust::ThinCrust,
                ..Pizza::default()
            },
            "thin",
        ));
        session.add(PizzaOrder::new(Pizza::default(), "plain"));
        session
    }

    #[test]
    fn test_locate_by_index() {
        let session = session();
        assert_eq!(session.locate(&PizzaSpecifier::Index(1)), Some(0));
        assert_eq!(session.locate(&PizzaSpecifier::Index(3)), Some(2));
        assert_eq!(session.locate(&PizzaSpecifier::Index(0)), None);
        assert_eq!(session.locate(&PizzaSpecifier::Index(4)), None);
        assert_eq!(session.locate(&PizzaSpecifier::Index(-1)), None);
    }

    #[test]
    fn test_locate_finds_first_match() {
        let session = session();
        assert_eq!(
            session.locate(&PizzaSpecifier::Name("plain".to_string())),
            Some(0)
        );
        assert_eq!(
            session.locate(&PizzaSpecifier::Replica(Pizza {
                crust: Crust::ThinCrust,
                ..Pizza::default()
            })),
            Some(1)
        );
        assert_eq!(session.locate(&PizzaSpecifier::Name("nope".to_string())), None);
    }

    #[test]
    fn test_vote_saturates() {
        let mut session = session();
        let spec = PizzaSpecifier::Index(2);
        assert!(session.vote(&spec, i32::MAX));
        assert!(session.vote(&spec, 5));
        assert_eq!(session.orders[1].votes, i32::MAX);
        assert!(!session.vote(&PizzaSpecifier::Index(9), 1));
    }

    #[test]
    fn test_ranked_is_stable() {
        let mut session = session();
        session.vote(&PizzaSpecifier::Index(3), 2);
        let names: Vec<_> = session
            .ranked()
            .iter()
            .map(|o| (o.name.as_str(), o.votes))
            .collect();
        assert_eq!(names, vec![("plain", 2), ("plain", 0), ("thin", 0)]);
    }

    #[test]
    fn test_reset() {
        let mut session = session();
        session.vote(&PizzaSpecifier::Index(1), 4);
        session.reset_votes();
        assert!(session.orders.iter().all(|o| o.votes == 0));

        session.reset();
        assert!(session.orders.is_empty());
        assert_eq!(session.reserved(), 30);
    }
}
