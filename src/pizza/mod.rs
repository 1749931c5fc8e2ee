//! Pizza model
//!
//! This module defines what a pizza is:
//! - [`Crust`], [`Sauce`], [`Cheese`]: the three base components
//! - [`Topping`] and [`ToppingPosition`], combined into a [`ToppingArrangement`]
//! - [`PizzaElement`]: one decoded `{...}` clause of a pizza literal
//! - [`Pizza`]: a finished pizza
//!
//! # Lookup tables
//!
//! Every component can be looked up from its source spelling with
//! `from_word`, case-insensitively. A few components have aliases
//! (`BARBECUE`, `OLIVES`, `ONION`). An unknown word yields `None`; there is no
//! "unspecified" component value.
//!
//! # Equality
//!
//! Two pizzas are equal when their bases match and they carry the same
//! arrangements in any order.

use rustc_hash::FxHashMap;
use std::sync::LazyLock;

fn lookup<T: Copy>(table: &FxHashMap<&'static str, T>, word: &str) -> Option<T> {
    table.get(word.to_ascii_uppercase().as_str()).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crust {
    Standard,
    ThinCrust,
    ThickCrust,
    GlutenFree,
}

impl Crust {
    pub const ALL: [Crust; 4] = [
        Crust::Standard,
        Crust::ThinCrust,
        Crust::ThickCrust,
        Crust::GlutenFree,
    ];

    /// Canonical source spelling.
    pub fn keyword(self) -> &'static str {
        match self {
            Crust::Standard => "STANDARD",
            Crust::ThinCrust => "THINCRUST",
            Crust::ThickCrust => "THICKCRUST",
            Crust::GlutenFree => "GLUTENFREE",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Crust::Standard => "Standard Crust",
            Crust::ThinCrust => "Thin Crust",
            Crust::ThickCrust => "Thick Crust",
            Crust::GlutenFree => "Gluten-Free Crust",
        }
    }

    pub fn from_word(word: &str) -> Option<Self> {
        lookup(&CRUSTS, word)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sauce {
    None,
    Tomato,
    Pesto,
    OliveOil,
    Bbq,
}

impl Sauce {
    pub const ALL: [Sauce; 5] = [
        Sauce::None,
        Sauce::Tomato,
        Sauce::Pesto,
        Sauce::OliveOil,
        Sauce::Bbq,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Sauce::None => "NONE",
            Sauce::Tomato => "TOMATO",
            Sauce::Pesto => "PESTO",
            Sauce::OliveOil => "OLIVEOIL",
            Sauce::Bbq => "BBQ",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Sauce::None => "No Sauce",
            Sauce::Tomato => "Tomato Sauce",
            Sauce::Pesto => "Pesto Base",
            Sauce::OliveOil => "Olive Oil Base",
            Sauce::Bbq => "BBQ Base",
        }
    }

    pub fn from_word(word: &str) -> Option<Self> {
        lookup(&SAUCES, word)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cheese {
    None,
    Mozzarella,
    DoubleMozzarella,
    TripleMozzarella,
    DairyFree,
}

impl Cheese {
    pub const ALL: [Cheese; 5] = [
        Cheese::None,
        Cheese::Mozzarella,
        Cheese::DoubleMozzarella,
        Cheese::TripleMozzarella,
        Cheese::DairyFree,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Cheese::None => "NONE",
            Cheese::Mozzarella => "MOZZARELLA",
            Cheese::DoubleMozzarella => "DOUBLEMOZZARELLA",
            Cheese::TripleMozzarella => "TRIPLEMOZZARELLA",
            Cheese::DairyFree => "DAIRYFREE",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Cheese::None => "No Cheese",
            Cheese::Mozzarella => "Mozzarella Cheese",
            Cheese::DoubleMozzarella => "Double Mozzarella Cheese",
            Cheese::TripleMozzarella => "Triple Mozzarella Cheese",
            Cheese::DairyFree => "Dairy-Free Cheese",
        }
    }

    pub fn from_word(word: &str) -> Option<Self> {
        lookup(&CHEESES, word)
    }
}

/// Menu section a topping belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToppingGroup {
    Meat,
    Veggie,
    Cheese,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topping {
    // Meats
    Pepperoni,
    Bacon,
    Soppressata,
    Sausage,
    Anchovies,
    Chicken,
    Ham,
    Beef,
    Chorizo,

    // Veggies
    Artichoke,
    BlackOlives,
    GreenOlives,
    Broccoli,
    Bruschetta,
    Garlic,
    GreenPeppers,
    RoastedRedPeppers,
    HotPeppers,
    HotHoney,
    Mushrooms,
    PortobelloMushrooms,
    SpanishOnion,
    RedOnion,
    Pineapple,
    PlantBasedPepperoni,
    Spinach,
    Tomato,
    Zucchini,

    // Cheeses
    Asiago,
    Cheddar,
    Feta,
    GoatCheese,
    Parmesan,
}

impl Topping {
    pub const ALL: [Topping; 33] = [
        Topping::Pepperoni,
        Topping::Bacon,
        Topping::Soppressata,
        Topping::Sausage,
        Topping::Anchovies,
        Topping::Chicken,
        Topping::Ham,
        Topping::Beef,
        Topping::Chorizo,
        Topping::Artichoke,
        Topping::BlackOlives,
        Topping::GreenOlives,
        Topping::Broccoli,
        Topping::Bruschetta,
        Topping::Garlic,
        Topping::GreenPeppers,
        Topping::RoastedRedPeppers,
        Topping::HotPeppers,
        Topping::HotHoney,
        Topping::Mushrooms,
        Topping::PortobelloMushrooms,
        Topping::SpanishOnion,
        Topping::RedOnion,
        Topping::Pineapple,
        Topping::PlantBasedPepperoni,
        Topping::Spinach,
        Topping::Tomato,
        Topping::Zucchini,
        Topping::Asiago,
        Topping::Cheddar,
        Topping::Feta,
        Topping::GoatCheese,
        Topping::Parmesan,
    ];

    pub fn group(self) -> ToppingGroup {
        use Topping::*;
        match self {
            Pepperoni | Bacon | Soppressata | Sausage | Anchovies | Chicken
            | Ham | Beef | Chorizo => ToppingGroup::Meat,
            Asiago | Cheddar | Feta | GoatCheese | Parmesan => {
                ToppingGroup::Cheese
            }
            _ => ToppingGroup::Veggie,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Topping::Pepperoni => "PEPPERONI",
            Topping::Bacon => "BACON",
            Topping::Soppressata => "SOPPRESSATA",
            Topping::Sausage => "SAUSAGE",
            Topping::Anchovies => "ANCHOVIES",
            Topping::Chicken => "CHICKEN",
            Topping::Ham => "HAM",
            Topping::Beef => "BEEF",
            Topping::Chorizo => "CHORIZO",
            Topping::Artichoke => "ARTICHOKE",
            Topping::BlackOlives => "BLACKOLIVES",
            Topping::GreenOlives => "GREENOLIVES",
            Topping::Broccoli => "BROCCOLI",
            Topping::Bruschetta => "BRUSCHETTA",
            Topping::Garlic => "GARLIC",
            Topping::GreenPeppers => "GREENPEPPERS",
            Topping::RoastedRedPeppers => "ROASTEDREDPEPPERS",
            Topping::HotPeppers => "HOTPEPPERS",
            Topping::HotHoney => "HOTHONEY",
            Topping::Mushrooms => "MUSHROOMS",
            Topping::PortobelloMushrooms => "PORTOBELLOMUSHROOMS",
            Topping::SpanishOnion => "SPANISHONION",
            Topping::RedOnion => "REDONION",
            Topping::Pineapple => "PINEAPPLE",
            Topping::PlantBasedPepperoni => "PLANTBASEDPEPPERONI",
            Topping::Spinach => "SPINACH",
            Topping::Tomato => "TOMATO",
            Topping::Zucchini => "ZUCCHINI",
            Topping::Asiago => "ASIAGO",
            Topping::Cheddar => "CHEDDAR",
            Topping::Feta => "FETA",
            Topping::GoatCheese => "GOATCHEESE",
            Topping::Parmesan => "PARMESAN",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Topping::Pepperoni => "Pepperoni",
            Topping::Bacon => "Bacon",
            Topping::Soppressata => "Soppressata",
            Topping::Sausage => "Sausage",
            Topping::Anchovies => "Anchovies",
            Topping::Chicken => "Chicken",
            Topping::Ham => "Ham",
            Topping::Beef => "Beef",
            Topping::Chorizo => "Chorizo",
            Topping::Artichoke => "Artichoke",
            Topping::BlackOlives => "Black Olives",
            Topping::GreenOlives => "Green Olives",
            Topping::Broccoli => "Broccoli",
            Topping::Bruschetta => "Bruschetta",
            Topping::Garlic => "Garlic",
            Topping::GreenPeppers => "Green Peppers",
            Topping::RoastedRedPeppers => "Roasted Red Peppers",
            Topping::HotPeppers => "Hot Peppers",
            Topping::HotHoney => "Hot Honey",
            Topping::Mushrooms => "Mushrooms",
            Topping::PortobelloMushrooms => "Portobello Mushrooms",
            Topping::SpanishOnion => "Onion",
            Topping::RedOnion => "Red Onion",
            Topping::Pineapple => "Pineapple",
            Topping::PlantBasedPepperoni => "Plant-Based Pepperoni",
            Topping::Spinach => "Spinach",
            Topping::Tomato => "Tomato",
            Topping::Zucchini => "Zucchini",
            Topping::Asiago => "Asiago Cheese",
            Topping::Cheddar => "Cheddar Cheese",
            Topping::Feta => "Feta Cheese",
            Topping::GoatCheese => "Goat Cheese",
            Topping::Parmesan => "Parmesan Cheese",
        }
    }

    pub fn from_word(word: &str) -> Option<Self> {
        lookup(&TOPPINGS, word)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToppingPosition {
    Left,
    Right,
    All,
}

impl ToppingPosition {
    pub const ALL: [ToppingPosition; 3] = [
        ToppingPosition::Left,
        ToppingPosition::Right,
        ToppingPosition::All,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            ToppingPosition::Left => "LEFT",
            ToppingPosition::Right => "RIGHT",
            ToppingPosition::All => "ALL",
        }
    }

    /// Suffix appended to a topping's display name.
    pub fn display_suffix(self) -> &'static str {
        match self {
            ToppingPosition::Left => " (Left)",
            ToppingPosition::Right => " (Right)",
            ToppingPosition::All => "",
        }
    }

    pub fn from_word(word: &str) -> Option<Self> {
        lookup(&POSITIONS, word)
    }
}

/// A topping placed on part (or all) of a pizza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToppingArrangement {
    pub position: ToppingPosition,
    pub topping: Topping,
}

impl ToppingArrangement {
    pub fn new(position: ToppingPosition, topping: Topping) -> Self {
        Self { position, topping }
    }
}

/// One decoded `{...}` clause of a pizza literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PizzaElement {
    Crust(Crust),
    Sauce(Sauce),
    Cheese(Cheese),
    Topping(ToppingArrangement),
}

impl PizzaElement {
    /// What kind of component this is, for diagnostics.
    pub fn category(&self) -> &'static str {
        match self {
            PizzaElement::Crust(_) => "crust",
            PizzaElement::Sauce(_) => "sauce",
            PizzaElement::Cheese(_) => "cheese",
            PizzaElement::Topping(_) => "topping arrangement",
        }
    }

    /// Explicit `{KIND:VALUE}` source form.
    pub fn to_literal(&self) -> String {
        match self {
            PizzaElement::Crust(c) => format!("{{CRUST:{}}}", c.keyword()),
            PizzaElement::Sauce(s) => format!("{{SAUCE:{}}}", s.keyword()),
            PizzaElement::Cheese(c) => format!("{{CHEESE:{}}}", c.keyword()),
            PizzaElement::Topping(ta) => format!(
                "{{{}:{}}}",
                ta.position.keyword(),
                ta.topping.keyword()
            ),
        }
    }
}

#[derive(Debug, Clone, Eq)]
pub struct Pizza {
    pub crust: Crust,
    pub sauce: Sauce,
    pub cheese: Cheese,
    pub toppings: Vec<ToppingArrangement>,
}

impl Pizza {
    pub const DEFAULT_CRUST: Crust = Crust::Standard;
    pub const DEFAULT_SAUCE: Sauce = Sauce::Tomato;
    pub const DEFAULT_CHEESE: Cheese = Cheese::Mozzarella;

    pub fn has_arrangement(&self, arrangement: &ToppingArrangement) -> bool {
        self.toppings.contains(arrangement)
    }

    pub fn is_gluten_free(&self) -> bool {
        self.crust == Crust::GlutenFree
    }

    pub fn is_dairy_free(&self) -> bool {
        self.cheese == Cheese::DairyFree
    }

    pub fn is_vegetarian(&self) -> bool {
        self.toppings
            .iter()
            .all(|ta| ta.topping.group() != ToppingGroup::Meat)
    }

    pub fn is_vegan(&self) -> bool {
        self.is_dairy_free() && self.is_vegetarian()
    }

    /// Decompose into one element per base component and arrangement.
    pub fn elements(&self) -> Vec<PizzaElement> {
        let mut elements = vec![
            PizzaElement::Crust(self.crust),
            PizzaElement::Sauce(self.sauce),
            PizzaElement::Cheese(self.cheese),
        ];
        elements.extend(self.toppings.iter().copied().map(PizzaElement::Topping));
        elements
    }

    /// Source form of this pizza as a `[...]` literal.
    pub fn to_literal(&self) -> String {
        let clauses: Vec<String> =
            self.elements().iter().map(PizzaElement::to_literal).collect();
        format!("[{}]", clauses.join(","))
    }
}

impl Default for Pizza {
    fn default() -> Self {
        Self {
            crust: Self::DEFAULT_CRUST,
            sauce: Self::DEFAULT_SAUCE,
            cheese: Self::DEFAULT_CHEESE,
            toppings: Vec::new(),
        }
    }
}

impl PartialEq for Pizza {
    fn eq(&self, other: &Self) -> bool {
        let count = |list: &[ToppingArrangement], ta: &ToppingArrangement| {
            list.iter().filter(|t| *t == ta).count()
        };

        self.crust == other.crust
            && self.sauce == other.sauce
            && self.cheese == other.cheese
            && self.toppings.len() == other.toppings.len()
            && self
                .toppings
                .iter()
                .all(|ta| count(&self.toppings, ta) == count(&other.toppings, ta))
    }
}

static CRUSTS: LazyLock<FxHashMap<&'static str, Crust>> =
    LazyLock::new(|| Crust::ALL.iter().map(|c| (c.keyword(), *c)).collect());

static SAUCES: LazyLock<FxHashMap<&'static str, Sauce>> = LazyLock::new(|| {
    let mut table: FxHashMap<_, _> =
        Sauce::ALL.iter().map(|s| (s.keyword(), *s)).collect();
    table.insert("BARBECUE", Sauce::Bbq);
    table
});

static CHEESES: LazyLock<FxHashMap<&'static str, Cheese>> =
    LazyLock::new(|| Cheese::ALL.iter().map(|c| (c.keyword(), *c)).collect());

static TOPPINGS: LazyLock<FxHashMap<&'static str, Topping>> = LazyLock::new(|| {
    let mut table: FxHashMap<_, _> =
        Topping::ALL.iter().map(|t| (t.keyword(), *t)).collect();
    table.insert("OLIVES", Topping::BlackOlives);
    table.insert("ONION", Topping::RedOnion);
    table
});

static POSITIONS: LazyLock<FxHashMap<&'static str, ToppingPosition>> =
    LazyLock::new(|| {
        ToppingPosition::ALL
            .iter()
            .map(|p| (p.keyword(), *p))
            .collect()
    });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(Crust::from_word("thinCrust"), Some(Crust::ThinCrust));
        assert_eq!(Sauce::from_word("barbecue"), Some(Sauce::Bbq));
        assert_eq!(Topping::from_word("Onion"), Some(Topping::RedOnion));
        assert_eq!(Topping::from_word("olives"), Some(Topping::BlackOlives));
        assert_eq!(Cheese::from_word("cheddar"), None);
    }

    #[test]
    fn test_every_keyword_round_trips() {
        for t in Topping::ALL {
            assert_eq!(Topping::from_word(t.keyword()), Some(t));
        }
        for c in Cheese::ALL {
            assert_eq!(Cheese::from_word(c.keyword()), Some(c));
        }
    }

    #[test]
    fn test_equality_ignores_topping_order() {
        let ham = ToppingArrangement::new(ToppingPosition::Right, Topping::Ham);
        let pine = ToppingArrangement::new(ToppingPosition::All, Topping::Pineapple);

        let a = Pizza {
            toppings: vec![ham, pine],
            ..Pizza::default()
        };
        let b = Pizza {
            toppings: vec![pine, ham],
            ..Pizza::default()
        };
        let c = Pizza {
            toppings: vec![pine],
            ..Pizza::default()
        };

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(
            a,
            Pizza {
                crust: Crust::ThinCrust,
                ..b
            }
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Topping::SpanishOnion.display_name(), "Onion");
        assert_eq!(Topping::RedOnion.display_name(), "Red Onion");
        assert_eq!(Sauce::Bbq.display_name(), "BBQ Base");
    }

    #[test]
    fn test_dietary_predicates() {
        let vegan = Pizza {
            cheese: Cheese::DairyFree,
            toppings: vec![ToppingArrangement::new(
                ToppingPosition::All,
                Topping::Spinach,
            )],
            ..Pizza::default()
        };
        assert!(vegan.is_vegetarian());
        assert!(vegan.is_vegan());
        assert!(!vegan.is_gluten_free());

        let meaty = Pizza {
            toppings: vec![ToppingArrangement::new(
                ToppingPosition::Left,
                Topping::Chorizo,
            )],
            ..Pizza::default()
        };
        assert!(!meaty.is_vegetarian());
    }

    #[test]
    fn test_to_literal() {
        let pizza = Pizza {
            toppings: vec![ToppingArrangement::new(
                ToppingPosition::Left,
                Topping::Ham,
            )],
            ..Pizza::default()
        };
        assert_eq!(
            pizza.to_literal(),
            "[{CRUST:STANDARD},{SAUCE:TOMATO},{CHEESE:MOZZARELLA},{LEFT:HAM}]"
        );
    }
}
