//! Human-readable output
//!
//! Statements never write to stdout. Everything they print goes through a
//! [`Console`], which records each line with its kind and the number of the
//! statement that produced it. The binary drains the console after each run
//! and colours the lines with a [`theme::Theme`]; tests inspect it directly.
//!
//! The `describe_*` and `*_report` functions only build strings.

pub mod theme;

use crate::pizza::Pizza;
use crate::session::{OrderSession, PizzaOrder};

/// Width of a horizontal rule.
pub const RULE_WIDTH: usize = 30;

pub const WELCOME: &str = "Welcome to the Structured Pizza Language Interpreter v1.0!";
pub const HALTED: &str = "Error encountered, execution halted.";

/// Output options chosen on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Always list crust, sauce and cheese, even at their defaults
    pub detail: bool,
    /// Character used for rules between outputs
    pub rule_char: char,
    /// Character used for the rule above the REPL prompt
    pub repl_rule_char: char,
    pub prompt: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            detail: false,
            rule_char: '-',
            repl_rule_char: '*',
            prompt: "> ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Output,
    Error,
}

/// A line of console output with the statement that printed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub text: String,
    pub kind: LineKind,
    /// 1-based statement number, 0 outside of execution
    pub statement: usize,
}

/// Captured program output
#[derive(Debug, Clone, Default)]
pub struct Console {
    lines: Vec<ConsoleLine>,
    statement: usize,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute subsequent lines to statement `n`.
    pub fn set_statement(&mut self, n: usize) {
        self.statement = n;
    }

    fn push(&mut self, text: &str, kind: LineKind) {
        for line in text.split('\n') {
            self.lines.push(ConsoleLine {
                text: line.to_string(),
                kind,
                statement: self.statement,
            });
        }
    }

    /// Print text; embedded newlines start new lines.
    pub fn print(&mut self, text: impl AsRef<str>) {
        self.push(text.as_ref(), LineKind::Output);
    }

    pub fn print_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.print(line);
        }
    }

    pub fn error(&mut self, text: impl AsRef<str>) {
        self.push(text.as_ref(), LineKind::Error);
    }

    pub fn lines(&self) -> &[ConsoleLine] {
        &self.lines
    }

    /// All lines as plain strings
    pub fn get_output(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.text.clone()).collect()
    }

    /// Take every captured line, leaving the console empty.
    pub fn drain(&mut self) -> Vec<ConsoleLine> {
        std::mem::take(&mut self.lines)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub fn rule(ch: char) -> String {
    std::iter::repeat(ch).take(RULE_WIDTH).collect()
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "Yes"
    } else {
        "No"
    }
}

/// e.g. `Ham (Right), Pesto Base, Thin Crust.`
///
/// Toppings come first in order. The cheese, sauce and crust follow, each
/// left out when it is the default, unless the pizza has no toppings or
/// `detail` is set.
pub fn describe_pizza(pizza: &Pizza, detail: bool) -> String {
    let show_base = detail || pizza.toppings.is_empty();

    let mut words: Vec<String> = pizza
        .toppings
        .iter()
        .map(|ta| format!("{}{}", ta.topping.display_name(), ta.position.display_suffix()))
        .collect();

    if show_base || pizza.cheese != Pizza::DEFAULT_CHEESE {
        words.push(pizza.cheese.display_name().to_string());
    }
    if show_base || pizza.sauce != Pizza::DEFAULT_SAUCE {
        words.push(pizza.sauce.display_name().to_string());
    }
    if show_base || pizza.crust != Pizza::DEFAULT_CRUST {
        words.push(pizza.crust.display_name().to_string());
    }

    format!("{}.", words.join(", "))
}

/// e.g. `#2 "Test": Ham (Right), Pesto Base. [3 votes]`
///
/// Without an ordinal the `#n` prefix is left out.
pub fn describe_order(order: &PizzaOrder, ordinal: Option<usize>, detail: bool) -> String {
    let prefix = match (ordinal, order.name.is_empty()) {
        (Some(n), true) => format!("#{n}: "),
        (Some(n), false) => format!("#{n} \"{}\": ", order.name),
        (None, true) => String::new(),
        (None, false) => format!("\"{}\": ", order.name),
    };

    format!(
        "{prefix}{} [{} votes]",
        describe_pizza(&order.pizza, detail),
        order.votes
    )
}

pub fn dietary_info(pizza: &Pizza) -> Vec<String> {
    vec![
        format!("Gluten-Free: {}", yes_no(pizza.is_gluten_free())),
        format!("Dairy-Free: {}", yes_no(pizza.is_dairy_free())),
        format!("Vegetarian: {}", yes_no(pizza.is_vegetarian())),
        format!("Vegan: {}", yes_no(pizza.is_vegan())),
    ]
}

/// One order, followed by its dietary info when `details` is set.
pub fn order_report(
    order: &PizzaOrder,
    ordinal: Option<usize>,
    details: bool,
    settings: &Settings,
) -> Vec<String> {
    let mut lines = vec![describe_order(order, ordinal, settings.detail)];
    if details {
        lines.extend(dietary_info(&order.pizza));
    }
    lines
}

/// Header line followed by every order, each trailed by a blank line.
pub fn session_report(session: &OrderSession, details: bool, settings: &Settings) -> Vec<String> {
    let header = if session.name.is_empty() {
        format!("{} pizzas ordered.", session.orders.len())
    } else {
        format!("{}: {} pizzas ordered.", session.name, session.orders.len())
    };

    let mut lines = vec![header, String::new()];
    for (i, order) in session.orders.iter().enumerate() {
        lines.extend(order_report(order, Some(i + 1), details, settings));
        lines.push(String::new());
    }
    lines
}

/// The `n` best-voted orders, highest first.
pub fn top_orders(session: &OrderSession, n: usize, settings: &Settings) -> Vec<String> {
    let mut lines = vec![format!("Top {n} orders:")];
    lines.extend(
        session
            .ranked()
            .into_iter()
            .take(n)
            .map(|order| describe_order(order, None, settings.detail)),
    );
    lines
}
