//! Property-based tests for the SPL front end

use proptest::prelude::*;
use proptest::sample::select;
use spl::parser::ast::Statement;
use spl::parser::errors::{ErrorKind, Stage};
use spl::parser::pizza::{interpret_pizza, parse_pizza, PizzaError};
use spl::parser::scanner::Scanner;
use spl::parser::{interpret, Grammar};
use spl::pizza::{
    Cheese, Crust, Pizza, PizzaElement, Sauce, Topping, ToppingArrangement, ToppingPosition,
};

fn arrangement() -> impl Strategy<Value = ToppingArrangement> {
    (
        select(ToppingPosition::ALL.to_vec()),
        select(Topping::ALL.to_vec()),
    )
        .prop_map(|(position, topping)| ToppingArrangement::new(position, topping))
}

fn pizza() -> impl Strategy<Value = Pizza> {
    (
        select(Crust::ALL.to_vec()),
        select(Sauce::ALL.to_vec()),
        select(Cheese::ALL.to_vec()),
        prop::collection::hash_set(arrangement(), 0..8),
    )
        .prop_map(|(crust, sauce, cheese, toppings)| Pizza {
            crust,
            sauce,
            cheese,
            toppings: toppings.into_iter().collect(),
        })
}

proptest! {
    #[test]
    fn test_pizza_literal_round_trip(pizza in pizza()) {
        let literal = pizza.to_literal();
        let interior = &literal[1..literal.len() - 1];
        prop_assert_eq!(interpret_pizza(interior).unwrap(), pizza);
    }

    #[test]
    fn test_element_order_does_not_matter(
        (pizza, elements) in pizza().prop_flat_map(|p| {
            let elements = p.elements();
            (Just(p), Just(elements).prop_shuffle())
        })
    ) {
        prop_assert_eq!(parse_pizza(&elements).unwrap(), pizza);
    }

    #[test]
    fn test_add_pizza_statement_carries_literal(pizza in pizza()) {
        let source = format!("ADD PIZZA {} AS \"p\";", pizza.to_literal());
        let program = interpret(&source, &Grammar::spl_1()).unwrap();
        prop_assert_eq!(
            program,
            vec![Statement::AddPizza { pizza, name: "p".to_string() }]
        );
    }

    #[test]
    fn test_whitespace_only_input_is_empty(source in "[ \t\r\n]*") {
        prop_assert!(interpret(&source, &Grammar::spl_1()).unwrap().is_empty());
    }

    #[test]
    fn test_advance_until_terminates(
        text in "[a-z;#\n ]{0,40}",
        skip in 0usize..40,
        target in select(vec!['a', ';', '#', '\n', 'z']),
    ) {
        let mut scan = Scanner::new(&text, Stage::Tokenization);
        for _ in 0..skip {
            scan.advance();
        }
        let start = scan.stamp();

        match scan.advance_until_char(target) {
            Ok(scan) => {
                prop_assert_eq!(scan.current(), Some(target));
                prop_assert!(scan.stamp() > start);
            }
            Err(err) => {
                prop_assert_eq!(err.kind, ErrorKind::EofWhileParsing);
                prop_assert!(!text[start..].chars().skip(1).any(|ch| ch == target));
            }
        }
    }

    #[test]
    fn test_repeated_arrangement_is_rejected(ta in arrangement()) {
        let element = PizzaElement::Topping(ta);
        prop_assert_eq!(
            parse_pizza(&[element, element]).unwrap_err(),
            PizzaError::DuplicateTopping(ta)
        );
    }

    #[test]
    fn test_same_topping_in_two_positions_is_accepted(topping in select(Topping::ALL.to_vec())) {
        let pizza = parse_pizza(&[
            PizzaElement::Topping(ToppingArrangement::new(ToppingPosition::Left, topping)),
            PizzaElement::Topping(ToppingArrangement::new(ToppingPosition::Right, topping)),
        ])
        .unwrap();
        prop_assert_eq!(pizza.toppings.len(), 2);
    }
}
