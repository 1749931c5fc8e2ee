//! Statement execution
//!
//! Every statement except `START SESSION`, `NAME SESSION`, the save/load
//! placeholders and `QUIT` needs an active session and fails with
//! [`RuntimeError::NoSession`] otherwise.

use super::errors::RuntimeError;
use crate::parser::ast::{Alteration, PizzaSpecifier, Statement};
use crate::pizza::Pizza;
use crate::printer::{self, rule};
use crate::session::{OrderSession, PizzaOrder, ProgramState};

fn active(session: &mut Option<OrderSession>) -> Result<&mut OrderSession, RuntimeError> {
    session.as_mut().ok_or(RuntimeError::NoSession)
}

fn alter(pizza: &mut Pizza, alteration: &Alteration) -> Result<(), RuntimeError> {
    match alteration {
        Alteration::AddTopping(ta) => {
            if pizza.has_arrangement(ta) {
                return Err(RuntimeError::ArrangementAlreadyPresent);
            }
            pizza.toppings.push(*ta);
        }
        Alteration::RemoveTopping(ta) => pizza.toppings.retain(|t| t != ta),
        Alteration::SetCrust(c) => pizza.crust = *c,
        Alteration::SetSauce(s) => pizza.sauce = *s,
        Alteration::SetCheese(c) => pizza.cheese = *c,
    }
    Ok(())
}

impl Statement {
    pub fn execute(&self, state: &mut ProgramState) -> Result<(), RuntimeError> {
        let ProgramState {
            session,
            console,
            settings,
            running,
            ..
        } = state;

        match self {
            Statement::StartSession { name, reserved } => {
                if session.is_some() {
                    return Err(RuntimeError::SessionAlreadyActive);
                }
                *session = Some(OrderSession::new(name.clone(), *reserved));
            }

            Statement::NameSession(name) => {
                if let Some(session) = session {
                    session.rename(name.clone());
                }
            }

            Statement::EndSession => {
                if session.take().is_none() {
                    return Err(RuntimeError::NoSession);
                }
            }

            Statement::SaveSession(_) => {
                console.print("Session saving has not been implemented yet.");
                console.print(rule(settings.rule_char));
            }

            Statement::LoadSession(_) => {
                console.print("Session loading has not been implemented yet.");
                console.print(rule(settings.rule_char));
            }

            Statement::AddPizza { pizza, name } => {
                active(session)?.add(PizzaOrder::new(pizza.clone(), name.clone()));
            }

            Statement::RemovePizza(spec) => {
                active(session)?
                    .remove(spec)
                    .ok_or(RuntimeError::NoSuchPizza)?;
            }

            Statement::ViewPizza { spec: None, details } => {
                let session = active(session)?;
                console.print_lines(printer::session_report(session, *details, settings));
                console.print(rule(settings.rule_char));
            }

            Statement::ViewPizza {
                spec: Some(spec),
                details,
            } => {
                let session = active(session)?;
                let index = session.locate(spec).ok_or(RuntimeError::NoSuchPizza)?;
                console.print_lines(printer::order_report(
                    &session.orders[index],
                    Some(index + 1),
                    *details,
                    settings,
                ));
                console.print(rule(settings.rule_char));
            }

            Statement::AlterPizza { spec, alteration } => {
                let order = active(session)?
                    .get_mut(spec)
                    .ok_or(RuntimeError::NoSuchPizza)?;
                alter(&mut order.pizza, alteration)?;
            }

            Statement::VotePizza { spec, votes } => {
                if !active(session)?.vote(spec, *votes) {
                    return Err(RuntimeError::NoSuchPizza);
                }
            }

            Statement::SelectTopPizza(n) => {
                let session = active(session)?;
                let n = usize::try_from(*n).map_err(|_| RuntimeError::NegativeSelection)?;
                console.print_lines(printer::top_orders(session, n, settings));
                console.print(rule(settings.rule_char));
            }

            Statement::ResetSessionVotes => active(session)?.reset_votes(),

            Statement::ResetSession => active(session)?.reset(),

            Statement::Quit => *running = false,
        }

        Ok(())
    }

    /// The order this statement refers to, if any.
    pub fn specifier(&self) -> Option<&PizzaSpecifier> {
        match self {
            Statement::RemovePizza(spec)
            | Statement::AlterPizza { spec, .. }
            | Statement::VotePizza { spec, .. } => Some(spec),
            Statement::ViewPizza { spec, .. } => spec.as_ref(),
            _ => None,
        }
    }
}
