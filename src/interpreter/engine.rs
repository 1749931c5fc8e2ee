// Execution engine

use crate::parser::ast::Program;
use crate::parser::errors::InterpError;
use crate::parser::grammar::Grammar;
use crate::parser::parse::interpret;
use crate::printer::{rule, HALTED};
use crate::session::ProgramState;
use tracing::{debug, trace, warn};

/// Execute `program` in order, halting on the first runtime error.
///
/// The error is reported on the console as `Statement #n: Error: ...`.
/// Returns 0 when every statement succeeded and 1 after a halt. A `QUIT`
/// only clears `state.running`; the rest of the program still runs.
pub fn execute(program: &Program, state: &mut ProgramState) -> i32 {
    state.console.print(rule(state.settings.rule_char));
    state.program_counter = 1;

    for statement in program {
        state.console.set_statement(state.program_counter);
        trace!(
            pc = state.program_counter,
            statement = statement.label(),
            spec = ?statement.specifier(),
            "executing"
        );

        if let Err(err) = statement.execute(state) {
            warn!(pc = state.program_counter, error = %err, "execution halted");
            state
                .console
                .error(format!("Statement #{}: Error: {err}", state.program_counter));
            state.console.set_statement(0);
            return 1;
        }

        state.program_counter += 1;
    }

    state.console.set_statement(0);
    debug!(statements = program.len(), "program finished");
    0
}

/// Interpret `source` and execute the result.
///
/// An interpret error is returned before anything runs. A halted program
/// leaves the halt notice on the console and returns its status.
pub fn run_source(
    source: &str,
    grammar: &Grammar,
    state: &mut ProgramState,
) -> Result<i32, InterpError> {
    let program = interpret(source, grammar)?;
    let status = execute(&program, state);
    if status != 0 {
        state.console.error(HALTED);
    }
    Ok(status)
}
