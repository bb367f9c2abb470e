use std::fmt::Write;

use crate::ast::Statement;

/// Baseline tape length of the emitted program; the actual buffer is widened
/// by the tree's offset bounds so every relative dereference stays in range.
pub const TAPE_LENGTH: i32 = 30000;

#[derive(Default)]
struct EmitState {
    output: String,
    tempnum: i32,
    level: usize,
}

/// Add a line of C to the output, with indentation and newline, using
/// format! syntax.
macro_rules! push_line {
    ($state:expr, $fmt:expr) => {
        (writeln!(&mut $state.output, concat!("{}", $fmt),
               "  ".repeat($state.level))).unwrap()
    };
    ($state:expr, $fmt:expr, $($arg:tt)*) => {
        (writeln!(&mut $state.output, concat!("{}", $fmt),
               "  ".repeat($state.level),
               $($arg)*)).unwrap()
    };
}

/// Emits a complete C translation unit for the tree.
pub fn emit(program: &Statement) -> String {
    let (min_offset, max_offset) = offset_bounds(program);
    let buffer_size = TAPE_LENGTH + max_offset - min_offset;
    let origin = -min_offset;

    let mut state = EmitState {
        level: 1,
        ..Default::default()
    };
    match program {
        Statement::Program(body) => {
            for st in &body.statements {
                emit_statement(&mut state, st);
            }
        }
        other => emit_statement(&mut state, other),
    }

    format!(
        concat!(
            "#include <stdio.h>\n",
            "#include <stdint.h>\n",
            "\n",
            "int main(int argc, char** argv) {{\n",
            "  uint8_t buffer[{}] = {{0}};\n",
            "  int pos = {};\n",
            "{}",
            "}}\n"
        ),
        buffer_size, origin, state.output
    )
}

fn emit_statement(state: &mut EmitState, st: &Statement) {
    match *st {
        Statement::Increment(offset, count) => {
            push_line!(state, "buffer[pos + {}] += {};", offset, count)
        }
        Statement::Move(count) => push_line!(state, "pos += {};", count),
        Statement::Input(offset) => {
            push_line!(state, "buffer[pos + {}] = getchar();", offset)
        }
        Statement::Output(offset) => {
            push_line!(state, "putchar(buffer[pos + {}]);", offset)
        }
        Statement::Loop(offset, ref body) => {
            push_line!(state, "while (buffer[pos + {}]) {{", offset);
            state.level += 1;
            for st2 in &body.statements {
                emit_statement(state, st2);
            }
            state.level -= 1;
            push_line!(state, "}}");
        }
        Statement::ScaledCopy(offset, ref body) => {
            if body.statements.len() > 1 {
                let temp = state.tempnum;
                state.tempnum += 1;
                push_line!(state, "uint8_t t{} = buffer[pos + {}];", temp, offset);
                push_line!(state, "buffer[pos + {}] = 0;", offset);
                for st2 in &body.statements {
                    if let Statement::Increment(target, count) = *st2 {
                        if target != offset {
                            push_line!(
                                state,
                                "buffer[pos + {}] += t{} * {};",
                                target,
                                temp,
                                count
                            );
                        }
                    }
                }
            } else {
                // Zero-only fold, no targets to scale into
                push_line!(state, "buffer[pos + {}] = 0;", offset);
            }
        }
        Statement::Program(ref body) => {
            for st2 in &body.statements {
                emit_statement(state, st2);
            }
        }
    }
}

/// Minimum and maximum offset reachable from the root baseline, over every
/// statement in the tree. Both bounds include 0 so an empty program still
/// gets a valid buffer and origin.
pub fn offset_bounds(st: &Statement) -> (i32, i32) {
    let mut min = 0;
    let mut max = 0;
    bounds_walk(st, &mut min, &mut max);
    (min, max)
}

fn bounds_walk(st: &Statement, min: &mut i32, max: &mut i32) {
    match st {
        Statement::Increment(offset, _)
        | Statement::Input(offset)
        | Statement::Output(offset) => {
            *min = (*min).min(*offset);
            *max = (*max).max(*offset);
        }
        Statement::Move(_) => (),
        Statement::Loop(offset, body) | Statement::ScaledCopy(offset, body) => {
            *min = (*min).min(*offset);
            *max = (*max).max(*offset);
            for st2 in &body.statements {
                bounds_walk(st2, min, max);
            }
        }
        Statement::Program(body) => {
            for st2 in &body.statements {
                bounds_walk(st2, min, max);
            }
        }
    }
}
