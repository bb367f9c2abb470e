#![allow(dead_code)]

//! Reference interpreters used only by the tests: one executes raw source
//! with ordinary tape semantics, the other executes the tree with the same
//! semantics the emitted C has (a `pos` variable plus relative offsets).
//! Agreement between the two on tape contents and output is the pipeline's
//! defining correctness property.

use std::collections::VecDeque;

use bf2c::{fold, parse_program, Statement};

pub const TAPE_LEN: usize = 256;
pub const START: usize = 128;

/// `getchar()` stored into a `uint8_t` yields 255 at EOF
const EOF_BYTE: u8 = 255;

/// Runs raw source on a tape, pointer starting at `START`. Returns the final
/// tape and the output bytes.
pub fn run_source(code: &[u8], input: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let mut tape = vec![0u8; TAPE_LEN];
    let mut pos = START;
    let mut input: VecDeque<u8> = input.iter().cloned().collect();
    let mut output = Vec::new();

    let mut i = 0;
    while i < code.len() {
        match code[i] {
            b'+' => tape[pos] = tape[pos].wrapping_add(1),
            b'-' => tape[pos] = tape[pos].wrapping_sub(1),
            b'>' => pos += 1,
            b'<' => pos -= 1,
            b'.' => output.push(tape[pos]),
            b',' => tape[pos] = input.pop_front().unwrap_or(EOF_BYTE),
            b'[' => {
                if tape[pos] == 0 {
                    i = matching_close(code, i);
                }
            }
            b']' => {
                if tape[pos] != 0 {
                    i = matching_open(code, i);
                }
            }
            _ => (),
        }
        i += 1;
    }
    (tape, output)
}

fn matching_close(code: &[u8], open: usize) -> usize {
    let mut depth = 0;
    for (i, c) in code.iter().enumerate().skip(open) {
        match *c {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => (),
        }
    }
    panic!("unbalanced brackets in test program");
}

fn matching_open(code: &[u8], close: usize) -> usize {
    let mut depth = 0;
    for i in (0..=close).rev() {
        match code[i] {
            b']' => depth += 1,
            b'[' => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => (),
        }
    }
    panic!("unbalanced brackets in test program");
}

/// Runs a tree the way the emitted C runs: one mutable `pos`, every offset
/// dereferenced relative to it, `Move` statements materializing drift.
pub fn run_tree(program: &Statement, input: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let mut tape = vec![0u8; TAPE_LEN];
    let mut pos = START as i64;
    let mut input: VecDeque<u8> = input.iter().cloned().collect();
    let mut output = Vec::new();
    exec(program, &mut tape, &mut pos, &mut input, &mut output);
    (tape, output)
}

fn exec(
    st: &Statement,
    tape: &mut [u8],
    pos: &mut i64,
    input: &mut VecDeque<u8>,
    output: &mut Vec<u8>,
) {
    match st {
        Statement::Increment(offset, count) => {
            let i = (*pos + *offset as i64) as usize;
            tape[i] = (tape[i] as i32).wrapping_add(*count) as u8;
        }
        Statement::Move(count) => *pos += *count as i64,
        Statement::Input(offset) => {
            let i = (*pos + *offset as i64) as usize;
            tape[i] = input.pop_front().unwrap_or(EOF_BYTE);
        }
        Statement::Output(offset) => {
            let i = (*pos + *offset as i64) as usize;
            output.push(tape[i]);
        }
        Statement::Loop(offset, body) => {
            while tape[(*pos + *offset as i64) as usize] != 0 {
                for st2 in &body.statements {
                    exec(st2, tape, pos, input, output);
                }
            }
        }
        Statement::ScaledCopy(offset, body) => {
            let i = (*pos + *offset as i64) as usize;
            let old = tape[i] as i32;
            tape[i] = 0;
            for st2 in &body.statements {
                if let Statement::Increment(target, count) = st2 {
                    if target != offset {
                        let j = (*pos + *target as i64) as usize;
                        tape[j] = (tape[j] as i32).wrapping_add(old * count) as u8;
                    }
                }
            }
        }
        Statement::Program(body) => {
            for st2 in &body.statements {
                exec(st2, tape, pos, input, output);
            }
        }
    }
}

/// Parses and folds `source`, then checks the tree execution against the
/// raw-source execution for the given input.
pub fn assert_equivalent(source: &str, input: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let (raw_tape, raw_output) = run_source(source.as_bytes(), input);
    let program = fold(parse_program(source.as_bytes()).expect("parse should succeed"));
    let (tree_tape, tree_output) = run_tree(&program, input);
    assert_eq!(raw_output, tree_output, "output mismatch for {:?}", source);
    assert_eq!(raw_tape, tree_tape, "tape mismatch for {:?}", source);
    (tree_tape, tree_output)
}
