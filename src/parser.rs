use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::mem;

use unicode_width::UnicodeWidthStr;

use crate::ast::{Block, Statement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnterminatedLoop,
    UnmatchedCloseBracket,
}
use ParseErrorKind::*;

#[derive(Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    line: Vec<u8>,
    linenum: usize,
    offset: usize,
}

impl ParseError {
    fn new(kind: ParseErrorKind, code: &[u8], i: usize) -> Self {
        let (line, linenum, offset) = find_line(code, i);
        Self {
            kind,
            line: line.into(),
            linenum,
            offset,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let line = String::from_utf8_lossy(&self.line);
        let width = UnicodeWidthStr::width(&line[0..self.offset]);

        match self.kind {
            UnterminatedLoop => {
                writeln!(f, "reached EOF with unterminated loop")?;
                writeln!(f, "Loop started at {}:{}", self.linenum, self.offset)?;
            }
            UnmatchedCloseBracket => {
                writeln!(
                    f,
                    "] found at {}:{} with no matching [",
                    self.linenum, self.offset
                )?;
            }
        };

        writeln!(f, "{}", line)?;
        write!(f, "{}^", " ".repeat(width))?;

        Ok(())
    }
}

impl Error for ParseError {}

/// Parses a Brainfuck program into a `Statement::Program` tree, coalescing
/// runs of `+`/`-` at the same cell into single `Increment` statements.
pub fn parse_program(code: &[u8]) -> Result<Statement, ParseError> {
    let mut i = 0;
    let body = parse_block(code, &mut i, 0)?;
    if code.get(i) == Some(&b']') {
        return Err(ParseError::new(UnmatchedCloseBracket, code, i));
    }
    Ok(Statement::Program(body))
}

/// Parses statements until EOF or a lookahead `]`, which is left unconsumed
/// so the caller can match it against its own `[`.
fn parse_block(code: &[u8], i: &mut usize, base_offset: i32) -> Result<Block, ParseError> {
    let mut statements = Vec::new();
    let mut current_offset = base_offset;
    // Pending increments per offset; BTreeMap so flushes come out in offset order
    let mut adds: BTreeMap<i32, i32> = BTreeMap::new();

    fn flush(statements: &mut Vec<Statement>, adds: &mut BTreeMap<i32, i32>) {
        for (offset, count) in mem::take(adds) {
            if count != 0 {
                statements.push(Statement::Increment(offset, count));
            }
        }
    }

    while let Some(&c) = code.get(*i) {
        if c == b']' {
            break;
        }
        *i += 1;

        match c {
            b'+' => {
                *adds.entry(current_offset).or_insert(0) += 1;
            }
            b'-' => {
                *adds.entry(current_offset).or_insert(0) -= 1;
            }
            b'>' => current_offset += 1,
            b'<' => current_offset -= 1,
            b'.' => {
                flush(&mut statements, &mut adds);
                statements.push(Statement::Output(current_offset));
            }
            b',' => {
                flush(&mut statements, &mut adds);
                statements.push(Statement::Input(current_offset));
            }
            b'[' => {
                flush(&mut statements, &mut adds);
                // Position of the [ itself, for the diagnostic
                let start = *i - 1;
                let body = parse_block(code, i, current_offset)?;
                if code.get(*i) != Some(&b']') {
                    return Err(ParseError::new(UnterminatedLoop, code, start));
                }
                *i += 1;
                statements.push(Statement::Loop(current_offset, body));
            }
            _ => (),
        }
    }

    flush(&mut statements, &mut adds);

    if current_offset != base_offset {
        statements.push(Statement::Move(current_offset - base_offset));
    }
    Ok(Block::new(statements))
}

fn find_line(code: &[u8], i: usize) -> (&[u8], usize, usize) {
    let offset = code[0..i].iter().rev().take_while(|x| **x != b'\n').count();
    let end = i + code[i..].iter().take_while(|x| **x != b'\n').count();
    let linenum = code[0..(i - offset)]
        .iter()
        .filter(|x| **x == b'\n')
        .count();
    (&code[(i - offset)..end], linenum, offset)
}
