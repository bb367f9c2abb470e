use std::fmt;

/// A node of the syntax tree. Offsets are relative to the pointer position
/// at entry to the enclosing block, not absolute tape indices.
#[derive(Clone, PartialEq, Eq)]
pub enum Statement {
    /// Add `count` to the cell at `offset`
    Increment(i32, i32),
    /// Add `count` to the pointer itself
    Move(i32),
    /// Read one byte into the cell at `offset`
    Input(i32),
    /// Write the byte at `offset`
    Output(i32),
    /// While the cell at `offset` is nonzero, run the body
    Loop(i32, Block),
    /// Zero the cell at `offset`, adding `old_value * count` to each other
    /// cell the body increments. Introduced by the optimizer; never parsed.
    ScaledCopy(i32, Block),
    /// Root node wrapping the top-level block
    Program(Block),
}

/// An ordered sequence of statements sharing one base pointer position.
#[derive(Clone, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<Statement>,
    /// True iff this block, or a loop body nested in it, shifts the pointer.
    /// Derived once from the finished statement list, never updated later.
    pub moves_pointer: bool,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        let moves_pointer = statements.iter().any(|st| match st {
            Statement::Move(count) => *count != 0,
            Statement::Loop(_, body) | Statement::ScaledCopy(_, body) => body.moves_pointer,
            _ => false,
        });
        Block {
            statements,
            moves_pointer,
        }
    }
}

impl fmt::Debug for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Statement::Increment(offset, count) => {
                write!(f, "Increment(offset={}, count={})", offset, count)
            }
            Statement::Move(count) => write!(f, "Move(count={})", count),
            Statement::Input(offset) => write!(f, "Input(offset={})", offset),
            Statement::Output(offset) => write!(f, "Output(offset={})", offset),
            Statement::Loop(offset, ref body) => {
                if f.alternate() {
                    write!(f, "Loop(offset={}, body={:#?})", offset, body.statements)
                } else {
                    write!(f, "Loop(offset={}, body={:?})", offset, body.statements)
                }
            }
            Statement::ScaledCopy(offset, ref body) => {
                if f.alternate() {
                    write!(f, "ScaledCopy(offset={}, body={:#?})", offset, body.statements)
                } else {
                    write!(f, "ScaledCopy(offset={}, body={:?})", offset, body.statements)
                }
            }
            Statement::Program(ref body) => {
                if f.alternate() {
                    write!(f, "Program(body={:#?})", body.statements)
                } else {
                    write!(f, "Program(body={:?})", body.statements)
                }
            }
        }
    }
}

impl fmt::Debug for Block {
    // moves_pointer is derivable; dumps show just the statement list
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.statements.fmt(f)
    }
}
