use crate::ast::{Block, Statement};

/// Folds qualifying loops into `ScaledCopy` statements, bottom-up. A loop
/// qualifies when its body has no net pointer motion, consists only of
/// `Increment` statements, and changes its own cell by exactly +/-1 per
/// iteration; such a loop is `old_value` iterations of the same additions,
/// which collapse to one multiply-accumulate per target plus a final zeroing
/// of the loop cell. The pure zero-loop `[-]` is the degenerate case with no
/// targets.
pub fn fold(st: Statement) -> Statement {
    match st {
        Statement::Program(body) => Statement::Program(fold_block(body)),
        Statement::Loop(offset, body) => {
            let mut body = fold_block(body);
            match loop_delta(offset, &body) {
                Some(delta) => {
                    if delta == 1 {
                        // An incrementing counter runs 256 - v iterations,
                        // i.e. -v mod 256, so each multiplier flips sign
                        for st in &mut body.statements {
                            if let Statement::Increment(_, count) = st {
                                *count = -*count;
                            }
                        }
                    }
                    Statement::ScaledCopy(offset, body)
                }
                None => Statement::Loop(offset, body),
            }
        }
        other => other,
    }
}

fn fold_block(block: Block) -> Block {
    Block::new(block.statements.into_iter().map(fold).collect())
}

/// Returns the loop's per-iteration change to its own cell if the loop is a
/// scaled-copy candidate, None otherwise.
fn loop_delta(offset: i32, body: &Block) -> Option<i32> {
    if body.moves_pointer {
        return None;
    }
    let mut delta = 0;
    for st in &body.statements {
        match st {
            Statement::Increment(o, count) => {
                if *o == offset {
                    delta += count;
                }
            }
            _ => return None,
        }
    }
    if delta.abs() == 1 {
        Some(delta)
    } else {
        None
    }
}
