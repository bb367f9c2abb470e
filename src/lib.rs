pub mod ast;
pub mod codegen;
pub mod optimizer;
pub mod parser;

pub use ast::{Block, Statement};
pub use codegen::{emit, TAPE_LENGTH};
pub use optimizer::fold;
pub use parser::{parse_program, ParseError, ParseErrorKind};
