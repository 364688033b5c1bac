//! Writing cleaned tables back out.

mod writer;

pub use writer::{write_table, write_table_to};
