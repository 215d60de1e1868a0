mod writer;

pub use writer::{render_rule_file, write_rule_file};
