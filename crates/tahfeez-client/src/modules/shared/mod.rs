mod output;

pub(crate) use output::{print_envelope, print_json};
