//! `faultline chain`: build a deep context chain and render it

use faultline_error::{ChainError, RECORD_NOT_FOUND, ResultExt};

/// Layers of the call stack, innermost first, each wrapping at its own line
const LAYERS: [fn(ChainError, usize) -> ChainError; 6] = [
    |err, n| err.wrap(format!("err-{n}")),
    |err, n| err.wrap(format!("err-{n}")),
    |err, n| err.wrap(format!("err-{n}")),
    |err, n| err.wrap(format!("err-{n}")),
    |err, n| err.wrap(format!("err-{n}")),
    |err, n| err.wrap(format!("err-{n}")),
];

fn repository(depth: usize) -> Result<(), ChainError> {
    let mut err = RECORD_NOT_FOUND.err().with_location();
    // Past six layers the call sites repeat.
    for n in 1..=depth {
        err = LAYERS[(n - 1) % LAYERS.len()](err, n);
    }
    Err(err)
}

fn service(depth: usize) -> Result<(), ChainError> {
    repository(depth)
}

/// Look up a record that never exists, gaining `depth` notes on the way up.
pub fn lookup(depth: usize) -> Result<(), ChainError> {
    service(depth)
}

/// Render the chain and whether it is still recognisably "not found".
pub fn run(depth: usize) -> String {
    match lookup(depth) {
        Ok(()) => "no error".to_owned(),
        Err(err) => format!("{err:#}\nis record not found: {}", err.is(&RECORD_NOT_FOUND)),
    }
}

/// Let the chain reach the top level of the process
pub fn fail(depth: usize) -> Result<(), ChainError> {
    lookup(depth).wrap_err("chain command failed")
}
