#![no_main]

use libfuzzer_sys::fuzz_target;
use pcc_types::HeaderLine;

// Fuzz target: HeaderLine::parse on arbitrary text.
//
// Any line that parses must print back to a line that parses to the
// same value.
fuzz_target!(|line: &str| {
    if let Ok(parsed) = HeaderLine::parse(line) {
        let printed = parsed.to_string();
        let reparsed = HeaderLine::parse(&printed).expect("printed header line must parse");
        assert_eq!(parsed, reparsed);
    }
});
