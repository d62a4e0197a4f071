#![no_main]

//! Fuzz target for directive scanning and option validation
//!
//! Arbitrary document sources must never panic the scanner, and every
//! option list it extracts must either validate or fail with an error.

use libfuzzer_sys::fuzz_target;

use git_changelog::DirectiveOptions;
use git_changelog::directive;

fuzz_target!(|source: &str| {
    for block in directive::scan_all(source) {
        let pairs = block
            .options
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()));
        if let Ok(options) = DirectiveOptions::from_pairs(pairs) {
            let _ = options.selection();
        }
    }
});
