#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_citations::parse::authors_from_snippet;

fuzz_target!(|data: &[u8]| {
    if let Ok(snippet) = std::str::from_utf8(data) {
        let parsed = authors_from_snippet(snippet);
        assert!(!parsed.authors.is_empty());
        assert!(parsed.authors.iter().all(|name| !name.contains('.')));
    }
});
