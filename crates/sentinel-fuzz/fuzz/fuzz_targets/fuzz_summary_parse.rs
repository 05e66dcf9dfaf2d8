#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_citations::parse::year_from_summary;

fuzz_target!(|data: &[u8]| {
    // Byte offsets around " -" must never split a character
    if let Ok(summary) = std::str::from_utf8(data) {
        if let Some(year) = year_from_summary(summary) {
            assert!((0..=9999).contains(&year));
        }
    }
});
