#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_citations::lookup::{citing_titles_from, record_from_search};
use scholar_citations::models::{CiteResponse, SearchResponse};

fuzz_target!(|data: &[u8]| {
    // Malformed upstream JSON must surface as errors, never panics
    if let Ok(search) = serde_json::from_slice::<SearchResponse>(data) {
        let _ = record_from_search("fuzz", &search);
        let _ = citing_titles_from("fuzz", search);
    }
    let _ = serde_json::from_slice::<CiteResponse>(data);
});
