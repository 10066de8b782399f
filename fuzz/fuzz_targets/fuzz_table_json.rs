#![no_main]

use libfuzzer_sys::fuzz_target;
use spotlight_core::{ChannelTable, ProgressMapper};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Arbitrary JSON either parses into a valid table or errors.
    let Ok(table) = ChannelTable::from_json_str(text) else {
        return;
    };
    if table.words.word_count > 4096 {
        return;
    }
    let mapper = ProgressMapper::new(table.clone()).expect("parsed tables are valid");
    for p in [f64::NEG_INFINITY, -1.0, 0.0, 0.5, 1.0, 2.0, f64::NAN] {
        let snap = mapper.evaluate(p);
        assert_eq!(snap.words.len(), table.words.word_count);
    }

    let json = table.to_json_pretty().expect("valid tables serialize");
    let again = ChannelTable::from_json_str(&json).expect("serialized tables parse");
    assert_eq!(again.words.word_count, table.words.word_count);
});
