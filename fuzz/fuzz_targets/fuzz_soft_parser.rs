#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Any byte sequence must parse without panicking
    let experiment = match geometa::soft::SoftParser::parse_reader("GSE0", Cursor::new(data)) {
        Ok(experiment) => experiment,
        Err(_) => return,
    };

    // Downstream stages must accept whatever the parser produced
    let schema = geometa::schema::CategorySchema::collect([&experiment]);
    let mut mapping = geometa::unify::UnificationMapping::new();
    for label in schema.labels() {
        mapping.insert(label, "Merged");
    }
    let _ = geometa::report::Report::build([&experiment], &mapping);
});
