#![no_main]

use libfuzzer_sys::fuzz_target;
use rhizome_waypath_path::export::read_records;

fuzz_target!(|data: &str| {
    // read_records should never panic on any input
    if let Ok(records) = read_records(data.as_bytes()) {
        // Whatever parses must format back to a row that parses the same way.
        for record in records {
            let reparsed = record.to_string().parse::<rhizome_waypath_path::ExportRecord>();
            if record.position.is_finite() {
                assert_eq!(reparsed.ok(), Some(record));
            }
        }
    }
});
