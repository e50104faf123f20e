#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any document that deserializes must validate and serialize without panicking.
    if let Ok(document) = serde_json::from_slice::<fattura::Document>(data) {
        let _ = fattura::validate_document(&document);
        let strict = fattura::Validator::new(fattura::ValidationOptions {
            strict: true,
            ..Default::default()
        });
        let _ = strict.validate(&document);
        let _ = fattura::fatturapa::to_xml(&document);
    }
});
