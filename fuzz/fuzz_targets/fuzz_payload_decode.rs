#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Decoding must not panic; a successful decode must re-encode.
        if let Ok(xml) = fattura::fatturapa::payload::decode_xml(s) {
            let _ = fattura::fatturapa::payload::encode_xml(&xml);
        }
    }
});
