#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = fattura::fatturapa::to_xml_fragment(
            "Estensione",
            &value,
            &fattura::fatturapa::FragmentOptions::default(),
        );
    }
});
