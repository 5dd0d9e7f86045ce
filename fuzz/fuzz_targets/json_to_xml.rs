#![no_main]
use dictxml::{to_xml_string, Value};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<Value>(data) {
        if let Ok(xml) = to_xml_string(&value, None) {
            assert!(xml.starts_with('<'));
        }
    }
});
