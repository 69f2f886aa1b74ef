//! Fuzz target for `<bndbox>` extraction from XML annotations.
//!
//! Arbitrary bytes go to the XML reader; malformed documents and boxes must
//! come back as errors, never as panics.

#![no_main]

use bboxcrop::annotation::io_voc_xml::from_xml_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_xml_slice(data);
});
