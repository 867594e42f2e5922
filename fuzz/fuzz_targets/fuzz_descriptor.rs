#![no_main]

use libfuzzer_sys::fuzz_target;

mod utils;

fuzz_target!(|data: &[u8]| {
    let Some(text) = utils::truncate_utf8(data) else {
        return;
    };

    let _ = jstub_classfile::decode_type(text);
    if let Some(signature) = jstub_classfile::split_method_descriptor(text) {
        let _ = signature.return_type.to_string();
        for param in &signature.params {
            let _ = param.to_string();
        }
    }
});
