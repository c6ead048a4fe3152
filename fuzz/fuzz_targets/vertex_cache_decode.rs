#![no_main]

use landmesh_wire::VertexCache;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(cache) = VertexCache::decode(data) {
        // Anything that decodes must re-encode to the same bytes
        let encoded = cache.encode().expect("decoded cache re-encodes");
        assert_eq!(encoded, data);
    }
});
