#![no_main]

use arbitrary::Arbitrary;
use landmesh_core::Vertex;
use landmesh_wire::{CacheHeader, VertexCache, VertexCacheWriter};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    point_count: u8,
    timestamps: Vec<f32>,
    coords: Vec<[f32; 3]>,
}

fuzz_target!(|input: Input| {
    let point_count = input.point_count as usize;
    let frame_count = input.timestamps.len().min(64);
    if point_count == 0 {
        return;
    }

    let header = CacheHeader::new(frame_count, point_count).unwrap();
    let mut writer =
        VertexCacheWriter::new(Vec::new(), header, &input.timestamps[..frame_count]).unwrap();

    let mut coords = input.coords.iter().cycle();
    let mut frames = Vec::with_capacity(frame_count);
    for _ in 0..frame_count {
        let frame: Vec<Vertex> = (0..point_count)
            .map(|_| {
                let [x, y, z] = coords.next().copied().unwrap_or_default();
                Vertex::new(x, y, z)
            })
            .collect();
        writer.write_frame(&frame).unwrap();
        frames.push(frame);
    }
    let bytes = writer.finish().unwrap();

    let decoded = VertexCache::decode(&bytes).unwrap();
    assert_eq!(decoded.header, header);
    for (a, b) in decoded.frames.iter().flatten().zip(frames.iter().flatten()) {
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
        assert_eq!(a.z.to_bits(), b.z.to_bits());
    }
});
