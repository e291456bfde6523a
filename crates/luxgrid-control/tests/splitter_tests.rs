use luxgrid_control::splitter::split;
use luxgrid_control::{resolve_address, ArtNetConfig, ProtocolSelection};
use proptest::prelude::*;

#[test]
fn test_grid_two_by_two_hundred_splits_into_three_universes() {
    let indices: Vec<usize> = (0..400).collect();
    let address = resolve_address(&ProtocolSelection::ArtNet(ArtNetConfig {
        universe: 8,
        ..ArtNetConfig::default()
    }))
    .unwrap();
    let chunks = split(&indices, Some(170));
    let summary: Vec<(usize, u32)> = chunks
        .iter()
        .map(|c| (c.indices.len(), address.chunk(c.ordinal, c.start, 3).unwrap().channel))
        .collect();
    assert_eq!(summary, vec![(170, 8), (170, 9), (60, 10)]);
}

proptest! {
    #[test]
    fn prop_split_partitions_buffer(n in 0usize..2000, limit in 1usize..600, base in 0u16..1000) {
        let indices: Vec<usize> = (0..n).map(|i| i * 7 + 3).collect();
        let chunks = split(&indices, Some(limit));

        let expected = if n == 0 { 1 } else { n.div_ceil(limit) };
        prop_assert_eq!(chunks.len(), expected);
        prop_assert!(chunks.iter().all(|c| c.indices.len() <= limit));

        let joined: Vec<usize> = chunks.iter().flat_map(|c| c.indices.iter().copied()).collect();
        prop_assert_eq!(joined, indices);

        let address = resolve_address(&ProtocolSelection::ArtNet(ArtNetConfig {
            universe: base,
            ..ArtNetConfig::default()
        }))
        .unwrap();
        for (k, chunk) in chunks.iter().enumerate() {
            prop_assert_eq!(chunk.ordinal, k);
            prop_assert_eq!(chunk.start, k * limit);
            let chunk_address = address.chunk(chunk.ordinal, chunk.start, 3).unwrap();
            prop_assert_eq!(chunk_address.channel, u32::from(base) + k as u32);
        }
    }

    #[test]
    fn prop_without_limit_one_chunk(n in 0usize..2000) {
        let indices: Vec<usize> = (0..n).collect();
        let chunks = split(&indices, None);
        prop_assert_eq!(chunks.len(), 1);
        prop_assert_eq!(&chunks[0].indices, &indices);
    }
}
