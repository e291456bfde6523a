//! Packet splitting
//!
//! Partitions a wire-ordered index buffer into contiguous chunks no longer than
//! the packet limit.

/// A contiguous run of the wire-ordered buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of the chunk inside the wire order, starting at 0
    pub ordinal: usize,
    /// Offset of the chunk's first point inside the wire order
    pub start: usize,
    pub indices: Vec<usize>,
}

/// Split `indices` into chunks of at most `limit` points.
///
/// Without a limit, or when the buffer fits, a single chunk holds everything.
/// An empty buffer yields one empty chunk.
pub fn split(indices: &[usize], limit: Option<usize>) -> Vec<Chunk> {
    let limit = match limit {
        Some(limit) if limit > 0 && indices.len() > limit => limit,
        _ => {
            return vec![Chunk {
                ordinal: 0,
                start: 0,
                indices: indices.to_vec(),
            }]
        }
    };
    indices
        .chunks(limit)
        .enumerate()
        .map(|(ordinal, run)| Chunk {
            ordinal,
            start: ordinal * limit,
            indices: run.to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_limit_is_one_chunk() {
        let indices: Vec<usize> = (0..400).collect();
        let chunks = split(&indices, None);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].indices, indices);
    }

    #[test]
    fn test_uneven_split() {
        let indices: Vec<usize> = (0..400).collect();
        let sizes: Vec<usize> = split(&indices, Some(170))
            .iter()
            .map(|c| c.indices.len())
            .collect();
        assert_eq!(sizes, vec![170, 170, 60]);
    }

    #[test]
    fn test_fits_in_one_packet() {
        let chunks = split(&[4, 5, 6], Some(3));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].start, 0);
    }

    #[test]
    fn test_empty_buffer() {
        let chunks = split(&[], Some(10));
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].indices.is_empty());
    }
}
