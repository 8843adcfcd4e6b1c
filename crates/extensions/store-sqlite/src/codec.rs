//! Column encodings.

/// Little-endian `f32` components.
pub(crate) fn encode_embedding(vector: &[f32]) -> Vec<u8> {
    vector.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// `None` when the blob is not a whole number of components.
pub(crate) fn decode_embedding(blob: &[u8]) -> Option<Vec<f32>> {
    if blob.len() % 4 != 0 {
        return None;
    }
    Some(
        blob.chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
    )
}

pub(crate) fn encode_amenities(amenities: &[String]) -> String {
    serde_json::to_string(amenities).unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn decode_amenities(json: &str) -> Vec<String> {
    serde_json::from_str(json).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_blob_layout() {
        let blob = encode_embedding(&[1.0, -0.5]);
        assert_eq!(blob.len(), 8);
        assert_eq!(&blob[..4], &1.0f32.to_le_bytes());
        assert_eq!(decode_embedding(&blob), Some(vec![1.0, -0.5]));
    }

    #[test]
    fn test_truncated_blob_rejected() {
        assert!(decode_embedding(&[0, 0, 128]).is_none());
    }

    #[test]
    fn test_amenities_fallback() {
        assert_eq!(decode_amenities("oops"), Vec::<String>::new());
        assert_eq!(
            decode_amenities(&encode_amenities(&["Pool".to_string()])),
            vec!["Pool"]
        );
    }
}
