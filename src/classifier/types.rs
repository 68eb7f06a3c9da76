#[derive(Debug, Clone, PartialEq, Default)]
/// Sparse feature vector: `(column, weight)` pairs sorted by column.
pub struct FeatureVector {
    dim: usize,
    entries: Vec<(usize, f32)>,
}

impl FeatureVector {
    /// Builds a vector of width `dim`; entries are sorted and out-of-range columns dropped.
    pub fn new(dim: usize, mut entries: Vec<(usize, f32)>) -> Self {
        entries.retain(|&(column, _)| column < dim);
        entries.sort_by_key(|&(column, _)| column);
        Self { dim, entries }
    }

    pub fn empty(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn to_dense(&self) -> Vec<f32> {
        let mut dense = vec![0.0f32; self.dim];
        for &(column, weight) in &self.entries {
            dense[column] = weight;
        }
        dense
    }

    pub fn norm(&self) -> f32 {
        self.entries
            .iter()
            .map(|(_, weight)| weight * weight)
            .sum::<f32>()
            .sqrt()
    }
}
