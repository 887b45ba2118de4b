/// Fixed-size character chunker. Chunk size and overlap are configuration
/// passed through from the caller, not tuned here.
#[derive(Clone, Copy, Debug)]
pub struct TextSplitter {
    chunk_size: usize,
    overlap: usize,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        if self.chunk_size == 0 {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let overlap = self.overlap.min(self.chunk_size.saturating_sub(1));
        let step = (self.chunk_size - overlap).max(1);

        let mut chunks = Vec::new();
        let mut start = 0usize;
        while start < chars.len() {
            let end = usize::min(start + self.chunk_size, chars.len());
            chunks.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += step;
        }
        chunks
    }
}
