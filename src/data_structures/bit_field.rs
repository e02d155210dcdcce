const WORD_BITS: usize = u64::BITS as usize;

/// A growable set of small integers stored as packed bits.
///
/// Used to track which entity slots are alive.
#[derive(Default, Clone, Debug)]
pub struct BitField {
	words: Vec<u64>,
}

impl BitField {
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a [BitField] holding at least `capacity` bits without reallocating.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			words: vec![0; words_for(capacity)],
		}
	}

	/// Bits beyond the current capacity read as unset.
	#[inline(always)]
	pub fn get(&self, index: usize) -> bool {
		let (word, bit) = locate(index);
		self.words.get(word).map_or(false, |w| w & bit != 0)
	}

	/// Setting a bit beyond the current capacity grows the field; unsetting one is a no-op.
	#[inline(always)]
	pub fn set(&mut self, index: usize, value: bool) {
		let (word, bit) = locate(index);
		if value {
			if word >= self.words.len() {
				self.words.resize(word + 1, 0);
			}
			self.words[word] |= bit;
		} else if let Some(w) = self.words.get_mut(word) {
			*w &= !bit;
		}
	}

	pub fn count_ones(&self) -> usize {
		self.words.iter().map(|w| w.count_ones() as usize).sum()
	}

	pub fn clear(&mut self) {
		self.words.iter_mut().for_each(|w| *w = 0);
	}

	/// Capacity in bits, always a multiple of 64.
	pub fn capacity(&self) -> usize {
		self.words.len() * WORD_BITS
	}

	/// Indices of all set bits, ascending.
	pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
		self.words.iter().enumerate().flat_map(|(index, word)| SetBits {
			base: index * WORD_BITS,
			word: *word,
		})
	}
}

struct SetBits {
	base: usize,
	word: u64,
}

impl Iterator for SetBits {
	type Item = usize;

	fn next(&mut self) -> Option<usize> {
		if self.word == 0 {
			return None;
		}
		let offset = self.word.trailing_zeros() as usize;
		// clear lowest set bit
		self.word &= self.word - 1;
		Some(self.base + offset)
	}
}

#[inline(always)]
fn locate(index: usize) -> (usize, u64) {
	(index / WORD_BITS, 1 << (index % WORD_BITS))
}

fn words_for(bits: usize) -> usize {
	(bits + WORD_BITS - 1) / WORD_BITS
}
