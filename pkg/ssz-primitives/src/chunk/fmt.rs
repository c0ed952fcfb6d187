use std::fmt::{Debug, Display, Formatter, LowerHex, Result, UpperHex};

use crate::Chunk;

impl Display for Chunk {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Debug for Chunk {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl LowerHex for Chunk {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl UpperHex for Chunk {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}
