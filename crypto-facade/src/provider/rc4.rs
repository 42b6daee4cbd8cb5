//! RC4 keystream generator

use zeroize::Zeroize;

use crate::algorithm::RC4_KEY_SIZES;
use crate::error::ProviderStatus;

pub struct Rc4 {
    state: [u8; 256],
    i: u8,
    j: u8,
}

impl Rc4 {
    pub fn new(key: &[u8]) -> Result<Self, ProviderStatus> {
        if !RC4_KEY_SIZES.contains(&key.len()) {
            return Err(ProviderStatus::KeySizeError);
        }

        let mut state = [0u8; 256];
        for (slot, value) in state.iter_mut().zip(0u8..=255) {
            *slot = value;
        }
        let mut j = 0u8;
        for i in 0..256 {
            j = j.wrapping_add(state[i]).wrapping_add(key[i % key.len()]);
            state.swap(i, j as usize);
        }

        Ok(Self { state, i: 0, j: 0 })
    }

    /// XOR the next `data.len()` keystream bytes into `data`.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            self.i = self.i.wrapping_add(1);
            self.j = self.j.wrapping_add(self.state[self.i as usize]);
            self.state.swap(self.i as usize, self.j as usize);
            let t = self.state[self.i as usize].wrapping_add(self.state[self.j as usize]);
            *byte ^= self.state[t as usize];
        }
    }
}

impl Drop for Rc4 {
    fn drop(&mut self) {
        self.state.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rc4_known_answer() {
        let mut cipher = Rc4::new(b"Key").unwrap();
        let mut data = b"Plaintext".to_vec();
        cipher.apply_keystream(&mut data);
        assert_eq!(hex::encode(&data), "bbf316e8d940af0ad3");
    }

    #[test]
    fn test_rc4_keystream_continues_across_calls() {
        let mut whole = b"Attack at dawn".to_vec();
        Rc4::new(b"Secret").unwrap().apply_keystream(&mut whole);
        assert_eq!(hex::encode(&whole), "45a01f645fc35b383552544b9bf5");

        let mut split = b"Attack at dawn".to_vec();
        let mut cipher = Rc4::new(b"Secret").unwrap();
        let (head, tail) = split.split_at_mut(5);
        cipher.apply_keystream(head);
        cipher.apply_keystream(tail);
        assert_eq!(split, whole);
    }

    #[test]
    fn test_rc4_key_size() {
        assert!(matches!(Rc4::new(b""), Err(ProviderStatus::KeySizeError)));
        assert!(Rc4::new(&[7u8; 512]).is_ok());
        assert!(matches!(Rc4::new(&[7u8; 513]), Err(ProviderStatus::KeySizeError)));
    }
}
