//! Rijndael with a 192-bit (24-byte) block and 256-bit key.
//!
//! AES is the 128-bit-block restriction of Rijndael, so the RustCrypto
//! `aes` crate cannot produce this configuration. The legacy RTON
//! containers were written with the full cipher (Nb = 6, Nk = 8,
//! Nr = 14), which is implemented here against the `cipher` trait
//! family so `cbc` mode and PKCS#7 padding come from the ecosystem.

use cipher::{
    BlockBackend, BlockCipher, BlockClosure, BlockDecrypt, BlockEncrypt, BlockSizeUser, KeyInit,
    KeySizeUser, ParBlocksSizeUser,
    consts::{U1, U24, U32},
    generic_array::GenericArray,
    inout::InOut,
};

/// Block size in bytes (Nb = 6 columns of 4 rows).
pub const BLOCK_SIZE: usize = 24;

/// Number of 32-bit columns in the state.
const NB: usize = 6;

/// Number of 32-bit words in the key.
const NK: usize = 8;

/// Number of rounds: max(Nb, Nk) + 6.
const ROUNDS: usize = 14;

/// Round-key words: Nb * (Nr + 1).
const RK_WORDS: usize = NB * (ROUNDS + 1);

const SBOX: [u8; 256] = [
    0x63, 0x7C, 0x77, 0x7B, 0xF2, 0x6B, 0x6F, 0xC5, 0x30, 0x01, 0x67, 0x2B, 0xFE, 0xD7, 0xAB, 0x76,
    0xCA, 0x82, 0xC9, 0x7D, 0xFA, 0x59, 0x47, 0xF0, 0xAD, 0xD4, 0xA2, 0xAF, 0x9C, 0xA4, 0x72, 0xC0,
    0xB7, 0xFD, 0x93, 0x26, 0x36, 0x3F, 0xF7, 0xCC, 0x34, 0xA5, 0xE5, 0xF1, 0x71, 0xD8, 0x31, 0x15,
    0x04, 0xC7, 0x23, 0xC3, 0x18, 0x96, 0x05, 0x9A, 0x07, 0x12, 0x80, 0xE2, 0xEB, 0x27, 0xB2, 0x75,
    0x09, 0x83, 0x2C, 0x1A, 0x1B, 0x6E, 0x5A, 0xA0, 0x52, 0x3B, 0xD6, 0xB3, 0x29, 0xE3, 0x2F, 0x84,
    0x53, 0xD1, 0x00, 0xED, 0x20, 0xFC, 0xB1, 0x5B, 0x6A, 0xCB, 0xBE, 0x39, 0x4A, 0x4C, 0x58, 0xCF,
    0xD0, 0xEF, 0xAA, 0xFB, 0x43, 0x4D, 0x33, 0x85, 0x45, 0xF9, 0x02, 0x7F, 0x50, 0x3C, 0x9F, 0xA8,
    0x51, 0xA3, 0x40, 0x8F, 0x92, 0x9D, 0x38, 0xF5, 0xBC, 0xB6, 0xDA, 0x21, 0x10, 0xFF, 0xF3, 0xD2,
    0xCD, 0x0C, 0x13, 0xEC, 0x5F, 0x97, 0x44, 0x17, 0xC4, 0xA7, 0x7E, 0x3D, 0x64, 0x5D, 0x19, 0x73,
    0x60, 0x81, 0x4F, 0xDC, 0x22, 0x2A, 0x90, 0x88, 0x46, 0xEE, 0xB8, 0x14, 0xDE, 0x5E, 0x0B, 0xDB,
    0xE0, 0x32, 0x3A, 0x0A, 0x49, 0x06, 0x24, 0x5C, 0xC2, 0xD3, 0xAC, 0x62, 0x91, 0x95, 0xE4, 0x79,
    0xE7, 0xC8, 0x37, 0x6D, 0x8D, 0xD5, 0x4E, 0xA9, 0x6C, 0x56, 0xF4, 0xEA, 0x65, 0x7A, 0xAE, 0x08,
    0xBA, 0x78, 0x25, 0x2E, 0x1C, 0xA6, 0xB4, 0xC6, 0xE8, 0xDD, 0x74, 0x1F, 0x4B, 0xBD, 0x8B, 0x8A,
    0x70, 0x3E, 0xB5, 0x66, 0x48, 0x03, 0xF6, 0x0E, 0x61, 0x35, 0x57, 0xB9, 0x86, 0xC1, 0x1D, 0x9E,
    0xE1, 0xF8, 0x98, 0x11, 0x69, 0xD9, 0x8E, 0x94, 0x9B, 0x1E, 0x87, 0xE9, 0xCE, 0x55, 0x28, 0xDF,
    0x8C, 0xA1, 0x89, 0x0D, 0xBF, 0xE6, 0x42, 0x68, 0x41, 0x99, 0x2D, 0x0F, 0xB0, 0x54, 0xBB, 0x16,
];

const INV_SBOX: [u8; 256] = {
    let mut inv = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        inv[SBOX[i] as usize] = i as u8;
        i += 1;
    }
    inv
};

/// Round constants for the key schedule. With Nk = 8 the expansion
/// consumes indices 1..=11.
const RCON: [u8; 12] = [
    0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1B, 0x36, 0x6C,
];

#[inline(always)]
const fn xtime(a: u8) -> u8 {
    if a & 0x80 != 0 { (a << 1) ^ 0x1B } else { a << 1 }
}

/// Multiplication in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1.
#[inline(always)]
const fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut r = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            r ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    r
}

/// Rijndael-256/192: 32-byte key, 24-byte block.
#[derive(Clone)]
pub struct Rijndael {
    round_keys: [[u8; 4]; RK_WORDS],
}

impl Rijndael {
    fn expand_key(key: &[u8; 32]) -> [[u8; 4]; RK_WORDS] {
        let mut w = [[0u8; 4]; RK_WORDS];

        for (i, word) in w.iter_mut().take(NK).enumerate() {
            word.copy_from_slice(&key[4 * i..4 * i + 4]);
        }

        for i in NK..RK_WORDS {
            let mut t = w[i - 1];

            if i % NK == 0 {
                // RotWord + SubWord + Rcon
                t = [t[1], t[2], t[3], t[0]];
                for b in &mut t {
                    *b = SBOX[*b as usize];
                }
                t[0] ^= RCON[i / NK];
            } else if i % NK == 4 {
                // Extra SubWord for Nk > 6, as in AES-256
                for b in &mut t {
                    *b = SBOX[*b as usize];
                }
            }

            for j in 0..4 {
                w[i][j] = w[i - NK][j] ^ t[j];
            }
        }

        w
    }

    #[inline]
    fn add_round_key(&self, state: &mut [u8; BLOCK_SIZE], round: usize) {
        for c in 0..NB {
            let word = &self.round_keys[round * NB + c];
            for r in 0..4 {
                state[4 * c + r] ^= word[r];
            }
        }
    }

    /// ShiftRows for Nb = 6 uses the same row offsets as AES: 1, 2, 3.
    #[inline]
    fn shift_rows(state: &mut [u8; BLOCK_SIZE]) {
        let src = *state;
        for r in 1..4 {
            for c in 0..NB {
                state[4 * c + r] = src[4 * ((c + r) % NB) + r];
            }
        }
    }

    #[inline]
    fn inv_shift_rows(state: &mut [u8; BLOCK_SIZE]) {
        let src = *state;
        for r in 1..4 {
            for c in 0..NB {
                state[4 * ((c + r) % NB) + r] = src[4 * c + r];
            }
        }
    }

    #[inline]
    fn mix_columns(state: &mut [u8; BLOCK_SIZE]) {
        for c in 0..NB {
            let col = [
                state[4 * c],
                state[4 * c + 1],
                state[4 * c + 2],
                state[4 * c + 3],
            ];
            state[4 * c] = xtime(col[0]) ^ (xtime(col[1]) ^ col[1]) ^ col[2] ^ col[3];
            state[4 * c + 1] = col[0] ^ xtime(col[1]) ^ (xtime(col[2]) ^ col[2]) ^ col[3];
            state[4 * c + 2] = col[0] ^ col[1] ^ xtime(col[2]) ^ (xtime(col[3]) ^ col[3]);
            state[4 * c + 3] = (xtime(col[0]) ^ col[0]) ^ col[1] ^ col[2] ^ xtime(col[3]);
        }
    }

    #[inline]
    fn inv_mix_columns(state: &mut [u8; BLOCK_SIZE]) {
        for c in 0..NB {
            let col = [
                state[4 * c],
                state[4 * c + 1],
                state[4 * c + 2],
                state[4 * c + 3],
            ];
            state[4 * c] =
                gmul(col[0], 14) ^ gmul(col[1], 11) ^ gmul(col[2], 13) ^ gmul(col[3], 9);
            state[4 * c + 1] =
                gmul(col[0], 9) ^ gmul(col[1], 14) ^ gmul(col[2], 11) ^ gmul(col[3], 13);
            state[4 * c + 2] =
                gmul(col[0], 13) ^ gmul(col[1], 9) ^ gmul(col[2], 14) ^ gmul(col[3], 11);
            state[4 * c + 3] =
                gmul(col[0], 11) ^ gmul(col[1], 13) ^ gmul(col[2], 9) ^ gmul(col[3], 14);
        }
    }

    fn encrypt_block_scalar(&self, block: &mut GenericArray<u8, U24>) {
        let mut state = [0u8; BLOCK_SIZE];
        state.copy_from_slice(block);

        self.add_round_key(&mut state, 0);

        for round in 1..=ROUNDS {
            for b in &mut state {
                *b = SBOX[*b as usize];
            }
            Self::shift_rows(&mut state);
            if round != ROUNDS {
                Self::mix_columns(&mut state);
            }
            self.add_round_key(&mut state, round);
        }

        block.copy_from_slice(&state);
    }

    fn decrypt_block_scalar(&self, block: &mut GenericArray<u8, U24>) {
        let mut state = [0u8; BLOCK_SIZE];
        state.copy_from_slice(block);

        self.add_round_key(&mut state, ROUNDS);

        for round in (0..ROUNDS).rev() {
            Self::inv_shift_rows(&mut state);
            for b in &mut state {
                *b = INV_SBOX[*b as usize];
            }
            self.add_round_key(&mut state, round);
            if round != 0 {
                Self::inv_mix_columns(&mut state);
            }
        }

        block.copy_from_slice(&state);
    }
}

impl KeySizeUser for Rijndael {
    type KeySize = U32;
}

impl KeyInit for Rijndael {
    fn new(key: &GenericArray<u8, Self::KeySize>) -> Self {
        let mut raw = [0u8; 32];
        raw.copy_from_slice(key);

        Self {
            round_keys: Self::expand_key(&raw),
        }
    }
}

impl BlockSizeUser for Rijndael {
    type BlockSize = U24;
}

impl ParBlocksSizeUser for Rijndael {
    type ParBlocksSize = U1;
}

impl BlockCipher for Rijndael {}

// Backend for encryption (forward)
impl BlockBackend for Rijndael {
    #[inline]
    fn proc_block(&mut self, mut block: InOut<'_, '_, GenericArray<u8, U24>>) {
        let input = block.clone_in();
        let block_ref = block.get_out();
        *block_ref = input;
        self.encrypt_block_scalar(block_ref);
    }
}

impl BlockEncrypt for Rijndael {
    fn encrypt_with_backend(&self, f: impl BlockClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut self.clone());
    }
}

// Backend for decryption (inverse cipher)
#[derive(Clone)]
struct RijndaelDecBackend(Rijndael);

impl BlockSizeUser for RijndaelDecBackend {
    type BlockSize = U24;
}

impl ParBlocksSizeUser for RijndaelDecBackend {
    type ParBlocksSize = U1;
}

impl BlockBackend for RijndaelDecBackend {
    #[inline]
    fn proc_block(&mut self, mut block: InOut<'_, '_, GenericArray<u8, U24>>) {
        let input = block.clone_in();
        let block_ref = block.get_out();
        *block_ref = input;
        self.0.decrypt_block_scalar(block_ref);
    }
}

impl BlockDecrypt for Rijndael {
    fn decrypt_with_backend(&self, f: impl BlockClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut RijndaelDecBackend(self.clone()));
    }
}
